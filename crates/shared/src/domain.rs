use std::{fmt, str::FromStr};

use crate::error::ParseSettingError;

/// Which backend listing a search session asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Backend-ranked similarity search; results arrive in rank order.
    #[default]
    Semantic,
    /// Full listing filtered locally by case-sensitive substring.
    Exact,
}

impl SearchMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How many results a semantic search asks the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultLimit {
    /// No `k` is sent; the backend returns every ranked record.
    #[default]
    Unbounded,
    /// `k` is sent as a result-count hint.
    Top(u32),
}

impl ResultLimit {
    pub fn hint(self) -> Option<u32> {
        match self {
            Self::Unbounded => None,
            Self::Top(k) => Some(k),
        }
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("all"),
            Self::Top(k) => write!(f, "{k}"),
        }
    }
}

impl FromStr for ResultLimit {
    type Err = ParseSettingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") || raw.eq_ignore_ascii_case("unbounded") {
            return Ok(Self::Unbounded);
        }
        match raw.parse::<u32>() {
            Ok(k) if k > 0 => Ok(Self::Top(k)),
            _ => Err(ParseSettingError::new("result limit", raw)),
        }
    }
}
