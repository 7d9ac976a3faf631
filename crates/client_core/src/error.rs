use thiserror::Error;

/// Every failure a gateway call can produce.
///
/// Controllers only ever show `to_string()`; the variants exist so callers
/// and tests can tell a transport problem from a backend rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("invalid gateway configuration: {0}")]
    Config(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Transport(String),
    #[error("HTTP {status}{}", reason_suffix(.status_text))]
    Status { status: u16, status_text: String },
    #[error("malformed response body: {0}")]
    Decode(String),
}

fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(": {status_text}")
    }
}

impl GatewayError {
    /// `reason` is the phrase from the status line as sent by the backend;
    /// the canonical phrase is used when it sent none.
    pub fn status(status: reqwest::StatusCode, reason: Option<&str>) -> Self {
        let status_text = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .or_else(|| status.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self::Status {
            status: status.as_u16(),
            status_text,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
