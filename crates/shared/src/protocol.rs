use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DraftError;

pub fn memo_route() -> &'static str {
    "api/memo"
}

pub fn search_route() -> &'static str {
    "api/search"
}

pub fn categories_route() -> &'static str {
    "api/categories"
}

pub fn tags_route() -> &'static str {
    "api/tags"
}

pub fn vectorize_route() -> &'static str {
    "api/vectorize"
}

/// A memo being edited before submission.
///
/// `tags` is a free-form comma separated list; the backend splits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoDraft {
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub tags: String,
    pub body: String,
}

impl MemoDraft {
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        tags: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            tags: tags.into(),
            body: body.into(),
        }
    }

    /// Form fields in the order the backend declares them.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("category", self.category.as_str()),
            ("title", self.title.as_str()),
            ("tags", self.tags.as_str()),
            ("body", self.body.as_str()),
        ]
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        for (name, value) in [
            ("category", &self.category),
            ("title", &self.title),
            ("body", &self.body),
        ] {
            if value.trim().is_empty() {
                return Err(DraftError::MissingField(name));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_empty()
            && self.title.is_empty()
            && self.tags.is_empty()
            && self.body.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResult {
    pub message: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uuid: String,
    pub title: String,
    pub snippet: String,
    pub body: String,
    pub category: String,
    pub tags: String,
    pub created_at: String,
    /// Only meaningful for semantic searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    /// Case-sensitive substring match over the searchable text fields.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.snippet.contains(needle) || self.body.contains(needle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizeResponse {
    pub status: String,
}
