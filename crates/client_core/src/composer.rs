//! Memo creation workflow: draft editing, submission, input suggestions and
//! the reindex trigger.

use shared::protocol::{CreateResult, MemoDraft};
use tracing::{info, warn};

use crate::MemoGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    Editing,
    Saving,
    Saved,
    Failed,
}

#[derive(Debug)]
pub struct MemoComposer {
    draft: MemoDraft,
    state: ComposeState,
    last_saved: Option<CreateResult>,
    error: Option<String>,
    categories: Vec<String>,
    tags: Vec<String>,
    reindex_status: Option<String>,
}

impl Default for MemoComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoComposer {
    pub fn new() -> Self {
        Self {
            draft: MemoDraft::default(),
            state: ComposeState::Editing,
            last_saved: None,
            error: None,
            categories: Vec::new(),
            tags: Vec::new(),
            reindex_status: None,
        }
    }

    pub fn draft(&self) -> &MemoDraft {
        &self.draft
    }

    /// Editing the draft puts the composer back into `Editing`.
    pub fn draft_mut(&mut self) -> &mut MemoDraft {
        self.state = ComposeState::Editing;
        &mut self.draft
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    pub fn last_saved(&self) -> Option<&CreateResult> {
        self.last_saved.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_known_category(&self, category: &str) -> bool {
        self.categories.iter().any(|known| known == category)
    }

    pub fn reindex_status(&self) -> Option<&str> {
        self.reindex_status.as_deref()
    }

    /// Validates and saves the draft. The draft is cleared only on success.
    pub async fn submit<G>(&mut self, gateway: &G) -> ComposeState
    where
        G: MemoGateway + ?Sized,
    {
        self.error = None;
        if let Err(err) = self.draft.validate() {
            self.error = Some(err.to_string());
            self.state = ComposeState::Failed;
            return self.state;
        }

        self.state = ComposeState::Saving;
        match gateway.create_memo(&self.draft).await {
            Ok(saved) => {
                info!(path = %saved.path, "memo saved");
                self.last_saved = Some(saved);
                self.draft.clear();
                self.state = ComposeState::Saved;
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.state = ComposeState::Failed;
            }
        }
        self.state
    }

    /// Refreshes the category and tag suggestion lists. Failures only empty
    /// the affected list; the form keeps working without suggestions.
    pub async fn load_suggestions<G>(&mut self, gateway: &G)
    where
        G: MemoGateway + ?Sized,
    {
        let (categories, tags) = futures::join!(gateway.get_categories(), gateway.get_tags());

        self.categories = categories.unwrap_or_else(|err| {
            warn!(error = %err, "failed to load category suggestions");
            Vec::new()
        });
        self.tags = tags.unwrap_or_else(|err| {
            warn!(error = %err, "failed to load tag suggestions");
            Vec::new()
        });
    }

    pub async fn reindex<G>(&mut self, gateway: &G) -> &str
    where
        G: MemoGateway + ?Sized,
    {
        let status = match gateway.trigger_reindex().await {
            Ok(response) => response.status,
            Err(err) => format!("error: {err}"),
        };
        self.reindex_status.insert(status).as_str()
    }
}

#[cfg(test)]
#[path = "tests/composer_tests.rs"]
mod tests;
