use async_trait::async_trait;
use shared::{
    domain::ResultLimit,
    protocol::{CreateResult, MemoDraft, SearchResult, VectorizeResponse},
};

pub mod composer;
pub mod config;
pub mod error;
pub mod search_session;
pub mod transport;

pub use composer::{ComposeState, MemoComposer};
pub use config::{GatewayConfig, SessionConfig};
pub use error::GatewayError;
pub use search_session::{Completion, SearchSession, SearchState, SearchTicket};
pub use transport::HttpGateway;

/// Typed access to the memo backend.
///
/// Implementations hold no per-call state: each method issues at most one
/// request and returns a fresh value or an error. Retrying is up to callers.
#[async_trait]
pub trait MemoGateway: Send + Sync {
    async fn create_memo(&self, draft: &MemoDraft) -> Result<CreateResult, GatewayError>;
    /// Ranked similarity search. `query` must not be empty.
    async fn search_memos(
        &self,
        query: &str,
        limit: ResultLimit,
    ) -> Result<Vec<SearchResult>, GatewayError>;
    /// Every stored memo, in backend order.
    async fn list_memos(&self) -> Result<Vec<SearchResult>, GatewayError>;
    async fn get_categories(&self) -> Result<Vec<String>, GatewayError>;
    async fn get_tags(&self) -> Result<Vec<String>, GatewayError>;
    async fn trigger_reindex(&self) -> Result<VectorizeResponse, GatewayError>;
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
