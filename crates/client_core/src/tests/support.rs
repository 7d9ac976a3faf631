use std::collections::VecDeque;

use async_trait::async_trait;
use shared::{
    domain::ResultLimit,
    protocol::{CreateResult, MemoDraft, SearchResult, VectorizeResponse},
};
use tokio::sync::Mutex;

use crate::{error::GatewayError, MemoGateway};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatewayCall {
    Create(MemoDraft),
    Search { query: String, limit: ResultLimit },
    List,
    Categories,
    Tags,
    Reindex,
}

type Scripted<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

/// Gateway that replays queued outcomes and records every call it receives.
/// An unscripted call fails with a transport error.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    create: Scripted<CreateResult>,
    search: Scripted<Vec<SearchResult>>,
    list: Scripted<Vec<SearchResult>>,
    categories: Scripted<Vec<String>>,
    tags: Scripted<Vec<String>>,
    reindex: Scripted<VectorizeResponse>,
    calls: Mutex<Vec<GatewayCall>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_create(mut self, outcome: Result<CreateResult, GatewayError>) -> Self {
        self.create.get_mut().push_back(outcome);
        self
    }

    pub(crate) fn on_search(mut self, outcome: Result<Vec<SearchResult>, GatewayError>) -> Self {
        self.search.get_mut().push_back(outcome);
        self
    }

    pub(crate) fn on_list(mut self, outcome: Result<Vec<SearchResult>, GatewayError>) -> Self {
        self.list.get_mut().push_back(outcome);
        self
    }

    pub(crate) fn on_categories(mut self, outcome: Result<Vec<String>, GatewayError>) -> Self {
        self.categories.get_mut().push_back(outcome);
        self
    }

    pub(crate) fn on_tags(mut self, outcome: Result<Vec<String>, GatewayError>) -> Self {
        self.tags.get_mut().push_back(outcome);
        self
    }

    pub(crate) fn on_reindex(mut self, outcome: Result<VectorizeResponse, GatewayError>) -> Self {
        self.reindex.get_mut().push_back(outcome);
        self
    }

    pub(crate) async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }

    async fn replay<T>(&self, call: GatewayCall, queue: &Scripted<T>) -> Result<T, GatewayError> {
        let name = format!("{call:?}");
        self.calls.lock().await.push(call);
        queue
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport(format!("unscripted call: {name}"))))
    }
}

#[async_trait]
impl MemoGateway for ScriptedGateway {
    async fn create_memo(&self, draft: &MemoDraft) -> Result<CreateResult, GatewayError> {
        self.replay(GatewayCall::Create(draft.clone()), &self.create)
            .await
    }

    async fn search_memos(
        &self,
        query: &str,
        limit: ResultLimit,
    ) -> Result<Vec<SearchResult>, GatewayError> {
        let call = GatewayCall::Search {
            query: query.to_string(),
            limit,
        };
        self.replay(call, &self.search).await
    }

    async fn list_memos(&self) -> Result<Vec<SearchResult>, GatewayError> {
        self.replay(GatewayCall::List, &self.list).await
    }

    async fn get_categories(&self) -> Result<Vec<String>, GatewayError> {
        self.replay(GatewayCall::Categories, &self.categories).await
    }

    async fn get_tags(&self) -> Result<Vec<String>, GatewayError> {
        self.replay(GatewayCall::Tags, &self.tags).await
    }

    async fn trigger_reindex(&self) -> Result<VectorizeResponse, GatewayError> {
        self.replay(GatewayCall::Reindex, &self.reindex).await
    }
}

pub(crate) fn memo(uuid: &str, title: &str, body: &str) -> SearchResult {
    let snippet: String = body.chars().take(100).collect();
    SearchResult {
        uuid: uuid.to_string(),
        title: title.to_string(),
        snippet,
        body: body.to_string(),
        category: "notes".to_string(),
        tags: "a,b".to_string(),
        created_at: "2024-05-01T12:30:00Z".to_string(),
        score: None,
    }
}

pub(crate) fn ranked_memos(count: usize) -> Vec<SearchResult> {
    (0..count)
        .map(|i| {
            let mut result = memo(&format!("m{i}"), &format!("title {i}"), &format!("body {i}"));
            result.score = Some(1.0 / (1.0 + i as f64));
            result
        })
        .collect()
}
