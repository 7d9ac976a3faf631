use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::{multipart::Form, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ResultLimit,
    protocol::{
        categories_route, memo_route, search_route, tags_route, vectorize_route, CreateResult,
        MemoDraft, SearchResponse, SearchResult, VectorizeResponse,
    },
};
use tracing::{debug, warn};

use crate::{config::GatewayConfig, error::GatewayError, MemoGateway};

/// `MemoGateway` over HTTP. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        route: &str,
        form: Form,
    ) -> Result<T, GatewayError> {
        let url = self.config.endpoint(route)?;
        debug!(operation, %url, "posting form to backend");
        self.execute(operation, self.http.post(url).multipart(form))
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        route: &str,
    ) -> Result<T, GatewayError> {
        let url = self.config.endpoint(route)?;
        debug!(operation, %url, "fetching from backend");
        self.execute(operation, self.http.get(url)).await
    }

    /// Sends one request and decodes its JSON body. Any non-2xx status turns
    /// into `GatewayError::Status`; call sites never look at status codes.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "backend request failed");
            GatewayError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = reason_phrase(&response);
            warn!(
                operation,
                status = status.as_u16(),
                reason = reason.as_deref().unwrap_or_default(),
                "backend rejected request"
            );
            return Err(GatewayError::status(status, reason.as_deref()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(operation, error = %e, "backend returned malformed body");
            GatewayError::from(e)
        })
    }

    fn search_form(query: &str, limit: ResultLimit) -> Form {
        let form = Form::new().text("query", query.to_string());
        match limit.hint() {
            Some(k) => form.text("k", k.to_string()),
            None => form,
        }
    }
}

/// Reason phrase from the status line. Only present when the backend sent
/// something other than the canonical phrase for the code.
fn reason_phrase(response: &Response) -> Option<String> {
    response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
}

#[async_trait]
impl MemoGateway for HttpGateway {
    async fn create_memo(&self, draft: &MemoDraft) -> Result<CreateResult, GatewayError> {
        let form = draft
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name, value.to_string())
            });
        self.post_form("create_memo", memo_route(), form).await
    }

    async fn search_memos(
        &self,
        query: &str,
        limit: ResultLimit,
    ) -> Result<Vec<SearchResult>, GatewayError> {
        if query.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "search query must not be empty".into(),
            ));
        }
        let response: SearchResponse = self
            .post_form("search_memos", search_route(), Self::search_form(query, limit))
            .await?;
        Ok(response.results)
    }

    async fn list_memos(&self) -> Result<Vec<SearchResult>, GatewayError> {
        let response: SearchResponse = self
            .post_form(
                "list_memos",
                search_route(),
                Self::search_form("", ResultLimit::Unbounded),
            )
            .await?;
        Ok(response.results)
    }

    async fn get_categories(&self) -> Result<Vec<String>, GatewayError> {
        self.get_json("get_categories", categories_route()).await
    }

    async fn get_tags(&self) -> Result<Vec<String>, GatewayError> {
        self.get_json("get_tags", tags_route()).await
    }

    async fn trigger_reindex(&self) -> Result<VectorizeResponse, GatewayError> {
        self.post_form("trigger_reindex", vectorize_route(), Form::new())
            .await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
