use std::time::Duration;

use shared::domain::ResultLimit;
use url::Url;

use crate::error::GatewayError;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Where the memo backend lives and how long a request may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(GatewayError::Config("backend base url must not be empty".into()));
        }

        let mut url = Url::parse(base_url).map_err(|e| {
            GatewayError::Config(format!("invalid backend base url '{base_url}': {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::Config(format!(
                "unsupported scheme '{}' in backend base url; expected http or https",
                url.scheme()
            )));
        }

        // Routes are joined relative to the base, so its path must be a directory.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            base_url: url,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn endpoint(&self, route: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(route)
            .map_err(|e| GatewayError::Config(format!("cannot build url for '{route}': {e}")))
    }
}

/// Knobs for one search session. Only `new` sets the page size, so it is
/// always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    page_size: usize,
    search_limit: ResultLimit,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_limit: ResultLimit::Unbounded,
        }
    }
}

impl SessionConfig {
    pub fn new(page_size: usize, search_limit: ResultLimit) -> Result<Self, GatewayError> {
        if page_size == 0 {
            return Err(GatewayError::Config("page size must be at least 1".into()));
        }
        Ok(Self {
            page_size,
            search_limit,
        })
    }

    pub fn with_search_limit(mut self, search_limit: ResultLimit) -> Self {
        self.search_limit = search_limit;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_limit(&self) -> ResultLimit {
        self.search_limit
    }
}
