use std::{fs, io, path::Path, time::Duration};

use anyhow::{Context, Result};
use client_core::{GatewayConfig, SessionConfig};
use serde::Deserialize;
use shared::domain::ResultLimit;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: usize,
    pub search_limit: ResultLimit,
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            page_size: client_core::config::DEFAULT_PAGE_SIZE,
            search_limit: ResultLimit::Unbounded,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    page_size: Option<usize>,
    search_limit: Option<toml::Value>,
    timeout_secs: Option<u64>,
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}

impl Settings {
    fn apply_file(&mut self, raw: &str) -> Result<()> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.api_url {
            self.api_url = v;
        }
        if let Some(v) = file_cfg.page_size {
            self.page_size = v;
        }
        if let Some(v) = file_cfg.search_limit {
            let raw = match v {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            self.search_limit = raw.parse()?;
        }
        if let Some(v) = file_cfg.timeout_secs {
            self.timeout_secs = Some(v);
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("MEMO_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("APP__API_URL") {
            self.api_url = v;
        }

        if let Some(v) = lookup("APP__PAGE_SIZE") {
            self.page_size = v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("invalid APP__PAGE_SIZE '{v}'"))?;
        }
        if let Some(v) = lookup("APP__SEARCH_LIMIT") {
            self.search_limit = v.parse()?;
        }
        if let Some(v) = lookup("APP__TIMEOUT_SECS") {
            let secs = v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid APP__TIMEOUT_SECS '{v}'"))?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    pub fn gateway_config(&self) -> Result<GatewayConfig> {
        let config = GatewayConfig::new(&self.api_url)?;
        Ok(match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }

    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig::new(self.page_size, self.search_limit)?)
    }
}
