/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn default_data_dir() -> Result<PathBuf> {
    if let Ok(v) = std::env::var("CORGI_DATA_DIR") {
        return Ok(PathBuf::from(v));
    }
    let proj = ProjectDirs::from("net", "corgi", "Corgi")
        .context("unable to determine platform data dir")?;
    Ok(proj.data_local_dir().to_path_buf())
}

pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(v) = std::env::var("CORGI_CONFIG") {
        return Ok(PathBuf::from(v));
    }
    let proj = ProjectDirs::from("net", "corgi", "Corgi")
        .context("unable to determine platform config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

#[derive(Clone, Debug, serde::Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Mastodon-compatible instance, e.g. `https://mastodon.social`.
    #[serde(default)]
    pub instance_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Base URL of the interactions side service. Analytics is off when unset.
    #[serde(default)]
    pub analytics_url: Option<String>,
    /// Sent as `context.feed_id` with every interaction record.
    #[serde(default)]
    pub feed_id: Option<String>,
    /// SQLite status cache. Defaults to `<data dir>/status_cache.db`.
    #[serde(default)]
    pub cache_path: Option<String>,
    /// HTTP client timeout for status API requests (seconds).
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
    #[serde(default)]
    pub analytics_timeout_secs: Option<u64>,
    /// `tracing` filter directive; see `logging::default_filter`.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            instance_url: "https://mastodon.social".to_string(),
            access_token: None,
            analytics_url: None,
            feed_id: None,
            cache_path: None,
            http_timeout_secs: None,
            analytics_timeout_secs: None,
            log_filter: None,
        }
    }
}

impl ClientConfig {
    /// Reads a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let mut cfg: ClientConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parse config: {}", path.display()))?;
        if cfg.instance_url.trim().is_empty() {
            cfg.instance_url = Self::default().instance_url;
        }
        Ok(cfg)
    }

    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|k| std::env::var(k).ok());
        self
    }

    fn apply_vars<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("CORGI_INSTANCE_URL") {
            self.instance_url = v;
        }
        if let Some(v) = get("CORGI_ACCESS_TOKEN") {
            self.access_token = Some(v);
        }
        if let Some(v) = get("CORGI_ANALYTICS_URL") {
            self.analytics_url = Some(v);
        }
        if let Some(v) = get("CORGI_FEED_ID") {
            self.feed_id = Some(v);
        }
        if let Some(v) = get("CORGI_CACHE_PATH") {
            self.cache_path = Some(v);
        }
        if let Some(v) = get("CORGI_LOG") {
            self.log_filter = Some(v);
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(30).clamp(1, 300))
    }

    pub fn analytics_timeout(&self) -> Duration {
        Duration::from_secs(self.analytics_timeout_secs.unwrap_or(5).clamp(1, 60))
    }

    pub fn cache_path(&self) -> Result<PathBuf> {
        match self.cache_path.as_deref() {
            Some(p) => Ok(PathBuf::from(p)),
            None => Ok(default_data_dir()?.join("status_cache.db")),
        }
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.http_timeout())
            .user_agent(concat!("corgi/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")
    }
}
