/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use corgi_protocol::{Favourites, FeedStats, InteractionRecord, PostInteractions, UserData};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use urlencoding::encode;

/// Side channel for interaction events. Never the primary status API.
#[async_trait]
pub trait InteractionSink: Send + Sync {
    async fn record(&self, record: InteractionRecord) -> Result<()>;
}

/// Client of the interactions service: posts records to
/// `{base}/interactions` and reads back per-post, per-user, favourite and
/// per-feed views. The service answers 404 for an empty listing; those come
/// back as empty values here.
#[derive(Clone)]
pub struct HttpInteractionSink {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl HttpInteractionSink {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build analytics http client")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let endpoint = format!("{base_url}/interactions");
        Self {
            client,
            base_url,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn post_interactions(&self, post_id: &str) -> Result<PostInteractions> {
        let path = format!("/interactions/{}", encode(post_id));
        let listing = self.get_json(&path, &[]).await?;
        Ok(listing.unwrap_or_else(|| PostInteractions {
            post_id: post_id.to_string(),
            interactions: Vec::new(),
        }))
    }

    /// Export of everything stored for `user_id`.
    pub async fn user_data(&self, user_id: &str) -> Result<UserData> {
        let path = format!("/user_data/{}", encode(user_id));
        let data = self.get_json(&path, &[]).await?;
        Ok(data.unwrap_or_else(|| UserData {
            user_id: user_id.to_string(),
            interactions: Vec::new(),
        }))
    }

    pub async fn favourites(&self, user_id: &str) -> Result<Favourites> {
        let favs = self
            .get_json("/interactions/favourites", &[("user_id", user_id)])
            .await?;
        Ok(favs.unwrap_or_else(|| Favourites {
            user_id: user_id.to_string(),
            favourites: Vec::new(),
        }))
    }

    pub async fn feed_stats(&self, feed_id: &str) -> Result<FeedStats> {
        let stats = self
            .get_json("/interactions/analytics", &[("feed_id", feed_id)])
            .await?;
        Ok(stats.unwrap_or_else(|| FeedStats {
            feed_id: Some(feed_id.to_string()),
            ..Default::default()
        }))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("get {url}"))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("analytics query rejected: {} {}", status, text);
        }
        let body = resp
            .json::<T>()
            .await
            .with_context(|| format!("parse analytics json from {url}"))?;
        Ok(Some(body))
    }
}

#[async_trait]
impl InteractionSink for HttpInteractionSink {
    async fn record(&self, record: InteractionRecord) -> Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&record)
            .send()
            .await
            .with_context(|| format!("post interaction: {}", self.endpoint))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("interaction rejected: {} {}", status, text);
        }
        Ok(())
    }
}

/// Used when no analytics endpoint is configured.
#[derive(Clone, Copy, Default)]
pub struct NoopInteractionSink;

#[async_trait]
impl InteractionSink for NoopInteractionSink {
    async fn record(&self, record: InteractionRecord) -> Result<()> {
        tracing::trace!(action = %record.action_type, post = %record.post_id, "analytics disabled");
        Ok(())
    }
}
