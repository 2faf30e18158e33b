/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::action::StatusAction;
use anyhow::{Context, Result};
use async_trait::async_trait;
use corgi_protocol::{Account, Status};
use reqwest::header::ACCEPT;
use reqwest::{Method, Response};
use urlencoding::encode;

/// Mutation endpoints of the remote status API. Every call returns the
/// status representation the server sent back.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn activate(&self, action: StatusAction, status_id: &str) -> Result<Status>;
    async fn deactivate(&self, action: StatusAction, status_id: &str) -> Result<Status>;
}

/// Mastodon `v1` REST client authenticated with a bearer token.
#[derive(Clone)]
pub struct MastodonClient {
    http: reqwest::Client,
    instance_url: String,
    access_token: String,
}

impl MastodonClient {
    pub fn new(http: reqwest::Client, instance_url: &str, access_token: &str) -> Self {
        Self {
            http,
            instance_url: instance_url.trim().trim_end_matches('/').to_string(),
            access_token: access_token.trim().to_string(),
        }
    }

    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    pub async fn fetch_status(&self, status_id: &str) -> Result<Status> {
        let url = format!("{}/api/v1/statuses/{}", self.instance_url, encode(status_id));
        let resp = self.send(Method::GET, &url).await?;
        resp.json::<Status>()
            .await
            .with_context(|| format!("parse status json from {url}"))
    }

    pub async fn verify_credentials(&self) -> Result<Account> {
        let url = format!("{}/api/v1/accounts/verify_credentials", self.instance_url);
        let resp = self.send(Method::GET, &url).await?;
        resp.json::<Account>()
            .await
            .with_context(|| format!("parse account json from {url}"))
    }

    async fn mutate(&self, status_id: &str, verb: &str) -> Result<Status> {
        let url = format!(
            "{}/api/v1/statuses/{}/{}",
            self.instance_url,
            encode(status_id),
            verb
        );
        let resp = self.send(Method::POST, &url).await?;
        resp.json::<Status>()
            .await
            .with_context(|| format!("parse {verb} response from {url}"))
    }

    async fn send(&self, method: Method, url: &str) -> Result<Response> {
        let mut req = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");
        if !self.access_token.is_empty() {
            req = req.bearer_auth(&self.access_token);
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("{method} {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("{method} {url} rejected: {status} {text}");
        }
        Ok(resp)
    }
}

#[async_trait]
impl StatusApi for MastodonClient {
    async fn activate(&self, action: StatusAction, status_id: &str) -> Result<Status> {
        self.mutate(status_id, action.activate_verb()).await
    }

    async fn deactivate(&self, action: StatusAction, status_id: &str) -> Result<Status> {
        self.mutate(status_id, action.deactivate_verb()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn status_json(id: &str, favourited: bool, count: u64) -> serde_json::Value {
        json!({
            "id": id,
            "account": { "id": "a1", "username": "ann", "acct": "ann" },
            "visibility": "public",
            "favourited": favourited,
            "favourites_count": count
        })
    }

    #[tokio::test]
    async fn favourite_posts_to_verb_endpoint() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/statuses/42/favourite")
                    .header("authorization", "Bearer tok");
                then.status(200).json_body(status_json("42", true, 4));
            })
            .await;

        let client = MastodonClient::new(reqwest::Client::new(), &server.base_url(), "tok");
        let status = client.activate(StatusAction::Favourite, "42").await?;

        mock.assert_async().await;
        assert!(status.favourited);
        assert_eq!(status.favourites_count, 4);
        Ok(())
    }

    #[tokio::test]
    async fn deactivate_uses_undo_verb() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/statuses/42/unbookmark");
                then.status(200).json_body(status_json("42", false, 0));
            })
            .await;

        let base = format!("{}/", server.base_url());
        let client = MastodonClient::new(reqwest::Client::new(), &base, "tok");
        client.deactivate(StatusAction::Bookmark, "42").await?;

        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/statuses/9/pin");
                then.status(422).body("{\"error\":\"Validation failed\"}");
            })
            .await;

        let client = MastodonClient::new(reqwest::Client::new(), &server.base_url(), "tok");
        let err = client
            .activate(StatusAction::Pin, "9")
            .await
            .expect_err("422 must fail");
        let msg = format!("{err:#}");
        assert!(msg.contains("422"), "{msg}");
        assert!(msg.contains("Validation failed"), "{msg}");
    }

    #[tokio::test]
    async fn fetch_and_verify_credentials() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/statuses/7");
                then.status(200).json_body(status_json("7", false, 1));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/accounts/verify_credentials");
                then.status(200).json_body(json!({ "id": "me", "username": "me", "acct": "me" }));
            })
            .await;

        let client = MastodonClient::new(reqwest::Client::new(), &server.base_url(), "tok");
        assert_eq!(client.fetch_status("7").await?.id, "7");
        assert_eq!(client.verify_credentials().await?.id, "me");
        Ok(())
    }
}
