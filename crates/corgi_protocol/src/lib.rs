/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
    /// Server-specific scopes such as `local` or `limited`.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub url: String,
}

/// A post as returned by the Mastodon `v1` statuses API.
///
/// `more_like_this` and `less_like_this` never come from the server; they
/// default to false on deserialization and only live on the client.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    pub account: Account,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub spoiler_text: String,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
    #[serde(default)]
    pub replies_count: u64,
    #[serde(default)]
    pub reblogs_count: u64,
    #[serde(default)]
    pub favourites_count: u64,
    #[serde(default)]
    pub reblogged: bool,
    #[serde(default)]
    pub favourited: bool,
    #[serde(default)]
    pub bookmarked: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub more_like_this: bool,
    #[serde(default)]
    pub less_like_this: bool,
}

/// Body accepted by the interactions endpoint of the analytics side service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InteractionRecord {
    pub user_id: String,
    pub post_id: String,
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

impl InteractionRecord {
    pub fn new(user_id: &str, post_id: &str, action_type: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            action_type: action_type.to_string(),
            context: Map::new(),
        }
    }

    pub fn with_context(mut self, key: &str, value: Value) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }
}

/// One row as listed back by the interactions service. Per-post listings
/// carry `user_alias` (a salted hash, never the raw id); per-user listings
/// carry `post_id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredInteraction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub action_type: String,
    #[serde(default)]
    pub context: Value,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PostInteractions {
    pub post_id: String,
    #[serde(default)]
    pub interactions: Vec<StoredInteraction>,
}

/// Everything the service holds about one user.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UserData {
    pub user_id: String,
    #[serde(default)]
    pub interactions: Vec<StoredInteraction>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FavouriteEntry {
    pub post_id: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Favourites {
    pub user_id: String,
    #[serde(default)]
    pub favourites: Vec<FavouriteEntry>,
}

/// Interaction counts per `action_type` for records whose context carries
/// the given `feed_id`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct FeedStats {
    #[serde(default)]
    pub feed_id: Option<String>,
    #[serde(default)]
    pub stats: BTreeMap<String, u64>,
}
