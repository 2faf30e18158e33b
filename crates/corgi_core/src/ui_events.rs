/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::Serialize;

fn now_ms_u64() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub const KIND_OPTIMISTIC: &str = "optimistic";
pub const KIND_RECONCILED: &str = "reconciled";
pub const KIND_ACTION_FAILED: &str = "action_failed";
pub const KIND_SIGNAL: &str = "signal";
pub const KIND_RESYNCED: &str = "resynced";

#[derive(Clone, Debug, Serialize)]
pub struct UiEvent {
    pub kind: String,
    pub ts_ms: u64,
    pub status_id: Option<String>,
    pub action: Option<String>,
}

impl UiEvent {
    pub fn new(kind: &str, status_id: Option<String>, action: Option<String>) -> Self {
        Self {
            kind: kind.to_string(),
            ts_ms: now_ms_u64(),
            status_id,
            action,
        }
    }
}
