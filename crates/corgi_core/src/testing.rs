/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! In-memory collaborators for controller tests.

use crate::action::StatusAction;
use crate::analytics::InteractionSink;
use crate::api::StatusApi;
use crate::cache::StatusCache;
use crate::session::Session;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use corgi_protocol::{Account, InteractionRecord, Status};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use tokio::sync::Notify;

pub fn sample_status(id: &str, author: &str) -> Status {
    Status {
        id: id.to_string(),
        uri: format!("https://example.social/users/{author}/statuses/{id}"),
        account: Account {
            id: author.to_string(),
            username: author.to_string(),
            acct: author.to_string(),
            ..Default::default()
        },
        content: "<p>hello</p>".to_string(),
        ..Default::default()
    }
}

pub fn signed_in(account_id: &str) -> Session {
    Session::signed_in(Account {
        id: account_id.to_string(),
        ..Default::default()
    })
}

/// Replays scripted responses in order. A gated api waits for one
/// `Notify` permit per call before answering.
#[derive(Default)]
pub struct FakeApi {
    responses: Mutex<VecDeque<Result<Status, String>>>,
    calls: Mutex<Vec<(StatusAction, bool, String)>>,
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Default::default()
        }
    }

    pub fn gate(&self) -> Arc<Notify> {
        self.gate.clone().unwrap_or_else(|| Arc::new(Notify::new()))
    }

    pub fn push_ok(&self, status: Status) {
        self.responses.lock().unwrap().push_back(Ok(status));
    }

    pub fn push_err(&self, msg: &str) {
        self.responses.lock().unwrap().push_back(Err(msg.to_string()));
    }

    /// `(action, activate, status_id)` per call.
    pub fn calls(&self) -> Vec<(StatusAction, bool, String)> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(
        &self,
        action: StatusAction,
        activate: bool,
        status_id: &str,
    ) -> Result<Status> {
        self.calls
            .lock()
            .unwrap()
            .push((action, activate, status_id.to_string()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(status)) => Ok(status),
            Some(Err(msg)) => Err(anyhow!(msg)),
            None => Err(anyhow!("no scripted response")),
        }
    }
}

#[async_trait]
impl StatusApi for FakeApi {
    async fn activate(&self, action: StatusAction, status_id: &str) -> Result<Status> {
        self.answer(action, true, status_id).await
    }

    async fn deactivate(&self, action: StatusAction, status_id: &str) -> Result<Status> {
        self.answer(action, false, status_id).await
    }
}

#[derive(Default)]
pub struct MemoryCache {
    stored: Mutex<Vec<Status>>,
    writers: Mutex<Vec<ThreadId>>,
    pub fail: AtomicBool,
}

impl MemoryCache {
    pub fn stored(&self) -> Vec<Status> {
        self.stored.lock().unwrap().clone()
    }

    /// Thread of every `store` call, failed ones included.
    pub fn writer_threads(&self) -> Vec<ThreadId> {
        self.writers.lock().unwrap().clone()
    }
}

impl StatusCache for MemoryCache {
    fn store(&self, status: &Status) -> Result<()> {
        self.writers.lock().unwrap().push(std::thread::current().id());
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("disk full"));
        }
        self.stored.lock().unwrap().push(status.clone());
        Ok(())
    }

    fn load(&self, status_id: &str) -> Result<Option<Status>> {
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|s| s.id == status_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<InteractionRecord>>,
    pub fail: AtomicBool,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl InteractionSink for RecordingSink {
    async fn record(&self, record: InteractionRecord) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("analytics unreachable"));
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}
