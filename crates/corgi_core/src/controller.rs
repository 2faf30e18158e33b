/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::action::{ActionState, Signal, StatusAction};
use crate::analytics::InteractionSink;
use crate::api::StatusApi;
use crate::cache::StatusCache;
use crate::session::Session;
use crate::ui_events::{
    UiEvent, KIND_ACTION_FAILED, KIND_OPTIMISTIC, KIND_RECONCILED, KIND_RESYNCED, KIND_SIGNAL,
};
use anyhow::Result;
use corgi_protocol::{InteractionRecord, Status, Visibility};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Collaborators of a [`StatusActions`] controller.
#[derive(Clone)]
pub struct StatusDeps {
    pub api: Arc<dyn StatusApi>,
    pub cache: Arc<dyn StatusCache>,
    pub analytics: Arc<dyn InteractionSink>,
    pub session: Arc<Session>,
    pub ui_events: Option<broadcast::Sender<UiEvent>>,
    /// Attached as `context` to every interaction record, e.g. `feed_id`.
    pub interaction_context: Map<String, Value>,
}

impl StatusDeps {
    pub fn new(
        api: Arc<dyn StatusApi>,
        cache: Arc<dyn StatusCache>,
        analytics: Arc<dyn InteractionSink>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            api,
            cache,
            analytics,
            session,
            ui_events: None,
            interaction_context: Map::new(),
        }
    }

    pub fn with_ui_events(mut self, tx: broadcast::Sender<UiEvent>) -> Self {
        self.ui_events = Some(tx);
        self
    }

    pub fn with_interaction_context(mut self, key: &str, value: Value) -> Self {
        self.interaction_context.insert(key.to_string(), value);
        self
    }
}

/// Local view state of one displayed status.
///
/// Toggles update the local copy right away, then reconcile it with the
/// server response on a spawned task. The returned handle can be awaited to
/// observe settling or dropped. Nothing is ever rolled back: a failed call
/// leaves the optimistic state in place and is only logged.
///
/// Toggles spawn onto the current tokio runtime and must be called from
/// inside one.
#[derive(Clone)]
pub struct StatusActions {
    status: Arc<Mutex<Status>>,
    loading: Arc<Mutex<ActionState>>,
    deps: StatusDeps,
}

impl StatusActions {
    pub fn new(status: Status, deps: StatusDeps) -> Self {
        Self {
            status: Arc::new(Mutex::new(status)),
            loading: Arc::new(Mutex::new(ActionState::default())),
            deps,
        }
    }

    pub fn status(&self) -> Status {
        self.lock_status().clone()
    }

    pub fn action_state(&self) -> ActionState {
        *self.lock_loading()
    }

    pub fn is_loading(&self, action: StatusAction) -> bool {
        self.lock_loading().get(action)
    }

    /// Replaces the local copy wholesale. Optimistic edits that have not
    /// been reconciled yet are lost.
    pub fn resync(&self, status: Status) {
        let id = status.id.clone();
        *self.lock_status() = status;
        debug!(status = %id, "resynced from source");
        self.emit(KIND_RESYNCED, &id, None);
    }

    /// Resyncs on every new value published by `source` until its sender
    /// goes away.
    pub fn follow(&self, mut source: watch::Receiver<Status>) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            while source.changed().await.is_ok() {
                let next = source.borrow_and_update().clone();
                this.resync(next);
            }
        })
    }

    /// Direct posts and unrecognised scopes are never reblogged; private ones
    /// only by their author.
    pub fn can_reblog(&self) -> bool {
        let Some(me) = self.deps.session.current_account_id() else {
            return false;
        };
        if self.is_loading(StatusAction::Reblog) {
            return false;
        }
        let status = self.lock_status();
        match status.visibility {
            Visibility::Direct | Visibility::Unknown => false,
            Visibility::Private => status.account.id == me,
            Visibility::Public | Visibility::Unlisted => true,
        }
    }

    pub fn toggle_reblog(&self) -> Option<JoinHandle<()>> {
        self.toggle(StatusAction::Reblog)
    }

    pub fn toggle_favourite(&self) -> Option<JoinHandle<()>> {
        self.toggle(StatusAction::Favourite)
    }

    pub fn toggle_bookmark(&self) -> Option<JoinHandle<()>> {
        self.toggle(StatusAction::Bookmark)
    }

    pub fn toggle_pin(&self) -> Option<JoinHandle<()>> {
        self.toggle(StatusAction::Pin)
    }

    pub fn toggle_mute(&self) -> Option<JoinHandle<()>> {
        self.toggle(StatusAction::Mute)
    }

    pub fn toggle_more_like_this(&self) -> Option<JoinHandle<()>> {
        self.toggle_signal(Signal::MoreLikeThis)
    }

    pub fn toggle_less_like_this(&self) -> Option<JoinHandle<()>> {
        self.toggle_signal(Signal::LessLikeThis)
    }

    /// Returns `None` without touching anything when signed out.
    pub fn toggle(&self, action: StatusAction) -> Option<JoinHandle<()>> {
        if !self.deps.session.is_authenticated() {
            return None;
        }

        self.lock_loading().begin(action);
        let (speculative, is_cancel, prev_count) = {
            let mut status = self.lock_status();
            let is_cancel = action.flag(&status);
            let prev_count = action.count(&status);
            action.set_flag(&mut status, !is_cancel);
            if let Some(count) = prev_count {
                let next = if is_cancel {
                    count.saturating_sub(1)
                } else {
                    count.saturating_add(1)
                };
                action.set_count(&mut status, next);
            }
            (status.clone(), is_cancel, prev_count)
        };
        debug!(
            status = %speculative.id,
            action = ?action,
            cancel = is_cancel,
            "optimistic toggle"
        );
        self.emit(KIND_OPTIMISTIC, &speculative.id, Some(action.interaction_tag()));

        let this = self.clone();
        Some(tokio::spawn(async move {
            let status_id = speculative.id.clone();
            this.persist(speculative).await;
            this.settle(action, status_id, is_cancel, prev_count).await;
        }))
    }

    async fn settle(
        self,
        action: StatusAction,
        status_id: String,
        is_cancel: bool,
        prev_count: Option<u64>,
    ) {
        let res = if is_cancel {
            self.deps.api.deactivate(action, &status_id).await
        } else {
            self.deps.api.activate(action, &status_id).await
        };

        match res {
            Ok(fresh) => {
                let fresh = normalize_response(action, fresh, is_cancel, prev_count);
                // A resync to another post while the call was pending wins.
                let (reconciled, applied) = {
                    let mut status = self.lock_status();
                    if status.id == status_id {
                        let mut next = fresh;
                        next.more_like_this = status.more_like_this;
                        next.less_like_this = status.less_like_this;
                        *status = next.clone();
                        (next, true)
                    } else {
                        (fresh, false)
                    }
                };
                self.persist(reconciled).await;
                if applied {
                    debug!(status = %status_id, action = ?action, "reconciled");
                    self.emit(KIND_RECONCILED, &status_id, Some(action.interaction_tag()));
                } else {
                    debug!(
                        status = %status_id,
                        action = ?action,
                        "view moved on, response only cached"
                    );
                }
            }
            Err(e) => {
                warn!(status = %status_id, action = ?action, "status action failed: {e:#}");
                self.emit(KIND_ACTION_FAILED, &status_id, Some(action.interaction_tag()));
            }
        }
        self.lock_loading().finish(action);

        self.report(action.interaction_tag(), &status_id).await;
    }

    /// Flips a recommendation flag locally and reports it. No counters, no
    /// status API, no cache.
    pub fn toggle_signal(&self, signal: Signal) -> Option<JoinHandle<()>> {
        if !self.deps.session.is_authenticated() {
            return None;
        }
        let status_id = {
            let mut status = self.lock_status();
            let next = !signal.flag(&status);
            signal.set_flag(&mut status, next);
            status.id.clone()
        };
        debug!(status = %status_id, signal = ?signal, "signal toggled");
        self.emit(KIND_SIGNAL, &status_id, Some(signal.interaction_tag()));

        let this = self.clone();
        Some(tokio::spawn(async move {
            this.report(signal.interaction_tag(), &status_id).await;
        }))
    }

    async fn report(&self, action_type: &str, status_id: &str) {
        let Some(user_id) = self.deps.session.current_account_id() else {
            debug!(status = %status_id, action_type, "signed out before report, skipping");
            return;
        };
        let mut record = InteractionRecord::new(&user_id, status_id, action_type);
        record.context = self.deps.interaction_context.clone();
        if let Err(e) = self.deps.analytics.record(record).await {
            warn!(status = %status_id, action_type, "interaction log failed: {e:#}");
        }
    }

    async fn persist(&self, status: Status) {
        let status_id = status.id.clone();
        if let Err(e) = self.store_off_thread(status).await {
            warn!(status = %status_id, "status cache write failed: {e:#}");
        }
    }

    async fn store_off_thread(&self, status: Status) -> Result<()> {
        tokio::task::spawn_blocking({
            let cache = self.deps.cache.clone();
            move || -> Result<()> { cache.store(&status) }
        })
        .await??;
        Ok(())
    }

    fn emit(&self, kind: &str, status_id: &str, action: Option<&str>) {
        if let Some(tx) = &self.deps.ui_events {
            let _ = tx.send(UiEvent::new(
                kind,
                Some(status_id.to_string()),
                action.map(str::to_string),
            ));
        }
    }

    fn lock_status(&self) -> MutexGuard<'_, Status> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_loading(&self) -> MutexGuard<'_, ActionState> {
        self.loading.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Applies the two response fix-ups before a server status replaces the
/// local copy.
///
/// A reblog response wraps the original post in `reblog`; the original is
/// what the view shows. Undo calls often come back with the counter not yet
/// decremented, so a count equal to the pre-toggle value is lowered by one.
fn normalize_response(
    action: StatusAction,
    mut fresh: Status,
    is_cancel: bool,
    prev_count: Option<u64>,
) -> Status {
    if action == StatusAction::Reblog {
        if let Some(inner) = fresh.reblog.take() {
            fresh = *inner;
        }
    }
    if is_cancel {
        if let (Some(prev), Some(now)) = (prev_count, action.count(&fresh)) {
            if prev == now {
                action.set_count(&mut fresh, now.saturating_sub(1));
            }
        }
    }
    fresh
}
