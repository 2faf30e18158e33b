/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use corgi_core::analytics::{HttpInteractionSink, InteractionSink, NoopInteractionSink};
use corgi_core::api::MastodonClient;
use corgi_core::cache::{SqliteStatusCache, StatusCache};
use corgi_core::config::{default_config_path, ClientConfig};
use corgi_core::logging::init_tracing;
use corgi_core::session::Session;
use corgi_core::ui_events::UiEvent;
use corgi_core::{Signal, StatusAction, StatusActions, StatusDeps};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

const USAGE: &str =
    "usage: corgi_status_toggle <status_id> <reblog|favourite|bookmark|pin|mute|more|less>";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let status_id = env::args().nth(1).unwrap_or_default();
    let which = env::args().nth(2).unwrap_or_default();
    if status_id.trim().is_empty() || which.trim().is_empty() {
        anyhow::bail!(USAGE);
    }
    let action = StatusAction::from_str(&which);
    let signal = Signal::from_str(&which);
    if action.is_none() && signal.is_none() {
        anyhow::bail!("unknown action {which:?}; {USAGE}");
    }

    let cfg_path = default_config_path()?;
    let cfg = ClientConfig::load(&cfg_path)?.apply_env();
    init_tracing(cfg.log_filter.as_deref());
    info!("config: {}", cfg_path.display());

    let token = cfg
        .access_token
        .clone()
        .context("missing access token (set CORGI_ACCESS_TOKEN)")?;
    let client = MastodonClient::new(cfg.http_client()?, &cfg.instance_url, &token);
    let me = client.verify_credentials().await?;
    info!("signed in as {} on {}", me.acct, client.instance_url());
    let session = Arc::new(Session::signed_in(me));

    let cache = Arc::new(SqliteStatusCache::open(cfg.cache_path()?)?);
    let http_sink = match cfg.analytics_url.as_deref() {
        Some(url) => Some(Arc::new(HttpInteractionSink::new(url, cfg.analytics_timeout())?)),
        None => None,
    };
    let analytics: Arc<dyn InteractionSink> = match &http_sink {
        Some(sink) => sink.clone(),
        None => Arc::new(NoopInteractionSink),
    };

    let status = client.fetch_status(status_id.trim()).await?;
    cache.store(&status)?;

    let (ui_tx, mut ui_rx) = tokio::sync::broadcast::channel::<UiEvent>(16);
    let mut deps = StatusDeps::new(Arc::new(client), cache.clone(), analytics, session)
        .with_ui_events(ui_tx);
    if let Some(feed) = cfg.feed_id.as_deref() {
        deps = deps.with_interaction_context("feed_id", serde_json::json!(feed));
    }
    let ctl = StatusActions::new(status, deps);

    let pending = match (action, signal) {
        (Some(action), _) => ctl.toggle(action),
        (None, Some(signal)) => ctl.toggle_signal(signal),
        (None, None) => None,
    };
    if let Some(pending) = pending {
        pending.await.context("toggle task")?;
    }
    while let Ok(ev) = ui_rx.try_recv() {
        info!(kind = %ev.kind, action = ?ev.action, "ui event");
    }

    if let (Some(sink), Some(feed)) = (&http_sink, cfg.feed_id.as_deref()) {
        match sink.feed_stats(feed).await {
            Ok(stats) => info!(feed, stats = ?stats.stats, "feed interaction stats"),
            Err(e) => warn!("feed stats unavailable: {e:#}"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&ctl.status())?);
    Ok(())
}
