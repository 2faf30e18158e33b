/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use corgi_protocol::Status;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Client-side store of the latest known representation of each status.
pub trait StatusCache: Send + Sync {
    /// Insert or overwrite the entry keyed by `status.id`.
    fn store(&self, status: &Status) -> Result<()>;
    fn load(&self, status_id: &str) -> Result<Option<Status>>;
}

#[derive(Clone)]
pub struct SqliteStatusCache {
    path: PathBuf,
}

impl SqliteStatusCache {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create cache dir: {}", parent.display()))?;
            }
        }
        let conn = Connection::open(&path).with_context(|| format!("open db: {}", path.display()))?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS statuses (
              status_id TEXT PRIMARY KEY,
              updated_at_ms INTEGER NOT NULL,
              status_json BLOB NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_statuses_updated ON statuses(updated_at_ms DESC);
            "#,
        )?;
        Ok(Self { path })
    }

    pub fn count(&self) -> Result<u64> {
        let conn = Connection::open(&self.path)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM statuses", [], |r| r.get(0))?;
        Ok(n.max(0) as u64)
    }

    pub fn prune_before(&self, cutoff_ms: i64) -> Result<u64> {
        let conn = Connection::open(&self.path)?;
        let n = conn.execute(
            "DELETE FROM statuses WHERE updated_at_ms < ?1",
            params![cutoff_ms],
        )?;
        Ok(n as u64)
    }
}

impl StatusCache for SqliteStatusCache {
    fn store(&self, status: &Status) -> Result<()> {
        let json = serde_json::to_vec(status).context("encode status")?;
        let conn = Connection::open(&self.path)?;
        conn.execute(
            r#"
            INSERT INTO statuses(status_id, updated_at_ms, status_json)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(status_id) DO UPDATE SET
              updated_at_ms=excluded.updated_at_ms,
              status_json=excluded.status_json
            "#,
            params![status.id, now_ms(), json],
        )?;
        Ok(())
    }

    fn load(&self, status_id: &str) -> Result<Option<Status>> {
        let conn = Connection::open(&self.path)?;
        let raw: Option<Vec<u8>> = conn
            .query_row(
                "SELECT status_json FROM statuses WHERE status_id=?1",
                params![status_id],
                |r| r.get(0),
            )
            .optional()?;
        match raw {
            Some(bytes) => {
                let status = serde_json::from_slice(&bytes)
                    .with_context(|| format!("decode cached status {status_id}"))?;
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }
}
