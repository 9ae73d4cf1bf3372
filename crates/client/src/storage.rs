// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token storage tiers.
//!
//! The session tier lives in memory and disappears with the process. The
//! durable tier is a [`DurableStore`], normally a JSON file under the state
//! directory, and also carries the remember-me flag so the next start knows
//! which tier to read.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Which storage tier holds the live token pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Survives restarts ("keep me signed in").
    Durable,
    /// Cleared when the process ends.
    Session,
}

impl Tier {
    pub fn for_remember_me(remember_me: bool) -> Self {
        if remember_me {
            Self::Durable
        } else {
            Self::Session
        }
    }
}

/// An access/refresh token pair as stored in one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Everything the durable tier persists.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub remember_me: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<StoredTokens>,
}

/// Backing store for the durable tier.
pub trait DurableStore: Send + Sync {
    /// Load the persisted record; `Ok(None)` when nothing was ever saved.
    fn load(&self) -> anyhow::Result<Option<PersistedSession>>;
    fn save(&self, session: &PersistedSession) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Durable tier backed by a JSON file, written atomically (tmp + rename).
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/session.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Uses a unique temp filename (PID + counter) so concurrent saves never
    /// share a `.tmp` file.
    fn save(&self, session: &PersistedSession) -> anyhow::Result<()> {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(
            "{}.{}.{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            std::process::id(),
            seq,
        );
        let tmp_path = self.path.with_file_name(tmp_name);
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Durable tier kept in memory (tests, embedders without a filesystem).
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<PersistedSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<PersistedSession> {
        self.inner.lock().clone()
    }
}

impl DurableStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<PersistedSession>> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, session: &PersistedSession) -> anyhow::Result<()> {
        *self.inner.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.inner.lock() = None;
        Ok(())
    }
}

/// In-memory view of both tiers plus the remember-me flag.
///
/// All mutation goes through [`Tiers::store`] and [`Tiers::purge`], which
/// leave at most one tier populated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tiers {
    pub remember_me: bool,
    pub durable: Option<StoredTokens>,
    pub session: Option<StoredTokens>,
}

impl Tiers {
    pub fn from_persisted(persisted: PersistedSession) -> Self {
        Self { remember_me: persisted.remember_me, durable: persisted.tokens, session: None }
    }

    /// The tier the remember-me flag currently selects.
    pub fn active(&self) -> Option<&StoredTokens> {
        self.get(Tier::for_remember_me(self.remember_me))
    }

    pub fn get(&self, tier: Tier) -> Option<&StoredTokens> {
        match tier {
            Tier::Durable => self.durable.as_ref(),
            Tier::Session => self.session.as_ref(),
        }
    }

    /// Write `tokens` to the tier selected by `remember_me` and clear the other.
    pub fn store(&mut self, tokens: StoredTokens, remember_me: bool) {
        self.remember_me = remember_me;
        if remember_me {
            self.durable = Some(tokens);
            self.session = None;
        } else {
            self.session = Some(tokens);
            self.durable = None;
        }
    }

    pub fn purge(&mut self) {
        *self = Self::default();
    }

    /// The part of this state the durable store must hold.
    pub fn persisted(&self) -> PersistedSession {
        PersistedSession { remember_me: self.remember_me, tokens: self.durable.clone() }
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
