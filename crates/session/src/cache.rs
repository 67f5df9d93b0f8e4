// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable client-local cache: survives process restarts, distinct from
//! the remote settings gateway.
//!
//! Holds only the active account selector and the "a secret has ever been
//! configured" marker. Both are read synchronously at open, before any
//! network call is possible.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

const STATE_FILE: &str = "state.json";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct CacheState {
    #[serde(default)]
    current_account_id: String,
    #[serde(default)]
    secret_configured: bool,
}

/// File-backed cache with atomic writes.
pub struct DurableCache {
    path: PathBuf,
    state: Mutex<CacheState>,
}

impl DurableCache {
    /// Open the cache under `dir`, reading `state.json` if present.
    ///
    /// A missing or unreadable file yields an empty state — first runs and
    /// corrupt files both start from scratch.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STATE_FILE);
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), err = %e, "discarding unreadable cache state");
                CacheState::default()
            }),
            Err(_) => CacheState::default(),
        };
        Self { path, state: Mutex::new(state) }
    }

    /// The durably cached account selector, if one was ever stored.
    pub fn current_account_id(&self) -> Option<String> {
        let state = self.state.lock();
        if state.current_account_id.is_empty() {
            None
        } else {
            Some(state.current_account_id.clone())
        }
    }

    /// Store the active account selector.
    pub fn set_current_account_id(&self, id: &str) -> anyhow::Result<()> {
        let snapshot = {
            let mut state = self.state.lock();
            state.current_account_id = id.to_owned();
            state.clone()
        };
        self.write(&snapshot)
    }

    /// Whether a credential secret has ever been configured on this client.
    pub fn secret_configured(&self) -> bool {
        self.state.lock().secret_configured
    }

    /// Record that a credential secret has been configured.
    pub fn mark_secret_configured(&self) -> anyhow::Result<()> {
        let snapshot = {
            let mut state = self.state.lock();
            state.secret_configured = true;
            state.clone()
        };
        self.write(&snapshot)
    }

    /// Atomic write: unique tmp file (PID + counter) then rename, so
    /// concurrent saves racing on one `.tmp` cannot corrupt the state.
    fn write(&self, state: &CacheState) -> anyhow::Result<()> {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
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
}

/// Resolve the default state directory for client data.
///
/// Checks `OVH_SESSION_STATE_DIR`, then `$XDG_STATE_HOME/ovh-session`,
/// then `$HOME/.local/state/ovh-session`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OVH_SESSION_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("ovh-session");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/ovh-session");
    }
    PathBuf::from(".ovh-session")
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
