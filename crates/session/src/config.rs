// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the session manager.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "ovh-session", about = "Session and credential manager for the console backend")]
pub struct SessionConfig {
    /// Base URL of the console backend API.
    #[arg(long, default_value = "http://127.0.0.1:8700/api", env = "OVH_SESSION_API_URL")]
    pub api_url: String,

    /// Directory for durable client state. Defaults to the platform state dir.
    #[arg(long, env = "OVH_SESSION_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// HTTP request timeout in milliseconds.
    #[arg(long, default_value_t = 30_000, env = "OVH_SESSION_HTTP_TIMEOUT_MS")]
    pub http_timeout_ms: u64,
}

impl SessionConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn resolved_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(crate::cache::state_dir)
    }
}
