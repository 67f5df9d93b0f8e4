// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side session and credential manager for the console front-end.
//!
//! Holds the API credential set, persists and restores it through the
//! remote settings gateway, tracks whether the stored credentials are
//! currently valid, tracks which account is active, and broadcasts
//! authentication-state transitions to the rest of the application.

pub mod cache;
pub mod config;
pub mod credentials;
pub mod events;
pub mod notify;
pub mod remote;
pub mod session;

use std::sync::Arc;

use crate::cache::DurableCache;
use crate::config::SessionConfig;
use crate::notify::TracingNotifier;
use crate::remote::http::RemoteApi;
use crate::session::SessionController;

/// Compose a controller against the real backend and run one startup
/// pass: load stored settings, refresh accounts, print the snapshot.
pub async fn run(config: SessionConfig) -> anyhow::Result<()> {
    let cache = DurableCache::open(&config.resolved_state_dir());
    let api = Arc::new(RemoteApi::new(config.api_url.clone(), config.http_timeout()));

    let controller = SessionController::new(
        Arc::clone(&api) as Arc<dyn remote::SettingsGateway>,
        Arc::clone(&api) as Arc<dyn remote::VerificationService>,
        api as Arc<dyn remote::AccountRegistry>,
        Arc::new(TracingNotifier),
        cache,
    );

    let _subscription = controller.events().subscribe(|authenticated| {
        tracing::info!(authenticated, "authentication state changed");
    });

    controller.initialize().await;
    controller.refresh_accounts().await;

    let snapshot = controller.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
