// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification surface for user-visible outcomes (toast-style messages).
//! Textual content only; rendering is someone else's problem.

/// Sink for success/warning/error messages triggered by saves and
/// account switches.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that surfaces messages as log lines.
///
/// Used by the diagnostic binary and anywhere no toast renderer is wired.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message, "notification");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(message, "notification");
    }

    fn error(&self, message: &str) {
        tracing::error!(message, "notification");
    }
}
