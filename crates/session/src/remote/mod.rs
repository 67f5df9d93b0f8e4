// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seams to the external collaborators: the settings gateway, the
//! credential verification service, and the account registry.
//!
//! The session controller only ever talks to these traits; the reqwest
//! implementations live in [`http`].

pub mod http;

use serde::{Deserialize, Serialize};

use crate::credentials::{Credentials, StoredSettings};

/// A selectable account context supplied by the registry.
///
/// The set of accounts is owned by the remote side; this client only picks
/// one member and never mutates the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    /// Opaque extra fields the registry may attach.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), display_name: String::new(), metadata: serde_json::Value::Null }
    }
}

/// Remote key/value settings endpoint holding the credential fields.
#[async_trait::async_trait]
pub trait SettingsGateway: Send + Sync {
    /// Fetch the stored settings. Absent fields mean "not configured".
    async fn fetch_settings(&self) -> anyhow::Result<StoredSettings>;

    /// Persist the full credential set.
    async fn store_settings(&self, credentials: &Credentials) -> anyhow::Result<()>;
}

/// Remote check that the given credentials are currently valid.
#[async_trait::async_trait]
pub trait VerificationService: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> anyhow::Result<bool>;
}

/// Remote source of the known account set.
#[async_trait::async_trait]
pub trait AccountRegistry: Send + Sync {
    async fn list_accounts(&self) -> anyhow::Result<Vec<Account>>;
}
