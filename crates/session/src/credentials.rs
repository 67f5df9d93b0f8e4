// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential fields and the in-memory credential store.
//!
//! The store is the source of truth for what would be sent to the remote
//! API. All fields are opaque strings; an empty string means "unset".
//! Validity is never decided here — that is the verification service's job.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Default regional API endpoint.
pub const DEFAULT_ENDPOINT: &str = "ovh-eu";

/// Default identity realm for the consumer application.
pub const DEFAULT_IDENTITY_REALM: &str = "go-ovh-ie";

/// Default zone.
pub const DEFAULT_ZONE: &str = "IE";

/// The full credential set used to authenticate against the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Application access key.
    pub access_key: String,
    /// Application secret.
    pub access_secret: String,
    /// Consumer token granted to this client.
    pub consumer_token: String,
    /// Regional endpoint identifier.
    pub endpoint: String,
    /// Token for the notification channel (bot token or similar).
    pub notify_channel_token: String,
    /// Target of the notification channel (chat/channel id).
    pub notify_channel_target: String,
    /// Identity realm the consumer token was issued under.
    pub identity_realm: String,
    /// Zone the identity realm belongs to.
    pub zone: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            access_secret: String::new(),
            consumer_token: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            notify_channel_token: String::new(),
            notify_channel_target: String::new(),
            identity_realm: DEFAULT_IDENTITY_REALM.to_owned(),
            zone: DEFAULT_ZONE.to_owned(),
        }
    }
}

impl Credentials {
    /// Whether an access key is set. Presence alone is not proof of
    /// validity; only a verification pass decides that.
    pub fn has_access_key(&self) -> bool {
        !self.access_key.is_empty()
    }
}

/// User-supplied credential fields for a save.
///
/// Optional fields left out fall back to their defaults when converted
/// into a full [`Credentials`] value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialUpdate {
    pub access_key: String,
    pub access_secret: String,
    pub consumer_token: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub notify_channel_token: Option<String>,
    #[serde(default)]
    pub notify_channel_target: Option<String>,
    #[serde(default)]
    pub identity_realm: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

impl CredentialUpdate {
    /// Build the full credential set that will be persisted, substituting
    /// defaults for omitted or empty optional fields.
    pub fn into_credentials(self) -> Credentials {
        Credentials {
            access_key: self.access_key,
            access_secret: self.access_secret,
            consumer_token: self.consumer_token,
            endpoint: or_default(self.endpoint, DEFAULT_ENDPOINT),
            notify_channel_token: self.notify_channel_token.unwrap_or_default(),
            notify_channel_target: self.notify_channel_target.unwrap_or_default(),
            identity_realm: or_default(self.identity_realm, DEFAULT_IDENTITY_REALM),
            zone: or_default(self.zone, DEFAULT_ZONE),
        }
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_owned(),
    }
}

/// Settings payload as returned by the persistence gateway.
///
/// Absent fields mean "not configured", never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_channel_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_channel_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl StoredSettings {
    /// Whether the payload carries a usable access key.
    pub fn has_access_key(&self) -> bool {
        self.access_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// In-memory holder of the current credentials.
///
/// All updates replace or merge the full field set under one write lock,
/// so readers never observe a half-applied combination.
pub struct CredentialStore {
    inner: RwLock<Credentials>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(Credentials::default()) }
    }

    /// Return a copy of the current credentials.
    pub fn snapshot(&self) -> Credentials {
        self.inner.read().clone()
    }

    /// Replace the full credential set.
    pub fn replace(&self, credentials: Credentials) {
        *self.inner.write() = credentials;
    }

    /// Merge a settings payload into the current credentials.
    ///
    /// Present fields overwrite, absent fields keep their current value
    /// (so defaults survive a payload that never mentions them).
    pub fn apply(&self, settings: StoredSettings) {
        let mut creds = self.inner.write();
        if let Some(v) = settings.access_key {
            creds.access_key = v;
        }
        if let Some(v) = settings.access_secret {
            creds.access_secret = v;
        }
        if let Some(v) = settings.consumer_token {
            creds.consumer_token = v;
        }
        if let Some(v) = settings.endpoint {
            creds.endpoint = v;
        }
        if let Some(v) = settings.notify_channel_token {
            creds.notify_channel_token = v;
        }
        if let Some(v) = settings.notify_channel_target {
            creds.notify_channel_target = v;
        }
        if let Some(v) = settings.identity_realm {
            creds.identity_realm = v;
        }
        if let Some(v) = settings.zone {
            creds.zone = v;
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
