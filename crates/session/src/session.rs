// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session controller: the authentication/account state machine.
//!
//! Composes the credential store, the durable cache, and the remote
//! collaborators into one consistent unit. The authenticated flag is
//! optimistic on load/save (credentials present, not yet re-checked) and
//! reconciled by an explicit verification pass; any verification failure
//! pessimistically resets it.
//!
//! Operations are not serialized against each other: a save racing a
//! verify from an earlier account switch is resolved last-write-wins.
//! Each operation mutates shared state only in short non-reentrant
//! stretches between await points, which is all the scheduling model
//! requires.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::cache::DurableCache;
use crate::credentials::{CredentialStore, CredentialUpdate, Credentials};
use crate::events::AuthEventBus;
use crate::notify::Notifier;
use crate::remote::{Account, AccountRegistry, SettingsGateway, VerificationService};

/// Observable session state.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// True exactly while an initial load or a save is in flight.
    pub is_loading: bool,
    /// Last known verification result for the current credentials+account
    /// pair (optimistically true right after a load or save).
    pub is_authenticated: bool,
    /// The selected account, empty when none is known yet.
    pub current_account_id: String,
}

/// Full state exposed to the rest of the application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub state: SessionState,
    pub credentials: Credentials,
    pub accounts: Vec<Account>,
}

/// Orchestrates credential state, account selection and validity checking.
///
/// One long-lived instance per running application; no process-wide
/// singleton is involved.
pub struct SessionController {
    store: CredentialStore,
    state: RwLock<SessionState>,
    accounts: RwLock<Vec<Account>>,
    events: AuthEventBus,
    gateway: Arc<dyn SettingsGateway>,
    verifier: Arc<dyn VerificationService>,
    registry: Arc<dyn AccountRegistry>,
    notifier: Arc<dyn Notifier>,
    cache: DurableCache,
}

impl SessionController {
    pub fn new(
        gateway: Arc<dyn SettingsGateway>,
        verifier: Arc<dyn VerificationService>,
        registry: Arc<dyn AccountRegistry>,
        notifier: Arc<dyn Notifier>,
        cache: DurableCache,
    ) -> Self {
        Self {
            store: CredentialStore::new(),
            state: RwLock::new(SessionState::default()),
            accounts: RwLock::new(Vec::new()),
            events: AuthEventBus::new(),
            gateway,
            verifier,
            registry,
            notifier,
            cache,
        }
    }

    /// The bus announcing authenticated/unauthenticated transitions.
    pub fn events(&self) -> &AuthEventBus {
        &self.events
    }

    /// Copy of the current session state.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Copy of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.store.snapshot()
    }

    /// Copy of the last fetched account set.
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.read().clone()
    }

    /// Everything the application layer renders from.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            credentials: self.credentials(),
            accounts: self.accounts(),
        }
    }

    /// One-time startup load of stored settings.
    ///
    /// When no secret was ever configured on this client, settles as
    /// signed-out without contacting the backend. Otherwise fetches the
    /// stored settings, merges every present field into the credential
    /// store, and optimistically marks the session authenticated when an
    /// access key is present — a later [`verify`](Self::verify) reconciles
    /// that. Gateway failures degrade to signed-out and are only logged.
    /// The loading flag is cleared as the final step on every path.
    pub async fn initialize(&self) {
        if !self.cache.secret_configured() {
            self.set_authenticated(false);
            self.events.publish(false);
            return;
        }

        self.set_loading(true);
        let authenticated = match self.gateway.fetch_settings().await {
            Ok(settings) => {
                let has_key = settings.has_access_key();
                self.store.apply(settings);
                has_key
            }
            Err(e) => {
                tracing::warn!(err = %e, "loading stored settings failed");
                false
            }
        };
        self.set_authenticated(authenticated);
        self.events.publish(authenticated);
        self.set_loading(false);
    }

    /// Persist a user-supplied credential set.
    ///
    /// Defaults are substituted for omitted optional fields before the
    /// write. On success the fields are committed to the store, the
    /// session turns authenticated (pending re-verification) and a success
    /// toast fires. A gateway failure surfaces an error toast and is
    /// re-signalled to the caller so the UI can react; state is left
    /// untouched apart from the loading flag.
    pub async fn save(&self, update: CredentialUpdate) -> anyhow::Result<()> {
        self.set_loading(true);
        let credentials = update.into_credentials();

        match self.gateway.store_settings(&credentials).await {
            Ok(()) => {
                self.store.replace(credentials);
                if let Err(e) = self.cache.mark_secret_configured() {
                    tracing::warn!(err = %e, "could not persist the configured marker");
                }
                self.set_authenticated(true);
                self.events.publish(true);
                self.notifier.success("API credentials saved");
                self.set_loading(false);
                Ok(())
            }
            Err(e) => {
                self.notifier.error("Saving API credentials failed");
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// Check the current credentials against the verification service.
    ///
    /// The outcome strictly determines the authenticated flag and exactly
    /// one matching event fires. A transport failure counts as "invalid"
    /// and is logged, never thrown — verification failing is a normal
    /// outcome here.
    pub async fn verify(&self) {
        if let Err(e) = self.run_verification().await {
            tracing::warn!(err = %e, "credential verification failed");
        }
    }

    /// Refetch the account set and (re)settle the selection.
    ///
    /// The durably cached id wins over the first listed account, which
    /// wins over no selection at all. A non-empty result is written back
    /// to the cache and triggers one best-effort verification pass. A
    /// registry failure clears the known set but leaves the selection and
    /// the authenticated flag alone.
    pub async fn refresh_accounts(&self) {
        match self.registry.list_accounts().await {
            Ok(list) => {
                let selected = self
                    .cache
                    .current_account_id()
                    .or_else(|| list.first().map(|a| a.id.clone()))
                    .unwrap_or_default();
                *self.accounts.write() = list;
                self.state.write().current_account_id = selected.clone();
                if !selected.is_empty() {
                    if let Err(e) = self.cache.set_current_account_id(&selected) {
                        tracing::warn!(err = %e, "could not persist account selection");
                    }
                    self.verify().await;
                }
            }
            Err(e) => {
                self.accounts.write().clear();
                tracing::warn!(err = %e, "fetching accounts failed; configure API credentials first");
            }
        }
    }

    /// Switch the active account.
    ///
    /// The selection takes effect and is durably cached immediately, so a
    /// restart resumes on it regardless of what verification says next.
    /// The follow-up verification decides which toast fires; nothing
    /// escapes this boundary.
    pub async fn select_account(&self, id: &str) {
        self.state.write().current_account_id = id.to_owned();
        if let Err(e) = self.cache.set_current_account_id(id) {
            tracing::warn!(account = %id, err = %e, "could not persist account selection");
        }

        match self.run_verification().await {
            Ok(true) => self.notifier.success("Account switched"),
            Ok(false) => {
                self.notifier.warning("Account switched, but the stored credentials are not valid for it");
            }
            Err(e) => {
                tracing::warn!(account = %id, err = %e, "verification after account switch failed");
                self.notifier.error("Account switched, but the credentials could not be verified");
            }
        }
    }

    /// Run one verification pass and fold the outcome into state.
    ///
    /// Publishes exactly one event. A transport error resets the flag to
    /// false like an explicit "invalid", then propagates for the caller to
    /// log or turn into a toast.
    async fn run_verification(&self) -> anyhow::Result<bool> {
        let credentials = self.store.snapshot();
        match self.verifier.verify(&credentials).await {
            Ok(valid) => {
                self.set_authenticated(valid);
                self.events.publish(valid);
                Ok(valid)
            }
            Err(e) => {
                self.set_authenticated(false);
                self.events.publish(false);
                Err(e)
            }
        }
    }

    fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
    }

    fn set_authenticated(&self, authenticated: bool) {
        self.state.write().is_authenticated = authenticated;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
