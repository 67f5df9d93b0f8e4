// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed implementations of the collaborator traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credentials::{Credentials, StoredSettings};
use crate::remote::{Account, AccountRegistry, SettingsGateway, VerificationService};

/// Client for the console backend API.
///
/// One instance implements all three collaborator traits; endpoints are
/// `GET/PUT {base}/settings`, `POST {base}/verify` and `GET {base}/accounts`.
pub struct RemoteApi {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::builder().timeout(timeout).build().unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    access_key: &'a str,
    access_secret: &'a str,
    consumer_token: &'a str,
    endpoint: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    valid: bool,
}

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    accounts: Vec<Account>,
}

#[async_trait::async_trait]
impl SettingsGateway for RemoteApi {
    async fn fetch_settings(&self) -> anyhow::Result<StoredSettings> {
        let resp = self.http.get(self.url("settings")).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("fetching settings failed ({status}): {text}");
        }
        let settings: StoredSettings = resp.json().await?;
        Ok(settings)
    }

    async fn store_settings(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let resp = self.http.put(self.url("settings")).json(credentials).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("storing settings failed ({status}): {text}");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl VerificationService for RemoteApi {
    async fn verify(&self, credentials: &Credentials) -> anyhow::Result<bool> {
        let body = VerifyRequest {
            access_key: &credentials.access_key,
            access_secret: &credentials.access_secret,
            consumer_token: &credentials.consumer_token,
            endpoint: &credentials.endpoint,
        };
        let resp = self.http.post(self.url("verify")).json(&body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("verification call failed ({status}): {text}");
        }
        let verdict: VerifyResponse = resp.json().await?;
        Ok(verdict.valid)
    }
}

#[async_trait::async_trait]
impl AccountRegistry for RemoteApi {
    async fn list_accounts(&self) -> anyhow::Result<Vec<Account>> {
        let resp = self.http.get(self.url("accounts")).send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("listing accounts failed ({status}): {text}");
        }
        let payload: AccountsResponse = resp.json().await?;
        Ok(payload.accounts)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
