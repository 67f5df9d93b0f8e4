// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn update_with_only_keys_fills_defaults() {
    let update = CredentialUpdate {
        access_key: "AK".to_owned(),
        access_secret: "AS".to_owned(),
        consumer_token: "CT".to_owned(),
        ..CredentialUpdate::default()
    };

    let creds = update.into_credentials();
    assert_eq!(creds.access_key, "AK");
    assert_eq!(creds.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(creds.identity_realm, DEFAULT_IDENTITY_REALM);
    assert_eq!(creds.zone, DEFAULT_ZONE);
    assert_eq!(creds.notify_channel_token, "");
    assert_eq!(creds.notify_channel_target, "");
}

#[test]
fn update_keeps_explicit_values() {
    let update = CredentialUpdate {
        access_key: "AK".to_owned(),
        access_secret: "AS".to_owned(),
        consumer_token: "CT".to_owned(),
        endpoint: Some("ovh-ca".to_owned()),
        identity_realm: Some("go-ovh-ca".to_owned()),
        zone: Some("CA".to_owned()),
        notify_channel_token: Some("bot".to_owned()),
        notify_channel_target: Some("chan".to_owned()),
    };

    let creds = update.into_credentials();
    assert_eq!(creds.endpoint, "ovh-ca");
    assert_eq!(creds.identity_realm, "go-ovh-ca");
    assert_eq!(creds.zone, "CA");
    assert_eq!(creds.notify_channel_token, "bot");
}

#[test]
fn empty_optional_counts_as_unset() {
    let update = CredentialUpdate {
        access_key: "AK".to_owned(),
        endpoint: Some(String::new()),
        zone: Some(String::new()),
        ..CredentialUpdate::default()
    };

    let creds = update.into_credentials();
    assert_eq!(creds.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(creds.zone, DEFAULT_ZONE);
}

#[test]
fn store_apply_merges_present_fields_only() {
    let store = CredentialStore::new();
    store.apply(StoredSettings {
        access_key: Some("K".to_owned()),
        notify_channel_token: Some("bot".to_owned()),
        ..StoredSettings::default()
    });

    let creds = store.snapshot();
    assert_eq!(creds.access_key, "K");
    assert_eq!(creds.notify_channel_token, "bot");
    // Fields the payload never mentioned keep their defaults.
    assert_eq!(creds.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(creds.identity_realm, DEFAULT_IDENTITY_REALM);
}

#[test]
fn store_replace_swaps_the_full_set() {
    let store = CredentialStore::new();
    store.apply(StoredSettings {
        notify_channel_token: Some("bot".to_owned()),
        ..StoredSettings::default()
    });

    let replacement = Credentials { access_key: "new".to_owned(), ..Credentials::default() };
    store.replace(replacement.clone());

    assert_eq!(store.snapshot(), replacement);
}

#[test]
fn stored_settings_access_key_presence() {
    assert!(!StoredSettings::default().has_access_key());
    assert!(!StoredSettings { access_key: Some(String::new()), ..StoredSettings::default() }
        .has_access_key());
    assert!(StoredSettings { access_key: Some("K".to_owned()), ..StoredSettings::default() }
        .has_access_key());
}

#[test]
fn settings_payload_uses_camel_case() {
    let settings: StoredSettings = serde_json::from_str(
        r#"{"accessKey":"K","consumerToken":"C","notifyChannelTarget":"chan"}"#,
    )
    .expect("should parse");
    assert_eq!(settings.access_key.as_deref(), Some("K"));
    assert_eq!(settings.consumer_token.as_deref(), Some("C"));
    assert_eq!(settings.notify_channel_target.as_deref(), Some("chan"));
    assert!(settings.endpoint.is_none());

    let json = serde_json::to_value(Credentials::default()).expect("should serialize");
    assert_eq!(json["endpoint"], "ovh-eu");
    assert_eq!(json["identityRealm"], "go-ovh-ie");
    assert!(json.get("identity_realm").is_none());
}
