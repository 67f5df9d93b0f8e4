// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fresh_directory_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DurableCache::open(dir.path());

    assert!(!cache.secret_configured());
    assert!(cache.current_account_id().is_none());
}

#[test]
fn selection_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let cache = DurableCache::open(dir.path());
    cache.set_current_account_id("acct-7").expect("write");

    let reopened = DurableCache::open(dir.path());
    assert_eq!(reopened.current_account_id().as_deref(), Some("acct-7"));
}

#[test]
fn marker_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    DurableCache::open(dir.path()).mark_secret_configured().expect("write");

    assert!(DurableCache::open(dir.path()).secret_configured());
}

#[test]
fn later_selection_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DurableCache::open(dir.path());

    cache.set_current_account_id("first").expect("write");
    cache.set_current_account_id("second").expect("write");

    assert_eq!(cache.current_account_id().as_deref(), Some("second"));
    let reopened = DurableCache::open(dir.path());
    assert_eq!(reopened.current_account_id().as_deref(), Some("second"));
}

#[test]
fn selection_does_not_clear_the_marker() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = DurableCache::open(dir.path());

    cache.mark_secret_configured().expect("write");
    cache.set_current_account_id("acct").expect("write");

    let reopened = DurableCache::open(dir.path());
    assert!(reopened.secret_configured());
    assert_eq!(reopened.current_account_id().as_deref(), Some("acct"));
}

#[test]
fn corrupt_state_file_resets_to_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("state.json"), b"{not json").expect("write");

    let cache = DurableCache::open(dir.path());
    assert!(!cache.secret_configured());
    assert!(cache.current_account_id().is_none());
}

#[test]
fn unknown_fields_are_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("state.json"),
        br#"{"current_account_id":"acct-1","secret_configured":true,"legacy_field":3}"#,
    )
    .expect("write");

    let cache = DurableCache::open(dir.path());
    assert!(cache.secret_configured());
    assert_eq!(cache.current_account_id().as_deref(), Some("acct-1"));
}
