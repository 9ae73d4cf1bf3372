// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use leadscrape_client::storage::MemoryStore;
use leadscrape_client::test_support::{token_expiring_in, unsigned_token};
use serde_json::json;

use super::*;

fn store() -> Arc<SessionStore> {
    SessionStore::new(&ClientConfig::default(), Arc::new(MemoryStore::new()))
}

#[test]
fn status_of_empty_session() {
    let status = SessionStatus::of(&store(), epoch_secs());
    assert!(!status.authenticated);
    assert_eq!(status.subject, None);
    assert_eq!(status.expires_at, None);
}

#[test]
fn status_reports_claims() {
    let session = store();
    let now = epoch_secs();
    let token = unsigned_token(&json!({ "sub": "ada", "exp": now + 600, "role": "ADMIN" }));
    session.set_tokens(token, "r1".to_owned(), true);

    let status = SessionStatus::of(&session, now);

    assert!(status.authenticated);
    assert!(status.remember_me);
    assert_eq!(status.subject.as_deref(), Some("ada"));
    assert_eq!(status.role.as_deref(), Some("ADMIN"));
    assert_eq!(status.expires_in_secs, Some(600));
}

#[test]
fn expired_session_reports_zero_remaining() {
    let session = store();
    session.set_tokens(token_expiring_in("ada", -30), "r1".to_owned(), false);

    let status = SessionStatus::of(&session, epoch_secs());

    assert!(!status.authenticated);
    assert_eq!(status.expires_in_secs, Some(0));
    assert_eq!(status.role.as_deref(), Some("USER"));
}
