// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session core for the leadscrape admin console.
//!
//! [`session::SessionStore`] owns the access/refresh token pair and keeps it
//! fresh; [`client::ApiClient`] performs bearer-authenticated backend calls and
//! recovers from a single expired-token response. Resource wrappers in
//! [`services`] sit on top of the client.

pub mod access;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod inactivity;
pub mod services;
pub mod session;
pub mod storage;
pub mod test_support;
pub mod token;

use std::sync::Once;
use std::time::Duration;

pub use access::{check_access, Access};
pub use client::{ApiClient, Body, RequestOptions};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorBody, RefreshError};
pub use inactivity::InactivityWatch;
pub use services::Page;
pub use session::{SessionEvent, SessionStore};

static CRYPTO_INIT: Once = Once::new();

/// Install the ring crypto provider for reqwest/rustls.
/// Safe to call multiple times; only the first call has effect.
pub fn ensure_crypto() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Build the shared HTTP client used for backend calls.
pub(crate) fn http_client(timeout: Option<Duration>) -> reqwest::Client {
    ensure_crypto();
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_default()
}

/// Return current epoch seconds.
pub fn epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
