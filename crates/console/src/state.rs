// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

/// Shared state of the request proxy.
pub struct ProxyState {
    /// Backend origin without a trailing slash.
    pub backend_url: String,
    pub http: reqwest::Client,
}

impl ProxyState {
    pub fn new(backend_url: &str, timeout: Option<Duration>) -> Self {
        leadscrape_client::ensure_crypto();
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            backend_url: backend_url.trim_end_matches('/').to_owned(),
            http: builder.build().unwrap_or_default(),
        }
    }
}
