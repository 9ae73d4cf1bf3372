// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::null_default;
use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "/api/v1/ai";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedText {
    #[serde(default, deserialize_with = "null_default")]
    pub response: String,
}

/// Free-form text generation backed by the server's language model.
#[derive(Clone)]
pub struct Ai {
    client: ApiClient,
}

impl Ai {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// A blank prompt is rejected by the backend with 400.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedText, ApiError> {
        self.client.post(&format!("{BASE}/generate"), &json!({ "prompt": prompt })).await
    }

    pub async fn generate_short(&self, prompt: &str) -> Result<GeneratedText, ApiError> {
        self.client.post(&format!("{BASE}/generate/short"), &json!({ "prompt": prompt })).await
    }
}
