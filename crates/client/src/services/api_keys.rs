// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{null_default, Page};
use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "/scrape/api_keys";

/// Search-engine API credential with its remaining quota.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_default")]
    pub point: i64,
    #[serde(default)]
    pub api_link: Option<String>,
    #[serde(default)]
    pub search_engine_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    pub key: String,
    pub point: i64,
    pub search_engine_id: String,
    pub api_link: String,
    pub description: String,
}

/// API keys are hard-deleted; there is no deleted listing or restore.
#[derive(Clone)]
pub struct ApiKeys {
    client: ApiClient,
}

impl ApiKeys {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32) -> Result<Page<ApiKey>, ApiError> {
        self.client.get(&format!("{BASE}?page={page}")).await
    }

    pub async fn get(&self, id: &str) -> Result<ApiKey, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, request: &ApiKeyRequest) -> Result<ApiKey, ApiError> {
        self.client.post(BASE, request).await
    }

    pub async fn update(&self, id: &str, request: &ApiKeyRequest) -> Result<ApiKey, ApiError> {
        self.client.put(&format!("{BASE}/{id}"), request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{BASE}/{id}")).await?;
        Ok(())
    }
}
