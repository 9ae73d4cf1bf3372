// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound proxy pool: CRUD, bulk import and health testing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{null_default, Page};
use crate::auth::MessageResponse;
use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "/api/v1/proxies";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks4,
    Socks5,
    Vless,
    Vmess,
    Shadowsocks,
    Trojan,
}

impl ProxyProtocol {
    /// Protocols tunnelled through a local V2Ray instance.
    pub fn is_v2ray(self) -> bool {
        matches!(self, Self::Vless | Self::Vmess | Self::Shadowsocks | Self::Trojan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyStatus {
    Active,
    Inactive,
    Untested,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    pub id: String,
    #[serde(default)]
    pub protocol: Option<ProxyProtocol>,
    #[serde(default, deserialize_with = "null_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_default")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub status: Option<ProxyStatus>,
    #[serde(default)]
    pub last_tested_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub success_count: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub failure_count: u64,
    #[serde(default)]
    pub avg_response_time_ms: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub sni: Option<String>,
    #[serde(default)]
    pub local_port: Option<u16>,
    #[serde(default, rename = "isV2Ray", deserialize_with = "null_default")]
    pub is_v2ray: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProxyProtocol>,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportResult {
    pub message: String,
    pub imported: u64,
}

/// Live proxy counts per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyStats(pub BTreeMap<ProxyStatus, u64>);

impl ProxyStats {
    pub fn count(&self, status: ProxyStatus) -> u64 {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }
}

#[derive(Clone)]
pub struct Proxies {
    client: ApiClient,
}

impl Proxies {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32) -> Result<Page<Proxy>, ApiError> {
        self.client.get(&format!("{BASE}?page={page}")).await
    }

    pub async fn list_deleted(&self, page: u32) -> Result<Page<Proxy>, ApiError> {
        self.client.get(&format!("{BASE}/deleted?page={page}")).await
    }

    pub async fn get(&self, id: &str) -> Result<Proxy, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, request: &ProxyRequest) -> Result<Proxy, ApiError> {
        self.client.post(BASE, request).await
    }

    pub async fn update(&self, id: &str, request: &ProxyRequest) -> Result<Proxy, ApiError> {
        self.client.put(&format!("{BASE}/{id}"), request).await
    }

    /// Soft delete.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{BASE}/{id}")).await?;
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.post(&format!("{BASE}/{id}/restore"), &json!({})).await?;
        Ok(())
    }

    /// Permanent delete.
    pub async fn purge(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{BASE}/{id}/permanent")).await?;
        Ok(())
    }

    /// Import one proxy URL per line; blank lines and `#` comments are
    /// skipped by the backend, as are lines it cannot parse.
    pub async fn import_text(&self, list: &str) -> Result<ImportResult, ApiError> {
        self.client.post_text(&format!("{BASE}/import/text"), list).await
    }

    /// Test one proxy and return its updated record.
    pub async fn test(&self, id: &str) -> Result<Proxy, ApiError> {
        self.client.post(&format!("{BASE}/{id}/test"), &json!({})).await
    }

    pub async fn test_untested(&self) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{BASE}/test/untested"), &json!({})).await
    }

    pub async fn test_active(&self) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{BASE}/test/active"), &json!({})).await
    }

    pub async fn stats(&self) -> Result<ProxyStats, ApiError> {
        self.client.get(&format!("{BASE}/stats")).await
    }
}
