// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AI-assisted search query generation.
//!
//! Every request takes an optional `count`; the backend defaults it to 10
//! (5 for variations).

use serde::{Deserialize, Serialize};

use super::null_default;
use super::search_queries::SearchQuery;
use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "/api/v1/search-queries/generate";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationRequest {
    pub original_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteQueryRequest {
    pub topic: String,
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailQueryRequest {
    pub industry: String,
    /// Omitted means "Global".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQueries {
    #[serde(default, deserialize_with = "null_default")]
    pub queries: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedQueries {
    #[serde(default, deserialize_with = "null_default")]
    pub queries: Vec<SearchQuery>,
    #[serde(default, deserialize_with = "null_default")]
    pub saved: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryVariations {
    #[serde(default, deserialize_with = "null_default")]
    pub original: String,
    #[serde(default, deserialize_with = "null_default")]
    pub variations: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteQueries {
    #[serde(default, deserialize_with = "null_default")]
    pub site: String,
    #[serde(default, deserialize_with = "null_default")]
    pub queries: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailQueries {
    #[serde(default, deserialize_with = "null_default")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_default")]
    pub queries: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub count: u32,
}

#[derive(Clone)]
pub struct QueryGenerator {
    client: ApiClient,
}

impl QueryGenerator {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GeneratedQueries, ApiError> {
        self.client.post(BASE, request).await
    }

    /// Generate and store the queries as search queries.
    pub async fn generate_and_save(
        &self,
        request: &GenerateRequest,
    ) -> Result<SavedQueries, ApiError> {
        self.client.post(&format!("{BASE}/save"), request).await
    }

    pub async fn variations(
        &self,
        request: &VariationRequest,
    ) -> Result<QueryVariations, ApiError> {
        self.client.post(&format!("{BASE}/variations"), request).await
    }

    /// Queries restricted to one site (`site:` operator).
    pub async fn site(&self, request: &SiteQueryRequest) -> Result<SiteQueries, ApiError> {
        self.client.post(&format!("{BASE}/site"), request).await
    }

    /// Queries aimed at pages that list email addresses.
    pub async fn emails(&self, request: &EmailQueryRequest) -> Result<EmailQueries, ApiError> {
        self.client.post(&format!("{BASE}/emails"), request).await
    }
}
