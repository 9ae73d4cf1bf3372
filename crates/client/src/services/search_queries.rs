// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::{null_default, Resource};
use crate::client::ApiClient;
use crate::error::ApiError;

pub type SearchQueries = Resource<SearchQuery>;

pub(crate) fn resource(client: ApiClient) -> SearchQueries {
    Resource::new(client, "/api/v1/scrape/search_queries", "full_delete")
}

/// A search sentence fed to the search-engine stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub sentence: String,
    /// Number of result links to collect.
    #[serde(default, alias = "link_count", deserialize_with = "null_default")]
    pub link_count: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryRequest {
    pub sentence: String,
    pub link_count: u32,
    #[serde(default)]
    pub description: String,
}

impl Resource<SearchQuery> {
    pub async fn create(&self, request: &SearchQueryRequest) -> Result<SearchQuery, ApiError> {
        self.client().post(self.base(), request).await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &SearchQueryRequest,
    ) -> Result<SearchQuery, ApiError> {
        self.client().put(&format!("{}/{id}", self.base()), request).await
    }
}
