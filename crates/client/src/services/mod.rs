// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed wrappers over the backend's resource endpoints.
//!
//! Every call goes through [`ApiClient`], so the bearer token, refresh-and-retry
//! and sign-in signalling apply uniformly.

pub mod ai;
pub mod api_keys;
pub mod contacts;
pub mod email;
pub mod pipelines;
pub mod proxies;
pub mod query_generator;
pub mod scrape_data;
pub mod scrape_jobs;
pub mod search_queries;
pub mod users;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;

pub use ai::{Ai, GeneratedText};
pub use api_keys::{ApiKey, ApiKeyRequest, ApiKeys};
pub use contacts::{Contact, Contacts};
pub use email::{Email, EmailRequest, MassEmailResponse};
pub use pipelines::{
    Pipeline, PipelineControl, PipelineStage, PipelineState, PipelineStats, PipelineStatus,
    Pipelines,
};
pub use proxies::{
    ImportResult, Proxies, Proxy, ProxyProtocol, ProxyRequest, ProxyStats, ProxyStatus,
};
pub use query_generator::{
    EmailQueries, EmailQueryRequest, GenerateRequest, GeneratedQueries, QueryGenerator,
    QueryVariations, SavedQueries, SiteQueries, SiteQueryRequest, VariationRequest,
};
pub use scrape_data::{ScrapeData, ScrapeDataFiles};
pub use scrape_jobs::{ScrapeJob, ScrapeJobs};
pub use search_queries::{SearchQueries, SearchQuery, SearchQueryRequest};
pub use users::{User, UserUpdateRequest, Users};

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of a listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default, deserialize_with = "null_default")]
    pub content: Vec<T>,
    #[serde(default, deserialize_with = "null_default")]
    pub current_page: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub page_size: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub total_elements: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub number_of_elements: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub has_next: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub has_previous: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_first: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub is_last: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            current_page: 0,
            page_size: 0,
            total_pages: 0,
            total_elements: 0,
            number_of_elements: 0,
            has_next: false,
            has_previous: false,
            is_first: false,
            is_last: false,
        }
    }
}

/// Standard soft-delete resource: listing, lookup, restore, delete, purge, stats.
pub struct Resource<T> {
    client: ApiClient,
    base: &'static str,
    /// Path segment of the permanent-delete endpoint (`{id}/<segment>`).
    purge_segment: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base: self.base,
            purge_segment: self.purge_segment,
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Resource<T> {
    pub(crate) fn new(client: ApiClient, base: &'static str, purge_segment: &'static str) -> Self {
        Self { client, base, purge_segment, _record: PhantomData }
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list(&self, page: u32) -> Result<Page<T>, ApiError> {
        self.client.get(&format!("{}?page={page}", self.base)).await
    }

    pub async fn list_deleted(&self, page: u32) -> Result<Page<T>, ApiError> {
        self.client.get(&format!("{}/deleted?page={page}", self.base)).await
    }

    /// Live and deleted records together.
    pub async fn list_all(&self, page: u32) -> Result<Page<T>, ApiError> {
        self.client.get(&format!("{}/all?page={page}", self.base)).await
    }

    pub async fn get(&self, id: &str) -> Result<T, ApiError> {
        self.client.get(&format!("{}/{id}", self.base)).await
    }

    pub async fn get_deleted(&self, id: &str) -> Result<T, ApiError> {
        self.client.get(&format!("{}/deleted/{id}", self.base)).await
    }

    pub async fn restore(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{id}/restore", self.base);
        let _: Value = self.client.put(&path, &json!({})).await?;
        Ok(())
    }

    /// Soft delete.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{}/{id}", self.base)).await?;
        Ok(())
    }

    /// Permanent delete.
    pub async fn purge(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/{id}/{}", self.base, self.purge_segment);
        let _: Value = self.client.delete(&path).await?;
        Ok(())
    }

    pub async fn stats<S: DeserializeOwned>(&self) -> Result<S, ApiError> {
        self.client.get(&format!("{}/stats", self.base)).await
    }
}

impl ApiClient {
    pub fn contacts(&self) -> Contacts {
        contacts::resource(self.clone())
    }

    pub fn scrape_jobs(&self) -> ScrapeJobs {
        scrape_jobs::resource(self.clone())
    }

    pub fn search_queries(&self) -> SearchQueries {
        search_queries::resource(self.clone())
    }

    pub fn query_generator(&self) -> QueryGenerator {
        QueryGenerator::new(self.clone())
    }

    /// Downloaded pages awaiting the parser.
    pub fn scrape_data(&self) -> ScrapeDataFiles {
        scrape_data::resource(self.clone())
    }

    /// Pipeline run history.
    pub fn pipelines(&self) -> Pipelines {
        pipelines::resource(self.clone())
    }

    pub fn pipeline_control(&self) -> PipelineControl {
        PipelineControl::new(self.clone())
    }

    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys::new(self.clone())
    }

    pub fn proxies(&self) -> Proxies {
        Proxies::new(self.clone())
    }

    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    pub fn ai(&self) -> Ai {
        Ai::new(self.clone())
    }

    pub fn email(&self) -> Email {
        Email::new(self.clone())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
