// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::{null_default, Resource};
use crate::client::ApiClient;

pub type ScrapeJobs = Resource<ScrapeJob>;

pub(crate) fn resource(client: ApiClient) -> ScrapeJobs {
    Resource::new(client, "/api/v1/scrape/scrape_jobs", "full_delete")
}

/// A link queued for scraping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJob {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_default")]
    pub attempt: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub been_scraped: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub scrape_failed: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
