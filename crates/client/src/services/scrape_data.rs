// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::{null_default, Resource};
use crate::client::ApiClient;

pub type ScrapeDataFiles = Resource<ScrapeData>;

pub(crate) fn resource(client: ApiClient) -> ScrapeDataFiles {
    Resource::new(client, "/api/v1/scrape/scrape_data", "full_delete")
}

/// A downloaded page saved to disk, waiting for the parser stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeData {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub attempt_number: u32,
    #[serde(default, deserialize_with = "null_default")]
    pub parsed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
