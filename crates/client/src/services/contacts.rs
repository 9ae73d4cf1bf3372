// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::{null_default, Resource};
use crate::client::ApiClient;

pub type Contacts = Resource<Contact>;

pub(crate) fn resource(client: ApiClient) -> Contacts {
    Resource::new(client, "/api/v1/scrape/contacts", "full")
}

/// Contact details extracted from scraped pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub emails: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub phone_numbers: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub linked_in_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub twitter_handles: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub github_profiles: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub names: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
