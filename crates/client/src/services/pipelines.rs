// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline run history and control of the running pipeline.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{null_default, Resource};
use crate::auth::MessageResponse;
use crate::client::ApiClient;
use crate::error::ApiError;

pub type Pipelines = Resource<Pipeline>;

pub(crate) fn resource(client: ApiClient) -> Pipelines {
    Resource::new(client, "/api/v1/scrape/pipelines", "full_delete")
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    Started,
    ApiCallerStarted,
    ApiCallerComplete,
    ScraperStarted,
    ScraperComplete,
    ParserStarted,
    ParserComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Pending,
    Running,
    Paused,
    Cancelled,
    Skipping,
    Completed,
    Failed,
}

impl PipelineState {
    /// True once the run can no longer change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed | Self::Failed)
    }
}

/// One pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: String,
    #[serde(default)]
    pub stage: Option<PipelineStage>,
    #[serde(default)]
    pub state: Option<PipelineState>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub items_processed: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub items_total: u64,
    #[serde(default)]
    pub current_step_name: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub links_created: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub pages_scraped: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub contacts_found: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub errors_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineStats {
    pub total: u64,
    pub active: u64,
    pub completed: u64,
    pub failed: u64,
    pub total_contacts_found: u64,
}

/// Whether a pipeline is currently running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStatus {
    pub active: bool,
    pub message: String,
}

const SCRAPE_BASE: &str = "/api/v1/scrape";

/// Starts and steers pipeline runs. The backend runs at most one at a time
/// and answers 400 when asked to start another.
#[derive(Clone)]
pub struct PipelineControl {
    client: ApiClient,
}

impl PipelineControl {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn start(&self, action: &str) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{SCRAPE_BASE}/{action}"), &json!({})).await
    }

    async fn steer(&self, action: &str) -> Result<Pipeline, ApiError> {
        self.client.post(&format!("{SCRAPE_BASE}/{action}"), &json!({})).await
    }

    /// Run only the search-engine stage.
    pub async fn start_google(&self) -> Result<MessageResponse, ApiError> {
        self.start("start_google").await
    }

    pub async fn start_scrape(&self) -> Result<MessageResponse, ApiError> {
        self.start("start_scrape").await
    }

    pub async fn start_extract(&self) -> Result<MessageResponse, ApiError> {
        self.start("start_extract").await
    }

    /// Run the given stages in one pipeline.
    pub async fn execute_steps(
        &self,
        steps: &[PipelineStage],
    ) -> Result<MessageResponse, ApiError> {
        let mut steps = steps.to_vec();
        steps.sort();
        steps.dedup();
        self.client.post(&format!("{SCRAPE_BASE}/execute_steps"), &steps).await
    }

    pub async fn execute_all(&self) -> Result<MessageResponse, ApiError> {
        self.start("execute_all").await
    }

    pub async fn pause(&self) -> Result<Pipeline, ApiError> {
        self.steer("pause").await
    }

    pub async fn resume(&self) -> Result<Pipeline, ApiError> {
        self.steer("resume").await
    }

    /// Skip the current step of the running pipeline.
    pub async fn skip(&self) -> Result<Pipeline, ApiError> {
        self.steer("skip").await
    }

    pub async fn cancel(&self) -> Result<Pipeline, ApiError> {
        self.steer("cancel").await
    }

    pub async fn status(&self) -> Result<PipelineStatus, ApiError> {
        self.client.get(&format!("{SCRAPE_BASE}/status")).await
    }
}
