// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::null_default;
use crate::auth::MessageResponse;
use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "/api/v1/email";

/// Outgoing mail. `recipient` is used by single sends, `recipients` by mass sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub subject: String,
    pub body: String,
    /// Server-side path of the file to attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassEmailResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub message: String,
    /// Sent as a decimal string.
    #[serde(default, deserialize_with = "null_default")]
    pub recipient_count: String,
}

#[derive(Clone)]
pub struct Email {
    client: ApiClient,
}

impl Email {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn send(&self, request: &EmailRequest) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{BASE}/send"), request).await
    }

    pub async fn send_with_attachment(
        &self,
        request: &EmailRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{BASE}/send-with-attachment"), request).await
    }

    /// Starts a background job; the response only acknowledges it.
    pub async fn send_mass(&self, request: &EmailRequest) -> Result<MassEmailResponse, ApiError> {
        self.client.post(&format!("{BASE}/send-mass"), request).await
    }
}
