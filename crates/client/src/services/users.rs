// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Page;
use crate::auth::{MessageResponse, SignUpRequest};
use crate::client::ApiClient;
use crate::error::ApiError;

const BASE: &str = "/api/v1/users";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default, rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub last_login_at: Option<String>,
}

/// Profile fields to change; absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// The signed-in user's profile plus administrator user management.
#[derive(Clone)]
pub struct Users {
    client: ApiClient,
}

impl Users {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get(&format!("{BASE}/me")).await
    }

    pub async fn update_me(&self, request: &UserUpdateRequest) -> Result<User, ApiError> {
        self.client.put(&format!("{BASE}/me"), request).await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = PasswordChange { current_password, new_password };
        self.client.post(&format!("{BASE}/me/change-password"), &body).await
    }

    /// Soft-delete the signed-in account.
    pub async fn delete_me(&self) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{BASE}/me")).await?;
        Ok(())
    }

    pub async fn list(&self, page: u32) -> Result<Page<User>, ApiError> {
        self.client.get(&format!("{BASE}?page={page}")).await
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    pub async fn update(&self, id: &str, request: &UserUpdateRequest) -> Result<User, ApiError> {
        self.client.put(&format!("{BASE}/{id}"), request).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{BASE}/{id}")).await?;
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{BASE}/{id}/restore"), &json!({})).await
    }

    pub async fn purge(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("{BASE}/{id}/permanent")).await?;
        Ok(())
    }

    pub async fn send_verification(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.client.post(&format!("{BASE}/{email}/send-verification"), &json!({})).await
    }

    /// Create an administrator account (super-admin only).
    pub async fn create_admin(&self, request: &SignUpRequest) -> Result<(), ApiError> {
        let _: Value = self.client.post("/admin/createAdmin", request).await?;
        Ok(())
    }
}
