// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calls to the backend's `/api/v1/auth` endpoints.
//!
//! These run outside the authorized request client: they either need no
//! credentials (sign-in, refresh) or must never trigger a refresh themselves.

use serde::{Deserialize, Serialize};

use crate::error::{status_error, ApiError};

/// Token pair returned by sign-in and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticationResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    refresh_token: &'a str,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Auth-related settings published by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    pub resend_cooldown_seconds: u64,
    pub resend_max_per_hour: u32,
}

/// Thin HTTP wrapper over the auth endpoints.
pub struct AuthApi {
    base_url: String,
    http: reqwest::Client,
}

impl AuthApi {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self { base_url: base_url.into(), http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/auth{}", self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn sign_in(&self, req: &SignInRequest) -> Result<AuthenticationResponse, ApiError> {
        self.post_json("/sign-in", req).await
    }

    pub async fn sign_up(&self, req: &SignUpRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/sign-up", req).await
    }

    pub async fn verify(&self, req: &VerificationRequest) -> Result<MessageResponse, ApiError> {
        self.post_json("/verify", req).await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let resp = self
            .http
            .post(self.url("/resend-verification"))
            .query(&[("email", email)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Exchange a refresh token for a rotated pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthenticationResponse, ApiError> {
        self.post_json("/refresh", &RefreshTokenRequest { refresh_token }).await
    }

    /// Invalidate `refresh_token` server-side.
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: &str,
    ) -> Result<(), ApiError> {
        let mut req =
            self.http.post(self.url("/logout")).json(&RefreshTokenRequest { refresh_token });
        if let Some(token) = access_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        Ok(())
    }

    /// Invalidate every refresh token of the signed-in user.
    pub async fn logout_all(
        &self,
        access_token: Option<&str>,
    ) -> Result<MessageResponse, ApiError> {
        let mut req = self.http.post(self.url("/logout-all"));
        if let Some(token) = access_token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Ok(MessageResponse::default());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn config(&self) -> Result<AuthConfig, ApiError> {
        let resp = self.http.get(self.url("/config")).send().await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
