// ABOUTME: GitHub REST client for registering an SSH public key.
// ABOUTME: Single POST to /user/keys; only 201 Created counts as success.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Body of `POST /user/keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegistration {
    pub title: String,
    pub key: String,
}

impl KeyRegistration {
    /// Title reads "<prefix> for <email>".
    pub fn new(title_prefix: &str, email: &str, authorized_key: &str) -> Self {
        Self {
            title: format!("{title_prefix} for {email}"),
            key: authorized_key.to_string(),
        }
    }
}

/// Remote account that accepts public keys.
#[async_trait]
pub trait KeyRegistry {
    async fn register(&self, token: &str, registration: &KeyRegistration)
        -> Result<(), UploadError>;
}

/// GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// GitHub rejects requests without a User-Agent, so one is always set.
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("keysmith/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn keys_url(&self) -> String {
        format!("{}/user/keys", self.base_url)
    }
}

#[async_trait]
impl KeyRegistry for GitHubClient {
    async fn register(
        &self,
        token: &str,
        registration: &KeyRegistration,
    ) -> Result<(), UploadError> {
        let url = self.keys_url();
        tracing::debug!(%url, title = %registration.title, "uploading public key");

        let transport_err = |source| UploadError::Transport {
            url: url.clone(),
            source,
        };

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("token {token}"))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/vnd.github+json")
            .json(registration)
            .send()
            .await
            .map_err(transport_err)?;

        let status = resp.status();
        if status != StatusCode::CREATED {
            let body = resp.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(%url, "public key registered");
        Ok(())
    }
}
