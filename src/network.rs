use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::User;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request task ended without a result")]
    Interrupted,
}

/// Read access to the remote user directory.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<User>, ApiError>;
    async fn fetch_one(&self, id: u64) -> Result<User, ApiError>;
}

/// `UserSource` over plain HTTP GETs. One attempt per call: no retries, no timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http { status: status.as_u16() });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl UserSource for ApiClient {
    async fn fetch_all(&self) -> Result<Vec<User>, ApiError> {
        let url = format!("{}/users", self.base_url);
        self.get_json(&url)
            .await
            .inspect_err(|e| error!(%url, error = %e, "Error fetching users"))
    }

    async fn fetch_one(&self, id: u64) -> Result<User, ApiError> {
        let url = format!("{}/users/{}", self.base_url, id);
        self.get_json(&url)
            .await
            .inspect_err(|e| error!(%url, id, error = %e, "Error fetching user with id {id}"))
    }
}
