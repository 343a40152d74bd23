//! HTTP record source for the JSONPlaceholder `/users` fixture
//!
//! Enable with `--features http`. Requires the `reqwest` crate.

use crate::core::error::FetchError;
use crate::core::service::RecordSource;
use crate::core::user::{User, UserId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Public fixture endpoint
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Fetches users from a JSONPlaceholder-compatible endpoint
///
/// `GET {base_url}` lists every user, `GET {base_url}/{id}` fetches one.
#[derive(Clone)]
pub struct JsonPlaceholderClient {
    client: Client,
    base_url: String,
}

impl JsonPlaceholderClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network {
                url: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    /// Client for the public fixture with a 10 second timeout
    pub fn public() -> Result<Self, FetchError> {
        Self::new(DEFAULT_API_URL, Duration::from_secs(10))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        tracing::debug!(url = %url, "fetching");
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RecordSource<User> for JsonPlaceholderClient {
    async fn fetch_all(&self) -> Result<Vec<User>, FetchError> {
        let response = self.get(&self.base_url).await?;
        Self::decode(&self.base_url, response).await
    }

    async fn fetch_one(&self, id: UserId) -> Result<Option<User>, FetchError> {
        let url = format!("{}/{}", self.base_url, id);
        let response = self.get(&url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(&url, response).await.map(Some)
    }
}
