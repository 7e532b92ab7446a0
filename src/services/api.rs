// src/services/api.rs

//! HTTP client for the recommendation service.
//!
//! All network access goes through the [`RecommendApi`] trait so frontends
//! and the form state machine can be driven by a scripted implementation in
//! tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::wire::{HealthStatus, RecommendRequest, RecommendResponse};
use crate::models::ApiConfig;

/// Path of the recommendation endpoint.
pub const RECOMMEND_PATH: &str = "/recommend";
/// Path of the field-of-study lookup endpoint.
pub const FIELDS_PATH: &str = "/fields";
/// Path of the country lookup endpoint.
pub const COUNTRIES_PATH: &str = "/countries";
/// Path of the service health probe.
pub const HEALTH_PATH: &str = "/health";

/// Async interface to the recommendation backend.
#[async_trait]
pub trait RecommendApi: Send + Sync {
    /// Submit a profile and receive ranked matches.
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse>;

    /// Fetch a lookup endpoint's raw JSON payload for selector transforms.
    async fn options(&self, path: &str) -> Result<Value>;

    /// Probe the backend health endpoint.
    async fn health(&self) -> Result<HealthStatus>;
}

/// Reqwest-backed implementation of [`RecommendApi`].
pub struct HttpApi {
    base_url: Url,
    client: Client,
}

impl HttpApi {
    /// Create a client from the configured base URL, user agent and timeout.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { base_url, client })
    }

    /// Resolve an endpoint path against the configured base origin.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl RecommendApi for HttpApi {
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let url = self.endpoint(RECOMMEND_PATH)?;
        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn options(&self, path: &str) -> Result<Value> {
        let url = self.endpoint(path)?;
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(HEALTH_PATH)?;
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let status: HealthStatus = response.json().await?;
        if status.status != "healthy" {
            return Err(AppError::api(
                HEALTH_PATH,
                format!("service reported status {:?}", status.status),
            ));
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;

    #[test]
    fn test_endpoint_resolution() {
        let api = HttpApi::new(&Config::default().api).unwrap();
        assert_eq!(
            api.endpoint(FIELDS_PATH).unwrap().as_str(),
            "http://localhost:8000/fields"
        );
    }

    #[test]
    fn test_endpoint_resolution_with_trailing_slash_base() {
        let mut config = ApiConfig::default();
        config.base_url = "https://api.example.com/".to_string();
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(
            api.endpoint(RECOMMEND_PATH).unwrap().as_str(),
            "https://api.example.com/recommend"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let mut config = ApiConfig::default();
        config.base_url = "not a url".to_string();
        assert!(HttpApi::new(&config).is_err());
    }
}
