use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    cache::QueryParams,
    error::{AppError, AppResult},
};

/// Outbound query transport
///
/// Issues a GET against `endpoint` with `params` as the query string and returns
/// the decoded JSON body. Every failure, including a non-2xx status or an
/// undecodable body, is returned as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> AppResult<Value>;
}

/// Transport backed by a shared reqwest client
#[derive(Clone, Default)]
pub struct HttpTransport {
    http_client: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
        }
    }

    pub fn with_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, params: &QueryParams) -> AppResult<Value> {
        let response = self
            .http_client
            .get(endpoint)
            .query(&params.to_pairs())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "{} returned status {}: {}",
                endpoint, status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(endpoint = %endpoint, response = %response_text, "Raw API response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                endpoint = %endpoint,
                error = %e,
                "Failed to decode API response"
            );
            AppError::ExternalApi(format!("Failed to decode response from {}: {}", endpoint, e))
        })
    }
}
