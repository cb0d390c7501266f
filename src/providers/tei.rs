use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use log::error;

use crate::errors::ProviderError;
use crate::providers::{Classifier, LabelScore};

/// Client for a local text-classification server exposing the
/// text-embeddings-inference predict API (`POST /predict`).
#[derive(Debug)]
pub struct Tei {
    /// Base URL of the server
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Predict request body
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    /// The text to classify
    inputs: &'a str,
}

impl Tei {
    /// Create a new client for a local classification server
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Classifier for Tei {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ProviderError> {
        let response = self.client.post(self.url("predict"))
            .json(&PredictRequest { inputs: text })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Classification server error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        // The server answers with a flat list of {score, label} pairs
        response.json::<Vec<LabelScore>>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(self.url("health"))
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::ConnectionError(format!(
                "Health check failed with status {}", response.status()
            )));
        }

        Ok(())
    }
}
