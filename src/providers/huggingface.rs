use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use log::{error, warn};

use crate::errors::ProviderError;
use crate::providers::{Classifier, LabelScore};

/// HuggingFace client for the hosted Inference API
#[derive(Debug)]
pub struct HuggingFace {
    /// HTTP client for API requests
    client: Client,
    /// API token for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public inference API)
    endpoint: String,
    /// Model repository id, e.g. "j-hartmann/emotion-english-distilroberta-base"
    model: String,
    /// Maximum number of retry attempts for transient failures
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Inference request body
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    /// The text to classify
    inputs: &'a str,

    /// Request options
    options: InferenceOptions,
}

/// Inference request options
#[derive(Debug, Serialize)]
struct InferenceOptions {
    /// Block until the model is loaded instead of returning 503 immediately
    wait_for_model: bool,
}

impl HuggingFace {
    /// Create a new HuggingFace inference client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }

    /// Override the retry policy for transient failures
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Full URL of the model inference endpoint
    fn model_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://api-inference.huggingface.co"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/models/{}", base, self.model)
    }

    /// Send one inference request, without retry handling
    async fn request_scores(&self, text: &str) -> Result<Vec<LabelScore>, ProviderError> {
        let request = InferenceRequest {
            inputs: text,
            options: InferenceOptions { wait_for_model: true },
        };

        let response = self.client.post(self.model_url())
            .bearer_auth(&self.api_key)
            .json(&request)
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
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(message)
                }
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message,
                },
            });
        }

        let body: Value = response.json().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Self::parse_label_scores(&body)
    }

    /// Parse the inference response into a label distribution.
    ///
    /// Text-classification models answer with the scores nested per input
    /// (`[[{label, score}, ...]]`); some deployments return the flat form.
    fn parse_label_scores(body: &Value) -> Result<Vec<LabelScore>, ProviderError> {
        let outer = body.as_array()
            .ok_or_else(|| ProviderError::ParseError(
                format!("Expected a JSON array, got: {}", body)))?;

        let scores = match outer.first() {
            Some(Value::Array(_)) => outer[0].clone(),
            _ => body.clone(),
        };

        serde_json::from_value::<Vec<LabelScore>>(scores)
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Whether a failed attempt is worth retrying
    fn is_transient(error: &ProviderError) -> bool {
        match error {
            ProviderError::ConnectionError(_) | ProviderError::RequestFailed(_) => true,
            // 503 while the model is still loading
            ProviderError::ApiError { status_code, .. } => *status_code == 503,
            _ => false,
        }
    }
}

#[async_trait]
impl Classifier for HuggingFace {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ProviderError> {
        let mut attempt = 0;
        loop {
            match self.request_scores(text).await {
                Ok(scores) => return Ok(scores),
                Err(e) if attempt < self.max_retries && Self::is_transient(&e) => {
                    let backoff = self.backoff_base_ms * (1u64 << attempt);
                    warn!("Inference attempt {} failed ({}), retrying in {}ms",
                          attempt + 1, e, backoff);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("HuggingFace inference failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.request_scores("Hello").await?;
        Ok(())
    }
}
