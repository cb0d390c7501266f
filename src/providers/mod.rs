/*!
 * Provider implementations for emotion classification services.
 *
 * This module contains client implementations for text-classification providers:
 * - Tei: local text-classification server (text-embeddings-inference compatible)
 * - HuggingFace: Hugging Face Inference API integration
 * - Mock: scriptable in-process classifier for tests
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One label with its confidence score, as returned by a classifier.
///
/// The label set is whatever the backing model produces; nothing in this
/// crate hard-codes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Emotion label (e.g. "joy", "fear")
    pub label: String,

    /// Confidence in [0, 1]
    pub score: f64,
}

impl LabelScore {
    /// Create a new label/score pair
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Common trait for all classification providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the analysis pipeline.
#[async_trait]
pub trait Classifier: Send + Sync + Debug {
    /// Classify a piece of text into a label distribution
    ///
    /// # Arguments
    /// * `text` - The text to classify
    ///
    /// # Returns
    /// * `Result<Vec<LabelScore>, ProviderError>` - All labels with their scores,
    ///   not just the top one; the caller selects the maximum itself
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod tei;
pub mod huggingface;
pub mod mock;
