/*!
 * Mock classifier implementations for testing.
 *
 * This module provides mock classifiers that simulate different behaviors:
 * - `MockClassifier::working()` - Always succeeds with a keyword-driven distribution
 * - `MockClassifier::scripted(..)` - Returns pre-defined distributions per text
 * - `MockClassifier::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{Classifier, LabelScore};

/// Behavior mode for the mock classifier
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds with a keyword-driven label distribution
    Working,
    /// Returns the scripted distribution for each known text, errors on unknown text
    Scripted(HashMap<String, Vec<LabelScore>>),
    /// Always fails with an error
    Failing,
    /// Returns an empty distribution
    Empty,
    /// Simulates slow responses (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock classifier for testing analysis behavior
#[derive(Debug)]
pub struct MockClassifier {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of classify calls observed
    request_count: Arc<AtomicUsize>,
}

impl MockClassifier {
    /// Create a new mock classifier with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock classifier that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock classifier answering from a text -> distribution script
    pub fn scripted(script: HashMap<String, Vec<LabelScore>>) -> Self {
        Self::new(MockBehavior::Scripted(script))
    }

    /// Create a mock classifier that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of classify calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Keyword-driven distribution used by the Working behavior.
    ///
    /// Deterministic: the dominant label depends only on the input text, so
    /// tests can assert on it without a real model.
    fn heuristic_scores(text: &str) -> Vec<LabelScore> {
        let lower = text.to_lowercase();
        let dominant = if lower.contains("scared") || lower.contains("afraid") {
            "fear"
        } else if lower.contains("happy") || lower.contains("glad") {
            "joy"
        } else if lower.contains("angry") || lower.contains("furious") {
            "anger"
        } else if lower.contains("sad") || lower.contains("crying") {
            "sadness"
        } else {
            "neutral"
        };

        let labels = ["anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise"];
        labels.iter()
            .map(|label| {
                let score = if *label == dominant { 0.85 } else { 0.025 };
                LabelScore::new(*label, score)
            })
            .collect()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(Self::heuristic_scores(text)),
            MockBehavior::Scripted(script) => script.get(text)
                .cloned()
                .ok_or_else(|| ProviderError::RequestFailed(format!(
                    "No scripted response for text: {}", text
                ))),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Mock classifier configured to fail".to_string(),
            )),
            MockBehavior::Empty => Ok(Vec::new()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                Ok(Self::heuristic_scores(text))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Mock classifier configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
