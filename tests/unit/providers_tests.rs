/*!
 * Tests for classifier provider implementations
 */

use std::collections::HashMap;
use yasea::errors::ProviderError;
use yasea::providers::mock::{MockBehavior, MockClassifier};
use yasea::providers::{Classifier, LabelScore};

/// Test that the working mock returns a full label distribution
#[tokio::test]
async fn test_mock_classify_withWorkingBehavior_shouldReturnFullDistribution() {
    let classifier = MockClassifier::working();

    let scores = classifier.classify("I am so scared of this.").await.unwrap();

    assert_eq!(scores.len(), 7);
    let total: f64 = scores.iter().map(|s| s.score).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let top = scores.iter().max_by(|a, b| a.score.partial_cmp(&b.score).unwrap()).unwrap();
    assert_eq!(top.label, "fear");
}

/// Test the scripted mock against known and unknown texts
#[tokio::test]
async fn test_mock_classify_withScriptedBehavior_shouldAnswerFromScript() {
    let mut script = HashMap::new();
    script.insert(
        "Riley feels scared.".to_string(),
        vec![LabelScore::new("fear", 0.7), LabelScore::new("joy", 0.2)],
    );
    let classifier = MockClassifier::scripted(script);

    let scores = classifier.classify("Riley feels scared.").await.unwrap();
    assert_eq!(scores[0].label, "fear");

    let unknown = classifier.classify("Unscripted line.").await;
    assert!(matches!(unknown, Err(ProviderError::RequestFailed(_))));
}

/// Test that the failing mock propagates errors
#[tokio::test]
async fn test_mock_classify_withFailingBehavior_shouldError() {
    let classifier = MockClassifier::failing();

    let result = classifier.classify("Anything").await;

    assert!(result.is_err());
    assert!(classifier.test_connection().await.is_err());
}

/// Test that the empty behavior yields an empty distribution, not an error
#[tokio::test]
async fn test_mock_classify_withEmptyBehavior_shouldReturnEmptyDistribution() {
    let classifier = MockClassifier::new(MockBehavior::Empty);

    let scores = classifier.classify("Anything").await.unwrap();

    assert!(scores.is_empty());
}

/// Test that the request counter tracks classify calls
#[tokio::test]
async fn test_mock_request_count_withMultipleCalls_shouldIncrement() {
    let classifier = MockClassifier::working();

    classifier.classify("one").await.unwrap();
    classifier.classify("two").await.unwrap();
    classifier.classify("three").await.unwrap();

    assert_eq!(classifier.request_count(), 3);
}
