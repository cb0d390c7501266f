/*!
 * End-to-end tests for the analysis and report pipelines
 */

use std::collections::HashMap;
use anyhow::Result;
use yasea::analysis::{bucketize, filtered_times, records, RecordFilter};
use yasea::app_controller::Controller;
use yasea::providers::mock::MockClassifier;
use yasea::providers::LabelScore;
use yasea::report::ReportOptions;
use crate::common;

const RILEY_SUBTITLE: &str = "1
00:00:01,000 --> 00:00:02,000
Riley feels scared.

2
00:00:30,000 --> 00:00:32,000
Riley is happy today.
";

fn scripted_classifier() -> MockClassifier {
    let mut script = HashMap::new();
    script.insert(
        "Riley feels scared.".to_string(),
        vec![
            LabelScore::new("joy", 0.1),
            LabelScore::new("fear", 0.8),
            LabelScore::new("neutral", 0.1),
        ],
    );
    script.insert(
        "Riley is happy today.".to_string(),
        vec![
            LabelScore::new("joy", 0.9),
            LabelScore::new("fear", 0.05),
            LabelScore::new("neutral", 0.05),
        ],
    );
    MockClassifier::scripted(script)
}

/// Test the full analysis pipeline: parse, classify, persist, re-load
#[tokio::test]
async fn test_analysis_pipeline_withScriptedClassifier_shouldPersistTwoRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "inside.srt", RILEY_SUBTITLE)?;
    let output = dir.join("inside.emotions.csv");

    let controller = Controller::new_for_test()?;
    let classifier = scripted_classifier();
    controller
        .run_analysis_with_classifier(&input, &output, &classifier, false)
        .await?;

    let loaded = records::read_csv(&output)?;
    assert_eq!(loaded.len(), 2);

    assert_eq!(loaded[0].time, 1.0);
    assert_eq!(loaded[0].line, "Riley feels scared.");
    assert_eq!(loaded[0].emotion, "fear");
    assert_eq!(loaded[0].score, 0.8);

    assert_eq!(loaded[1].time, 30.0);
    assert_eq!(loaded[1].line, "Riley is happy today.");
    assert_eq!(loaded[1].emotion, "joy");
    assert_eq!(loaded[1].score, 0.9);
    Ok(())
}

/// Test bucketizing the persisted table with the joy + "Riley" filter
#[tokio::test]
async fn test_analysis_pipeline_withJoyRileyFilter_shouldFillExactlyOneBucket() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "inside.srt", RILEY_SUBTITLE)?;
    let output = dir.join("inside.emotions.csv");

    let controller = Controller::new_for_test()?;
    let classifier = scripted_classifier();
    controller
        .run_analysis_with_classifier(&input, &output, &classifier, false)
        .await?;

    let loaded = records::read_csv(&output)?;
    let filter = RecordFilter::emotion_and_phrase("joy", "Riley");
    let times = filtered_times(&loaded, &filter);
    let series = bucketize(&times).unwrap();

    let non_zero = series.counts.iter().filter(|&&count| count > 0).count();
    assert_eq!(non_zero, 1);
    assert_eq!(series.counts.iter().sum::<usize>(), 1);
    Ok(())
}

/// Test that an existing table is not overwritten without the force flag
#[tokio::test]
async fn test_analysis_pipeline_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "inside.srt", RILEY_SUBTITLE)?;
    let output = dir.join("inside.emotions.csv");

    let controller = Controller::new_for_test()?;
    let classifier = scripted_classifier();

    controller
        .run_analysis_with_classifier(&input, &output, &classifier, false)
        .await?;
    assert_eq!(classifier.request_count(), 2);

    // Second run without force leaves the table alone
    controller
        .run_analysis_with_classifier(&input, &output, &classifier, false)
        .await?;
    assert_eq!(classifier.request_count(), 2);

    // Forced run classifies again
    controller
        .run_analysis_with_classifier(&input, &output, &classifier, true)
        .await?;
    assert_eq!(classifier.request_count(), 4);
    Ok(())
}

/// Test that a classifier failure aborts the run without writing a table
#[tokio::test]
async fn test_analysis_pipeline_withFailingClassifier_shouldAbortWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "inside.srt", RILEY_SUBTITLE)?;
    let output = dir.join("inside.emotions.csv");

    let controller = Controller::new_for_test()?;
    let classifier = MockClassifier::failing();

    let result = controller
        .run_analysis_with_classifier(&input, &output, &classifier, false)
        .await;

    assert!(result.is_err());
    assert!(!output.exists());
    Ok(())
}

/// Test the report pipeline over a freshly persisted table
#[tokio::test]
async fn test_report_pipeline_withPersistedTable_shouldWriteHtmlDashboard() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "inside.srt", RILEY_SUBTITLE)?;
    let table = dir.join("inside.emotions.csv");
    let report = dir.join("inside.report.html");

    let controller = Controller::new_for_test()?;
    let classifier = scripted_classifier();
    controller
        .run_analysis_with_classifier(&input, &table, &classifier, false)
        .await?;

    let options = ReportOptions {
        trend_emotion: "fear".to_string(),
        focus_emotion: "joy".to_string(),
        focus_phrase: Some("Riley".to_string()),
    };
    controller.run_report(table, report.clone(), options)?;

    let content = std::fs::read_to_string(&report)?;
    assert!(content.contains("const DATA = "));
    Ok(())
}

/// Test that an empty subtitle file yields an empty table, not an error
#[tokio::test]
async fn test_analysis_pipeline_withEmptySubtitle_shouldWriteEmptyTable() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "empty.srt", "")?;
    let output = dir.join("empty.emotions.csv");

    let controller = Controller::new_for_test()?;
    let classifier = MockClassifier::working();
    controller
        .run_analysis_with_classifier(&input, &output, &classifier, false)
        .await?;

    let loaded = records::read_csv(&output)?;
    assert!(loaded.is_empty());
    assert_eq!(classifier.request_count(), 0);
    Ok(())
}
