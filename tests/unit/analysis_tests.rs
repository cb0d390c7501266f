/*!
 * Tests for bucketizing, aggregation and labeling functionality
 */

use anyhow::Result;
use yasea::analysis::{
    bucketize, filtered_times, format_mmss, label_counts, label_cues, mean_scores, records,
    select_top_label, EmotionRecord, RecordFilter, BUCKET_COUNT,
};
use yasea::providers::mock::MockClassifier;
use yasea::providers::LabelScore;
use yasea::subtitle_processor::SubtitleCue;
use crate::common;

/// Test bucket coverage: every record lands in exactly one bucket
#[test]
fn test_bucketize_withSpreadTimes_shouldCoverAllRecords() {
    let times: Vec<f64> = vec![0.0, 3.0, 7.5, 12.0, 44.0, 59.9, 60.0, 71.2, 88.8, 100.0];

    let series = bucketize(&times).unwrap();

    assert_eq!(series.counts.len(), BUCKET_COUNT);
    assert_eq!(series.midpoints.len(), BUCKET_COUNT);
    assert_eq!(series.counts.iter().sum::<usize>(), times.len());
}

/// Test that the maximum value is clamped into the last bucket
#[test]
fn test_bucketize_withMaxValue_shouldClampIntoLastBucket() {
    let times: Vec<f64> = vec![0.0, 100.0];

    let series = bucketize(&times).unwrap();

    assert_eq!(series.counts[0], 1);
    assert_eq!(series.counts[BUCKET_COUNT - 1], 1);
}

/// Test bucket midpoints over a simple range
#[test]
fn test_bucketize_withZeroToHundred_shouldCenterMidpoints() {
    let times: Vec<f64> = vec![0.0, 100.0];

    let series = bucketize(&times).unwrap();

    assert_eq!(series.midpoints[0], 5.0);
    assert_eq!(series.midpoints[9], 95.0);
}

/// Test idempotence: same input, same output
#[test]
fn test_bucketize_withSameInput_shouldBeIdempotent() {
    let times: Vec<f64> = vec![1.5, 20.0, 33.3, 47.0, 58.2, 71.9];

    let first = bucketize(&times).unwrap();
    let second = bucketize(&times).unwrap();

    assert_eq!(first, second);
}

/// Test the empty-input fallback
#[test]
fn test_bucketize_withEmptyInput_shouldReturnNone() {
    assert!(bucketize(&[]).is_none());
}

/// Test the zero-width range fallback
#[test]
fn test_bucketize_withSingleTimestamp_shouldPutEverythingInFirstBucket() {
    let times: Vec<f64> = vec![42.0, 42.0, 42.0];

    let series = bucketize(&times).unwrap();

    assert_eq!(series.counts[0], 3);
    assert_eq!(series.counts[1..].iter().sum::<usize>(), 0);
    assert!(series.midpoints.iter().all(|&m| m == 42.0));
}

/// Test MM:SS formatting
#[test]
fn test_format_mmss_withVariousTimes_shouldFormatWithoutHourRollover() {
    assert_eq!(format_mmss(65.25), "01:05");
    assert_eq!(format_mmss(3661.0), "61:01");
    assert_eq!(format_mmss(0.0), "00:00");
    assert_eq!(format_mmss(59.999), "00:59");
}

/// Test top-label selection over a full distribution
#[test]
fn test_select_top_label_withDistribution_shouldPickMaximum() {
    let scores = vec![
        LabelScore::new("joy", 0.2),
        LabelScore::new("fear", 0.7),
        LabelScore::new("anger", 0.1),
    ];

    let top = select_top_label(&scores).unwrap();

    assert_eq!(top.label, "fear");
    assert_eq!(top.score, 0.7);
}

/// Test that ties resolve to the first-encountered maximum
#[test]
fn test_select_top_label_withTiedScores_shouldKeepFirst() {
    let scores = vec![
        LabelScore::new("joy", 0.4),
        LabelScore::new("fear", 0.4),
        LabelScore::new("anger", 0.2),
    ];

    let top = select_top_label(&scores).unwrap();

    assert_eq!(top.label, "joy");
}

/// Test that an empty distribution selects nothing
#[test]
fn test_select_top_label_withEmptyDistribution_shouldReturnNone() {
    assert!(select_top_label(&[]).is_none());
}

/// Test labeling a cue sequence with the working mock
#[tokio::test]
async fn test_label_cues_withWorkingClassifier_shouldPreserveOrder() -> Result<()> {
    let classifier = MockClassifier::working();
    let cues = vec![
        SubtitleCue::new(1000, 2000, "I am so scared.".to_string()),
        SubtitleCue::new(30000, 32000, "I am happy now.".to_string()),
    ];

    let records = label_cues(&classifier, &cues).await?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].time, 1.0);
    assert_eq!(records[0].emotion, "fear");
    assert_eq!(records[1].time, 30.0);
    assert_eq!(records[1].emotion, "joy");
    assert_eq!(classifier.request_count(), 2);
    Ok(())
}

/// Test label frequency ordering
#[test]
fn test_label_counts_withMixedRecords_shouldSortDescending() {
    let records = common::sample_records();

    let counts = label_counts(&records);

    assert_eq!(counts[0], ("joy".to_string(), 2));
    assert_eq!(counts.len(), 5);
    // Remaining labels all have one record and are ordered by label
    assert!(counts[1..].windows(2).all(|pair| pair[0].0 < pair[1].0));
}

/// Test per-label mean scores
#[test]
fn test_mean_scores_withMixedRecords_shouldAverageByLabel() {
    let records = common::sample_records();

    let means = mean_scores(&records);

    let joy = means.iter().find(|(label, _)| label == "joy").unwrap();
    assert!((joy.1 - 0.875).abs() < 1e-9);
    // Sorted by label
    assert!(means.windows(2).all(|pair| pair[0].0 < pair[1].0));
}

/// Test case-insensitive phrase filtering combined with a label filter
#[test]
fn test_record_filter_withPhraseAndEmotion_shouldMatchCaseInsensitive() {
    let records = common::sample_records();
    let filter = RecordFilter::emotion_and_phrase("joy", "riley");

    let times = filtered_times(&records, &filter);

    assert_eq!(times, vec![30.0, 60.0]);
}

/// Test the label-only filter
#[test]
fn test_record_filter_withEmotionOnly_shouldMatchAllWithLabel() {
    let records = common::sample_records();
    let filter = RecordFilter::emotion("fear");

    let times = filtered_times(&records, &filter);

    assert_eq!(times, vec![0.0]);
}

/// Test the CSV persistence boundary between the two pipelines
#[test]
fn test_records_csv_withRoundTrip_shouldPreserveRowsAndHeader() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("results.csv");
    let records = vec![
        EmotionRecord::new(1.0, "Riley feels scared.", "fear", 0.7),
        EmotionRecord::new(30.0, "Riley is happy today.", "joy", 0.9),
    ];

    records::write_csv(&path, &records)?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("time,line,emotion,score\n"));

    let loaded = records::read_csv(&path)?;
    assert_eq!(loaded, records);
    Ok(())
}

/// Test that writing replaces any prior table at the path
#[test]
fn test_records_csv_withExistingFile_shouldOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("results.csv");

    records::write_csv(&path, &[EmotionRecord::new(1.0, "Old.", "joy", 0.5)])?;
    records::write_csv(&path, &[EmotionRecord::new(2.0, "New.", "fear", 0.6)])?;

    let loaded = records::read_csv(&path)?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].line, "New.");
    Ok(())
}

/// Test that loading a missing table is a fatal error
#[test]
fn test_records_read_csv_withMissingFile_shouldFail() {
    assert!(records::read_csv("definitely/not/a/table.csv").is_err());
}
