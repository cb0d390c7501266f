use crate::errors::AnalysisError;
use crate::providers::{Classifier, LabelScore};
use crate::subtitle_processor::SubtitleCue;
use crate::analysis::records::EmotionRecord;

// @module: Per-line emotion labeling

/// Select the highest-confidence label from a distribution.
///
/// Ties resolve to the first-encountered maximum; strict `>` keeps the
/// earlier pair when scores are equal.
pub fn select_top_label(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores.iter().reduce(|best, candidate| {
        if candidate.score > best.score {
            candidate
        } else {
            best
        }
    })
}

/// Classify one cue and combine its time and text with the top label.
///
/// A classifier failure is fatal for the run - there is no skip-and-log
/// recovery, so a persisted table always covers every cue.
pub async fn label_cue(
    classifier: &dyn Classifier,
    cue: &SubtitleCue,
) -> Result<EmotionRecord, AnalysisError> {
    let scores = classifier.classify(&cue.text).await?;

    let top = select_top_label(&scores)
        .ok_or_else(|| AnalysisError::EmptyDistribution(cue.text.clone()))?;

    Ok(EmotionRecord::new(
        cue.start_seconds(),
        cue.text.clone(),
        top.label.clone(),
        top.score,
    ))
}

/// Classify a sequence of cues, preserving input order.
pub async fn label_cues(
    classifier: &dyn Classifier,
    cues: &[SubtitleCue],
) -> Result<Vec<EmotionRecord>, AnalysisError> {
    let mut records = Vec::with_capacity(cues.len());
    for cue in cues {
        records.push(label_cue(classifier, cue).await?);
    }
    Ok(records)
}
