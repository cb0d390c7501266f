use std::collections::HashMap;

use crate::analysis::records::EmotionRecord;

// @module: Aggregate tables and filters over the record set

/// Predicate over records, combining an exact label match with a
/// case-insensitive substring match on the line text. Conditions that are
/// `None` always hold.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact emotion label to match
    pub emotion: Option<String>,

    /// Case-insensitive substring the line must contain
    pub phrase: Option<String>,
}

impl RecordFilter {
    /// Filter by emotion label only
    pub fn emotion(label: impl Into<String>) -> Self {
        Self {
            emotion: Some(label.into()),
            phrase: None,
        }
    }

    /// Filter by emotion label and a phrase in the line text
    pub fn emotion_and_phrase(label: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            emotion: Some(label.into()),
            phrase: Some(phrase.into()),
        }
    }

    /// Whether a record satisfies every present condition
    pub fn matches(&self, record: &EmotionRecord) -> bool {
        if let Some(emotion) = &self.emotion {
            if record.emotion != *emotion {
                return false;
            }
        }
        if let Some(phrase) = &self.phrase {
            if !record.line.to_lowercase().contains(&phrase.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Times of the records that satisfy a filter, in record order.
pub fn filtered_times(records: &[EmotionRecord], filter: &RecordFilter) -> Vec<f64> {
    records.iter()
        .filter(|record| filter.matches(record))
        .map(|record| record.time)
        .collect()
}

/// Frequency of each label, sorted descending by count.
///
/// Ties are broken by label so the distribution charts are stable across
/// runs.
pub fn label_counts(records: &[EmotionRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.emotion.as_str()).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Mean confidence score per label, sorted by label.
pub fn mean_scores(records: &[EmotionRecord]) -> Vec<(String, f64)> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = sums.entry(record.emotion.as_str()).or_insert((0.0, 0));
        entry.0 += record.score;
        entry.1 += 1;
    }

    let mut means: Vec<(String, f64)> = sums.into_iter()
        .map(|(label, (sum, count))| (label.to_string(), sum / count as f64))
        .collect();
    means.sort_by(|a, b| a.0.cmp(&b.0));
    means
}
