//! Chart artifacts for the analysis dashboard
//!
//! This module is the hand-off boundary to the rendering layer: it turns the
//! record table into chart specifications (category/value mappings and
//! ordered time series) and writes them out in one of two formats:
//!
//! - **HTML**: self-contained dashboard page, chart data embedded as JSON
//!   and rendered client-side
//! - **JSON**: machine-readable chart specs for programmatic consumption
//!
//! # Usage
//!
//! ```ignore
//! use yasea::report;
//!
//! let dashboard = report::build_dashboard(&records, &report::ReportOptions::default());
//! report::generate("report.html", &dashboard)?;  // HTML
//! report::generate("report.json", &dashboard)?;  // JSON
//! ```

pub mod html;
pub mod json;

use std::path::Path;
use anyhow::{Result, Context};
use serde::Serialize;
use log::warn;

use crate::analysis::records::EmotionRecord;
use crate::analysis::{bucketize, format_mmss, label_counts, mean_scores, filtered_times, RecordFilter};

/// One category with its numeric value (count or mean score)
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Category name (an emotion label)
    pub name: String,
    /// Numeric value for the category
    pub value: f64,
}

/// One point of a bucketed time series
#[derive(Debug, Clone, Serialize)]
pub struct TimePoint {
    /// Window midpoint formatted as MM:SS - the x-axis tick label
    pub label: String,
    /// Window midpoint in seconds
    pub midpoint: f64,
    /// Number of matching lines in the window
    pub count: usize,
}

/// A single chart specification
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Chart {
    /// Pie chart over category counts
    Pie { title: String, categories: Vec<Category> },
    /// Radar chart over category counts, sorted descending
    Radar { title: String, categories: Vec<Category> },
    /// Line chart over a bucketed time series
    Line { title: String, points: Vec<TimePoint> },
    /// Bar chart over per-category mean scores
    Bar { title: String, categories: Vec<Category> },
}

/// The full set of charts for one record table
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Total number of records the charts were built from
    pub record_count: usize,
    /// Charts in render order
    pub charts: Vec<Chart>,
}

/// Filters parameterizing the two trend charts
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Emotion whose frequency is tracked over time
    pub trend_emotion: String,
    /// Emotion for the focused trend chart
    pub focus_emotion: String,
    /// Optional phrase the focused chart additionally filters lines by
    pub focus_phrase: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            trend_emotion: "fear".to_string(),
            focus_emotion: "joy".to_string(),
            focus_phrase: None,
        }
    }
}

/// Build the dashboard charts in their fixed order: pie, radar, trend line,
/// focused trend line, mean-score bar.
///
/// A trend chart whose filtered record set is empty has no defined time
/// range; it is skipped with a warning rather than rendered over an
/// invented range.
pub fn build_dashboard(records: &[EmotionRecord], options: &ReportOptions) -> Dashboard {
    let mut charts = Vec::new();

    if records.is_empty() {
        warn!("Record table is empty, nothing to chart");
        return Dashboard { record_count: 0, charts };
    }

    let counts: Vec<Category> = label_counts(records).into_iter()
        .map(|(name, count)| Category { name, value: count as f64 })
        .collect();

    charts.push(Chart::Pie {
        title: "Emotion Distribution".to_string(),
        categories: counts.clone(),
    });

    charts.push(Chart::Radar {
        title: "Emotion Distribution (Radar)".to_string(),
        categories: counts,
    });

    let trend_filter = RecordFilter::emotion(&options.trend_emotion);
    if let Some(chart) = trend_chart(
        records,
        &trend_filter,
        format!("{} over time (10 equal segments)", options.trend_emotion),
    ) {
        charts.push(chart);
    }

    let focus_filter = RecordFilter {
        emotion: Some(options.focus_emotion.clone()),
        phrase: options.focus_phrase.clone(),
    };
    let focus_title = match &options.focus_phrase {
        Some(phrase) => format!(
            "{} + \"{}\" over time (10 equal segments)",
            options.focus_emotion, phrase
        ),
        None => format!("{} over time (10 equal segments)", options.focus_emotion),
    };
    if let Some(chart) = trend_chart(records, &focus_filter, focus_title) {
        charts.push(chart);
    }

    let means: Vec<Category> = mean_scores(records).into_iter()
        .map(|(name, mean)| Category { name, value: mean })
        .collect();
    charts.push(Chart::Bar {
        title: "Average Emotion Score".to_string(),
        categories: means,
    });

    Dashboard {
        record_count: records.len(),
        charts,
    }
}

/// Bucketize the filtered records into a line chart, or `None` when the
/// filter matches nothing.
fn trend_chart(records: &[EmotionRecord], filter: &RecordFilter, title: String) -> Option<Chart> {
    let times = filtered_times(records, filter);
    let Some(series) = bucketize(&times) else {
        warn!("No records match filter {:?}, skipping chart \"{}\"", filter, title);
        return None;
    };

    let points = series.midpoints.iter()
        .zip(series.counts.iter())
        .map(|(&midpoint, &count)| TimePoint {
            label: format_mmss(midpoint),
            midpoint,
            count,
        })
        .collect();

    Some(Chart::Line { title, points })
}

/// Write a dashboard artifact in the format matching the file extension
pub fn generate<P: AsRef<Path>>(path: P, dashboard: &Dashboard) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;

    match ext.as_str() {
        "html" | "htm" => html::write(&mut file, dashboard),
        _ => json::write(&mut file, dashboard),
    }
    .with_context(|| format!("Failed to write report: {}", path.display()))
}
