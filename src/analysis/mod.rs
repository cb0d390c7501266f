/*!
 * Emotion analysis over timed dialogue cues.
 *
 * This module contains the core of the analysis pipeline:
 * - `analysis::labeler`: per-line classification and top-label selection
 * - `analysis::records`: the persisted record table (CSV boundary)
 * - `analysis::bucketize`: fixed-width temporal bucketing for trend charts
 * - `analysis::aggregate`: label frequencies, mean scores and record filters
 */

pub mod labeler;
pub mod records;
pub mod bucketize;
pub mod aggregate;

pub use labeler::{label_cue, label_cues, select_top_label};
pub use records::EmotionRecord;
pub use bucketize::{bucketize, format_mmss, BucketedSeries, BUCKET_COUNT};
pub use aggregate::{label_counts, mean_scores, filtered_times, RecordFilter};
