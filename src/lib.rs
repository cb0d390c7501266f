/*!
 * # yasea - Yet Another Subtitle Emotion Analyzer
 *
 * A Rust library for emotion analysis of subtitle files using a pretrained
 * text-classification model.
 *
 * ## Features
 *
 * - Parse SRT subtitle files into timed dialogue cues
 * - Classify each line's dominant emotion using a classification provider:
 *   - TEI (local text-classification server)
 *   - Hugging Face Inference API
 * - Persist per-line results with timestamps to a CSV table
 * - Render distribution, time-series and comparative charts over the results
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle file parsing into timed cues
 * - `analysis`: Emotion analysis over the parsed cues:
 *   - `analysis::labeler`: Per-line classification and top-label selection
 *   - `analysis::records`: The persisted record table (CSV boundary)
 *   - `analysis::bucketize`: Fixed-width temporal bucketing for trends
 *   - `analysis::aggregate`: Label frequencies, mean scores and filters
 * - `report`: Chart-spec assembly and HTML/JSON artifact writers
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `providers`: Client implementations for classification providers:
 *   - `providers::tei`: Local text-classification server client
 *   - `providers::huggingface`: Hugging Face Inference API client
 *   - `providers::mock`: Scriptable mock classifier for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod analysis;
pub mod report;
pub mod app_controller;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{SubtitleCollection, SubtitleCue};
pub use analysis::{EmotionRecord, BucketedSeries};
pub use providers::{Classifier, LabelScore};
pub use errors::{AppError, AnalysisError, ProviderError, SubtitleError};
