use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::{ClassifierProvider, Config};
use crate::analysis::{label_cue, label_counts, records};
use crate::file_utils::{FileManager, FileType};
use crate::providers::Classifier;
use crate::providers::huggingface::HuggingFace;
use crate::providers::tei::Tei;
use crate::report::{self, ReportOptions};
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for the analysis and report pipelines

/// Main application controller for subtitle emotion analysis
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self {
            config,
        };

        Ok(controller)
    }

    /// Build the configured classifier client
    pub fn create_classifier(&self) -> Result<Box<dyn Classifier>> {
        let classification = &self.config.classification;
        let classifier: Box<dyn Classifier> = match classification.provider {
            ClassifierProvider::Tei => Box::new(Tei::new(
                classification.get_endpoint(),
                classification.get_timeout_secs(),
            )),
            ClassifierProvider::HuggingFace => Box::new(
                HuggingFace::new(
                    classification.get_api_key(),
                    classification.get_endpoint(),
                    classification.get_model(),
                    classification.get_timeout_secs(),
                )
                .with_retry(
                    classification.common.retry_count,
                    classification.common.retry_backoff_ms,
                ),
            ),
        };

        Ok(classifier)
    }

    /// Run the analysis pipeline on a subtitle file or a directory of them
    pub async fn run_analysis(
        &self,
        input_path: PathBuf,
        output_path: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<()> {
        if input_path.is_dir() {
            return self.run_analysis_folder(&input_path, force_overwrite).await;
        }

        if !FileManager::file_exists(&input_path) {
            return Err(anyhow::anyhow!("Input path does not exist: {:?}", input_path));
        }

        let output_path = output_path.unwrap_or_else(|| Self::default_table_path(&input_path));
        let classifier = self.create_classifier()?;
        self.run_analysis_with_classifier(&input_path, &output_path, classifier.as_ref(), force_overwrite)
            .await
    }

    /// Run the analysis pipeline over every subtitle file in a directory
    async fn run_analysis_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        info!("Starting analysis for directory: {:?}", input_dir);

        let subtitle_files = FileManager::find_files(input_dir, "srt")?;
        if subtitle_files.is_empty() {
            warn!("No subtitle files found in directory: {:?}", input_dir);
            return Ok(());
        }

        let classifier = self.create_classifier()?;
        let mut processed_count = 0;

        for file in &subtitle_files {
            let output_path = Self::default_table_path(file);
            if let Err(e) = self
                .run_analysis_with_classifier(file, &output_path, classifier.as_ref(), force_overwrite)
                .await
            {
                error!("Error processing file {:?}: {}", file, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} of {} files", processed_count, subtitle_files.len());
        Ok(())
    }

    /// The explicit analysis pipeline: parse, classify each line, persist.
    ///
    /// The classifier is injected so the pipeline can run against a mock in
    /// tests without a live model service. A classification failure aborts
    /// the run before the output file is touched.
    pub async fn run_analysis_with_classifier(
        &self,
        input_file: &Path,
        output_path: &Path,
        classifier: &dyn Classifier,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, result table already exists (use -f to force overwrite): {:?}",
                  output_path);
            return Ok(());
        }

        let file_type = FileManager::detect_file_type(input_file)?;
        if file_type == FileType::Table {
            return Err(anyhow::anyhow!(
                "Input is already a record table: {:?} (use the report command)", input_file
            ));
        }

        info!("Analyzing subtitle file: {:?}", input_file);
        let collection = SubtitleCollection::open(input_file)?;
        debug!("{}", collection);

        if collection.cues.is_empty() {
            warn!("No dialogue cues found in {:?}, writing empty table", input_file);
        }

        let progress = ProgressBar::new(collection.cues.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        let mut analysis_records = Vec::with_capacity(collection.cues.len());
        for cue in &collection.cues {
            progress.set_message(truncate_for_display(&cue.text));
            let record = label_cue(classifier, cue)
                .await
                .with_context(|| format!("Classification failed at {:.3}s", cue.start_seconds()))?;
            analysis_records.push(record);
            progress.inc(1);
        }
        progress.finish_and_clear();

        records::write_csv(output_path, &analysis_records)?;

        let elapsed = start_time.elapsed();
        if let Some((dominant, count)) = label_counts(&analysis_records).into_iter().next() {
            info!(
                "Classified {} line(s) in {:.1}s, dominant emotion: {} ({} lines) -> {:?}",
                analysis_records.len(),
                elapsed.as_secs_f64(),
                dominant,
                count,
                output_path
            );
        } else {
            info!("Wrote empty result table -> {:?}", output_path);
        }

        Ok(())
    }

    /// Run the report pipeline: load the persisted table and write charts
    pub fn run_report(
        &self,
        table_path: PathBuf,
        output_path: PathBuf,
        options: ReportOptions,
    ) -> Result<()> {
        if !FileManager::file_exists(&table_path) {
            return Err(anyhow::anyhow!("Record table does not exist: {:?}", table_path));
        }

        let analysis_records = records::read_csv(&table_path)?;
        info!("Loaded {} record(s) from {:?}", analysis_records.len(), table_path);

        let dashboard = report::build_dashboard(&analysis_records, &options);
        report::generate(&output_path, &dashboard)?;

        info!("Wrote {} chart(s) -> {:?}", dashboard.charts.len(), output_path);
        Ok(())
    }

    /// Default result-table path: `<stem>.emotions.csv` next to the input
    pub fn default_table_path(input_file: &Path) -> PathBuf {
        let parent = input_file.parent().unwrap_or(Path::new("."));
        FileManager::generate_output_path(input_file, parent, "emotions", "csv")
    }
}

/// Shorten a line for progress-bar display
fn truncate_for_display(text: &str) -> String {
    const MAX_LEN: usize = 40;
    if text.chars().count() <= MAX_LEN {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(MAX_LEN).collect();
        format!("{}...", truncated)
    }
}
