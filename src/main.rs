// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, ClassifierProvider};
use app_controller::Controller;
use report::ReportOptions;

mod app_config;
mod analysis;
mod report;
mod subtitle_processor;
mod file_utils;
mod app_controller;
mod providers;
mod errors;

/// CLI Wrapper for ClassifierProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliClassifierProvider {
    Tei,
    HuggingFace,
}

impl From<CliClassifierProvider> for ClassifierProvider {
    fn from(cli_provider: CliClassifierProvider) -> Self {
        match cli_provider {
            CliClassifierProvider::Tei => ClassifierProvider::Tei,
            CliClassifierProvider::HuggingFace => ClassifierProvider::HuggingFace,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze subtitle emotions line by line (default command)
    #[command(alias = "analyse")]
    Analyze(AnalyzeArgs),

    /// Render charts from a previously written result table
    #[command(alias = "charts")]
    Report(ReportArgs),

    /// Generate shell completions for yasea
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output path for the result table (defaults to <stem>.emotions.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Classifier provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliClassifierProvider>,

    /// Model name to use for classification
    #[arg(short, long)]
    model: Option<String>,

    /// API key for hosted providers
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Result table to chart
    #[arg(value_name = "TABLE_PATH")]
    table_path: PathBuf,

    /// Output artifact path; .html gets a dashboard page, anything else JSON
    #[arg(short, long, default_value = "emotion_report.html")]
    output: PathBuf,

    /// Emotion tracked by the first time-series chart
    #[arg(long, default_value = "fear")]
    trend_emotion: String,

    /// Emotion tracked by the focused time-series chart
    #[arg(long, default_value = "joy")]
    focus_emotion: String,

    /// Phrase the focused chart additionally filters lines by (case-insensitive)
    #[arg(long)]
    focus_phrase: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// yasea - Yet Another Subtitle Emotion Analyzer
///
/// Classifies the dominant emotion of every line in a subtitle file using a
/// pretrained text-classification model and charts the results.
#[derive(Parser, Debug)]
#[command(name = "yasea")]
#[command(author = "yasea Team")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle emotion analysis tool")]
#[command(long_about = "yasea parses subtitle files, classifies each spoken line's dominant
emotion with a pretrained text-classification model, persists the per-line
results to a CSV table, and renders distribution and trend charts over them.

EXAMPLES:
    yasea movie.srt                              # Analyze using default config
    yasea -f movie.srt                           # Force overwrite existing table
    yasea -p hugging-face -k $HF_TOKEN movie.srt # Use the hosted inference API
    yasea analyze /subtitles/                    # Analyze a whole directory
    yasea report movie.emotions.csv              # Render the HTML dashboard
    yasea report movie.emotions.csv -o out.json  # Chart specs as JSON
    yasea report movie.emotions.csv --focus-phrase Riley
    yasea completions bash > yasea.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    tei          - Local text-classification server (default: http://localhost:8080)
    hugging-face - Hugging Face Inference API (requires API token)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output path for the result table (defaults to <stem>.emotions.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Classifier provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliClassifierProvider>,

    /// Model name to use for classification
    #[arg(short, long)]
    model: Option<String>,

    /// API key for hosted providers
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\u{274c} ",
            Level::Warn => "\u{1f6a7} ",
            Level::Info => " ",
            Level::Debug => "\u{1f50d} ",
            Level::Trace => "\u{1f4cb} ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };
            let emoji = Self::get_emoji_for_level(record.level());
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yasea", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Analyze(args)) => run_analyze(args).await,
        Some(Commands::Report(args)) => run_report(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let analyze_args = AnalyzeArgs {
                input_path,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                model: cli.model,
                api_key: cli.api_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_analyze(analyze_args).await
        }
    }
}

/// Apply a CLI log level immediately, before config handling
fn apply_cli_log_level(cmd_log_level: &Option<CliLogLevel>) {
    if let Some(cmd_log_level) = cmd_log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

/// Load the configuration file, creating a default one when missing
fn load_or_create_config(config_path: &str, cmd_log_level: &Option<CliLogLevel>) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        if let Some(log_level) = cmd_log_level {
            config.log_level = log_level.clone().into();
        }

        Ok(config)
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(log_level) = cmd_log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

async fn run_analyze(options: AnalyzeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    apply_cli_log_level(&options.log_level);

    let mut config = load_or_create_config(&options.config_path, &options.log_level)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.classification.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        let provider_str = config.classification.provider.to_lowercase_string();
        if let Some(provider_config) = config.classification.available_providers.iter_mut()
            .find(|p| p.provider_type == provider_str) {
            provider_config.model = model.clone();
        }
    }

    if let Some(api_key) = &options.api_key {
        let provider_str = config.classification.provider.to_lowercase_string();
        if let Some(provider_config) = config.classification.available_providers.iter_mut()
            .find(|p| p.provider_type == provider_str) {
            provider_config.api_key = api_key.clone();
        }
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller and run the analysis pipeline
    let controller = Controller::with_config(config)?;
    controller
        .run_analysis(options.input_path, options.output, options.force_overwrite)
        .await
}

fn run_report(options: ReportArgs) -> Result<()> {
    apply_cli_log_level(&options.log_level);

    // The report stage only needs the log level from config; don't create
    // a config file just to render charts
    let config = if Path::new(&options.config_path).exists() {
        load_or_create_config(&options.config_path, &options.log_level)?
    } else {
        let mut config = Config::default();
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }
        config
    };

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let report_options = ReportOptions {
        trend_emotion: options.trend_emotion,
        focus_emotion: options.focus_emotion,
        focus_phrase: options.focus_phrase,
    };

    let controller = Controller::with_config(config)?;
    controller.run_report(options.table_path, options.output, report_options)
}
