use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Classification config
    pub classification: ClassificationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Classifier provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    // @provider: Local text-classification server (text-embeddings-inference)
    #[default]
    Tei,
    // @provider: Hugging Face Inference API
    HuggingFace,
}

impl ClassifierProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Tei => "TEI",
            Self::HuggingFace => "Hugging Face",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Tei => "tei".to_string(),
            Self::HuggingFace => "huggingface".to_string(),
        }
    }
}

// Implement Display trait for ClassifierProvider
impl std::fmt::Display for ClassifierProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ClassifierProvider
impl std::str::FromStr for ClassifierProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tei" => Ok(Self::Tei),
            "huggingface" => Ok(Self::HuggingFace),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ClassifierProvider) -> Self {
        match provider_type {
            ClassifierProvider::Tei => Self {
                provider_type: "tei".to_string(),
                model: default_model(),
                api_key: String::new(),
                endpoint: default_tei_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            ClassifierProvider::HuggingFace => Self {
                provider_type: "huggingface".to_string(),
                model: default_model(),
                api_key: String::new(),
                endpoint: default_huggingface_endpoint(),
                timeout_secs: default_huggingface_timeout_secs(),
            },
        }
    }
}

/// Classification service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassificationConfig {
    /// Classifier provider to use
    #[serde(default)]
    pub provider: ClassifierProvider,

    /// Available classifier providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common classification settings
    #[serde(default)]
    pub common: ClassificationCommonConfig,
}

/// Common classification settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassificationCommonConfig {
    /// Retry count for transient request failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds, doubled on each retry)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for ClassificationCommonConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_huggingface_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_tei_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_huggingface_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_model() -> String {
    // The emotion model the tool was built around; any text-classification
    // model with a label/score output works
    "j-hartmann/emotion-english-distilroberta-base".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate API key for hosted providers
        if self.classification.provider == ClassifierProvider::HuggingFace {
            let api_key = self.classification.get_api_key();
            if api_key.is_empty() {
                return Err(anyhow!("API key is required for the Hugging Face provider"));
            }

            let model = self.classification.get_model();
            if model.is_empty() {
                return Err(anyhow!("Model name is required for the Hugging Face provider"));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            classification: ClassificationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ClassificationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get a specific provider configuration by type for testing
    pub fn get_provider_config(&self, provider_type: &ClassifierProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        default_model()
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        // Default fallback - the local provider doesn't use API keys
        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            ClassifierProvider::Tei => default_tei_endpoint(),
            ClassifierProvider::HuggingFace => default_huggingface_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        // Default fallback based on provider type
        match self.provider {
            ClassifierProvider::Tei => default_timeout_secs(),
            ClassifierProvider::HuggingFace => default_huggingface_timeout_secs(),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: ClassifierProvider::default(),
            available_providers: Vec::new(),
            common: ClassificationCommonConfig::default(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(ClassifierProvider::Tei));
        config.available_providers.push(ProviderConfig::new(ClassifierProvider::HuggingFace));

        config
    }
}
