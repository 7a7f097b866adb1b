//! Configuration management for harmattan
//!
//! This module handles loading and validating configuration from environment
//! variables. Twitter credentials are kept separate from the rest of the
//! configuration: their absence is not fatal, it only makes publishing fail
//! (which the pipeline logs and records with an empty post URL).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default news source listing page
pub const DEFAULT_NEWS_URL: &str = "https://punchng.com/";

/// Default paraphrasing model on the Hugging Face hub
pub const DEFAULT_MODEL_ID: &str = "Vamsi/T5_Paraphrase_Paws";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Headline fetching configuration
    pub fetch: FetchConfig,

    /// Paraphrasing model configuration
    pub model: ModelConfig,

    /// Twitter API configuration
    pub twitter: TwitterConfig,

    /// Post log configuration
    pub storage: StorageConfig,
}

/// Headline fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Listing page of the news source
    pub source_url: String,

    /// Timeout applied to every HTTP request, in seconds
    pub request_timeout_secs: u64,

    /// User agent string sent with every request
    pub user_agent: String,
}

/// Paraphrasing model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (HuggingFace model ID)
    pub model_id: String,

    /// Maximum number of tokens to generate per rewrite
    pub max_new_tokens: usize,

    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling threshold
    pub top_p: Option<f64>,

    /// Sampling seed; a random seed is drawn when unset
    pub seed: Option<u64>,

    /// Use GPU if available
    pub use_gpu: bool,
}

/// Twitter API configuration (credentials live in [`TwitterCredentials`])
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    /// API base URL
    pub api_base: String,
}

/// Post log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the append-only CSV log
    pub log_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let source_url =
            std::env::var("HARMATTAN_NEWS_URL").unwrap_or_else(|_| DEFAULT_NEWS_URL.to_string());

        let request_timeout_secs = std::env::var("HARMATTAN_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        let user_agent = std::env::var("HARMATTAN_USER_AGENT").unwrap_or_else(|_| {
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string()
        });

        let model_id =
            std::env::var("HARMATTAN_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

        let max_new_tokens = std::env::var("HARMATTAN_MAX_NEW_TOKENS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(256);

        let temperature = std::env::var("HARMATTAN_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(1.0);

        let top_p = std::env::var("HARMATTAN_TOP_P")
            .ok()
            .and_then(|v| v.parse::<f64>().ok());

        let seed = std::env::var("HARMATTAN_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        let use_gpu = std::env::var("HARMATTAN_USE_GPU")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let api_base = std::env::var("TWITTER_API_BASE")
            .unwrap_or_else(|_| String::from("https://api.twitter.com"));

        let log_path = std::env::var("HARMATTAN_LOG_PATH")
            .unwrap_or_else(|_| String::from("log.csv"))
            .into();

        Ok(Self {
            fetch: FetchConfig {
                source_url,
                request_timeout_secs,
                user_agent,
            },
            model: ModelConfig {
                model_id,
                max_new_tokens,
                temperature,
                top_p,
                seed,
                use_gpu,
            },
            twitter: TwitterConfig { api_base },
            storage: StorageConfig { log_path },
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.source_url.is_empty() {
            return Err(Error::config("source_url must not be empty"));
        }

        if self.fetch.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        if self.model.max_new_tokens == 0 {
            return Err(Error::config("max_new_tokens must be greater than 0"));
        }

        if self.model.temperature <= 0.0 {
            return Err(Error::config("temperature must be positive"));
        }

        Ok(())
    }
}

/// OAuth 1.0a user-context credentials for posting
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    /// Consumer key (API key)
    pub api_key: String,

    /// Consumer secret (API secret)
    pub api_secret: String,

    /// Access token of the posting account
    pub access_token: String,

    /// Access token secret of the posting account
    pub access_secret: String,
}

impl TwitterCredentials {
    /// Load credentials from environment variables
    ///
    /// Returns `None` when any of the four values is missing; publishing
    /// then fails with `PublishError::MissingCredentials` at post time.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: std::env::var("TWITTER_API_KEY").ok()?,
            api_secret: std::env::var("TWITTER_API_SECRET").ok()?,
            access_token: std::env::var("TWITTER_ACCESS_TOKEN").ok()?,
            access_secret: std::env::var("TWITTER_ACCESS_SECRET").ok()?,
        })
    }
}
