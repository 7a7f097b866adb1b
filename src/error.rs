//! Unified error handling for the harmattan crate
//!
//! Each stage of the pipeline has its own error enum; the unified [`Error`]
//! wraps them all so they can cross module boundaries without losing detail.
//! Every non-fatal error is caught at the pipeline boundary, logged, and
//! converted into a sentinel (skipped item or empty post URL). The only
//! fatal condition is [`Error::NoHeadlines`], which aborts the run.

use thiserror::Error;

/// Errors that can occur while fetching pages over HTTP
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Server returned a non-success status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Invalid or unresolvable URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while extracting data from HTML
#[derive(Error, Debug)]
pub enum ParseError {
    /// Headline link missing or without an href attribute
    #[error("Headline link not found")]
    LinkNotFound,

    /// Article body container not found in HTML
    #[error("Article content not found")]
    ContentNotFound,

    /// No paragraph inside the article body
    #[error("First paragraph not found in article")]
    ParagraphNotFound,
}

/// Errors that can occur during paraphrase generation
#[derive(Error, Debug)]
pub enum RewriteError {
    /// Model inference error
    #[error("Model error: {0}")]
    Model(#[from] candle_core::Error),

    /// Tokenization error
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// The model produced no usable output
    #[error("Empty generation")]
    EmptyGeneration,
}

/// Errors that can occur while posting to Twitter/X
#[derive(Error, Debug)]
pub enum PublishError {
    /// One or more of the four credential values is not configured
    #[error("Twitter credentials not configured")]
    MissingCredentials,

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request
    #[error("Twitter API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Malformed Twitter API response")]
    MalformedResponse,
}

/// Errors that can occur while appending to the post log
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error opening or flushing the log file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Unified error type for the harmattan crate
#[derive(Error, Debug)]
pub enum Error {
    /// Headline fetching errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// HTML extraction errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Paraphrase generation errors
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    /// Twitter posting errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Post log errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// The source yielded no headlines; the run cannot proceed
    #[error("No headlines found")]
    NoHeadlines,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let parse_err = ParseError::ParagraphNotFound;
        let unified: Error = parse_err.into();
        assert!(matches!(unified, Error::Parse(_)));

        let publish_err = PublishError::MissingCredentials;
        let unified: Error = publish_err.into();
        assert!(matches!(unified, Error::Publish(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("invalid timeout");
        assert_eq!(err.to_string(), "Config error: invalid timeout");
    }

    #[test]
    fn test_no_headlines_display() {
        assert_eq!(Error::NoHeadlines.to_string(), "No headlines found");
    }

    #[test]
    fn test_api_error_display() {
        let err = PublishError::Api {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("Forbidden"));
    }
}
