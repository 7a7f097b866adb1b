// Core data structures for the harmattan pipeline

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A scraped headline with the first paragraph of its article
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Headline {
    /// Headline title as shown on the listing page
    pub title: String,

    /// First paragraph of the article body
    pub excerpt: String,

    /// Absolute URL of the article page
    pub url: String,
}

impl Headline {
    /// Combined title and excerpt, as recorded in the post log
    pub fn original_text(&self) -> String {
        format!("{}\n{}", self.title, self.excerpt)
    }
}

/// One pipeline attempt, appended to the post log after every rewrite
///
/// Immutable once written; `tweet_url` is empty when publishing failed
/// or was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAttempt {
    /// ISO-8601 timestamp of the attempt
    pub timestamp: String,

    /// Original title + excerpt
    pub original: String,

    /// Paraphrased text that was (or would have been) posted
    pub paraphrased: String,

    /// Canonical URL of the created post, empty on failure
    pub tweet_url: String,
}

impl PostAttempt {
    /// Create an attempt stamped with the current UTC time
    pub fn new(original: String, paraphrased: String, tweet_url: String) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            original,
            paraphrased,
            tweet_url,
        }
    }
}

/// Counters for a single pipeline run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Headlines returned by the fetcher
    pub fetched: usize,

    /// Headlines successfully rewritten
    pub rewritten: usize,

    /// Posts accepted by the publishing API
    pub posted: usize,

    /// Attempts appended to the post log
    pub recorded: usize,

    /// Headlines skipped because the rewrite failed or came back empty
    pub skipped: usize,
}
