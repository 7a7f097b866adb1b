//! Shared stubs for pipeline integration tests

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use harmattan::crawler::FetchHeadlines;
use harmattan::error::{FetchError, PublishError, RewriteError};
use harmattan::models::Headline;
use harmattan::publisher::Publish;
use harmattan::rewriter::Rewrite;

pub fn headline(title: &str, excerpt: &str) -> Headline {
    Headline {
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        url: format!("https://punchng.com/{}", title.to_lowercase()),
    }
}

/// Fetcher stub returning a fixed headline list, or a network error
pub struct StubFetcher {
    pub headlines: Vec<Headline>,
    pub fail: bool,
}

impl StubFetcher {
    pub fn with_headlines(headlines: Vec<Headline>) -> Self {
        Self {
            headlines,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            headlines: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl FetchHeadlines for StubFetcher {
    async fn fetch_headlines(&self, count: usize) -> Result<Vec<Headline>, FetchError> {
        if self.fail {
            return Err(FetchError::Timeout);
        }
        Ok(self.headlines.iter().take(count).cloned().collect())
    }
}

/// Rewriter stub returning a fixed output, or a generation error
pub struct StubRewriter {
    pub output: Option<String>,
}

impl Rewrite for StubRewriter {
    fn rewrite(&mut self, _title: &str, _excerpt: &str) -> Result<String, RewriteError> {
        self.output.clone().ok_or(RewriteError::EmptyGeneration)
    }
}

/// Publisher stub counting calls and returning a fixed URL, or an auth error
pub struct StubPublisher {
    pub url: Option<String>,
    pub calls: Arc<AtomicUsize>,
}

impl StubPublisher {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            url: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Publish for StubPublisher {
    async fn publish(&self, _text: &str) -> Result<String, PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.url.clone().ok_or(PublishError::MissingCredentials)
    }
}

/// Read the log back: header record plus data rows
pub fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().clone();
    let rows = reader.records().map(|r| r.unwrap()).collect();
    (header, rows)
}
