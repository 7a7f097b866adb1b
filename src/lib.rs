//! harmattan - Nigerian news headline paraphraser
//!
//! Fetches top headlines from Punch, rewrites them with a pretrained
//! paraphrasing model, posts the result to Twitter/X and keeps an
//! append-only CSV log of every attempt.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration from environment variables
//! - [`crawler`] - Headline fetching over HTTP
//! - [`parser`] - HTML extraction and text cleanup
//! - [`rewriter`] - Paraphrasing with a T5 model
//! - [`publisher`] - Twitter/X posting with OAuth 1.0a
//! - [`storage`] - Append-only CSV post log
//! - [`pipeline`] - Sequential scrape/rewrite/post/record loop
//! - [`models`] - Core data structures
//!
//! # Example
//!
//! ```no_run
//! use harmattan::config::Config;
//! use harmattan::crawler::{FetchHeadlines, HeadlineFetcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let fetcher = HeadlineFetcher::new(&config.fetch)?;
//!     let headlines = fetcher.fetch_headlines(3).await?;
//!     println!("fetched {} headlines", headlines.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod publisher;
pub mod rewriter;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, TwitterCredentials};
    pub use crate::crawler::{FetchHeadlines, HeadlineFetcher};
    pub use crate::error::{Error, Result};
    pub use crate::models::{Headline, PostAttempt, RunStats};
    pub use crate::pipeline::Pipeline;
    pub use crate::publisher::{Publish, TwitterPublisher};
    pub use crate::rewriter::Rewrite;
    pub use crate::storage::PostLog;
}

// Direct re-exports for convenience
pub use models::{Headline, PostAttempt, RunStats};
