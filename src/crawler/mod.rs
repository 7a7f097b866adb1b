//! Headline crawling for the Punch front page
//!
//! The crawler performs 1 + N blocking HTTP requests per run: one for the
//! listing page and one per headline for the article body. There are no
//! retries; a single timeout applies to every request.

pub mod fetcher;

pub use fetcher::HeadlineFetcher;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::Headline;

/// Seam for headline fetching, implemented by [`HeadlineFetcher`]
/// and by test stubs.
#[async_trait]
pub trait FetchHeadlines {
    /// Retrieve up to `count` headlines from the source, in document order
    async fn fetch_headlines(&self, count: usize) -> Result<Vec<Headline>, FetchError>;
}
