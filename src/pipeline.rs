//! Sequential scrape/rewrite/post/record pipeline
//!
//! One headline is fetched, rewritten, published, and recorded before the
//! next begins. Per-item failures are isolated: a failed rewrite skips
//! the item entirely, a failed publish still records the attempt with an
//! empty post URL, a failed record is logged and the run continues. The
//! only fatal condition is a fetch that yields zero headlines.

use crate::crawler::FetchHeadlines;
use crate::error::Error;
use crate::models::{PostAttempt, RunStats};
use crate::publisher::Publish;
use crate::rewriter::Rewrite;
use crate::storage::PostLog;

/// Pipeline over a fetcher, a rewriter, a publisher, and the post log
pub struct Pipeline<F, R, P> {
    fetcher: F,
    rewriter: R,
    publisher: P,
    log: PostLog,
}

impl<F, R, P> Pipeline<F, R, P>
where
    F: FetchHeadlines,
    R: Rewrite,
    P: Publish,
{
    pub fn new(fetcher: F, rewriter: R, publisher: P, log: PostLog) -> Self {
        Self {
            fetcher,
            rewriter,
            publisher,
            log,
        }
    }

    /// Process up to `count` headlines
    ///
    /// # Errors
    ///
    /// Returns `Error::NoHeadlines` when the fetch yields nothing; every
    /// other failure is handled per item and reflected in the stats.
    pub async fn run(&mut self, count: usize) -> Result<RunStats, Error> {
        let headlines = match self.fetcher.fetch_headlines(count).await {
            Ok(headlines) => headlines,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch headlines");
                Vec::new()
            }
        };

        if headlines.is_empty() {
            return Err(Error::NoHeadlines);
        }

        let mut stats = RunStats {
            fetched: headlines.len(),
            ..Default::default()
        };

        for headline in headlines {
            let original = headline.original_text();

            let paraphrased = match self.rewriter.rewrite(&headline.title, &headline.excerpt) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    tracing::warn!(title = %headline.title, "Empty rewrite, skipping headline");
                    stats.skipped += 1;
                    continue;
                }
                Err(e) => {
                    tracing::error!(title = %headline.title, error = %e, "Rewrite failed, skipping headline");
                    stats.skipped += 1;
                    continue;
                }
            };
            stats.rewritten += 1;

            let tweet_url = match self.publisher.publish(&paraphrased).await {
                Ok(url) => {
                    stats.posted += 1;
                    url
                }
                Err(e) => {
                    tracing::error!(title = %headline.title, error = %e, "Publish failed");
                    String::new()
                }
            };

            let attempt = PostAttempt::new(original, paraphrased, tweet_url);
            match self.log.append(&attempt) {
                Ok(()) => stats.recorded += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to record attempt");
                }
            }

            if attempt.tweet_url.is_empty() {
                tracing::info!(text = %attempt.paraphrased, "Recorded unposted rewrite");
            } else {
                tracing::info!(
                    text = %attempt.paraphrased,
                    url = %attempt.tweet_url,
                    "Posted"
                );
            }
        }

        Ok(stats)
    }
}
