//! HTTP fetcher for the Punch listing and article pages
//!
//! One [`reqwest::Client`] with a fixed timeout serves every request of a
//! run. Article pages that fail to fetch or parse are skipped with a
//! warning; only a failure on the listing page itself aborts the fetch.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::FetchConfig;
use crate::crawler::FetchHeadlines;
use crate::error::FetchError;
use crate::models::Headline;
use crate::parser::{ArticleParser, HeadlineLink, ListingParser};

/// Punch headline fetcher
pub struct HeadlineFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Listing page URL; relative article links resolve against it
    listing_url: String,

    listing_parser: ListingParser,
    article_parser: ArticleParser,
}

impl HeadlineFetcher {
    /// Create a new fetcher
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            listing_url: config.source_url.clone(),
            listing_parser: ListingParser::new(),
            article_parser: ArticleParser::new(),
        })
    }

    /// Fetch a single page and return its body
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Timeout` when the request times out,
    /// `FetchError::ServerError` on a non-success status code.
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        response.text().await.map_err(FetchError::Http)
    }

    /// Resolve a possibly-relative headline link against the listing URL
    fn resolve_link(&self, href: &str) -> Result<String, FetchError> {
        let base = Url::parse(&self.listing_url)
            .map_err(|_| FetchError::InvalidUrl(self.listing_url.clone()))?;

        let resolved = base
            .join(href)
            .map_err(|_| FetchError::InvalidUrl(href.to_string()))?;

        Ok(resolved.into())
    }

    /// Fetch one article page and build a [`Headline`] from it
    ///
    /// Returns `None` when the article cannot be fetched or parsed; the
    /// caller moves on to the next headline.
    async fn fetch_article(&self, link: HeadlineLink) -> Option<Headline> {
        let url = match self.resolve_link(&link.href) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(href = %link.href, error = %e, "Skipping headline with bad link");
                return None;
            }
        };

        let html = match self.fetch_page(&url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Skipping headline, article fetch failed");
                return None;
            }
        };

        match self.article_parser.first_paragraph(&html) {
            Ok(excerpt) => Some(Headline {
                title: link.title,
                excerpt,
                url,
            }),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Skipping headline, article parse failed");
                None
            }
        }
    }
}

#[async_trait]
impl FetchHeadlines for HeadlineFetcher {
    async fn fetch_headlines(&self, count: usize) -> Result<Vec<Headline>, FetchError> {
        tracing::info!(url = %self.listing_url, count, "Fetching headlines");

        let listing_html = self.fetch_page(&self.listing_url).await?;
        let links = self.listing_parser.extract_links(&listing_html, count);

        let mut headlines = Vec::with_capacity(links.len());
        for link in links {
            if let Some(headline) = self.fetch_article(link).await {
                tracing::debug!(title = %headline.title, "Fetched headline");
                headlines.push(headline);
            }
        }

        tracing::info!(fetched = headlines.len(), "Headline fetch complete");
        Ok(headlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(source_url: &str) -> FetchConfig {
        FetchConfig {
            source_url: source_url.to_string(),
            request_timeout_secs: 5,
            user_agent: "harmattan-test".to_string(),
        }
    }

    #[test]
    fn test_fetcher_creation() {
        let fetcher = HeadlineFetcher::new(&test_config("https://punchng.com/"));
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_resolve_relative_link() {
        let fetcher = HeadlineFetcher::new(&test_config("https://punchng.com/")).unwrap();
        let resolved = fetcher.resolve_link("/topics/news/article-1").unwrap();
        assert_eq!(resolved, "https://punchng.com/topics/news/article-1");
    }

    #[test]
    fn test_resolve_absolute_link() {
        let fetcher = HeadlineFetcher::new(&test_config("https://punchng.com/")).unwrap();
        let resolved = fetcher.resolve_link("https://cdn.punchng.com/a").unwrap();
        assert_eq!(resolved, "https://cdn.punchng.com/a");
    }

    #[test]
    fn test_resolve_rejects_unparseable_base() {
        let fetcher = HeadlineFetcher::new(&test_config("not a url")).unwrap();
        let result = fetcher.resolve_link("/x");
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
