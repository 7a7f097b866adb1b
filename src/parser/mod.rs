//! HTML extraction for the Punch listing and article pages
//!
//! Two small parsers cover the whole scrape surface: [`ListingParser`]
//! pulls headline links out of the front page, [`ArticleParser`] pulls
//! the first paragraph out of an article page. A malformed headline slot
//! only drops that item; the article parser reports the failure so the
//! crawler can skip the item and move on.

pub mod sanitize;
pub mod selectors;

use scraper::Html;

use crate::error::ParseError;
use crate::parser::sanitize::sanitize_text;
use crate::parser::selectors::{ArticleSelectors, ListingSelectors};

/// A headline link extracted from the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineLink {
    /// Headline title text
    pub title: String,

    /// Link target, possibly relative to the listing page
    pub href: String,
}

/// Parser for the headline listing page
pub struct ListingParser {
    selectors: ListingSelectors,
}

impl ListingParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: ListingSelectors::new(),
        }
    }

    /// Extract up to `count` headline links in document order
    ///
    /// Headline slots without an anchor, without an href, or with an
    /// empty title are skipped and do not count toward `count`.
    pub fn extract_links(&self, html: &str, count: usize) -> Vec<HeadlineLink> {
        let document = Html::parse_document(html);

        let mut links = Vec::new();
        for selector in &self.selectors.headline {
            for element in document.select(selector) {
                if links.len() >= count {
                    return links;
                }

                match self.extract_link(&element) {
                    Ok(link) => links.push(link),
                    Err(e) => {
                        tracing::debug!(error = %e, "Skipping malformed headline slot");
                    }
                }
            }

            // Fallback selectors only apply when the primary matched nothing
            if !links.is_empty() {
                break;
            }
        }

        links
    }

    fn extract_link(&self, element: &scraper::ElementRef<'_>) -> Result<HeadlineLink, ParseError> {
        let anchor = element
            .select(&self.selectors.link)
            .next()
            .ok_or(ParseError::LinkNotFound)?;

        let href = anchor
            .value()
            .attr("href")
            .filter(|h| !h.is_empty())
            .ok_or(ParseError::LinkNotFound)?;

        let title = sanitize_text(&anchor.text().collect::<String>());
        if title.is_empty() {
            return Err(ParseError::LinkNotFound);
        }

        Ok(HeadlineLink {
            title,
            href: href.to_string(),
        })
    }
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser for article detail pages
pub struct ArticleParser {
    selectors: ArticleSelectors,
}

impl ArticleParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: ArticleSelectors::new(),
        }
    }

    /// Extract the first paragraph of the article body
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ContentNotFound` when no body container
    /// matches, `ParseError::ParagraphNotFound` when the container has no
    /// non-empty paragraph.
    pub fn first_paragraph(&self, html: &str) -> Result<String, ParseError> {
        let document = Html::parse_document(html);

        let content = self
            .selectors
            .content
            .iter()
            .find_map(|selector| document.select(selector).next())
            .ok_or(ParseError::ContentNotFound)?;

        content
            .select(&self.selectors.paragraph)
            .map(|p| sanitize_text(&p.text().collect::<String>()))
            .find(|text| !text.is_empty())
            .ok_or(ParseError::ParagraphNotFound)
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new()
    }
}
