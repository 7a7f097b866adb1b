//! CSS selectors for the Punch listing and article pages
//!
//! Selectors are pre-parsed once per parser instance. Each slot carries a
//! small fallback chain; the first selector that matches wins.

use scraper::Selector;

// Helper macro to parse selectors safely at construction time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

/// Selectors for the headline listing page
pub struct ListingSelectors {
    /// Headline containers, in document order
    pub headline: Vec<Selector>,

    /// Anchor inside a headline container
    pub link: Selector,
}

impl ListingSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            headline: vec![
                parse_selector!("h2.post-title"),
                parse_selector!("h3.post-title"),
            ],
            link: parse_selector!("a"),
        }
    }
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for an article detail page
pub struct ArticleSelectors {
    /// Article body container
    pub content: Vec<Selector>,

    /// Paragraphs inside the body container
    pub paragraph: Selector,
}

impl ArticleSelectors {
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: vec![
                parse_selector!("div.post-content"),
                parse_selector!("div.entry-content"),
            ],
            paragraph: parse_selector!("p"),
        }
    }
}

impl Default for ArticleSelectors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_parse() {
        let listing = ListingSelectors::new();
        assert_eq!(listing.headline.len(), 2);

        let article = ArticleSelectors::new();
        assert_eq!(article.content.len(), 2);
    }
}
