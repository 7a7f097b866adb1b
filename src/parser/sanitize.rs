//! Text cleanup for scraped headline and article fragments
//!
//! Listing titles and article paragraphs arrive with stray control
//! characters and uneven whitespace; this module normalizes them before
//! the text reaches the rewriter or the post log.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitize extracted text content
///
/// Removes control characters, collapses whitespace runs (including
/// newlines) to a single space, and trims the result.
///
/// # Examples
///
/// ```
/// use harmattan::parser::sanitize::sanitize_text;
///
/// let dirty = "  Fuel subsidy:\n\n  FG \t reacts ";
/// assert_eq!(sanitize_text(dirty), "Fuel subsidy: FG reacts");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let stripped = remove_control_chars(text);
    let collapsed = WHITESPACE_REGEX.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Remove control characters except newline and tab
///
/// Keeps \n and \t (later collapsed as whitespace) and drops all other
/// control chars (0x00-0x1F, 0x7F) plus zero-width characters.
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{0000}'..='\u{0008}'
                | '\u{000B}'..='\u{001F}'
                | '\u{007F}'
                | '\u{200B}'..='\u{200F}'
                | '\u{FEFF}'
            )
        })
        .collect()
}
