//! Headline paraphrasing
//!
//! [`Rewrite`] is the seam between the pipeline and the model. The
//! production implementation is [`T5Rewriter`]; the free functions in this
//! module hold the text rules it shares with any other implementation:
//! excerpt truncation, prompt construction, and the post-processing that
//! guarantees every rewrite fits a post and carries the campaign hashtag.

pub mod model;

pub use model::T5Rewriter;

use crate::error::RewriteError;

/// Hashtag required in every posted rewrite
pub const HASHTAG: &str = "#NigeriaNews";

/// Hard character limit of a post
pub const MAX_POST_CHARS: usize = 280;

/// Character cap on the excerpt embedded in the prompt
pub const MAX_EXCERPT_CHARS: usize = 300;

/// Seam for paraphrase generation, implemented by [`T5Rewriter`]
/// and by test stubs.
pub trait Rewrite {
    /// Produce a paraphrased, hash-tagged post body from a headline
    ///
    /// The returned string is at most [`MAX_POST_CHARS`] characters and
    /// contains [`HASHTAG`]. Errors mean "skip this headline".
    fn rewrite(&mut self, title: &str, excerpt: &str) -> Result<String, RewriteError>;
}

/// Cap the excerpt for prompt embedding
///
/// Excerpts at or under [`MAX_EXCERPT_CHARS`] characters pass through
/// unchanged. Longer excerpts are cut to the limit, then back to the last
/// sentence boundary to avoid a mid-sentence cut, and end with a period.
/// The result never exceeds [`MAX_EXCERPT_CHARS`] characters.
pub fn truncate_excerpt(excerpt: &str) -> String {
    let excerpt = excerpt.trim();
    if excerpt.chars().count() <= MAX_EXCERPT_CHARS {
        return excerpt.to_string();
    }

    let mut cut: String = excerpt.chars().take(MAX_EXCERPT_CHARS).collect();
    match cut.rfind('.') {
        Some(pos) => cut.truncate(pos),
        // No sentence boundary in range; drop one char to make room for
        // the closing period
        None => cut = cut.chars().take(MAX_EXCERPT_CHARS - 1).collect(),
    }

    let mut out = cut.trim_end().to_string();
    out.push('.');
    out
}

/// Build the fixed paraphrasing prompt
pub fn build_prompt(title: &str, excerpt: &str) -> String {
    format!("paraphrase: {title}. {excerpt} {HASHTAG}")
}

/// Enforce the post invariants on raw model output
///
/// Guarantees both properties at once: the result is at most
/// [`MAX_POST_CHARS`] characters and contains [`HASHTAG`]. When the model
/// dropped the hashtag, the text is shortened until the hashtag fits.
pub fn finalize_post(generated: &str) -> String {
    let mut out: String = generated.trim().chars().take(MAX_POST_CHARS).collect();

    if !out.contains(HASHTAG) {
        let budget = MAX_POST_CHARS - HASHTAG.chars().count() - 1;
        out = out
            .chars()
            .take(budget)
            .collect::<String>()
            .trim_end()
            .to_string();
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(HASHTAG);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_excerpt_unchanged() {
        let excerpt = "The Senate passed the bill on Tuesday.";
        assert_eq!(truncate_excerpt(excerpt), excerpt);
    }

    #[test]
    fn test_long_excerpt_cut_at_sentence_boundary() {
        let first = "The first sentence ends here.";
        let filler = "x".repeat(400);
        let excerpt = format!("{first} {filler}");

        let truncated = truncate_excerpt(&excerpt);
        assert_eq!(truncated, "The first sentence ends here.");
    }

    #[test]
    fn test_long_excerpt_is_bounded_and_ends_with_period() {
        // No period anywhere in the first 300 chars
        let excerpt = "a".repeat(500);
        let truncated = truncate_excerpt(&excerpt);

        assert!(truncated.chars().count() <= MAX_EXCERPT_CHARS);
        assert!(truncated.ends_with('.'));
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let excerpt = "é".repeat(400);
        let truncated = truncate_excerpt(&excerpt);
        assert!(truncated.chars().count() <= MAX_EXCERPT_CHARS);
        assert!(truncated.ends_with('.'));
    }

    #[test]
    fn test_boundary_cut_keeps_limit() {
        let mut excerpt = "b".repeat(250);
        excerpt.push('.');
        excerpt.push_str(&"c".repeat(200));

        let truncated = truncate_excerpt(&excerpt);
        assert_eq!(truncated.chars().count(), 251);
        assert!(truncated.ends_with('.'));
    }

    #[test]
    fn test_prompt_template() {
        let prompt = build_prompt("Fuel price rises", "NNPC confirmed the change.");
        assert_eq!(
            prompt,
            "paraphrase: Fuel price rises. NNPC confirmed the change. #NigeriaNews"
        );
    }

    #[test]
    fn test_finalize_keeps_existing_hashtag() {
        let text = "Fuel price rises again #NigeriaNews";
        assert_eq!(finalize_post(text), text);
    }

    #[test]
    fn test_finalize_appends_missing_hashtag() {
        let out = finalize_post("Fuel price rises again");
        assert_eq!(out, "Fuel price rises again #NigeriaNews");
    }

    #[test]
    fn test_finalize_caps_length() {
        let out = finalize_post(&"x".repeat(500));
        assert!(out.chars().count() <= MAX_POST_CHARS);
        assert!(out.contains(HASHTAG));
    }

    #[test]
    fn test_finalize_refits_hashtag_at_the_limit() {
        // Exactly 280 chars of non-hashtag text: the hashtag must still fit
        let out = finalize_post(&"y".repeat(MAX_POST_CHARS));
        assert!(out.chars().count() <= MAX_POST_CHARS);
        assert!(out.ends_with(HASHTAG));
    }

    #[test]
    fn test_finalize_preserves_hashtag_near_limit() {
        // Hashtag already inside the first 280 chars survives untouched
        let mut text = "z".repeat(260);
        text.push(' ');
        text.push_str(HASHTAG);
        let out = finalize_post(&text);
        assert_eq!(out, text);
    }
}
