//! Plain-text helpers for rich-text fields.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));
static BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|li|h[1-6]|div|blockquote)>").expect("static regex")
});

/// Remove markup tags and trim surrounding whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    TAG.replace_all(html, "").trim().to_string()
}

/// Plain-text paragraphs of a rich-text field, without empty ones.
#[must_use]
pub fn paragraphs(html: &str) -> Vec<String> {
    let broken = BLOCK_END.replace_all(html, "\n");
    strip_html(&broken)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Shorten `text` to at most `max` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(strip_html("  <ul><li>One</li></ul> "), "One");
        assert_eq!(strip_html("no markup"), "no markup");
        assert_eq!(strip_html("<br/>"), "");
    }

    #[test]
    fn splits_block_elements_into_paragraphs() {
        let html = "<p>First <b>part</b></p><p></p><ul><li>One</li><li>Two</li></ul>Tail<br/>end";
        assert_eq!(
            paragraphs(html),
            ["First part", "One", "Two", "Tail", "end"]
        );
        assert!(paragraphs("  ").is_empty());
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert_eq!(truncate("héllo world", 4), "hél…");
    }
}
