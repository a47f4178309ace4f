//! Comparison keys for line text.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// A line's text reduced for equality comparisons.
///
/// NFKC-normalized (ligatures such as `ﬁ` fold to `fi`), trimmed, with
/// internal whitespace runs collapsed to a single space. Never displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize raw text.
    pub fn new(text: &str) -> Self {
        let folded: String = text.nfkc().collect();
        NormalizedText(collapse_whitespace(&folded))
    }

    /// Copy with every digit run replaced by `#`.
    pub fn fold_digits(&self) -> Self {
        NormalizedText(digit_run_regex().replace_all(&self.0, "#").into_owned())
    }

    /// The normalized string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if nothing remains after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim and collapse whitespace runs to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn digit_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses() {
        let text = NormalizedText::new("  Annual \t Report\n2024  ");
        assert_eq!(text.as_str(), "Annual Report 2024");
    }

    #[test]
    fn test_ligatures_fold() {
        assert_eq!(NormalizedText::new("\u{FB01}nal").as_str(), "final");
        assert_eq!(
            NormalizedText::new("\u{FB01}nal"),
            NormalizedText::new("final")
        );
    }

    #[test]
    fn test_case_is_preserved() {
        assert_ne!(NormalizedText::new("Summary"), NormalizedText::new("SUMMARY"));
    }

    #[test]
    fn test_fold_digits() {
        let a = NormalizedText::new("Confidential - Page 3 of 12").fold_digits();
        let b = NormalizedText::new("Confidential - Page 10 of 12").fold_digits();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Confidential - Page # of #");
    }

    #[test]
    fn test_empty() {
        assert!(NormalizedText::new(" \n\t ").is_empty());
        assert_eq!(collapse_whitespace(""), "");
    }
}
