//! Heading text cleanup.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::analysis::Normalization;

struct CleanupPatterns {
    leader_suffix: Regex,
    page_number_suffix: Regex,
    whitespace: Regex,
    trailing_stop: Regex,
}

static PATTERNS: LazyLock<CleanupPatterns> = LazyLock::new(|| CleanupPatterns {
    // "Introduction ........ 5", "Scope ----", "Terms ___ 12"
    leader_suffix: Regex::new(r"\s*[.\-_…·]{3,}\s*\d*$").expect("valid regex"),
    page_number_suffix: Regex::new(r"\s+\d+$").expect("valid regex"),
    whitespace: Regex::new(r"\s+").expect("valid regex"),
    trailing_stop: Regex::new(r"[.。．]{1,2}$").expect("valid regex"),
});

/// Cleans heading and title text before it is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner {
    normalization: Normalization,
}

impl TextCleaner {
    /// Create a cleaner with the given normalization form.
    pub fn new(normalization: Normalization) -> Self {
        Self { normalization }
    }

    /// Clean a heading candidate.
    ///
    /// Steps, in order: strip dot-leader and page-number suffixes, collapse
    /// whitespace, strip trailing full stops (Latin and CJK forms),
    /// normalize Unicode, trim.
    ///
    /// A trailing number is treated as a page number only when at least two
    /// words precede it. `"Project Background 12"` becomes
    /// `"Project Background"`, while `"Chapter 3"` is returned unchanged.
    pub fn clean(&self, text: &str) -> String {
        let p = &*PATTERNS;
        let mut result = text.trim().to_string();

        result = p.leader_suffix.replace(&result, "").to_string();

        // A bare "Section 2" keeps its number: it is the marker, not a page.
        if let Some(m) = p.page_number_suffix.find(&result) {
            if result[..m.start()].split_whitespace().count() >= 2 {
                result.truncate(m.start());
            }
        }

        result = p.whitespace.replace_all(result.trim(), " ").to_string();
        result = p.trailing_stop.replace(&result, "").to_string();
        result = self.normalize(&result);

        result.trim().to_string()
    }

    /// Apply the configured Unicode normalization.
    pub fn normalize(&self, text: &str) -> String {
        match self.normalization {
            Normalization::Nfc => text.nfc().collect(),
            Normalization::Nfkc => text.nfkc().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        TextCleaner::default().clean(text)
    }

    #[test]
    fn test_strip_dot_leaders() {
        assert_eq!(clean("Introduction ........ 5"), "Introduction");
        assert_eq!(clean("2.1 Budget -----"), "2.1 Budget");
        assert_eq!(clean("Glossary ··· 12"), "Glossary");
    }

    #[test]
    fn test_strip_page_number() {
        assert_eq!(clean("Project Background 12"), "Project Background");
        assert_eq!(clean("Kapitel 7"), "Kapitel 7");
        assert_eq!(clean("Chapter 3"), "Chapter 3");
        assert_eq!(clean("Chapter 3 Results 41"), "Chapter 3 Results");
        assert_eq!(clean("अध्याय 2"), "अध्याय 2");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(clean("Risk   and\tMitigation"), "Risk and Mitigation");
    }

    #[test]
    fn test_trailing_stops() {
        assert_eq!(clean("Overview."), "Overview");
        assert_eq!(clean("概要。"), "概要");
        assert_eq!(clean("Summary:"), "Summary:");
        assert_eq!(clean("1.2 Overview"), "1.2 Overview");
    }

    #[test]
    fn test_nfkc_folds_full_width() {
        assert_eq!(clean("ＡＢＣ　Ｒｅｐｏｒｔ"), "ABC Report");
        assert_eq!(clean("Results．"), "Results");
    }

    #[test]
    fn test_nfc_keeps_compatibility_forms() {
        let cleaner = TextCleaner::new(Normalization::Nfc);
        assert_eq!(cleaner.clean("ＡＢＣ"), "ＡＢＣ");
        assert_eq!(cleaner.normalize("cafe\u{301}"), "café");
    }

    #[test]
    fn test_empty() {
        assert_eq!(clean("   "), "");
        assert_eq!(clean("..."), "");
    }
}
