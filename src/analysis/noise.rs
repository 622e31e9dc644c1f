//! Boilerplate detection.

use super::catalog::{catalog, Language};
use super::context::LineContext;
use super::stats::RepeatedLineSet;

/// Why a line was rejected as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReason {
    /// Running header or footer
    Repeated,
    /// Empty or a single character
    TooShort,
    /// Matched a catalog rule of the given language
    Catalog(Language),
    /// Surrounded by short lines (form or address block)
    DenseContext,
    /// Only digits, punctuation and whitespace
    NumericOnly,
}

/// Decides whether a line is boilerplate.
#[derive(Debug, Clone, Copy)]
pub struct NoiseFilter<'a> {
    repeated: &'a RepeatedLineSet,
    dense_threshold: usize,
}

impl<'a> NoiseFilter<'a> {
    /// Create a filter over a document's repeated lines.
    pub fn new(repeated: &'a RepeatedLineSet, dense_threshold: usize) -> Self {
        Self {
            repeated,
            dense_threshold,
        }
    }

    /// Classify a line; the first matching reason wins.
    pub fn classify(&self, line: &str, context: &LineContext) -> Option<NoiseReason> {
        let trimmed = line.trim();

        if self.repeated.contains(trimmed) {
            return Some(NoiseReason::Repeated);
        }

        if trimmed.chars().count() < 2 {
            return Some(NoiseReason::TooShort);
        }

        let lower = trimmed.to_lowercase();
        if let Some(language) = catalog().noise(&lower) {
            return Some(NoiseReason::Catalog(language));
        }

        if context.is_dense(self.dense_threshold) {
            return Some(NoiseReason::DenseContext);
        }

        if catalog().is_numeric_only(trimmed) {
            return Some(NoiseReason::NumericOnly);
        }

        None
    }

    /// Check whether a line is boilerplate.
    pub fn is_noise(&self, line: &str, context: &LineContext) -> bool {
        match self.classify(line, context) {
            Some(reason) => {
                log::trace!("noise ({:?}): {}", reason, line);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> Option<NoiseReason> {
        let repeated = RepeatedLineSet::default();
        NoiseFilter::new(&repeated, 4).classify(line, &LineContext::empty())
    }

    #[test]
    fn test_repeated_line_wins() {
        let repeated: RepeatedLineSet = vec!["Quarterly Report"].into_iter().collect();
        let filter = NoiseFilter::new(&repeated, 4);
        assert_eq!(
            filter.classify("  Quarterly Report ", &LineContext::empty()),
            Some(NoiseReason::Repeated)
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(classify(""), Some(NoiseReason::TooShort));
        assert_eq!(classify("a"), Some(NoiseReason::TooShort));
        assert_eq!(classify("序"), Some(NoiseReason::TooShort));
    }

    #[test]
    fn test_catalog_matches() {
        assert_eq!(
            classify("© 2024 Example Inc."),
            Some(NoiseReason::Catalog(Language::Universal))
        );
        assert_eq!(
            classify("Confidential Draft"),
            Some(NoiseReason::Catalog(Language::English))
        );
        assert_eq!(
            classify("Vertraulich"),
            Some(NoiseReason::Catalog(Language::German))
        );
        assert_eq!(
            classify("Page 3"),
            Some(NoiseReason::Catalog(Language::Universal))
        );
    }

    #[test]
    fn test_dense_context() {
        let repeated = RepeatedLineSet::default();
        let filter = NoiseFilter::new(&repeated, 4);
        let context = LineContext {
            short_lines_nearby: 4,
        };
        assert_eq!(
            filter.classify("Applicant Name", &context),
            Some(NoiseReason::DenseContext)
        );
        assert!(!filter.is_noise("Applicant Name", &LineContext::empty()));
    }

    #[test]
    fn test_numeric_only() {
        assert_eq!(classify("12 - 14"), Some(NoiseReason::NumericOnly));
        assert_eq!(classify("(3)"), Some(NoiseReason::NumericOnly));
    }

    #[test]
    fn test_regular_lines_pass() {
        assert_eq!(classify("1.2 Overview"), None);
        assert_eq!(classify("Project Plan"), None);
        assert_eq!(classify("第一章概述"), None);
    }
}
