//! Tunable thresholds for outline extraction.

use crate::error::{Error, Result};

/// Thresholds driving the heading heuristics.
///
/// The defaults are empirical and match the behaviour the heuristics
/// were tuned on; every value can be overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineConfig {
    /// Lower bound of the repeated-line page threshold
    pub repeated_min_pages: usize,

    /// A line is repeated if it occurs on at least `page_count / divisor` pages
    pub repeated_page_divisor: usize,

    /// Distinct/total line ratio below which a small document is degenerate
    pub degenerate_unique_ratio: f64,

    /// Documents with at least this many lines are never degenerate
    pub degenerate_max_lines: usize,

    /// Lines inspected on each side of the current line
    pub context_radius: usize,

    /// A neighbouring line with at most this many words counts as short
    pub short_line_max_words: usize,

    /// Short-neighbour count at which a line is treated as a form/address block
    pub dense_context_threshold: usize,

    /// Number of first-page lines scanned for a title
    pub title_scan_lines: usize,

    /// Number of leading lines used to detect the document script
    pub script_sample_lines: usize,

    /// Unicode normalization applied to cleaned headings
    pub normalization: Normalization,
}

impl OutlineConfig {
    /// Create a configuration with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repeated-line thresholds.
    pub fn with_repeated_threshold(mut self, min_pages: usize, page_divisor: usize) -> Self {
        self.repeated_min_pages = min_pages;
        self.repeated_page_divisor = page_divisor;
        self
    }

    /// Set the degenerate-document thresholds.
    pub fn with_degenerate_threshold(mut self, unique_ratio: f64, max_lines: usize) -> Self {
        self.degenerate_unique_ratio = unique_ratio;
        self.degenerate_max_lines = max_lines;
        self
    }

    /// Set the context window radius.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    /// Set the short-line word limit and the dense-context threshold.
    pub fn with_short_lines(mut self, max_words: usize, dense_threshold: usize) -> Self {
        self.short_line_max_words = max_words;
        self.dense_context_threshold = dense_threshold;
        self
    }

    /// Set how many first-page lines are scanned for a title.
    pub fn with_title_scan_lines(mut self, lines: usize) -> Self {
        self.title_scan_lines = lines;
        self
    }

    /// Set the sample size used for document script detection.
    pub fn with_script_sample_lines(mut self, lines: usize) -> Self {
        self.script_sample_lines = lines;
        self
    }

    /// Set the Unicode normalization form.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Page count a line must reach to be considered repeated.
    pub fn repeated_threshold(&self, page_count: usize) -> usize {
        let divided = page_count / self.repeated_page_divisor.max(1);
        self.repeated_min_pages.max(divided)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.repeated_page_divisor == 0 {
            return Err(Error::InvalidConfig(
                "repeated_page_divisor must be at least 1".to_string(),
            ));
        }
        if self.repeated_min_pages == 0 {
            return Err(Error::InvalidConfig(
                "repeated_min_pages must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.degenerate_unique_ratio) {
            return Err(Error::InvalidConfig(format!(
                "degenerate_unique_ratio must be within 0..=1, got {}",
                self.degenerate_unique_ratio
            )));
        }
        if self.title_scan_lines == 0 || self.script_sample_lines == 0 {
            return Err(Error::InvalidConfig(
                "title_scan_lines and script_sample_lines must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            repeated_min_pages: 2,
            repeated_page_divisor: 3,
            degenerate_unique_ratio: 0.3,
            degenerate_max_lines: 50,
            context_radius: 3,
            short_line_max_words: 6,
            dense_context_threshold: 4,
            title_scan_lines: 10,
            script_sample_lines: 50,
            normalization: Normalization::Nfkc,
        }
    }
}

/// Unicode normalization form for cleaned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Canonical composition
    Nfc,
    /// Compatibility composition (folds full-width forms and ligatures)
    #[default]
    Nfkc,
}
