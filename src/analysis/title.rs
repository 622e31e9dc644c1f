//! Document title selection.

use super::context::LineContext;
use super::noise::NoiseFilter;
use super::stats::RepeatedLineSet;
use crate::detect::detect_script;
use crate::render::TextCleaner;

/// Exclusive character bounds and word cap for title lines.
struct TitleBounds {
    min_chars: usize,
    max_chars: usize,
    max_words: usize,
}

const DENSE_SCRIPT_BOUNDS: TitleBounds = TitleBounds {
    min_chars: 3,
    max_chars: 80,
    max_words: 25,
};

const DEFAULT_BOUNDS: TitleBounds = TitleBounds {
    min_chars: 5,
    max_chars: 100,
    max_words: 15,
};

/// Picks the title from the first lines of the first page.
#[derive(Debug, Clone, Copy)]
pub struct TitleExtractor {
    scan_lines: usize,
    dense_threshold: usize,
    cleaner: TextCleaner,
}

impl TitleExtractor {
    /// Create an extractor scanning `scan_lines` lines.
    pub fn new(scan_lines: usize, dense_threshold: usize, cleaner: TextCleaner) -> Self {
        Self {
            scan_lines,
            dense_threshold,
            cleaner,
        }
    }

    /// Return the cleaned title, or an empty string if no line qualifies.
    pub fn extract<S: AsRef<str>>(&self, first_page: &[S], repeated: &RepeatedLineSet) -> String {
        let noise = NoiseFilter::new(repeated, self.dense_threshold);

        for line in first_page.iter().take(self.scan_lines) {
            let line = line.as_ref().trim();
            let bounds = if detect_script(line).is_dense() {
                &DENSE_SCRIPT_BOUNDS
            } else {
                &DEFAULT_BOUNDS
            };

            let chars = line.chars().count();
            if chars <= bounds.min_chars || chars >= bounds.max_chars {
                continue;
            }
            if line.split_whitespace().count() > bounds.max_words {
                continue;
            }
            if repeated.contains(line) || noise.is_noise(line, &LineContext::empty()) {
                continue;
            }

            return self.cleaner.clean(line);
        }

        String::new()
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new(10, 4, TextCleaner::default())
    }
}
