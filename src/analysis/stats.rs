//! Document-wide statistics computed before classification.

use std::collections::{HashMap, HashSet};

use crate::detect::{detect_script, ScriptType};
use crate::model::Document;

/// Normalize a line for repeated-line comparison: trim and collapse
/// internal whitespace.
pub fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lines recurring across many pages (running headers and footers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatedLineSet {
    lines: HashSet<String>,
}

impl RepeatedLineSet {
    /// Collect lines that occur on at least `threshold` distinct pages.
    pub fn build(doc: &Document, threshold: usize) -> Self {
        let mut page_counts: HashMap<String, usize> = HashMap::new();
        for page in &doc.pages {
            let unique: HashSet<String> = page.lines.iter().map(|l| normalize_line(l)).collect();
            for line in unique {
                *page_counts.entry(line).or_insert(0) += 1;
            }
        }

        let lines = page_counts
            .into_iter()
            .filter(|(line, count)| !line.is_empty() && *count >= threshold)
            .map(|(line, _)| line)
            .collect();

        Self { lines }
    }

    /// Check whether a line is repeated.
    pub fn contains(&self, line: &str) -> bool {
        !self.lines.is_empty() && self.lines.contains(&normalize_line(line))
    }

    /// Number of repeated lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no line is repeated.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RepeatedLineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter
                .into_iter()
                .map(|s| {
                    let line: String = s.into();
                    normalize_line(&line)
                })
                .collect(),
        }
    }
}

/// Aggregate line statistics of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocStats {
    /// Total number of lines
    pub total_lines: usize,

    /// Number of distinct lines
    pub distinct_lines: usize,

    /// Mean whitespace-separated word count per line
    pub avg_words_per_line: f64,

    /// Script detected from the leading sample of lines
    pub primary_script: ScriptType,
}

impl DocStats {
    /// Compute statistics, detecting the script from the first
    /// `script_sample_lines` lines.
    pub fn compute(doc: &Document, script_sample_lines: usize) -> Self {
        let mut total_lines = 0;
        let mut total_words = 0;
        let mut distinct = HashSet::new();
        for line in doc.lines() {
            total_lines += 1;
            total_words += line.split_whitespace().count();
            distinct.insert(line);
        }

        let sample = doc
            .lines()
            .take(script_sample_lines)
            .collect::<Vec<_>>()
            .join(" ");

        let avg_words_per_line = if total_lines == 0 {
            0.0
        } else {
            total_words as f64 / total_lines as f64
        };

        Self {
            total_lines,
            distinct_lines: distinct.len(),
            avg_words_per_line,
            primary_script: detect_script(&sample),
        }
    }

    /// Ratio of distinct to total lines (1.0 for an empty document).
    pub fn unique_ratio(&self) -> f64 {
        if self.total_lines == 0 {
            1.0
        } else {
            self.distinct_lines as f64 / self.total_lines as f64
        }
    }
}
