//! Section records handed to downstream relevance ranking.

use serde::{Deserialize, Serialize};

/// A heading together with the body text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Source document identifier
    pub document: String,

    /// Cleaned heading text
    pub section_title: String,

    /// Body text up to the next heading
    pub text: String,

    /// Page of the heading (0-indexed)
    pub page_number: usize,
}

impl Section {
    /// Approximate word count of the body text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
