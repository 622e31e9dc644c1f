//! Document-level input types.

use serde::{Deserialize, Serialize};

/// A document as delivered by a page text provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (usually the source file name)
    pub id: String,

    /// Pages in reading order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pages: Vec::new(),
        }
    }

    /// Create a document from raw page line lists.
    ///
    /// Lines are trimmed and empty lines dropped.
    pub fn from_pages<P, L>(id: impl Into<String>, pages: P) -> Self
    where
        P: IntoIterator<Item = L>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        Self {
            id: id.into(),
            pages: pages.into_iter().map(Page::from_lines).collect(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by zero-based index.
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Check if the document has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.lines.is_empty())
    }

    /// Iterate over every line in page order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter().map(String::as_str))
    }
}

/// A single page: an ordered list of trimmed, non-empty lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    /// Lines in reading order
    pub lines: Vec<String>,
}

impl Page {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from raw lines, trimming and dropping empty ones.
    pub fn from_lines<L>(lines: L) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|l| l.as_ref().trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
        }
    }

    /// Build a page from a block of text, one line per `\n`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Number of lines on the page.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
