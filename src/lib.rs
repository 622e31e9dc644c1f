//! # unoutline
//!
//! Multilingual document outline extraction for Rust.
//!
//! This library takes the page text of a document (an ordered list of pages,
//! each an ordered list of lines) and produces a structured outline: a
//! document title plus an ordered list of headings with a level (H1-H4), the
//! zero-based page they occur on and the writing system they are in.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unoutline::{outline_file, render};
//!
//! fn main() -> unoutline::Result<()> {
//!     // Load page text and build the outline
//!     let outline = outline_file("report.txt")?;
//!
//!     // Serialize it
//!     let json = render::to_json(&outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multilingual**: Latin, Cyrillic, Chinese, Japanese, Korean and Devanagari
//! - **Boilerplate removal**: Running headers/footers, copyright and page markers
//! - **Heading levels**: From numbering depth, chapter/section markers and layout
//! - **Sections**: Heading plus body text for downstream ranking
//! - **Batch processing**: Parallel over documents with Rayon, per-document timeout

pub mod analysis;
pub mod batch;
pub mod builder;
pub mod detect;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod sections;

// Re-export commonly used types
pub use analysis::{Normalization, OutlineConfig};
pub use batch::{BatchOptions, BatchPlan, BatchReport, BatchRunner};
pub use builder::OutlineBuilder;
pub use detect::{detect_script, ScriptType};
pub use error::{Error, Result};
pub use model::{Document, HeadingEntry, HeadingLevel, Outline, Page, Section};
pub use provider::{JsonPagesProvider, PageTextProvider, ProviderRegistry, TextProvider};
pub use render::JsonFormat;

use std::path::Path;

/// Build the outline of an in-memory document with the default configuration.
///
/// # Example
///
/// ```
/// use unoutline::{extract_outline, Document, HeadingLevel};
///
/// let doc = Document::from_pages(
///     "guide",
///     vec![vec!["Installation Guide", "1.2 Requirements"]],
/// );
/// let outline = extract_outline(&doc);
/// assert_eq!(outline.title, "Installation Guide");
/// assert_eq!(outline.entries[0].level, HeadingLevel::H2);
/// ```
pub fn extract_outline(doc: &Document) -> Outline {
    OutlineBuilder::default().build(doc)
}

/// Load a file with the default providers and build its outline.
///
/// # Example
///
/// ```no_run
/// use unoutline::outline_file;
///
/// let outline = outline_file("report.txt").unwrap();
/// println!("{}: {} headings", outline.title, outline.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    Unoutline::new().load(path).map(|r| r.outline())
}

/// Build the outline of plain text, pages separated by form feeds.
///
/// # Example
///
/// ```
/// use unoutline::outline_text;
///
/// let outline = outline_text("memo", "Quarterly Review Memo\n2.1 Revenue\x0c2.2 Costs");
/// assert_eq!(outline.entries.len(), 2);
/// assert_eq!(outline.entries[1].page, 1);
/// ```
pub fn outline_text(id: &str, text: &str) -> Outline {
    extract_outline(&TextProvider::new().parse(id, text))
}

/// Load a file and split it into heading sections.
pub fn sections_file<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    Unoutline::new().load(path).map(|r| r.sections())
}

/// Load a file and build its outline on a blocking thread.
#[cfg(feature = "async")]
pub async fn outline_file_async<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let path = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || outline_file(path))
        .await
        .map_err(|e| Error::Other(format!("outline task failed: {}", e)))?
}

/// Builder for loading documents and extracting outlines.
///
/// # Example
///
/// ```no_run
/// use unoutline::{Normalization, Unoutline};
///
/// let json = Unoutline::new()
///     .with_repeated_threshold(2, 4)
///     .with_normalization(Normalization::Nfc)
///     .load("report.txt")?
///     .to_json(unoutline::JsonFormat::Compact)?;
/// # Ok::<(), unoutline::Error>(())
/// ```
pub struct Unoutline {
    config: OutlineConfig,
    registry: ProviderRegistry,
}

impl Unoutline {
    /// Create a new builder with default configuration and providers.
    pub fn new() -> Self {
        Self {
            config: OutlineConfig::default(),
            registry: ProviderRegistry::with_defaults(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the repeated-line threshold.
    pub fn with_repeated_threshold(mut self, min_pages: usize, page_divisor: usize) -> Self {
        self.config = self.config.with_repeated_threshold(min_pages, page_divisor);
        self
    }

    /// Set the degenerate-document threshold.
    pub fn with_degenerate_threshold(mut self, unique_ratio: f64, max_lines: usize) -> Self {
        self.config = self.config.with_degenerate_threshold(unique_ratio, max_lines);
        self
    }

    /// Set the Unicode normalization applied to cleaned text.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.config = self.config.with_normalization(normalization);
        self
    }

    /// Register an additional page text provider.
    pub fn with_provider(mut self, provider: std::sync::Arc<dyn PageTextProvider>) -> Self {
        self.registry.register(provider);
        self
    }

    /// Load a file and return a result wrapper.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<UnoutlineResult> {
        self.config.validate()?;
        let document = self.registry.load(path.as_ref())?;
        Ok(UnoutlineResult {
            document,
            builder: OutlineBuilder::new(self.config),
        })
    }

    /// Wrap an in-memory document.
    pub fn document(self, document: Document) -> Result<UnoutlineResult> {
        self.config.validate()?;
        Ok(UnoutlineResult {
            document,
            builder: OutlineBuilder::new(self.config),
        })
    }
}

impl Default for Unoutline {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document ready for outline extraction.
pub struct UnoutlineResult {
    /// The loaded document
    pub document: Document,
    builder: OutlineBuilder,
}

impl UnoutlineResult {
    /// Build the outline.
    pub fn outline(&self) -> Outline {
        self.builder.build(&self.document)
    }

    /// Split the document into heading sections.
    pub fn sections(&self) -> Vec<Section> {
        self.builder.build_with_sections(&self.document).1
    }

    /// Build the outline and serialize it to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.outline(), format)
    }

    /// Split into sections and serialize them to JSON.
    pub fn sections_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.sections(), format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Document {
        Document::from_pages(
            "plan.txt",
            vec![
                vec!["Project Plan", "Confidential Draft"],
                vec!["2.1 Budget", "Spending is capped at the approved amount.", "Confidential Draft"],
                vec!["Confidential Draft"],
            ],
        )
    }

    #[test]
    fn test_unoutline_builder() {
        let builder = Unoutline::new()
            .with_repeated_threshold(3, 4)
            .with_normalization(Normalization::Nfc);
        assert_eq!(builder.config.repeated_min_pages, 3);
        assert_eq!(builder.config.repeated_page_divisor, 4);
        assert_eq!(builder.config.normalization, Normalization::Nfc);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Unoutline::new()
            .with_repeated_threshold(2, 0)
            .document(Document::new("x"));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_result_outline_and_sections() {
        let result = Unoutline::new().document(plan()).unwrap();
        let outline = result.outline();
        assert_eq!(outline.title, "Project Plan");
        assert_eq!(outline.entries.len(), 1);

        let sections = result.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_title, "2.1 Budget");
        assert_eq!(sections[0].text, "Spending is capped at the approved amount.");
    }

    #[test]
    fn test_result_json() {
        let result = Unoutline::new().document(plan()).unwrap();
        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.starts_with("{\"title\":\"Project Plan\""));
        let sections = result.sections_json(JsonFormat::Compact).unwrap();
        assert!(sections.contains("\"page_number\":1"));
    }

    #[test]
    fn test_outline_text_pages() {
        let outline = outline_text("t", "Annual Safety Report\x0c1.1 Incidents\x0c");
        assert_eq!(outline.title, "Annual Safety Report");
        assert_eq!(outline.entries[0].page, 1);
    }

    #[test]
    fn test_unsupported_file() {
        let result = Unoutline::new().load("scan.pdf");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
