//! Integration tests for the provider module.

use std::fs;
use std::sync::Arc;

use unoutline::error::{Error, Result};
use unoutline::provider::{JsonPagesProvider, PageTextProvider, ProviderRegistry, TextProvider};
use unoutline::{Document, Page, Unoutline};

/// Mock provider for testing: every line of the input becomes its own page.
struct MockProvider {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockProvider {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl PageTextProvider for MockProvider {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn load_bytes(&self, id: &str, bytes: &[u8]) -> Result<Document> {
        let text = String::from_utf8_lossy(bytes);
        let mut doc = Document::new(id);
        for line in text.lines() {
            doc.add_page(Page::from_lines([line]));
        }
        Ok(doc)
    }
}

#[test]
fn test_provider_registry_new() {
    let registry = ProviderRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("txt"));
    assert!(!registry.supports("json"));
}

#[test]
fn test_provider_registry_register() {
    let mut registry = ProviderRegistry::new();
    let provider = Arc::new(MockProvider::new(vec!["md", "markdown"], "mock"));

    registry.register(provider);

    assert!(registry.supports("md"));
    assert!(registry.supports("MARKDOWN"));
    assert!(registry.get_by_name("Mock").is_some());
}

#[test]
fn test_provider_registry_override() {
    let mut registry = ProviderRegistry::with_defaults();
    registry.register(Arc::new(MockProvider::new(vec!["txt"], "lines")));

    let provider = registry.get_by_extension("txt").unwrap();
    assert_eq!(provider.name(), "lines");
    // other extensions of the replaced provider stay registered
    assert_eq!(registry.get_by_extension("text").unwrap().name(), "text");
}

#[test]
fn test_supports_extension_case_insensitive() {
    let provider = TextProvider::new();
    assert!(provider.supports_extension("TXT"));
    assert!(provider.supports_extension("Text"));
    assert!(!provider.supports_extension("json"));
    assert!(JsonPagesProvider::new().supports_extension("JSON"));
}

#[test]
fn test_load_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.TXT");
    fs::write(&path, "Field Notes\n2.1 Sites\x0c2.2 Samples\n").unwrap();

    let doc = ProviderRegistry::with_defaults().load(&path).unwrap();
    assert_eq!(doc.id, "notes.TXT");
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.get_page(1).unwrap().lines, vec!["2.2 Samples"]);
}

#[test]
fn test_load_missing_file_is_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ProviderRegistry::with_defaults()
        .load(&dir.path().join("missing.txt"))
        .unwrap_err();
    match err {
        Error::Extraction { document, .. } => assert_eq!(document, "missing.txt"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_load_bytes_by_extension() {
    let registry = ProviderRegistry::with_defaults();
    let doc = registry
        .load_bytes("inline", br#"{"pages": [["A"], ["B", "C"]]}"#, "json")
        .unwrap();
    assert_eq!(doc.line_count(), 3);

    let err = registry.load_bytes("inline", b"x", "docx").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_custom_provider_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slides.lines");
    fs::write(
        &path,
        "Quarterly Planning Deck\n1.1 Goals\n1.2 Risks\nQuarterly Planning Deck\n",
    )
    .unwrap();

    let result = Unoutline::new()
        .with_provider(Arc::new(MockProvider::new(vec!["lines"], "lines")))
        .load(&path)
        .unwrap();
    assert_eq!(result.document().page_count(), 4);

    let outline = result.outline();
    // the deck title repeats on two of four pages
    assert_eq!(outline.title, "");
    let texts: Vec<&str> = outline.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["1.1 Goals", "1.2 Risks"]);
    assert_eq!(outline.entries[1].page, 2);
}
