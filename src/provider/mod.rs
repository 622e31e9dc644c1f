//! Page text providers with a plugin architecture for multiple input formats.
//!
//! A provider turns a file into a [`Document`] (an ordered list of pages,
//! each an ordered list of lines). The registry dispatches on file
//! extension.
//!
//! # Example
//!
//! ```no_run
//! use unoutline::provider::{ProviderRegistry, TextProvider};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! fn main() -> unoutline::Result<()> {
//!     let mut registry = ProviderRegistry::new();
//!     registry.register(Arc::new(TextProvider::new()));
//!
//!     let doc = registry.load(Path::new("report.txt"))?;
//!     println!("{} pages", doc.page_count());
//!     Ok(())
//! }
//! ```

mod json;
mod text;

pub use json::JsonPagesProvider;
pub use text::TextProvider;

use crate::error::{Error, Result};
use crate::model::Document;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for page text providers.
///
/// Implement this trait to add support for a new input format.
pub trait PageTextProvider: Send + Sync {
    /// Get the supported file extensions for this provider.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["txt"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Load the page text of a file. The document id is the file name.
    fn load(&self, path: &Path) -> Result<Document> {
        let id = document_id(path);
        let bytes =
            std::fs::read(path).map_err(|e| Error::extraction(&id, format!("read failed: {}", e)))?;
        self.load_bytes(&id, &bytes)
    }

    /// Load page text from bytes.
    fn load_bytes(&self, id: &str, bytes: &[u8]) -> Result<Document>;

    /// Check if this provider supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Document identifier for a path: its file name, or the whole path if it
/// has none.
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode provider input as UTF-8, reporting failures as extraction errors.
pub(crate) fn decode_utf8<'a>(id: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::extraction(id, format!("invalid UTF-8: {}", e)))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Registry for page text providers.
///
/// The registry maps file extensions to providers and provides
/// convenient methods for loading documents.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn PageTextProvider>>,
    by_name: HashMap<String, Arc<dyn PageTextProvider>>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default providers (text, JSON pages).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextProvider::new()));
        registry.register(Arc::new(JsonPagesProvider::new()));
        registry
    }

    /// Register a provider.
    ///
    /// The provider will be registered for all its supported extensions.
    pub fn register(&mut self, provider: Arc<dyn PageTextProvider>) {
        for ext in provider.supported_extensions() {
            self.providers.insert(ext.to_lowercase(), provider.clone());
        }
        self.by_name.insert(provider.name().to_lowercase(), provider);
    }

    /// Get a provider by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn PageTextProvider>> {
        self.providers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a provider by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn PageTextProvider>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.providers.contains_key(&ext.to_lowercase())
    }

    /// Check if a path has a supported extension.
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.supports(ext))
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Load a file using the appropriate provider.
    pub fn load(&self, path: &Path) -> Result<Document> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;

        let provider = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no provider for extension: {}", ext)))?;

        log::debug!("loading {} with {} provider", path.display(), provider.name());
        provider.load(path)
    }

    /// Load bytes using the specified extension to determine the provider.
    pub fn load_bytes(&self, id: &str, bytes: &[u8], ext: &str) -> Result<Document> {
        let provider = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no provider for extension: {}", ext)))?;

        provider.load_bytes(id, bytes)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = ProviderRegistry::with_defaults();
        assert!(registry.supports("txt"));
        assert!(registry.supports("TXT"));
        assert!(registry.supports("json"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.supported_extensions(), vec!["json", "text", "txt"]);
    }

    #[test]
    fn test_registry_get_by_extension() {
        let registry = ProviderRegistry::with_defaults();
        let provider = registry.get_by_extension("txt");
        assert!(provider.is_some());
        assert_eq!(provider.unwrap().name(), "text");
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ProviderRegistry::with_defaults();
        assert!(registry.get_by_name("JSON").is_some());
        assert!(registry.get_by_name("pdf").is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let registry = ProviderRegistry::with_defaults();
        let err = registry.load(Path::new("scan.pdf")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        let err = registry.load(Path::new("README")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(Path::new("/data/in/report.txt")), "report.txt");
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_utf8("a", "\u{feff}Title".as_bytes()).unwrap(), "Title");
        let err = decode_utf8("bad.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert_eq!(err.kind(), "extraction");
    }
}
