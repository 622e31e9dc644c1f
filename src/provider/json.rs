//! Pre-extracted page lines stored as JSON.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Document, Page};

use super::{decode_utf8, PageTextProvider};

#[derive(Deserialize)]
#[serde(untagged)]
enum PagesFile {
    Object { pages: Vec<Vec<String>> },
    Bare(Vec<Vec<String>>),
}

/// Provider for `{"pages": [["line", ...], ...]}` or a bare `[[...]]` array.
#[derive(Debug, Clone, Default)]
pub struct JsonPagesProvider {
    _private: (),
}

impl JsonPagesProvider {
    /// Create a new JSON pages provider.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl PageTextProvider for JsonPagesProvider {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn load_bytes(&self, id: &str, bytes: &[u8]) -> Result<Document> {
        let text = decode_utf8(id, bytes)?;
        let pages = match serde_json::from_str::<PagesFile>(text) {
            Ok(PagesFile::Object { pages }) | Ok(PagesFile::Bare(pages)) => pages,
            Err(e) => return Err(Error::extraction(id, format!("malformed page JSON: {}", e))),
        };

        Ok(Document {
            id: id.to_string(),
            pages: pages.into_iter().map(Page::from_lines).collect(),
        })
    }
}
