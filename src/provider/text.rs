//! Plain text provider.

use crate::error::Result;
use crate::model::{Document, Page};

use super::{decode_utf8, PageTextProvider};

/// Page separator emitted by common PDF-to-text tools.
const FORM_FEED: char = '\x0c';

/// Plain UTF-8 text provider.
///
/// Pages are separated by form feed characters; a file without any is a
/// single page.
#[derive(Debug, Clone, Default)]
pub struct TextProvider {
    _private: (),
}

impl TextProvider {
    /// Create a new text provider.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Split text into a document.
    pub fn parse(&self, id: &str, text: &str) -> Document {
        let text = text.strip_suffix(FORM_FEED).unwrap_or(text);
        Document {
            id: id.to_string(),
            pages: text.split(FORM_FEED).map(Page::from_text).collect(),
        }
    }
}

impl PageTextProvider for TextProvider {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn load_bytes(&self, id: &str, bytes: &[u8]) -> Result<Document> {
        let text = decode_utf8(id, bytes)?;
        Ok(self.parse(id, text))
    }
}
