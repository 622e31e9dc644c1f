//! JSON rendering for outlines and sections.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value (an [`crate::Outline`], a list of sections, a batch
/// report) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Json(format!("serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ScriptType;
    use crate::model::{HeadingEntry, HeadingLevel, Outline};

    fn sample() -> Outline {
        let mut outline = Outline::with_title("年度报告", ScriptType::Chinese);
        outline.entries.push(HeadingEntry::new(
            HeadingLevel::H1,
            "第1章 概述",
            0,
            2,
            ScriptType::Chinese,
        ));
        outline
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"年度报告\""));
        assert!(json.contains("\"document_script\": \"chinese\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        // non-ASCII is written verbatim
        assert!(json.contains("第1章 概述"));
    }
}
