//! Outline output types.

use crate::detect::ScriptType;
use serde::{Deserialize, Serialize};

/// Heading nesting depth, H1 being the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Chapter or top-level section
    H1,
    /// Numbered section (`2.1`) or second-tier marker
    H2,
    /// Subsection (`2.1.3`)
    H3,
    /// Deepest level; anything nested further is clamped here
    H4,
}

impl HeadingLevel {
    /// Numeric depth (1-4).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }

    /// Level for a numeric depth, clamped to 1-4.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Cleaned heading text
    pub text: String,

    /// Page index (0-indexed)
    pub page: usize,

    /// Script of the cleaned text
    pub script_type: ScriptType,

    /// Line index within the page (0-indexed)
    #[serde(skip)]
    pub line: usize,
}

impl HeadingEntry {
    /// Create a new heading entry.
    pub fn new(
        level: HeadingLevel,
        text: impl Into<String>,
        page: usize,
        line: usize,
        script_type: ScriptType,
    ) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            script_type,
            line,
        }
    }
}

/// Extracted document outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title (empty if none was found)
    pub title: String,

    /// Headings in page order
    #[serde(rename = "outline")]
    pub entries: Vec<HeadingEntry>,

    /// Primary script of the document
    pub document_script: ScriptType,
}

impl Outline {
    /// Create an outline with a title and no entries.
    pub fn with_title(title: impl Into<String>, document_script: ScriptType) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            document_script,
        }
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Count headings per level, indexed H1..H4.
    pub fn level_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for entry in &self.entries {
            counts[(entry.level.depth() - 1) as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_display() {
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
        assert_eq!(HeadingLevel::from_depth(7), HeadingLevel::H4);
        assert_eq!(HeadingLevel::from_depth(0), HeadingLevel::H1);
    }

    #[test]
    fn test_outline_serialization_shape() {
        let mut outline = Outline::with_title("Plan", ScriptType::Latin);
        outline.entries.push(HeadingEntry::new(
            HeadingLevel::H2,
            "2.1 Budget",
            1,
            0,
            ScriptType::Latin,
        ));

        let json = serde_json::to_string(&outline).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Plan","outline":[{"level":"H2","text":"2.1 Budget","page":1,"script_type":"latin"}],"document_script":"latin"}"#
        );
    }

    #[test]
    fn test_outline_deserialize() {
        let json = r#"{"title":"","outline":[{"level":"H1","text":"概要","page":0,"script_type":"chinese"}],"document_script":"chinese"}"#;
        let outline: Outline = serde_json::from_str(json).unwrap();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.entries[0].script_type, ScriptType::Chinese);
        assert_eq!(outline.level_counts(), [1, 0, 0, 0]);
    }
}
