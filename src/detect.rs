//! Writing-system detection.

use serde::{Deserialize, Serialize};

/// Coarse writing-system family of a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    /// CJK unified ideographs
    Chinese,
    /// Hiragana and Katakana
    Japanese,
    /// Hangul syllables
    Korean,
    /// Devanagari (Hindi and related languages)
    Devanagari,
    /// Cyrillic
    Cyrillic,
    /// Any other alphabetic script
    #[default]
    Latin,
}

impl ScriptType {
    /// Tie-break order, highest priority first.
    pub const PRIORITY: [ScriptType; 6] = [
        ScriptType::Chinese,
        ScriptType::Japanese,
        ScriptType::Korean,
        ScriptType::Devanagari,
        ScriptType::Cyrillic,
        ScriptType::Latin,
    ];

    /// Lowercase name as used in outline artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::Chinese => "chinese",
            ScriptType::Japanese => "japanese",
            ScriptType::Korean => "korean",
            ScriptType::Devanagari => "devanagari",
            ScriptType::Cyrillic => "cyrillic",
            ScriptType::Latin => "latin",
        }
    }

    /// Whether the script packs many characters into few words
    /// (Chinese and Japanese), which switches length thresholds.
    pub fn is_dense(&self) -> bool {
        matches!(self, ScriptType::Chinese | ScriptType::Japanese)
    }

    /// Classify a single character, or `None` if it does not count.
    pub fn of_char(c: char) -> Option<ScriptType> {
        match c {
            '\u{4E00}'..='\u{9FFF}' => Some(ScriptType::Chinese),
            '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' => Some(ScriptType::Japanese),
            '\u{AC00}'..='\u{D7AF}' => Some(ScriptType::Korean),
            '\u{0900}'..='\u{097F}' => Some(ScriptType::Devanagari),
            '\u{0400}'..='\u{04FF}' => Some(ScriptType::Cyrillic),
            c if c.is_alphabetic() => Some(ScriptType::Latin),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            ScriptType::Chinese => 0,
            ScriptType::Japanese => 1,
            ScriptType::Korean => 2,
            ScriptType::Devanagari => 3,
            ScriptType::Cyrillic => 4,
            ScriptType::Latin => 5,
        }
    }
}

impl std::fmt::Display for ScriptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the dominant script of a text.
///
/// Every character is classified by code-point range and the script with
/// the highest count wins. Ties resolve by [`ScriptType::PRIORITY`];
/// text without any counted character is [`ScriptType::Latin`].
///
/// # Example
/// ```
/// use unoutline::detect::{detect_script, ScriptType};
///
/// assert_eq!(detect_script("第一章概述"), ScriptType::Chinese);
/// assert_eq!(detect_script(""), ScriptType::Latin);
/// ```
pub fn detect_script(text: &str) -> ScriptType {
    let mut counts = [0usize; 6];
    for script in text.chars().filter_map(ScriptType::of_char) {
        counts[script.index()] += 1;
    }

    let mut best = ScriptType::Latin;
    let mut best_count = 0;
    // Strict comparison keeps the earlier (higher priority) script on ties.
    for script in ScriptType::PRIORITY {
        let count = counts[script.index()];
        if count > best_count {
            best = script;
            best_count = count;
        }
    }
    best
}
