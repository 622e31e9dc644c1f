//! Heading candidacy and level assignment.

use super::catalog::{catalog, Language};
use super::context::LineContext;
use crate::detect::{detect_script, ScriptType};
use crate::model::HeadingLevel;

/// Length caps for Chinese/Japanese lines: (chars, words).
const DENSE_SCRIPT_CAPS: (usize, usize) = (50, 20);

/// Length caps for all other scripts: (chars, words).
const DEFAULT_CAPS: (usize, usize) = (120, 15);

/// Positive signal that made a line a heading candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingSignal {
    /// Numbered chapter/section prefix
    NumberedSection(Language),
    /// Appendix prefix
    Appendix(Language),
    /// Fully upper-case short line
    UpperCase,
    /// Title-cased Latin line
    TitleCase,
    /// Mostly upper-case Latin line
    UpperRatio,
    /// Short line ending with a colon
    ColonTerminated,
    /// Chinese/Japanese numbering marker or short unterminated line
    CjkMarker,
    /// Korean ordinal letter (가. 나. ...)
    KoreanOrdinal,
    /// Devanagari digits or chapter/part/section words
    DevanagariMarker,
}

/// Decides heading candidacy and assigns heading levels.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier {
    dense_threshold: usize,
}

impl HeadingClassifier {
    /// Create a classifier rejecting lines whose context reaches `dense_threshold`.
    pub fn new(dense_threshold: usize) -> Self {
        Self { dense_threshold }
    }

    /// Return the first positive signal for a line, or `None` if the line
    /// is not a heading candidate.
    pub fn signal(&self, line: &str, context: &LineContext) -> Option<HeadingSignal> {
        let line = line.trim();
        let word_count = line.split_whitespace().count();
        let char_count = line.chars().count();
        let script = detect_script(line);

        let (max_chars, max_words) = if script.is_dense() {
            DENSE_SCRIPT_CAPS
        } else {
            DEFAULT_CAPS
        };
        if word_count > max_words || char_count > max_chars {
            return None;
        }
        if context.is_dense(self.dense_threshold) {
            return None;
        }

        let c = catalog();

        if let Some(language) = c.numbered_section(line) {
            return Some(HeadingSignal::NumberedSection(language));
        }

        if let Some(language) = c.appendix(line) {
            return Some(HeadingSignal::Appendix(language));
        }

        if is_upper(line)
            && (2..=8).contains(&word_count)
            && c.instruction_word(line).is_none()
            && !c.is_address(line)
        {
            return Some(HeadingSignal::UpperCase);
        }

        if script == ScriptType::Latin {
            if is_title(line) && (3..=10).contains(&word_count) && !line.ends_with(':') {
                return Some(HeadingSignal::TitleCase);
            }

            let upper = line.chars().filter(|c| c.is_uppercase()).count();
            let ratio = upper as f64 / char_count.max(1) as f64;
            if (0.6..1.0).contains(&ratio) && word_count <= 10 {
                return Some(HeadingSignal::UpperRatio);
            }
        }

        if line.ends_with(':') && (2..=8).contains(&word_count) {
            return Some(HeadingSignal::ColonTerminated);
        }

        match script {
            ScriptType::Chinese | ScriptType::Japanese => {
                if c.cjk_list_marker.is_match(line)
                    || c.circled_digit.is_match(line)
                    || (char_count <= 30 && !line.ends_with('。'))
                {
                    return Some(HeadingSignal::CjkMarker);
                }
            }
            ScriptType::Korean if c.korean_ordinal.is_match(line) => {
                return Some(HeadingSignal::KoreanOrdinal);
            }
            ScriptType::Devanagari if c.devanagari_marker.is_match(line) => {
                return Some(HeadingSignal::DevanagariMarker);
            }
            _ => {}
        }

        None
    }

    /// Check whether a line is a heading candidate.
    pub fn is_candidate(&self, line: &str, context: &LineContext) -> bool {
        match self.signal(line, context) {
            Some(signal) => {
                log::trace!("heading candidate ({:?}): {}", signal, line);
                true
            }
            None => false,
        }
    }

    /// Assign a level to cleaned heading text. First matching rule wins.
    pub fn level(&self, text: &str) -> HeadingLevel {
        let text = text.trim();
        let c = catalog();

        if let Some(m) = c.numeric_prefix.find(text) {
            let depth = m.as_str().split('.').count();
            if depth >= 2 {
                return HeadingLevel::from_depth(depth);
            }
        }
        if c.single_number.is_match(text) {
            return HeadingLevel::H1;
        }

        if c.chapter_markers.iter().any(|r| r.regex.is_match(text)) {
            return HeadingLevel::H1;
        }
        if c.section_markers.iter().any(|r| r.regex.is_match(text)) {
            return HeadingLevel::H2;
        }

        if c.appendix(text).is_some() {
            return HeadingLevel::H2;
        }

        if text.ends_with(':') && text.split_whitespace().count() <= 5 {
            return HeadingLevel::H3;
        }

        if detect_script(text).is_dense() {
            if c.cjk_list_marker.is_match(text) {
                return HeadingLevel::H2;
            }
            if c.circled_digit.is_match(text) {
                return HeadingLevel::H3;
            }
        }

        HeadingLevel::H1
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(4)
    }
}

/// At least one cased character and no lower-case ones.
pub(crate) fn is_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Every cased run starts with an upper-case letter followed only by
/// lower-case letters, and at least one cased character exists.
pub(crate) fn is_title(text: &str) -> bool {
    let mut previous_cased = false;
    let mut any_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else {
            previous_cased = false;
        }
    }
    any_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(line: &str) -> Option<HeadingSignal> {
        HeadingClassifier::default().signal(line, &LineContext::empty())
    }

    fn level(text: &str) -> HeadingLevel {
        HeadingClassifier::default().level(text)
    }

    #[test]
    fn test_levels_from_numbering() {
        assert_eq!(level("1.2.3.4 Details"), HeadingLevel::H4);
        assert_eq!(level("1.2.3.4.5 Deeper"), HeadingLevel::H4);
        assert_eq!(level("1.2.3 Scope"), HeadingLevel::H3);
        assert_eq!(level("1.2 Overview"), HeadingLevel::H2);
        assert_eq!(level("3. Results"), HeadingLevel::H1);
        assert_eq!(level("4 Methods"), HeadingLevel::H1);
    }

    #[test]
    fn test_levels_from_markers() {
        assert_eq!(level("第3章 方法"), HeadingLevel::H1);
        assert_eq!(level("第二节 背景"), HeadingLevel::H2);
        assert_eq!(level("2장 배경"), HeadingLevel::H1);
        assert_eq!(level("3절 범위"), HeadingLevel::H2);
        assert_eq!(level("अध्याय 2"), HeadingLevel::H1);
        assert_eq!(level("खंड 4"), HeadingLevel::H2);
        assert_eq!(level("Appendix A: Notes"), HeadingLevel::H2);
        assert_eq!(level("Summary:"), HeadingLevel::H3);
        assert_eq!(level("一、总体要求"), HeadingLevel::H2);
        assert_eq!(level("①适用范围"), HeadingLevel::H3);
        assert_eq!(level("Background"), HeadingLevel::H1);
    }

    #[test]
    fn test_long_colon_line_is_h1() {
        assert_eq!(
            level("The following items are covered below:"),
            HeadingLevel::H1
        );
    }

    #[test]
    fn test_numbered_signal() {
        assert_eq!(
            signal("2.1 Budget"),
            Some(HeadingSignal::NumberedSection(Language::Universal))
        );
        assert_eq!(
            signal("Kapitel 3"),
            Some(HeadingSignal::NumberedSection(Language::German))
        );
    }

    #[test]
    fn test_appendix_signal() {
        assert_eq!(
            signal("Appendix B"),
            Some(HeadingSignal::Appendix(Language::English))
        );
    }

    #[test]
    fn test_upper_case_signal() {
        assert_eq!(signal("PROJECT GOALS"), Some(HeadingSignal::UpperCase));
        // instruction words and addresses are excluded
        assert_ne!(signal("PLEASE COMPLETE"), Some(HeadingSignal::UpperCase));
        assert_ne!(signal("123 MAIN STREET"), Some(HeadingSignal::UpperCase));
        // single word is too short
        assert_ne!(signal("GOALS"), Some(HeadingSignal::UpperCase));
    }

    #[test]
    fn test_title_case_signal() {
        assert_eq!(
            signal("Risk And Mitigation Strategy"),
            Some(HeadingSignal::TitleCase)
        );
        assert_eq!(signal("Risk and mitigation strategy"), None);
    }

    #[test]
    fn test_upper_ratio_signal() {
        assert_eq!(signal("NASA SBIR Ph"), Some(HeadingSignal::UpperRatio));
    }

    #[test]
    fn test_colon_signal() {
        assert_eq!(
            signal("Key findings so far:"),
            Some(HeadingSignal::ColonTerminated)
        );
        assert_eq!(signal("Note:"), None);
    }

    #[test]
    fn test_cjk_signals() {
        assert_eq!(signal("一、总体要求"), Some(HeadingSignal::CjkMarker));
        assert_eq!(signal("概要"), Some(HeadingSignal::CjkMarker));
        assert_eq!(signal("本文件规定了项目的范围。"), None);
    }

    #[test]
    fn test_korean_and_devanagari_signals() {
        assert_eq!(signal("가. 사업 개요"), Some(HeadingSignal::KoreanOrdinal));
        assert_eq!(signal("भाग दो परिचय"), Some(HeadingSignal::DevanagariMarker));
        assert_eq!(signal("यह एक सामान्य वाक्य है"), None);
    }

    #[test]
    fn test_prefilters() {
        let classifier = HeadingClassifier::default();
        let dense = LineContext {
            short_lines_nearby: 4,
        };
        assert!(!classifier.is_candidate("2.1 Budget", &dense));

        let long = "1. ".to_string() + &"word ".repeat(20);
        assert_eq!(signal(&long), None);

        let long_cjk = "一、".to_string() + &"字".repeat(60);
        assert_eq!(signal(&long_cjk), None);
    }

    #[test]
    fn test_plain_sentence_is_not_candidate() {
        assert_eq!(
            signal("The schedule depends on approvals from the steering committee."),
            None
        );
    }

    #[test]
    fn test_case_helpers() {
        assert!(is_upper("ABC 123"));
        assert!(!is_upper("123"));
        assert!(!is_upper("ABc"));
        assert!(is_title("Hello World"));
        assert!(is_title("Section 2 Overview"));
        assert!(!is_title("Hello world"));
        assert!(!is_title("HEllo"));
        assert!(!is_title("123"));
    }
}
