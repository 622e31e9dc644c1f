//! Per-document outline orchestration.

use std::collections::HashSet;

use crate::analysis::{
    ContextAnalyzer, DocStats, HeadingClassifier, NoiseFilter, OutlineConfig, RepeatedLineSet,
    TitleExtractor,
};
use crate::detect::detect_script;
use crate::model::{Document, HeadingEntry, Outline, Section};
use crate::render::TextCleaner;
use crate::sections::split_sections;

/// Processing phase of a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Page text received
    Init,
    /// Repeated lines and statistics computed
    StatsComputed,
    /// Title selected
    TitleExtracted,
    /// Too few distinct lines; no headings will be emitted
    Degenerate,
    /// Classifying lines
    Scanning,
    /// Outline complete
    Done,
}

/// Builds an [`Outline`] from a [`Document`].
///
/// All per-document state (repeated lines, statistics, seen headings) is
/// created inside [`build`](Self::build) and dropped when it returns, so a
/// single builder can be shared by parallel workers.
///
/// # Example
///
/// ```
/// use unoutline::{Document, OutlineBuilder};
///
/// let doc = Document::from_pages(
///     "plan.txt",
///     vec![
///         vec!["Project Plan", "Confidential Draft"],
///         vec!["2.1 Budget", "2.2 Timeline", "Confidential Draft"],
///         vec!["Confidential Draft"],
///     ],
/// );
/// let outline = OutlineBuilder::default().build(&doc);
/// assert_eq!(outline.title, "Project Plan");
/// assert_eq!(outline.entries.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    config: OutlineConfig,
}

/// Intermediate state shared by the phases of one build.
struct DocumentState {
    repeated: RepeatedLineSet,
    stats: DocStats,
}

impl OutlineBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Build the outline of a document.
    pub fn build(&self, doc: &Document) -> Outline {
        match self.prepare(doc) {
            Some(state) => self.build_from(doc, &state),
            None => Outline::default(),
        }
    }

    /// Build the outline and split the document into heading sections.
    pub fn build_with_sections(&self, doc: &Document) -> (Outline, Vec<Section>) {
        match self.prepare(doc) {
            Some(state) => {
                let outline = self.build_from(doc, &state);
                let sections = split_sections(doc, &outline, &state.repeated);
                (outline, sections)
            }
            None => (Outline::default(), Vec::new()),
        }
    }

    fn enter(&self, doc: &Document, phase: Phase) {
        log::trace!("{}: {:?}", doc.id, phase);
    }

    fn cleaner(&self) -> TextCleaner {
        TextCleaner::new(self.config.normalization)
    }

    /// Compute document-wide state, or `None` for a document without lines.
    fn prepare(&self, doc: &Document) -> Option<DocumentState> {
        self.enter(doc, Phase::Init);
        if doc.is_empty() {
            log::debug!("{}: no lines, empty outline", doc.id);
            return None;
        }

        let threshold = self.config.repeated_threshold(doc.page_count());
        let repeated = RepeatedLineSet::build(doc, threshold);
        let stats = DocStats::compute(doc, self.config.script_sample_lines);
        self.enter(doc, Phase::StatsComputed);
        log::debug!(
            "{}: {} lines, {} distinct, {} repeated (threshold {} pages), script {}",
            doc.id,
            stats.total_lines,
            stats.distinct_lines,
            repeated.len(),
            threshold,
            stats.primary_script
        );

        Some(DocumentState { repeated, stats })
    }

    fn build_from(&self, doc: &Document, state: &DocumentState) -> Outline {
        let first_page: &[String] = doc.pages.first().map(|p| &p.lines[..]).unwrap_or(&[]);
        let title = TitleExtractor::new(
            self.config.title_scan_lines,
            self.config.dense_context_threshold,
            self.cleaner(),
        )
        .extract(first_page, &state.repeated);
        self.enter(doc, Phase::TitleExtracted);

        if self.is_degenerate(&state.stats) {
            self.enter(doc, Phase::Degenerate);
            log::debug!(
                "{}: degenerate document (unique ratio {:.2}), skipping headings",
                doc.id,
                state.stats.unique_ratio()
            );
            return Outline::with_title(title, state.stats.primary_script);
        }

        self.enter(doc, Phase::Scanning);
        let entries = self.scan(doc, &title, &state.repeated);
        self.enter(doc, Phase::Done);
        log::debug!("{}: {} headings, title {:?}", doc.id, entries.len(), title);

        Outline {
            title,
            entries,
            document_script: state.stats.primary_script,
        }
    }

    fn is_degenerate(&self, stats: &DocStats) -> bool {
        stats.unique_ratio() < self.config.degenerate_unique_ratio
            && stats.total_lines < self.config.degenerate_max_lines
    }

    fn scan(&self, doc: &Document, title: &str, repeated: &RepeatedLineSet) -> Vec<HeadingEntry> {
        let config = &self.config;
        let context = ContextAnalyzer::new(config.context_radius, config.short_line_max_words);
        let noise = NoiseFilter::new(repeated, config.dense_context_threshold);
        let classifier = HeadingClassifier::new(config.dense_context_threshold);
        let cleaner = self.cleaner();

        let title_key = title.to_lowercase();
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for (page_index, page) in doc.pages.iter().enumerate() {
            for (line_index, line) in page.lines.iter().enumerate() {
                let line_context = context.analyze(&page.lines, line_index);

                if noise.is_noise(line, &line_context) {
                    continue;
                }
                if !classifier.is_candidate(line, &line_context) {
                    continue;
                }

                let text = cleaner.clean(line);
                if text.is_empty() {
                    continue;
                }

                let key = text.to_lowercase();
                if key == title_key || seen.contains(&key) {
                    continue;
                }

                let level = classifier.level(&text);
                let script = detect_script(&text);
                entries.push(HeadingEntry::new(level, text, page_index, line_index, script));
                seen.insert(key);
            }
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ScriptType;
    use crate::model::HeadingLevel;

    #[test]
    fn test_empty_document() {
        let outline = OutlineBuilder::default().build(&Document::new("empty"));
        assert_eq!(outline.title, "");
        assert!(outline.is_empty());
        assert_eq!(outline.document_script, ScriptType::Latin);
    }

    #[test]
    fn test_degenerate_document_keeps_title() {
        let distinct = [
            "Leave Application Summary",
            "PROJECT GOALS",
            "2.1 Budget",
            "Employee",
            "Manager",
            "Department",
            "Start date",
            "End date",
            "Reason",
            "Approval",
        ];
        let mut lines = Vec::new();
        for _ in 0..4 {
            lines.extend(distinct.iter().copied());
        }
        assert_eq!(lines.len(), 40);

        let doc = Document::from_pages("form", vec![lines]);
        let outline = OutlineBuilder::default().build(&doc);
        assert_eq!(outline.title, "Leave Application Summary");
        assert!(outline.entries.is_empty());
    }

    #[test]
    fn test_degenerate_threshold_is_configurable() {
        let lines: Vec<&str> = vec!["Overview Of The Plan", "1. Scope of Work"]
            .into_iter()
            .cycle()
            .take(8)
            .collect();
        let doc = Document::from_pages("doc", vec![lines]);

        let strict = OutlineBuilder::new(OutlineConfig::new().with_degenerate_threshold(0.3, 50));
        assert!(strict.build(&doc).is_empty());

        let relaxed = OutlineBuilder::new(OutlineConfig::new().with_degenerate_threshold(0.0, 50));
        let outline = relaxed.build(&doc);
        assert_eq!(outline.entries.len(), 1);
        assert_eq!(outline.entries[0].text, "1. Scope of Work");
    }

    #[test]
    fn test_duplicates_and_title_are_skipped() {
        let doc = Document::from_pages(
            "dups",
            vec![
                vec![
                    "Security Review Findings",
                    "The review covered all production services in scope this year.",
                ],
                vec![
                    "1. Introduction",
                    "Findings are grouped by severity and by the affected component.",
                    "SECURITY REVIEW FINDINGS",
                ],
                vec![
                    "1. INTRODUCTION",
                    "Each finding lists an owner and a remediation deadline for tracking.",
                ],
            ],
        );

        let outline = OutlineBuilder::default().build(&doc);
        assert_eq!(outline.title, "Security Review Findings");
        let texts: Vec<&str> = outline.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["1. Introduction"]);
        assert_eq!(outline.entries[0].level, HeadingLevel::H1);
        assert_eq!(outline.entries[0].page, 1);
        assert_eq!(outline.entries[0].line, 0);
    }

    #[test]
    fn test_dense_form_block_is_ignored() {
        let doc = Document::from_pages(
            "form",
            vec![vec![
                "Registration Details Overview",
                "Name",
                "Street",
                "City",
                "1. Contact",
                "Zip",
                "Phone",
                "Email",
                "The registration must be submitted before the end of the month.",
                "Participants receive a confirmation message once it is processed.",
            ]],
        );
        let outline = OutlineBuilder::default().build(&doc);
        assert!(outline.entries.iter().all(|e| e.text != "1. Contact"));
    }
}
