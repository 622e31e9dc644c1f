//! Splitting a document into heading sections.

use crate::analysis::RepeatedLineSet;
use crate::model::{Document, Outline, Section};

/// Split a document into one [`Section`] per outline entry.
///
/// A section's text is every line after its heading up to the next heading,
/// crossing page boundaries, with repeated header/footer lines left out.
/// Entries whose position lies outside the document are skipped.
pub fn split_sections(doc: &Document, outline: &Outline, repeated: &RepeatedLineSet) -> Vec<Section> {
    // Global line offset of the first line of each page
    let mut offsets = Vec::with_capacity(doc.page_count());
    let mut total = 0;
    for page in &doc.pages {
        offsets.push(total);
        total += page.len();
    }
    let flat: Vec<&str> = doc.lines().collect();

    let positions: Vec<Option<usize>> = outline
        .entries
        .iter()
        .map(|entry| {
            let page = doc.get_page(entry.page)?;
            (entry.line < page.len()).then(|| offsets[entry.page] + entry.line)
        })
        .collect();

    let mut sections = Vec::with_capacity(outline.entries.len());
    for (i, entry) in outline.entries.iter().enumerate() {
        let Some(start) = positions[i] else {
            log::warn!(
                "{}: heading {:?} outside document (page {}, line {})",
                doc.id,
                entry.text,
                entry.page,
                entry.line
            );
            continue;
        };
        let end = positions[i + 1..]
            .iter()
            .flatten()
            .copied()
            .find(|&p| p > start)
            .unwrap_or(flat.len());

        let text = flat[start + 1..end]
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !repeated.contains(line))
            .collect::<Vec<_>>()
            .join(" ");

        sections.push(Section {
            document: doc.id.clone(),
            section_title: entry.text.clone(),
            text,
            page_number: entry.page,
        });
    }

    sections
}
