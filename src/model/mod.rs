//! Data model shared by providers, the outline builder and renderers.
//!
//! Input documents are plain page/line text; outputs are outlines of
//! leveled headings and, for downstream consumers, heading sections.

mod document;
mod outline;
mod section;

pub use document::{Document, Page};
pub use outline::{HeadingEntry, HeadingLevel, Outline};
pub use section::Section;
