//! Line classification heuristics.
//!
//! Each component judges a single line (or a single page for titles) and
//! keeps no state between calls; per-document state lives in
//! [`crate::builder::OutlineBuilder`].

pub mod catalog;
mod context;
mod heading;
mod noise;
mod options;
mod stats;
mod title;

pub use catalog::{catalog, Catalog, Language};
pub use context::{ContextAnalyzer, LineContext};
pub use heading::{HeadingClassifier, HeadingSignal};
pub use noise::{NoiseFilter, NoiseReason};
pub use options::{Normalization, OutlineConfig};
pub use stats::{normalize_line, DocStats, RepeatedLineSet};
pub use title::TitleExtractor;
