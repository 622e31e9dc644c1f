//! Output rendering and text cleanup.

mod cleanup;
mod json;

pub use cleanup::TextCleaner;
pub use json::{to_json, JsonFormat};
