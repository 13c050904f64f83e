//! Section model — heading-delimited spans of the source document.
//!
//! - [`parser`] — splits text into an ordered partition of [`Section`]s.
//! - [`priority`] — scores a section's importance from its heading.

pub mod parser;
pub mod priority;

pub use parser::{parse_sections, Section};
pub use priority::score_priority;
