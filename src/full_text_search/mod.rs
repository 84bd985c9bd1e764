//! Presentation of full-text results.

pub mod highlight;

pub use highlight::{HighlightConfig, Segment, Snippet, SnippetBuilder};
