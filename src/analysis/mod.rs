//! Text analysis for full-text matching and highlighting.
//!
//! The lexer splits node text into word and separator spans; filters
//! normalize word tokens (lowercasing, stemming) before they are compared
//! against the full-text index.

pub mod language;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use language::Language;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
