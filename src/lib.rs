//! # ftmark
//!
//! Full-text matching support for an XML database engine.
//!
//! ## Features
//!
//! - Porter stemming with a per-language stemmer registry
//! - Relevance scoring in `[0, 1]` for words, boolean operators and steps
//! - Index access adapter that finalizes candidates and records match positions
//! - Highlighted, length-limited extracts of matched text

pub mod analysis;
pub mod config;
pub mod error;
pub mod full_text;
pub mod full_text_search;
pub mod scoring;

pub mod prelude {
    pub use crate::analysis::{
        FullTextLexer, Language, LowercaseFilter, PorterStemmer, StemFilter, Stemmer,
        StemmerRegistry, Token, Tokenizer,
    };
    pub use crate::config::FullTextConfig;
    pub use crate::error::{FtMarkError, Result};
    pub use crate::full_text::{
        EvalContext, FullTextExpr, FullTextIndexAccess, MatchCandidate, MatchPositionStore,
        MatchSpan, MemoryNodeStore, NodeId, NodeRef, NodeStore, SourceId,
    };
    pub use crate::full_text_search::{HighlightConfig, Snippet, SnippetBuilder};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
