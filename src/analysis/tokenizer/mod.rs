//! Tokenizers that split a node's text into spans.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// Streams are lazy and borrow the input text; tokenizing the same text
/// again restarts the stream from the first span.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize<'a>(&self, text: &'a str) -> Result<TokenStream<'a>>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod full_text;

pub use full_text::FullTextLexer;
