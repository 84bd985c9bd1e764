//! Full-text lexer keeping separators.
//!
//! Splits text on Unicode word boundaries (UAX #29) like a regular word
//! tokenizer, but also emits the whitespace and punctuation in between as
//! [`TokenKind::Separator`] spans. Highlighting needs the complete text back,
//! so nothing is dropped.
//!
//! # Examples
//!
//! ```
//! use ftmark::analysis::tokenizer::{FullTextLexer, Tokenizer};
//!
//! let lexer = FullTextLexer::new();
//! let tokens: Vec<_> = lexer.tokenize("Hello, world!").unwrap().collect();
//!
//! let words: Vec<_> = tokens.iter().filter(|t| t.is_word()).collect();
//! assert_eq!(words[0].text, "Hello");
//! assert_eq!(words[1].position, 1);
//!
//! let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(rebuilt, "Hello, world!");
//! ```
//!
//! [`TokenKind::Separator`]: crate::analysis::token::TokenKind::Separator

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Lexer producing word and separator spans with word positions.
#[derive(Clone, Debug, Default)]
pub struct FullTextLexer;

impl FullTextLexer {
    /// Create a new full-text lexer.
    pub fn new() -> Self {
        FullTextLexer
    }

    /// Whether a segment counts as a word.
    fn is_word(segment: &str) -> bool {
        segment.chars().any(|c| c.is_alphanumeric())
    }
}

impl Tokenizer for FullTextLexer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<TokenStream<'a>> {
        let mut next_position = 0;
        let tokens = text
            .split_word_bound_indices()
            .map(move |(start_offset, segment)| {
                let end_offset = start_offset + segment.len();
                if Self::is_word(segment) {
                    let token = Token::word(segment, next_position, start_offset, end_offset);
                    next_position += 1;
                    token
                } else {
                    Token::separator(segment, next_position, start_offset, end_offset)
                }
            });

        Ok(Box::new(tokens))
    }

    fn name(&self) -> &'static str {
        "full_text"
    }
}
