//! Token types produced by the full-text lexer.
//!
//! A node's text is split into alternating word and separator spans. Word
//! spans carry a 0-based ordinal `position` which is the key used by
//! [`crate::full_text::PositionRecord`]. Separator spans keep the position of
//! the next word and never match, so concatenating all spans of a stream
//! reproduces the original text.
//!
//! ```
//! use ftmark::analysis::token::{Token, TokenKind};
//!
//! let token = Token::word("hello", 0, 0, 5);
//! assert!(token.is_word());
//! assert_eq!(token.kind, TokenKind::Word);
//! ```

use serde::{Deserialize, Serialize};

/// Classification of a lexer span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Letters and digits; advances the word position.
    Word,
    /// Whitespace and punctuation between words.
    Separator,
}

/// A single span of text produced by a [`crate::analysis::Tokenizer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the span
    pub text: String,

    /// Word position within the node's token stream (0-based)
    pub position: usize,

    /// The byte offset where this span starts in the original text
    pub start_offset: usize,

    /// The byte offset where this span ends in the original text
    pub end_offset: usize,

    /// Word or separator
    pub kind: TokenKind,
}

impl Token {
    /// Create a word token.
    pub fn word<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            kind: TokenKind::Word,
        }
    }

    /// Create a separator token.
    pub fn separator<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            kind: TokenKind::Separator,
        }
    }

    /// Whether this token is a word.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// Length of the token text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }
}

/// A lazy stream of tokens.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;
