//! Stemming token filter and stemmer implementations.

use std::sync::Arc;

use super::Filter;
use crate::analysis::language::Language;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;

    /// Languages this stemmer handles.
    fn languages(&self) -> &[Language];

    /// Rank used when several stemmers claim the same language; highest wins.
    fn priority(&self) -> u32;
}

// Stemmer implementations
pub mod identity;
pub mod porter;
pub mod registry;

// Re-export stemmers
pub use identity::IdentityStemmer;
pub use porter::PorterStemmer;
pub use registry::StemmerRegistry;

/// Filter that applies stemming to word tokens.
///
/// Separator tokens pass through untouched.
pub struct StemFilter {
    /// The stemmer to use.
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Porter stemmer.
    pub fn new() -> Self {
        StemFilter {
            stemmer: Arc::new(PorterStemmer::new()),
        }
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }

    /// Create a stem filter using the best stemmer of the default registry.
    pub fn for_language(language: Language) -> Self {
        StemFilter {
            stemmer: StemmerRegistry::global().for_language(language),
        }
    }

    /// Name of the stemmer in use.
    pub fn stemmer_name(&self) -> &'static str {
        self.stemmer.name()
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter<'a>(&self, tokens: TokenStream<'a>) -> Result<TokenStream<'a>> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(tokens.map(move |token| {
            if token.is_word() {
                let stemmed = stemmer.stem(&token.text);
                token.with_text(stemmed)
            } else {
                token
            }
        })))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
