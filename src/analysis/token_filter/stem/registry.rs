//! Registry selecting the best stemmer per language.
//!
//! Several stemmers may claim the same language; a lookup returns the one
//! with the highest [`Stemmer::priority`]. The default registry knows the
//! Porter stemmer for English and the identity stemmer as a catch-all.
//!
//! ```
//! use ftmark::analysis::language::Language;
//! use ftmark::analysis::token_filter::stem::StemmerRegistry;
//!
//! let stemmer = StemmerRegistry::global().for_language(Language::English);
//! assert_eq!(stemmer.name(), "porter");
//! assert_eq!(stemmer.stem("ponies"), "poni");
//! ```

use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;

use crate::analysis::language::Language;
use crate::analysis::token_filter::stem::{IdentityStemmer, PorterStemmer, Stemmer};

lazy_static! {
    static ref DEFAULT_REGISTRY: StemmerRegistry = StemmerRegistry::default();
}

/// Collection of stemmers ranked by priority.
pub struct StemmerRegistry {
    stemmers: Vec<Arc<dyn Stemmer>>,
}

impl std::fmt::Debug for StemmerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stemmers.iter().map(|s| (s.name(), s.priority())))
            .finish()
    }
}

impl StemmerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        StemmerRegistry {
            stemmers: Vec::new(),
        }
    }

    /// The process-wide default registry.
    pub fn global() -> &'static StemmerRegistry {
        &DEFAULT_REGISTRY
    }

    /// Register a stemmer.
    pub fn register(&mut self, stemmer: Arc<dyn Stemmer>) {
        self.stemmers.push(stemmer);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.register(stemmer);
        self
    }

    /// Highest-priority stemmer claiming `language`, if any.
    ///
    /// Ties go to the stemmer registered first.
    pub fn find(&self, language: Language) -> Option<Arc<dyn Stemmer>> {
        let mut best: Option<&Arc<dyn Stemmer>> = None;
        for stemmer in &self.stemmers {
            if !stemmer.languages().contains(&language) {
                continue;
            }
            if best.is_none_or(|b| stemmer.priority() > b.priority()) {
                best = Some(stemmer);
            }
        }
        if let Some(stemmer) = best {
            debug!(
                "selected stemmer '{}' (priority {}) for language '{}'",
                stemmer.name(),
                stemmer.priority(),
                language
            );
        }
        best.cloned()
    }

    /// Like [`find`](Self::find), falling back to the identity stemmer.
    pub fn for_language(&self, language: Language) -> Arc<dyn Stemmer> {
        self.find(language)
            .unwrap_or_else(|| Arc::new(IdentityStemmer::new()))
    }

    /// Languages for which some stemmer is registered.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self
            .stemmers
            .iter()
            .flat_map(|s| s.languages().iter().copied())
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }
}

impl Default for StemmerRegistry {
    fn default() -> Self {
        StemmerRegistry::new()
            .with(Arc::new(PorterStemmer::new()))
            .with(Arc::new(IdentityStemmer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ShoutingStemmer;

    impl Stemmer for ShoutingStemmer {
        fn stem(&self, word: &str) -> String {
            word.to_uppercase()
        }

        fn name(&self) -> &'static str {
            "shouting"
        }

        fn languages(&self) -> &[Language] {
            &[Language::English, Language::Dutch]
        }

        fn priority(&self) -> u32 {
            2000
        }
    }

    #[test]
    fn test_default_registry() {
        let registry = StemmerRegistry::default();

        assert_eq!(registry.for_language(Language::English).name(), "porter");
        assert_eq!(registry.for_language(Language::French).name(), "identity");
        assert_eq!(registry.languages().len(), Language::ALL.len());
    }

    #[test]
    fn test_highest_priority_wins() {
        let registry = StemmerRegistry::default().with(Arc::new(ShoutingStemmer));

        let stemmer = registry.for_language(Language::English);
        assert_eq!(stemmer.name(), "shouting");
        assert_eq!(stemmer.stem("ponies"), "PONIES");
        assert_eq!(registry.for_language(Language::Dutch).name(), "shouting");
        assert_eq!(registry.for_language(Language::German).name(), "identity");
    }

    #[test]
    fn test_empty_registry() {
        let registry = StemmerRegistry::new();

        assert!(registry.find(Language::English).is_none());
        assert_eq!(registry.for_language(Language::English).name(), "identity");
        assert!(registry.languages().is_empty());
    }

    #[test]
    fn test_global_registry() {
        let stemmer = StemmerRegistry::global().for_language(Language::English);
        assert_eq!(stemmer.stem("caresses"), "caress");
    }
}
