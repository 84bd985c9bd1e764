//! Identity stemmer implementation.

use crate::analysis::language::Language;
use crate::analysis::token_filter::stem::Stemmer;

/// Identity stemmer that returns words unchanged.
///
/// Claims every language at the lowest priority, so a registry lookup always
/// resolves to some stemmer.
#[derive(Debug, Clone, Default)]
pub struct IdentityStemmer;

impl IdentityStemmer {
    pub fn new() -> Self {
        IdentityStemmer
    }
}

impl Stemmer for IdentityStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }

    fn languages(&self) -> &[Language] {
        &Language::ALL
    }

    fn priority(&self) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_stemmer() {
        let stemmer = IdentityStemmer::new();

        assert_eq!(stemmer.stem("running"), "running");
        assert_eq!(stemmer.stem("flies"), "flies");
        assert_eq!(stemmer.stem("test"), "test");
    }

    #[test]
    fn test_claims_all_languages() {
        let stemmer = IdentityStemmer::new();
        assert_eq!(stemmer.languages().len(), Language::ALL.len());
        assert_eq!(stemmer.priority(), 0);
    }
}
