//! Full-text options of a database.
//!
//! Options are plain serde structs so they can live next to the rest of a
//! database's settings in JSON. Missing fields take their defaults.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::language::Language;
use crate::analysis::token_filter::stem::{IdentityStemmer, Stemmer, StemmerRegistry};
use crate::error::{FtMarkError, Result};
use crate::full_text_search::highlight::HighlightConfig;

/// Full-text settings: analysis language, stemming and highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullTextConfig {
    /// Language of the indexed text.
    pub language: Language,
    /// Whether words are reduced to their stems before matching.
    pub stemming: bool,
    /// Highlighting and extract options.
    pub highlight: HighlightConfig,
}

impl Default for FullTextConfig {
    fn default() -> Self {
        FullTextConfig {
            language: Language::English,
            stemming: false,
            highlight: HighlightConfig::default(),
        }
    }
}

impl FullTextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn stemming(mut self, stemming: bool) -> Self {
        self.stemming = stemming;
        self
    }

    pub fn highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }

    /// Parse options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FullTextConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content).map_err(|e| {
            FtMarkError::config(format!(
                "Failed to load {}: {e}",
                path.as_ref().display()
            ))
        })
    }

    /// Serialize options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the highlighter cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.highlight.tag.is_empty() {
            return Err(FtMarkError::config("highlight tag must not be empty"));
        }
        if !self.highlight.tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(FtMarkError::config(format!(
                "invalid highlight tag '{}'",
                self.highlight.tag
            )));
        }
        Ok(())
    }

    /// Stemmer for the configured language; the identity stemmer when
    /// stemming is off.
    pub fn stemmer(&self) -> Arc<dyn Stemmer> {
        if self.stemming {
            StemmerRegistry::global().for_language(self.language)
        } else {
            Arc::new(IdentityStemmer::new())
        }
    }
}
