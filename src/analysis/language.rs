//! Language tags used to select language-specific stemmers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FtMarkError;

/// Languages known to the full-text layer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    German,
    French,
    Dutch,
    Italian,
    Spanish,
    Portuguese,
    Norwegian,
    Swedish,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Dutch,
        Language::Italian,
        Language::Spanish,
        Language::Portuguese,
        Language::Norwegian,
        Language::Swedish,
    ];

    /// Parse a language tag such as `en`, `EN` or `en-US`.
    ///
    /// Only the primary subtag is considered.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == primary)
    }

    /// Two-letter ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::French => "fr",
            Language::Dutch => "nl",
            Language::Italian => "it",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::Norwegian => "no",
            Language::Swedish => "sv",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = FtMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_tag(s).ok_or_else(|| FtMarkError::config(format!("unknown language '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag("en"), Some(Language::English));
        assert_eq!(Language::from_tag("EN"), Some(Language::English));
        assert_eq!(Language::from_tag("en-US"), Some(Language::English));
        assert_eq!(Language::from_tag("de_CH"), Some(Language::German));
        assert_eq!(Language::from_tag("xx"), None);
        assert_eq!(Language::from_tag(""), None);
    }

    #[test]
    fn test_from_str_error() {
        assert!("sv".parse::<Language>().is_ok());
        let err = "klingon".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_display_roundtrips_code() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(&lang.to_string()), Some(lang));
        }
    }
}
