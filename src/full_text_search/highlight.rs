//! Highlighted extracts of full-text matches.
//!
//! [`SnippetBuilder`] re-tokenizes a matched node's text and splits it into
//! alternating plain and highlighted runs using the positions recorded during
//! evaluation. With a length budget, plain runs are shortened and marked with
//! an ellipsis until the text fits; highlighted runs are never touched.
//!
//! ```
//! use ftmark::full_text::{MatchPositionStore, MemoryNodeStore, NodeStore, SourceId};
//! use ftmark::full_text_search::highlight::{HighlightConfig, SnippetBuilder};
//!
//! let mut nodes = MemoryNodeStore::new(SourceId(0));
//! let doc = nodes.add_document();
//! let para = nodes.add_element(doc);
//! nodes.add_text(para, "Databases index text for search.");
//!
//! let mut positions = MatchPositionStore::new();
//! positions.insert(nodes.node_ref(para), [1]);
//!
//! let builder = SnippetBuilder::new(&positions);
//! let snippet = builder.mark(&nodes, para).unwrap().unwrap();
//! assert_eq!(
//!     snippet.render(&HighlightConfig::default()),
//!     "Databases <mark>index</mark> text for search."
//! );
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{FullTextLexer, Tokenizer};
use crate::error::Result;
use crate::full_text::node::{NodeId, NodeStore};
use crate::full_text::positions::{MatchPositionStore, PositionRecord};

/// Configuration for text highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Tag wrapped around highlighted runs (e.g., "mark", "em", "strong").
    pub tag: String,
    /// CSS class to add to highlight tags.
    pub css_class: Option<String>,
    /// Marker inserted where text was cut.
    pub ellipsis: String,
    /// Length budget of extracts in characters.
    pub extract_length: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            tag: "mark".to_string(),
            css_class: None,
            ellipsis: "...".to_string(),
            extract_length: 150,
        }
    }
}

impl HighlightConfig {
    /// Create a new highlight configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag for highlighting.
    pub fn tag(mut self, tag: String) -> Self {
        self.tag = tag;
        self
    }

    /// Set the CSS class for highlight tags.
    pub fn css_class(mut self, css_class: String) -> Self {
        self.css_class = Some(css_class);
        self
    }

    /// Set the truncation marker.
    pub fn ellipsis(mut self, ellipsis: String) -> Self {
        self.ellipsis = ellipsis;
        self
    }

    /// Set the extract length.
    pub fn extract_length(mut self, extract_length: usize) -> Self {
        self.extract_length = extract_length;
        self
    }

    /// Build the opening tag.
    pub fn opening_tag(&self) -> String {
        if let Some(ref css_class) = self.css_class {
            format!("<{} class=\"{}\">", self.tag, css_class)
        } else {
            format!("<{}>", self.tag)
        }
    }

    /// Build the closing tag.
    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// One run of an extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Text outside any match.
    Plain(String),
    /// Matched text; never shortened.
    Highlight(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Highlight(text) => text,
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight(_))
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text().chars().count()
    }
}

/// Ordered runs of a node's text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snippet {
    segments: Vec<Segment>,
}

impl Snippet {
    pub fn new(segments: Vec<Segment>) -> Self {
        Snippet { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Concatenated text without markup.
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }

    /// Total length in characters, including inserted ellipses.
    pub fn char_len(&self) -> usize {
        self.segments.iter().map(Segment::char_len).sum()
    }

    /// Highlighted runs in order.
    pub fn highlights(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.is_highlight())
            .map(Segment::text)
    }

    /// Text with highlighted runs wrapped in the configured tag.
    pub fn render(&self, config: &HighlightConfig) -> String {
        let mut result = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain(text) => result.push_str(text),
                Segment::Highlight(text) => {
                    result.push_str(&config.opening_tag());
                    result.push_str(text);
                    result.push_str(&config.closing_tag());
                }
            }
        }
        result
    }
}

/// Builds snippets from recorded match positions.
#[derive(Debug)]
pub struct SnippetBuilder<'a> {
    positions: &'a MatchPositionStore,
    lexer: FullTextLexer,
    ellipsis: String,
    extract_length: usize,
}

impl<'a> SnippetBuilder<'a> {
    /// Create a builder with the default configuration.
    pub fn new(positions: &'a MatchPositionStore) -> Self {
        Self::with_config(positions, &HighlightConfig::default())
    }

    /// Create a builder using the ellipsis and extract length of `config`.
    pub fn with_config(positions: &'a MatchPositionStore, config: &HighlightConfig) -> Self {
        SnippetBuilder {
            positions,
            lexer: FullTextLexer::new(),
            ellipsis: config.ellipsis.clone(),
            extract_length: config.extract_length,
        }
    }

    /// Split the node's text into runs, shortened towards `target_length`.
    ///
    /// Returns `None` if nothing was recorded for the node.
    pub fn build(
        &self,
        store: &dyn NodeStore,
        node: NodeId,
        target_length: usize,
    ) -> Result<Option<Snippet>> {
        self.build_with_budget(store, node, Some(target_length))
    }

    /// Complete text of the node with all matches highlighted.
    pub fn mark(&self, store: &dyn NodeStore, node: NodeId) -> Result<Option<Snippet>> {
        self.build_with_budget(store, node, None)
    }

    /// Like [`build`](Self::build) with the configured extract length.
    pub fn extract(&self, store: &dyn NodeStore, node: NodeId) -> Result<Option<Snippet>> {
        self.build_with_budget(store, node, Some(self.extract_length))
    }

    fn build_with_budget(
        &self,
        store: &dyn NodeStore,
        node: NodeId,
        budget: Option<usize>,
    ) -> Result<Option<Snippet>> {
        let node_ref = store.node_ref(node);
        let Some(record) = self.positions.get(&node_ref) else {
            return Ok(None);
        };
        let Some(text) = store.text(node) else {
            return Ok(None);
        };

        let (segments, excess, stopped) = self.split(&text, record, budget)?;
        if excess > 0 || stopped {
            debug!("shortening extract of {node_ref} by {excess} chars");
            Ok(Some(Snippet::new(self.shorten(segments, excess, stopped))))
        } else {
            Ok(Some(Snippet::new(segments)))
        }
    }

    /// Walk the tokens, switching between plain and highlighted runs.
    ///
    /// Returns the runs, the number of characters over budget and whether
    /// text was left unread. The walk stops early once a plain run that
    /// follows earlier runs has used up the budget at the start of another
    /// match.
    fn split(
        &self,
        text: &str,
        record: &PositionRecord,
        budget: Option<usize>,
    ) -> Result<(Vec<Segment>, i64, bool)> {
        let mut excess = match budget {
            Some(budget) => -i64::try_from(budget).unwrap_or(i64::MAX),
            None => i64::MIN,
        };
        let mut segments = Vec::new();
        let mut run = String::new();
        let mut inside = false;

        for token in self.lexer.tokenize(text)? {
            let hit = token.is_word() && record.contains(token.position);
            if hit != inside {
                if !run.is_empty() {
                    excess = excess.saturating_add(char_count(&run));
                    let text = std::mem::take(&mut run);
                    segments.push(if inside {
                        Segment::Highlight(text)
                    } else {
                        Segment::Plain(text)
                    });
                    if excess >= 0 && segments.len() > 1 && !inside {
                        trace!("extract budget reached after {} runs", segments.len());
                        return Ok((segments, excess, true));
                    }
                }
                inside = hit;
            }
            run.push_str(&token.text);
        }

        if !run.is_empty() {
            excess = excess.saturating_add(char_count(&run));
            segments.push(if inside {
                Segment::Highlight(run)
            } else {
                Segment::Plain(run)
            });
        }
        Ok((segments, excess, false))
    }

    /// Cut `excess` characters from the plain runs.
    ///
    /// The leading and trailing runs give up text in proportion to their
    /// lengths; whatever remains is taken from the middle of inner runs,
    /// last one first. After an early stop the trailing run always ends
    /// with the ellipsis.
    fn shorten(&self, mut segments: Vec<Segment>, mut excess: i64, stopped: bool) -> Vec<Segment> {
        let count = segments.len();
        let ellipsis = self.ellipsis.as_str();
        let plain_len = |segment: &Segment| match segment {
            Segment::Plain(text) => text.chars().count(),
            Segment::Highlight(_) => 0,
        };

        let first_len = segments.first().map_or(0, plain_len);
        let last_len = if count > 1 { plain_len(&segments[count - 1]) } else { 0 };

        if first_len > 0 {
            let share = first_len as f64 / (first_len + last_len) as f64 * excess as f64;
            let cut = first_len.min(share as usize);
            if cut > 0 {
                if let Segment::Plain(text) = &mut segments[0] {
                    *text = format!("{ellipsis}{}", char_slice(text, cut, first_len));
                }
                excess -= cut as i64;
            }
        }

        if last_len > 0 && (excess > 0 || stopped) {
            let cut = last_len.min(excess.max(0) as usize);
            if let Segment::Plain(text) = &mut segments[count - 1] {
                *text = format!("{}{ellipsis}", char_slice(text, 0, last_len - cut));
            }
            excess -= cut as i64;
        }

        let min_len = ellipsis.chars().count();
        for segment in segments[..count.saturating_sub(1)].iter_mut().skip(1).rev() {
            if excess <= 0 {
                break;
            }
            let Segment::Plain(text) = segment else {
                continue;
            };
            let len = text.chars().count();
            if len <= min_len {
                continue;
            }
            let cut = len.min(excess as usize);
            *text = format!(
                "{}{ellipsis}{}",
                char_slice(text, 0, (len - cut) / 2),
                char_slice(text, (len + cut) / 2, len)
            );
            excess -= cut as i64;
        }

        segments
    }
}

fn char_count(text: &str) -> i64 {
    i64::try_from(text.chars().count()).unwrap_or(i64::MAX)
}

/// Substring between two character indices.
fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte = |n: usize| text.char_indices().nth(n).map_or(text.len(), |(i, _)| i);
    &text[byte(start)..byte(end)]
}
