//! Nodes matched by a full-text expression.

use serde::{Deserialize, Serialize};

use crate::full_text::node::NodeRef;
use crate::scoring;

/// A run of matched word positions, `start..=end`.
///
/// Spans produced by negated selections (`not in`, `ftnot`) are flagged as
/// excluded: they take part in the match but are never highlighted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub excluded: bool,
}

impl MatchSpan {
    /// A regular span. Bounds given in reverse order are swapped.
    pub fn new(start: usize, end: usize) -> Self {
        MatchSpan {
            start: start.min(end),
            end: start.max(end),
            excluded: false,
        }
    }

    /// An excluded span.
    pub fn excluded(start: usize, end: usize) -> Self {
        MatchSpan {
            excluded: true,
            ..MatchSpan::new(start, end)
        }
    }

    /// Number of word positions covered; 0 for an inverted span.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    /// Whether the span covers no position, which only happens when
    /// `start > end`.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Lifecycle of a candidate's match data.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchState {
    /// Fresh from the evaluator: all underlying spans are still attached.
    Pending {
        matches: Vec<MatchSpan>,
        /// Score assigned by the index, if it supplied one.
        score: Option<f64>,
        /// Number of words in the node's text, for the fallback score.
        token_count: usize,
    },
    /// Spans have been handed off; only the final score remains.
    Finalized { score: f64 },
}

/// One node matched by a full-text expression.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchCandidate {
    pub node: NodeRef,
    state: MatchState,
}

impl MatchCandidate {
    /// A candidate without an index score.
    pub fn new(node: NodeRef, matches: Vec<MatchSpan>, token_count: usize) -> Self {
        MatchCandidate {
            node,
            state: MatchState::Pending {
                matches,
                score: None,
                token_count,
            },
        }
    }

    /// Attach the score computed by the index.
    pub fn with_score(mut self, value: f64) -> Self {
        if let MatchState::Pending { score, .. } = &mut self.state {
            *score = Some(value);
        }
        self
    }

    /// Current state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Spans still attached to a pending candidate; empty once finalized.
    pub fn matches(&self) -> &[MatchSpan] {
        match &self.state {
            MatchState::Pending { matches, .. } => matches.as_slice(),
            MatchState::Finalized { .. } => &[],
        }
    }

    /// Final score, available once finalized.
    pub fn score(&self) -> Option<f64> {
        match self.state {
            MatchState::Finalized { score } => Some(score),
            MatchState::Pending { .. } => None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self.state, MatchState::Finalized { .. })
    }

    /// Fix the score and move the spans out of the candidate.
    ///
    /// Without an index score every non-excluded span contributes a word
    /// score relative to the node's word count, combined with
    /// [`scoring::and`]. Finalizing twice returns no spans and keeps the
    /// score.
    pub fn finalize(&mut self) -> Vec<MatchSpan> {
        let state = std::mem::replace(&mut self.state, MatchState::Finalized { score: 0.0 });
        match state {
            MatchState::Pending {
                matches,
                score,
                token_count,
            } => {
                let score = score
                    .unwrap_or_else(|| fallback_score(&matches, token_count))
                    .clamp(0.0, 1.0);
                self.state = MatchState::Finalized { score };
                matches
            }
            finalized @ MatchState::Finalized { .. } => {
                self.state = finalized;
                Vec::new()
            }
        }
    }
}

fn fallback_score(matches: &[MatchSpan], token_count: usize) -> f64 {
    let total = token_count.max(1) as f64;
    scoring::combine_all(
        matches
            .iter()
            .filter(|span| !span.excluded && !span.is_empty())
            .map(|span| scoring::word(span.len(), total)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::full_text::node::{NodeId, SourceId};

    fn node() -> NodeRef {
        NodeRef::new(SourceId(0), NodeId(12))
    }

    #[test]
    fn test_finalize_moves_spans_out() {
        let spans = vec![MatchSpan::new(0, 1), MatchSpan::new(4, 4)];
        let mut candidate = MatchCandidate::new(node(), spans.clone(), 10);

        assert!(!candidate.is_finalized());
        assert_eq!(candidate.matches(), spans.as_slice());
        assert_eq!(candidate.score(), None);

        let taken = candidate.finalize();
        assert_eq!(taken, spans);
        assert!(candidate.is_finalized());
        assert!(candidate.matches().is_empty());

        let expected = scoring::and(scoring::word(2, 10.0), scoring::word(1, 10.0));
        assert!((candidate.score().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_index_score_wins() {
        let mut candidate = MatchCandidate::new(node(), vec![MatchSpan::new(0, 0)], 3).with_score(0.42);
        candidate.finalize();
        assert_eq!(candidate.score(), Some(0.42));
    }

    #[test]
    fn test_finalize_twice() {
        let mut candidate = MatchCandidate::new(node(), vec![MatchSpan::new(2, 2)], 4);
        let score = {
            candidate.finalize();
            candidate.score()
        };

        assert!(candidate.finalize().is_empty());
        assert_eq!(candidate.score(), score);
    }

    #[test]
    fn test_excluded_spans_do_not_score() {
        let mut candidate = MatchCandidate::new(node(), vec![MatchSpan::excluded(0, 3)], 4);
        assert_eq!(candidate.finalize().len(), 1);
        assert_eq!(candidate.score(), Some(0.0));
    }

    #[test]
    fn test_span_len() {
        assert_eq!(MatchSpan::new(3, 3).len(), 1);
        assert_eq!(MatchSpan::new(3, 6).len(), 4);
        assert_eq!(MatchSpan::new(0, usize::MAX).len(), usize::MAX);
    }

    #[test]
    fn test_inverted_spans() {
        let span = MatchSpan::new(6, 3);
        assert_eq!((span.start, span.end), (3, 6));
        assert_eq!(MatchSpan::excluded(6, 3).len(), 4);

        let inverted = MatchSpan {
            start: 6,
            end: 3,
            excluded: false,
        };
        assert!(inverted.is_empty());
        assert_eq!(inverted.len(), 0);

        let mut candidate = MatchCandidate::new(node(), vec![inverted], 4);
        assert_eq!(candidate.finalize(), vec![inverted]);
        assert_eq!(candidate.score(), Some(0.0));
    }
}
