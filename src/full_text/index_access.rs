//! Full-text expressions evaluated via the full-text index.
//!
//! [`FullTextIndexAccess`] wraps the boolean full-text evaluator and turns
//! its candidates into ordinary query results: each candidate gets its final
//! score, its match spans are moved into the evaluation's
//! [`MatchPositionStore`] (when highlighting is enabled) and dropped from the
//! candidate itself.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, trace};

use crate::error::Result;
use crate::full_text::candidate::MatchCandidate;
use crate::full_text::positions::MatchPositionStore;

/// Lazy sequence of candidates produced by a full-text expression.
pub type CandidateIter<'a> = Box<dyn Iterator<Item = Result<MatchCandidate>> + 'a>;

/// Receives the resources an expression reads before it is executed.
pub trait LockVisitor {
    /// Declare a read of `resource`. Returning `false` aborts the visit.
    fn lock(&mut self, resource: &str) -> bool;
}

/// Collects declared read locks.
#[derive(Debug, Clone, Default)]
pub struct ReadLocks {
    resources: BTreeSet<String>,
}

impl ReadLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared resources in name order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(String::as_str)
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.resources.contains(resource)
    }
}

impl LockVisitor for ReadLocks {
    fn lock(&mut self, resource: &str) -> bool {
        self.resources.insert(resource.to_string());
        true
    }
}

/// State of one query evaluation.
#[derive(Debug, Default)]
pub struct EvalContext {
    positions: Option<MatchPositionStore>,
}

impl EvalContext {
    /// Context without position recording.
    pub fn new() -> Self {
        EvalContext { positions: None }
    }

    /// Context recording match positions for highlighting.
    pub fn with_positions() -> Self {
        EvalContext {
            positions: Some(MatchPositionStore::new()),
        }
    }

    /// Recorded positions, if recording is enabled.
    pub fn positions(&self) -> Option<&MatchPositionStore> {
        self.positions.as_ref()
    }

    /// Take the recorded positions out of the context.
    pub fn take_positions(&mut self) -> Option<MatchPositionStore> {
        self.positions.take()
    }
}

/// A boolean full-text expression backed by the index.
pub trait FullTextExpr: fmt::Display {
    /// Start evaluating. The returned sequence is pulled lazily.
    fn iter<'a>(&'a self, ctx: &EvalContext) -> Result<CandidateIter<'a>>;

    /// Declare the resources this expression reads.
    fn accept(&self, _visitor: &mut dyn LockVisitor) -> bool {
        true
    }
}

/// Full-text `contains` evaluated through the index of one data source.
pub struct FullTextIndexAccess {
    expr: Box<dyn FullTextExpr>,
    source_name: String,
    iterable: bool,
}

impl fmt::Debug for FullTextIndexAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FullTextIndexAccess")
            .field("expr", &self.expr.to_string())
            .field("source_name", &self.source_name)
            .field("iterable", &self.iterable)
            .finish()
    }
}

impl FullTextIndexAccess {
    /// Wrap `expr`, which reads the index of `source_name`.
    ///
    /// `iterable` states whether the index returns nodes in document order.
    pub fn new<S: Into<String>>(expr: Box<dyn FullTextExpr>, source_name: S, iterable: bool) -> Self {
        FullTextIndexAccess {
            expr,
            source_name: source_name.into(),
            iterable,
        }
    }

    /// Whether results come in ascending document order, so merge-based
    /// optimizations downstream are valid.
    pub fn iterable(&self) -> bool {
        self.iterable
    }

    /// Name of the data source whose index is read.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Declare a read of the data source, then visit the inner expression.
    pub fn accept(&self, visitor: &mut dyn LockVisitor) -> bool {
        visitor.lock(&self.source_name) && self.expr.accept(visitor)
    }

    /// Evaluate lazily. Positions are recorded into `ctx` if it has a store.
    pub fn iter<'a>(&'a self, ctx: &'a mut EvalContext) -> Result<IndexAccessIter<'a>> {
        let inner = self.expr.iter(ctx)?;
        debug!(
            "full-text index access on '{}' (positions {})",
            self.source_name,
            if ctx.positions.is_some() { "recorded" } else { "ignored" }
        );
        Ok(IndexAccessIter {
            inner,
            positions: ctx.positions.as_mut(),
        })
    }
}

impl fmt::Display for FullTextIndexAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fulltext(\"{}\", {})", self.source_name, self.expr)
    }
}

/// Iterator returned by [`FullTextIndexAccess::iter`].
///
/// Yields finalized candidates. Errors of the inner expression are passed on
/// unchanged; iteration may continue afterwards if the inner sequence does.
pub struct IndexAccessIter<'a> {
    inner: CandidateIter<'a>,
    positions: Option<&'a mut MatchPositionStore>,
}

impl Iterator for IndexAccessIter<'_> {
    type Item = Result<MatchCandidate>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut candidate = match self.inner.next()? {
            Ok(candidate) => candidate,
            Err(e) => return Some(Err(e)),
        };

        let spans = candidate.finalize();
        trace!(
            "candidate {} scored {:?} with {} span(s)",
            candidate.node,
            candidate.score(),
            spans.len()
        );
        if let Some(positions) = self.positions.as_deref_mut() {
            positions.add(candidate.node, &spans);
        }
        Some(Ok(candidate))
    }
}
