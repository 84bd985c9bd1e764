//! Match positions recorded during one query evaluation.
//!
//! The index access layer writes one [`PositionRecord`] per matched node; the
//! snippet builder later re-tokenizes the node and asks the record which word
//! positions to highlight. A store lives exactly as long as one evaluation.

use ahash::AHashMap;
use bit_vec::BitVec;

use crate::full_text::candidate::MatchSpan;
use crate::full_text::node::NodeRef;

/// Positions below this bound are kept in a bit set.
const DENSE_LIMIT: usize = 1 << 16;

/// Matched word positions of one node's text.
///
/// Positions refer to the word stream of exactly that node's text and go
/// stale when the text changes. Far positions are kept as
/// sorted, disjoint ranges so memory follows the number of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionRecord {
    bits: BitVec,
    sparse: Vec<(usize, usize)>,
}

impl PositionRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        PositionRecord {
            bits: BitVec::new(),
            sparse: Vec::new(),
        }
    }

    /// Mark `position` as matched.
    pub fn insert(&mut self, position: usize) {
        self.insert_range(position, position);
    }

    /// Mark `start..=end` as matched. Does nothing if `start > end`.
    pub fn insert_range(&mut self, mut start: usize, end: usize) {
        if start > end {
            return;
        }
        if start < DENSE_LIMIT {
            let dense_end = end.min(DENSE_LIMIT - 1);
            if dense_end >= self.bits.len() {
                self.bits.grow(dense_end + 1 - self.bits.len(), false);
            }
            for position in start..=dense_end {
                self.bits.set(position, true);
            }
            if end < DENSE_LIMIT {
                return;
            }
            start = DENSE_LIMIT;
        }
        self.insert_sparse(start, end);
    }

    fn insert_sparse(&mut self, start: usize, end: usize) {
        let mut merged = (start, end);
        let mut ranges = Vec::with_capacity(self.sparse.len() + 1);
        let mut placed = false;
        for &(s, e) in &self.sparse {
            if e.saturating_add(1) < merged.0 {
                ranges.push((s, e));
            } else if merged.1.saturating_add(1) < s {
                if !placed {
                    ranges.push(merged);
                    placed = true;
                }
                ranges.push((s, e));
            } else {
                merged = (merged.0.min(s), merged.1.max(e));
            }
        }
        if !placed {
            ranges.push(merged);
        }
        self.sparse = ranges;
    }

    /// Mark the non-excluded positions of a span as matched.
    pub fn insert_span(&mut self, span: &MatchSpan) {
        if !span.excluded {
            self.insert_range(span.start, span.end);
        }
    }

    /// Whether `position` falls inside a match.
    pub fn contains(&self, position: usize) -> bool {
        if position < DENSE_LIMIT {
            return self.bits.get(position).unwrap_or(false);
        }
        let idx = self.sparse.partition_point(|&(_, e)| e < position);
        self.sparse.get(idx).is_some_and(|&(s, _)| s <= position)
    }

    /// Matched positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(position, set)| set.then_some(position))
            .chain(self.sparse.iter().flat_map(|&(s, e)| s..=e))
    }

    /// Number of matched positions.
    pub fn len(&self) -> usize {
        let dense = self.bits.iter().filter(|set| *set).count();
        self.sparse
            .iter()
            .fold(dense, |n, &(s, e)| n.saturating_add(e - s).saturating_add(1))
    }

    /// Whether no position is matched.
    pub fn is_empty(&self) -> bool {
        self.bits.none() && self.sparse.is_empty()
    }
}

impl FromIterator<usize> for PositionRecord {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut record = PositionRecord::new();
        for position in iter {
            record.insert(position);
        }
        record
    }
}

/// Position records keyed by `(source, node)`.
///
/// A missing entry means the node carries no full-text data at all, which is
/// different from an entry without matched positions.
#[derive(Debug, Clone, Default)]
pub struct MatchPositionStore {
    entries: AHashMap<NodeRef, PositionRecord>,
}

impl MatchPositionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MatchPositionStore {
            entries: AHashMap::new(),
        }
    }

    /// Record the spans matched in `node`, merging with earlier entries.
    pub fn add(&mut self, node: NodeRef, spans: &[MatchSpan]) {
        let record = self.entries.entry(node).or_default();
        for span in spans {
            record.insert_span(span);
        }
    }

    /// Record explicit positions for `node`, merging with earlier entries.
    pub fn insert<I>(&mut self, node: NodeRef, positions: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let record = self.entries.entry(node).or_default();
        for position in positions {
            record.insert(position);
        }
    }

    /// Position record of `node`, if any was recorded.
    pub fn get(&self, node: &NodeRef) -> Option<&PositionRecord> {
        self.entries.get(node)
    }

    /// Whether `node` has a record.
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.entries.contains_key(node)
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::full_text::node::{NodeId, SourceId};

    fn node(id: u64) -> NodeRef {
        NodeRef::new(SourceId(1), NodeId(id))
    }

    #[test]
    fn test_record_contains() {
        let record: PositionRecord = [3, 0, 9].into_iter().collect();

        assert!(record.contains(0));
        assert!(record.contains(3));
        assert!(record.contains(9));
        assert!(!record.contains(4));
        assert!(!record.contains(1000));
        assert_eq!(record.positions().collect::<Vec<_>>(), vec![0, 3, 9]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_insert_then_query_returns_inserted_set() {
        let mut store = MatchPositionStore::new();
        store.insert(node(4), [7, 2, 5]);

        let record = store.get(&node(4)).unwrap();
        assert_eq!(record.positions().collect::<Vec<_>>(), vec![2, 5, 7]);
    }

    #[test]
    fn test_missing_key_is_not_empty_set() {
        let mut store = MatchPositionStore::new();
        store.add(node(1), &[]);

        assert!(store.get(&node(2)).is_none());
        let record = store.get(&node(1)).unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_spans_merge_and_skip_excluded() {
        let mut store = MatchPositionStore::new();
        store.add(node(1), &[MatchSpan::new(1, 2), MatchSpan::excluded(5, 6)]);
        store.add(node(1), &[MatchSpan::new(8, 8)]);

        let record = store.get(&node(1)).unwrap();
        assert_eq!(record.positions().collect::<Vec<_>>(), vec![1, 2, 8]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_far_positions_stay_sparse() {
        let mut store = MatchPositionStore::new();
        store.insert(node(5), [usize::MAX, 3]);
        store.add(node(5), &[MatchSpan::new(70_000, usize::MAX / 2)]);

        let record = store.get(&node(5)).unwrap();
        assert!(record.contains(3));
        assert!(record.contains(usize::MAX));
        assert!(record.contains(usize::MAX / 2));
        assert!(record.contains(70_000));
        assert!(!record.contains(69_999));
        assert!(!record.contains(usize::MAX - 1));
        assert_eq!(record.len(), usize::MAX / 2 - 70_000 + 3);
        assert_eq!(record.positions().take(3).collect::<Vec<_>>(), vec![3, 70_000, 70_001]);
    }

    #[test]
    fn test_ranges_merge_across_dense_limit() {
        let mut record = PositionRecord::new();
        record.insert_range(DENSE_LIMIT + 10, DENSE_LIMIT + 20);
        record.insert_range(DENSE_LIMIT - 2, DENSE_LIMIT + 5);
        record.insert_range(DENSE_LIMIT + 6, DENSE_LIMIT + 9);
        record.insert_range(9, 3);

        assert_eq!(record.sparse, vec![(DENSE_LIMIT, DENSE_LIMIT + 20)]);
        assert_eq!(record.len(), 23);
        assert!(record.contains(DENSE_LIMIT - 1));
        assert!(!record.contains(5));
    }

    #[test]
    fn test_sources_are_distinct_keys() {
        let mut store = MatchPositionStore::new();
        store.insert(NodeRef::new(SourceId(1), NodeId(3)), [0]);
        store.insert(NodeRef::new(SourceId(2), NodeId(3)), [1]);

        assert_eq!(store.len(), 2);
        assert!(store.get(&NodeRef::new(SourceId(2), NodeId(3))).unwrap().contains(1));
        assert!(!store.get(&NodeRef::new(SourceId(1), NodeId(3))).unwrap().contains(1));
    }
}
