//! Full-text matches: node addressing, match candidates, index access and
//! the per-evaluation position store used for highlighting.

pub mod candidate;
pub mod index_access;
pub mod node;
pub mod positions;

pub use candidate::{MatchCandidate, MatchSpan, MatchState};
pub use index_access::{
    CandidateIter, EvalContext, FullTextExpr, FullTextIndexAccess, IndexAccessIter, LockVisitor,
    ReadLocks,
};
pub use node::{MemoryNodeStore, NodeId, NodeKind, NodeRef, NodeStore, SourceId};
pub use positions::{MatchPositionStore, PositionRecord};
