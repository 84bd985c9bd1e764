//! Node addressing consumed from the database node store.
//!
//! The engine's storage layer is external; this module fixes the narrow
//! contract the full-text layer relies on (kind, parent, flattened text) and
//! ships [`MemoryNodeStore`], a small in-memory tree for tests and tools.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one open data source (database).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub u32);

/// Identifies a node inside one data source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// A node reference that is unique across sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub source: SourceId,
    pub id: NodeId,
}

impl NodeRef {
    pub fn new(source: SourceId, id: NodeId) -> Self {
        NodeRef { source, id }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.0, self.id.0)
    }
}

/// Kind of a stored node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
}

/// Read access to the nodes of one data source.
pub trait NodeStore {
    /// The source these nodes belong to.
    fn source(&self) -> SourceId;

    /// Kind of the node, `None` if the id is unknown.
    fn kind(&self, id: NodeId) -> Option<NodeKind>;

    /// Parent of the node; `None` for roots and unknown ids.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Flattened string value of the node, `None` if the id is unknown.
    fn text(&self, id: NodeId) -> Option<String>;

    /// Reference to a node of this store.
    fn node_ref(&self, id: NodeId) -> NodeRef {
        NodeRef::new(self.source(), id)
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    value: String,
    children: Vec<NodeId>,
}

/// In-memory node tree.
///
/// Node ids are assigned in insertion order, which is document order when
/// the tree is built top-down.
///
/// ```
/// use ftmark::full_text::{MemoryNodeStore, NodeStore, SourceId};
///
/// let mut store = MemoryNodeStore::new(SourceId(1));
/// let doc = store.add_document();
/// let title = store.add_element(doc);
/// store.add_text(title, "Full-text ");
/// store.add_text(title, "search");
///
/// assert_eq!(store.text(doc).as_deref(), Some("Full-text search"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryNodeStore {
    source: SourceId,
    nodes: Vec<MemoryNode>,
}

impl MemoryNodeStore {
    /// Create an empty store for `source`.
    pub fn new(source: SourceId) -> Self {
        MemoryNodeStore {
            source,
            nodes: Vec::new(),
        }
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>, value: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(MemoryNode {
            kind,
            parent,
            value: value.to_string(),
            children: Vec::new(),
        });
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        usize::try_from(id.0).ok().and_then(|i| self.nodes.get(i))
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut MemoryNode> {
        usize::try_from(id.0).ok().and_then(|i| self.nodes.get_mut(i))
    }

    /// Add a document root.
    pub fn add_document(&mut self) -> NodeId {
        self.push(NodeKind::Document, None, "")
    }

    /// Add an element below `parent`.
    pub fn add_element(&mut self, parent: NodeId) -> NodeId {
        self.push(NodeKind::Element, Some(parent), "")
    }

    /// Add a text node below `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(NodeKind::Text, Some(parent), text)
    }

    /// Add an attribute to `parent`. Attributes do not contribute to the
    /// string value of their element.
    pub fn add_attribute(&mut self, parent: NodeId, value: &str) -> NodeId {
        self.push(NodeKind::Attribute, Some(parent), value)
    }

    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn collect_text(&self, node: &MemoryNode, out: &mut String) {
        for child in &node.children {
            if let Some(child) = self.node(*child) {
                match child.kind {
                    NodeKind::Text => out.push_str(&child.value),
                    NodeKind::Element => self.collect_text(child, out),
                    _ => {}
                }
            }
        }
    }
}

impl NodeStore for MemoryNodeStore {
    fn source(&self) -> SourceId {
        self.source
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    fn text(&self, id: NodeId) -> Option<String> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Document | NodeKind::Element => {
                let mut out = String::new();
                self.collect_text(node, &mut out);
                Some(out)
            }
            _ => Some(node.value.clone()),
        }
    }
}
