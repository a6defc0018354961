//! Tagged nodes and their shapes
//!
//! A [`Node`] is a container with an optional [`Tag`] and a [`Body`]. Nodes are
//! shared through [`NodeRef`] handles, so one node may be reachable along several
//! paths (aliasing) or even from itself (cycles).

use crate::tag::Tag;
use crate::value::Value;
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Keyed children of a mapping slot
///
/// Iteration order is insertion order; traversal semantics do not depend on it.
pub type Mapping = IndexMap<String, Value>;

/// Storage kind of a value, independent of its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Single indirect slot
    ScalarRef,

    /// Ordered children
    Sequence,

    /// Keyed children
    Mapping,

    /// Scalar slot, sequence slot and mapping slot at once
    Compound,

    /// Primitive value without children
    Leaf,
}

impl Shape {
    /// Whether values of this shape can have children
    #[inline]
    #[must_use]
    pub fn has_children(self) -> bool {
        !matches!(self, Self::Leaf)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ScalarRef => "scalar-ref",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Compound => "compound",
            Self::Leaf => "leaf",
        };
        f.write_str(name)
    }
}

/// Payload of a node
#[derive(Debug, Clone)]
pub enum Body {
    /// One indirect slot
    ScalarRef(Value),

    /// Ordered list of children
    Sequence(Vec<Value>),

    /// Keyed collection of children
    Mapping(Mapping),

    /// Multi-slot reference; children are the union of all three slots
    Compound {
        /// Scalar slot
        scalar: Value,
        /// Sequence slot
        sequence: Vec<Value>,
        /// Mapping slot
        mapping: Mapping,
    },
}

impl Body {
    /// Shape of this body
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::ScalarRef(_) => Shape::ScalarRef,
            Self::Sequence(_) => Shape::Sequence,
            Self::Mapping(_) => Shape::Mapping,
            Self::Compound { .. } => Shape::Compound,
        }
    }

    /// Direct children in slot order
    ///
    /// Compound bodies yield the scalar slot, then the sequence slot, then the
    /// mapping slot.
    #[must_use]
    pub fn children(&self) -> Vec<&Value> {
        match self {
            Self::ScalarRef(inner) => vec![inner],
            Self::Sequence(items) => items.iter().collect(),
            Self::Mapping(entries) => entries.values().collect(),
            Self::Compound {
                scalar,
                sequence,
                mapping,
            } => std::iter::once(scalar)
                .chain(sequence.iter())
                .chain(mapping.values())
                .collect(),
        }
    }

    /// Number of direct children
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::ScalarRef(_) => 1,
            Self::Sequence(items) => items.len(),
            Self::Mapping(entries) => entries.len(),
            Self::Compound {
                sequence, mapping, ..
            } => 1 + sequence.len() + mapping.len(),
        }
    }

    /// Whether the body has no children
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Container node with an optional runtime tag
///
/// # Invariants
/// - The tag is the only part the retagging engine ever writes
/// - Leaf values are never nodes, so they can never be tagged
#[derive(Debug, Clone)]
pub struct Node {
    tag: Option<Tag>,
    body: Body,
}

impl Node {
    /// Create an untagged node
    #[inline]
    #[must_use]
    pub fn new(body: Body) -> Self {
        Self { tag: None, body }
    }

    /// Create a tagged node
    #[inline]
    #[must_use]
    pub fn tagged(tag: impl Into<Tag>, body: Body) -> Self {
        Self {
            tag: Some(tag.into()),
            body,
        }
    }

    /// Current tag
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Whether the node carries a tag
    #[inline]
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    /// Assign a new tag, returning the previous one
    #[inline]
    pub fn bless(&mut self, tag: impl Into<Tag>) -> Option<Tag> {
        self.tag.replace(tag.into())
    }

    /// Remove the tag, returning it
    #[inline]
    pub fn unbless(&mut self) -> Option<Tag> {
        self.tag.take()
    }

    /// Payload
    #[inline]
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable payload
    ///
    /// Used to build aliased or cyclic structures after the node is shared.
    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Shape of the payload
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.body.shape()
    }
}

/// Shared handle to a [`Node`]
///
/// Cloning the handle aliases the node; it never copies it.
#[derive(Clone)]
pub struct NodeRef(Arc<RwLock<Node>>);

impl NodeRef {
    /// Wrap a node in a new shared handle
    #[inline]
    #[must_use]
    pub fn new(node: Node) -> Self {
        Self(Arc::new(RwLock::new(node)))
    }

    /// Lock for reading
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Node> {
        self.0.read()
    }

    /// Lock for writing
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Node> {
        self.0.write()
    }

    /// Whether both handles point at the same node
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Snapshot of the current tag
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        self.read().tag().cloned()
    }

    /// Shape of the node
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.read().shape()
    }
}

impl Debug for NodeRef {
    // Children are left out so cyclic structures can be printed.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.try_read() {
            Some(node) => f
                .debug_struct("NodeRef")
                .field("tag", &node.tag())
                .field("shape", &node.shape())
                .field("children", &node.body().len())
                .finish(),
            None => f.write_str("NodeRef(<locked>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(n: i64) -> Value {
        Value::from(n)
    }

    #[test]
    fn body_shapes() {
        assert_eq!(Body::ScalarRef(leaf(1)).shape(), Shape::ScalarRef);
        assert_eq!(Body::Sequence(vec![]).shape(), Shape::Sequence);
        assert_eq!(Body::Mapping(Mapping::new()).shape(), Shape::Mapping);
        let compound = Body::Compound {
            scalar: leaf(1),
            sequence: vec![],
            mapping: Mapping::new(),
        };
        assert_eq!(compound.shape(), Shape::Compound);
    }

    #[test]
    fn compound_children_are_union_of_slots() {
        let mut mapping = Mapping::new();
        mapping.insert("k".to_string(), leaf(3));
        let body = Body::Compound {
            scalar: leaf(1),
            sequence: vec![leaf(2)],
            mapping,
        };

        let children: Vec<_> = body
            .children()
            .into_iter()
            .filter_map(|v| v.as_scalar().and_then(|s| s.as_int()))
            .collect();
        assert_eq!(children, vec![1, 2, 3]);
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn empty_bodies() {
        assert!(Body::Sequence(vec![]).is_empty());
        assert!(Body::Mapping(Mapping::new()).is_empty());
        assert!(!Body::ScalarRef(leaf(0)).is_empty());
    }

    #[test]
    fn node_bless_returns_previous_tag() {
        let mut node = Node::tagged("AOne", Body::Sequence(vec![]));
        let previous = node.bless("Beatless");
        assert_eq!(previous, Some(Tag::new("AOne")));
        assert_eq!(node.tag(), Some(&Tag::new("Beatless")));
    }

    #[test]
    fn node_unbless() {
        let mut node = Node::tagged("AOne", Body::Sequence(vec![]));
        assert_eq!(node.unbless(), Some(Tag::new("AOne")));
        assert!(!node.is_tagged());
    }

    #[test]
    fn node_ref_aliases() {
        let a = NodeRef::new(Node::new(Body::Sequence(vec![])));
        let b = a.clone();
        assert!(a.ptr_eq(&b));

        b.write().bless("Shared");
        assert_eq!(a.tag(), Some(Tag::new("Shared")));

        let c = NodeRef::new(Node::new(Body::Sequence(vec![])));
        assert!(!a.ptr_eq(&c));
    }

    #[test]
    fn node_ref_debug_survives_cycles() {
        let node = NodeRef::new(Node::tagged("Loop", Body::ScalarRef(Value::undef())));
        *node.write().body_mut() = Body::ScalarRef(Value::Node(node.clone()));

        let printed = format!("{node:?}");
        assert!(printed.contains("Loop"));
        assert!(printed.contains("ScalarRef"));

        *node.write().body_mut() = Body::ScalarRef(Value::undef());
    }

    #[test]
    fn shape_display() {
        assert_eq!(Shape::ScalarRef.to_string(), "scalar-ref");
        assert_eq!(Shape::Leaf.to_string(), "leaf");
        assert!(!Shape::Leaf.has_children());
        assert!(Shape::Compound.has_children());
    }
}
