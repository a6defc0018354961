//! Dynamic values
//!
//! A [`Value`] is either a primitive [`Scalar`] leaf or a handle to a shared
//! [`Node`]. Only nodes can carry a tag.

use crate::node::{Body, Mapping, Node, NodeRef, Shape};
use crate::tag::Tag;

/// Deepest level any walk over a value may reach; the root sits at level 1
pub const MAX_DEPTH: usize = 1000;

/// Primitive leaf payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// Absent value
    #[default]
    Undef,

    /// Boolean
    Bool(bool),

    /// Integer
    Int(i64),

    /// Floating point number
    Float(f64),

    /// String
    Str(String),
}

impl Scalar {
    /// Integer payload, if any
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload, if any
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Any value reachable during traversal
///
/// Cloning a `Value::Node` aliases the node.
#[derive(Debug, Clone)]
pub enum Value {
    /// Primitive without children, never tagged
    Leaf(Scalar),

    /// Shared container, possibly tagged
    Node(NodeRef),
}

impl Value {
    /// Primitive leaf
    #[inline]
    #[must_use]
    pub fn leaf(scalar: impl Into<Scalar>) -> Self {
        Self::Leaf(scalar.into())
    }

    /// Absent value
    #[inline]
    #[must_use]
    pub fn undef() -> Self {
        Self::Leaf(Scalar::Undef)
    }

    /// Untagged node holding `body`
    #[inline]
    #[must_use]
    pub fn from_body(body: Body) -> Self {
        Self::Node(NodeRef::new(Node::new(body)))
    }

    /// Tagged node holding `body`
    #[inline]
    #[must_use]
    pub fn tagged(tag: impl Into<Tag>, body: Body) -> Self {
        Self::Node(NodeRef::new(Node::tagged(tag, body)))
    }

    /// Untagged single-slot reference to `inner`
    #[inline]
    #[must_use]
    pub fn scalar_ref(inner: Value) -> Self {
        Self::from_body(Body::ScalarRef(inner))
    }

    /// Untagged ordered list
    #[must_use]
    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Self::from_body(Body::Sequence(items.into_iter().collect()))
    }

    /// Untagged keyed collection
    #[must_use]
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::from_body(Body::Mapping(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Untagged multi-slot reference
    #[must_use]
    pub fn compound(scalar: Value, sequence: Vec<Value>, mapping: Mapping) -> Self {
        Self::from_body(Body::Compound {
            scalar,
            sequence,
            mapping,
        })
    }

    /// Attach `tag` to this value and return it
    ///
    /// Leaves cannot carry tags and are returned unchanged.
    #[must_use]
    pub fn blessed(self, tag: impl Into<Tag>) -> Self {
        if let Self::Node(node) = &self {
            node.write().bless(tag);
        }
        self
    }

    /// Storage kind
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Leaf(_) => Shape::Leaf,
            Self::Node(node) => node.shape(),
        }
    }

    /// Snapshot of the tag, if tagged
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Self::Leaf(_) => None,
            Self::Node(node) => node.tag(),
        }
    }

    /// Whether the value carries a tag
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Node(node) => node.read().is_tagged(),
        }
    }

    /// Node handle, if this is a node
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Self::Node(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }

    /// Leaf payload, if this is a leaf
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Leaf(scalar) => Some(scalar),
            Self::Node(_) => None,
        }
    }

    /// Snapshot of the direct children
    ///
    /// Node children are aliased, leaf children are copied.
    #[must_use]
    pub fn children(&self) -> Vec<Value> {
        match self {
            Self::Leaf(_) => Vec::new(),
            Self::Node(node) => node.read().body().children().into_iter().cloned().collect(),
        }
    }

    /// Look up a mapping child by key
    ///
    /// Works on mapping and compound nodes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let node = self.as_node()?.read();
        let found = match node.body() {
            Body::Mapping(entries) | Body::Compound { mapping: entries, .. } => {
                entries.get(key).cloned()
            }
            _ => None,
        };
        found
    }

    /// Look up a sequence child by position
    ///
    /// Works on sequence and compound nodes.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<Value> {
        let node = self.as_node()?.read();
        let found = match node.body() {
            Body::Sequence(items) | Body::Compound { sequence: items, .. } => {
                items.get(index).cloned()
            }
            _ => None,
        };
        found
    }

    /// Tags of all tagged nodes in depth-first pre-order
    ///
    /// Aliased nodes are reported once per path. Nothing below level
    /// [`MAX_DEPTH`] is collected, so cyclic values terminate.
    #[must_use]
    pub fn tags_preorder(&self) -> Vec<Tag> {
        let mut tags = Vec::new();
        let mut stack = vec![(self.clone(), 1)];
        while let Some((value, depth)) = stack.pop() {
            if let Some(tag) = value.tag() {
                tags.push(tag);
            }
            if depth < MAX_DEPTH {
                let mut children = value.children();
                children.reverse();
                stack.extend(children.into_iter().map(|child| (child, depth + 1)));
            }
        }
        tags
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Leaf(scalar)
    }
}

impl From<NodeRef> for Value {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::leaf(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::leaf(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::leaf(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::leaf(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::leaf(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::leaf(s)
    }
}
