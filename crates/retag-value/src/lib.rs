//! Retag Value Model
//!
//! Dynamically-typed, arbitrarily nested values whose container nodes carry a
//! mutable runtime type tag.
//!
//! # Core Concepts
//!
//! - [`Value`]: Either a primitive [`Scalar`] leaf or a shared [`NodeRef`]
//! - [`Node`]: Container with an optional [`Tag`] and a [`Body`]
//! - [`Shape`]: Storage kind (scalar-ref, sequence, mapping, compound, leaf)
//! - [`Tag`]: Runtime type identifier, `::`-separated when hierarchical
//!
//! # Example
//!
//! ```rust
//! use retag_value::{Shape, Tag, Value};
//!
//! let value = Value::mapping([("hey", Value::from("ho"))]).blessed("AOne");
//! assert_eq!(value.shape(), Shape::Mapping);
//! assert_eq!(value.tag(), Some(Tag::new("AOne")));
//!
//! // Retagging is a plain field write on the shared node
//! value.as_node().unwrap().write().bless("Beatless");
//! assert_eq!(value.tag(), Some(Tag::new("Beatless")));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod node;
mod tag;
mod value;

// Re-exports
pub use node::{Body, Mapping, Node, NodeRef, Shape};
pub use tag::{Tag, DEFAULT_SEPARATOR};
pub use value::{Scalar, Value, MAX_DEPTH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn shared_node_seen_from_both_parents() {
        let shared = Value::sequence([Value::from(1)]).blessed("Shared");
        let left = Value::scalar_ref(shared.clone());
        let right = Value::mapping([("s", shared.clone())]);

        shared.as_node().unwrap().write().bless("Renamed");

        assert_eq!(left.children()[0].tag(), Some(Tag::new("Renamed")));
        assert_eq!(right.get("s").unwrap().tag(), Some(Tag::new("Renamed")));
    }

    #[test]
    fn shape_is_independent_of_tag() {
        let value = Value::sequence([]);
        assert_eq!(value.shape(), Shape::Sequence);
        let value = value.blessed("Tagged");
        assert_eq!(value.shape(), Shape::Sequence);
        value.as_node().unwrap().write().unbless();
        assert_eq!(value.shape(), Shape::Sequence);
    }
}
