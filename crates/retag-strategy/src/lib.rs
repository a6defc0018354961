//! Retag Strategies
//!
//! Pluggable tag rewrite policies applied by the traversal engine to every
//! tagged node.
//!
//! # Core Concepts
//!
//! - [`RetagStrategy`]: Core trait, `(node, namespace) -> ()`
//! - [`Rebless`]: Replace the tag with the namespace
//! - [`Rebase`]: Prefix the tag with the namespace (`And::AOne`)
//! - [`CustomEditor`]: Delegate to a caller-supplied [`Editor`]
//! - [`Filtered`]: Gate any strategy behind a tag pattern
//! - [`StrategyRegistry`]: Named table of strategies
//!
//! # Example
//!
//! ```rust
//! use retag_strategy::{RetagStrategy, StrategyRegistry};
//! use retag_value::{Body, Node, Tag};
//!
//! let registry = StrategyRegistry::with_defaults();
//! let rebase = registry.get("rebase").unwrap();
//!
//! let mut node = Node::tagged("AOne", Body::Sequence(vec![]));
//! rebase.apply(&mut node, "And");
//! assert_eq!(node.tag(), Some(&Tag::new("And::AOne")));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod filtered;
mod registry;
mod strategy;

// Re-exports
pub use filtered::{Filtered, StrategyError, FILTERED};
pub use registry::StrategyRegistry;
pub use strategy::{CustomEditor, Editor, Rebase, Rebless, RetagStrategy, CUSTOM, REBASE, REBLESS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
