//! Retag Engine
//!
//! Walks arbitrarily nested dynamic values depth-first and rewrites the runtime
//! tag of every tagged node it meets:
//! - Tags are rewritten before the node's children are walked
//! - Untagged nodes are walked but never handed to the strategy
//! - Aliased nodes are visited once per path
//! - A recursion ceiling (1000 levels by default) stops runaway or cyclic walks
//!
//! # Example
//!
//! ```rust
//! use retag_engine::{rebase, rebless};
//! use retag_value::{Tag, Value};
//!
//! let root = Value::mapping([
//!     ("one", Value::mapping([("hey", Value::from("ho"))]).blessed("AOne")),
//!     ("two", Value::sequence([Value::from(5)]).blessed("ATwo")),
//! ])
//! .blessed("AOne");
//!
//! rebase(&root, "And")?;
//! assert_eq!(root.tag(), Some(Tag::new("And::AOne")));
//! assert_eq!(root.get("two").unwrap().tag(), Some(Tag::new("And::ATwo")));
//!
//! rebless(&root, "Beatless")?;
//! assert_eq!(root.get("one").unwrap().tag(), Some(Tag::new("Beatless")));
//! # Ok::<(), retag_engine::RetagError>(())
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod config;
pub mod engine;
pub mod error;
pub mod ops;

// Re-exports for convenience
pub use config::{RetagConfig, RetagOptions, MAX_DEPTH};
pub use engine::{RetagReport, Retagger};
pub use error::{RetagError, RetagResult};
pub use ops::{rebase, rebase_with, rebless, rebless_with, retag_custom, retag_named};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for retagging
    pub use crate::{
        rebase, rebless, retag_custom, retag_named, RetagConfig, RetagError, RetagOptions,
        RetagReport, RetagResult, Retagger,
    };
    pub use retag_strategy::{CustomEditor, Filtered, Rebase, Rebless, RetagStrategy, StrategyRegistry};
    pub use retag_value::{Body, Node, NodeRef, Shape, Tag, Value};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
