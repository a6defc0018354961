//! Error types for the retagging engine
//!
//! Both kinds are fatal to the call that raised them:
//! - Configuration mistakes, reported before any node is touched
//! - Depth overruns, reported mid-walk with earlier retags left in place

/// Main retag error type
#[derive(Debug, thiserror::Error)]
pub enum RetagError {
    /// Programmer error in the call setup
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Traversal went deeper than the ceiling
    #[error("recursion limit exceeded: depth {depth} > limit {limit}")]
    RecursionLimitExceeded {
        /// Depth that tripped the guard
        depth: usize,
        /// Configured ceiling
        limit: usize,
    },
}

impl RetagError {
    /// Custom retag requested without an editor
    #[inline]
    #[must_use]
    pub fn missing_editor() -> Self {
        Self::Configuration("custom retag requires an editor".to_string())
    }

    /// Strategy name not found in the registry
    #[inline]
    #[must_use]
    pub fn unknown_strategy(name: &str) -> Self {
        Self::Configuration(format!("unknown retag strategy: '{name}'"))
    }

    /// Check if error is a configuration mistake
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if error is a depth overrun
    #[inline]
    #[must_use]
    pub fn is_recursion_limit(&self) -> bool {
        matches!(self, Self::RecursionLimitExceeded { .. })
    }
}

/// Result type alias for retag operations
pub type RetagResult<T> = Result<T, RetagError>;
