//! Pattern-gated strategies
//!
//! [`Filtered`] applies an inner strategy only to nodes whose current tag matches
//! a regular expression.

use crate::strategy::RetagStrategy;
use regex::Regex;
use retag_value::Node;

/// Name reported by [`Filtered`]
pub const FILTERED: &str = "filtered";

/// Apply `inner` only where the tag matches (or, when excluding, does not match)
#[derive(Debug, Clone)]
pub struct Filtered<S> {
    pattern: Regex,
    inner: S,
    exclude: bool,
}

impl<S: RetagStrategy> Filtered<S> {
    /// Gate `inner` behind a compiled pattern
    #[inline]
    #[must_use]
    pub fn new(pattern: Regex, inner: S) -> Self {
        Self {
            pattern,
            inner,
            exclude: false,
        }
    }

    /// Gate `inner` behind a pattern source
    ///
    /// # Errors
    /// Returns [`StrategyError::InvalidPattern`] if `pattern` does not compile
    pub fn matching(pattern: &str, inner: S) -> Result<Self, StrategyError> {
        let compiled = Regex::new(pattern).map_err(|source| StrategyError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::new(compiled, inner))
    }

    /// Invert the gate: apply only to tags that do NOT match
    #[inline]
    #[must_use]
    pub fn excluding(mut self) -> Self {
        self.exclude = true;
        self
    }

    /// Pattern in use
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Wrapped strategy
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn admits(&self, node: &Node) -> bool {
        node.tag()
            .is_some_and(|tag| self.pattern.is_match(tag.as_str()) != self.exclude)
    }
}

impl<S: RetagStrategy> RetagStrategy for Filtered<S> {
    fn apply(&self, node: &mut Node, namespace: &str) {
        if self.admits(node) {
            self.inner.apply(node, namespace);
        }
    }

    fn name(&self) -> &'static str {
        FILTERED
    }
}

/// Errors while building strategies
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// Tag pattern failed to compile
    #[error("invalid tag pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },
}
