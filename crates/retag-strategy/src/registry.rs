//! Strategy registry
//!
//! Provides [`StrategyRegistry`], the named table the public retag operations
//! are built from.

use crate::strategy::{Rebase, Rebless, RetagStrategy, REBASE, REBLESS};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of named retag strategies
///
/// Strategies are stored as shared trait objects so one registry can hand the
/// same strategy to many traversals.
#[derive(Debug, Default, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn RetagStrategy>>,
}

impl StrategyRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Create registry with built-in strategies
    ///
    /// `custom` is not registered: it needs a caller-supplied editor.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(REBLESS, Rebless::new());
        registry.register(REBASE, Rebase::new());
        registry
    }

    /// Register a strategy, replacing any previous one with the same name
    pub fn register(&mut self, name: &str, strategy: impl RetagStrategy + 'static) {
        self.register_shared(name, Arc::new(strategy));
    }

    /// Register an already shared strategy
    pub fn register_shared(&mut self, name: &str, strategy: Arc<dyn RetagStrategy>) {
        self.strategies.insert(name.to_string(), strategy);
    }

    /// Look up a strategy by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn RetagStrategy>> {
        self.strategies.get(name).cloned()
    }

    /// Check if strategy exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Remove strategy
    #[inline]
    pub fn remove(&mut self, name: &str) -> bool {
        self.strategies.remove(name).is_some()
    }

    /// List all registered strategy names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
