//! Retag strategy trait and built-in strategies
//!
//! Provides the [`RetagStrategy`] trait for pluggable tag rewriting, plus the
//! [`Rebless`], [`Rebase`] and [`CustomEditor`] built-ins.

use retag_value::{Node, DEFAULT_SEPARATOR};
use std::fmt;
use std::sync::Arc;

/// Name of the absolute rename strategy
pub const REBLESS: &str = "rebless";

/// Name of the hierarchical rebase strategy
pub const REBASE: &str = "rebase";

/// Name of the caller-supplied editor strategy
pub const CUSTOM: &str = "custom";

/// Tag rewrite policy applied to every tagged node
///
/// # Contract
/// - `apply` is only called on tagged nodes, before their children are walked
/// - `apply` may rewrite or remove the tag; it must not change the body shape
/// - Whatever `apply` does, the walk still descends into the node's children
pub trait RetagStrategy: Send + Sync + fmt::Debug {
    /// Rewrite the tag of `node` for `namespace`
    fn apply(&self, node: &mut Node, namespace: &str);

    /// Strategy name (for logging and registry lookup)
    fn name(&self) -> &'static str;
}

impl<S: RetagStrategy + ?Sized> RetagStrategy for Arc<S> {
    fn apply(&self, node: &mut Node, namespace: &str) {
        (**self).apply(node, namespace);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: RetagStrategy + ?Sized> RetagStrategy for Box<S> {
    fn apply(&self, node: &mut Node, namespace: &str) {
        (**self).apply(node, namespace);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Replace the tag with the namespace
///
/// `AOne` under `Beatless` becomes `Beatless`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rebless;

impl Rebless {
    /// Create strategy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RetagStrategy for Rebless {
    fn apply(&self, node: &mut Node, namespace: &str) {
        node.bless(namespace);
    }

    fn name(&self) -> &'static str {
        REBLESS
    }
}

/// Prefix the tag with the namespace
///
/// `AOne` under `And` becomes `And::AOne`.
#[derive(Debug, Clone)]
pub struct Rebase {
    separator: String,
}

impl Rebase {
    /// Create strategy with the `::` separator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Use a different separator between namespace and old tag
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Separator in use
    #[inline]
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for Rebase {
    fn default() -> Self {
        Self::new()
    }
}

impl RetagStrategy for Rebase {
    fn apply(&self, node: &mut Node, namespace: &str) {
        if let Some(rebased) = node.tag().map(|old| old.rebased(namespace, &self.separator)) {
            node.bless(rebased);
        }
    }

    fn name(&self) -> &'static str {
        REBASE
    }
}

/// Caller-supplied tag editor
///
/// Receives the tagged node and the namespace. The engine does no tagging of its
/// own when an editor is active.
pub type Editor = Arc<dyn Fn(&mut Node, &str) + Send + Sync>;

/// Strategy that delegates to an [`Editor`]
#[derive(Clone)]
pub struct CustomEditor {
    editor: Editor,
}

impl CustomEditor {
    /// Wrap a closure
    #[inline]
    #[must_use]
    pub fn new(editor: impl Fn(&mut Node, &str) + Send + Sync + 'static) -> Self {
        Self {
            editor: Arc::new(editor),
        }
    }

    /// Wrap an already shared editor
    #[inline]
    #[must_use]
    pub fn from_editor(editor: Editor) -> Self {
        Self { editor }
    }
}

impl fmt::Debug for CustomEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomEditor").finish_non_exhaustive()
    }
}

impl RetagStrategy for CustomEditor {
    fn apply(&self, node: &mut Node, namespace: &str) {
        (self.editor)(node, namespace);
    }

    fn name(&self) -> &'static str {
        CUSTOM
    }
}
