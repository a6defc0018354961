//! Retag configuration and per-call options

use retag_strategy::{CustomEditor, Editor};
use retag_value::{Node, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use retag_value::MAX_DEPTH;

/// Traversal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetagConfig {
    /// Deepest recursion level allowed; the root sits at level 1
    ///
    /// Values above [`MAX_DEPTH`] are clamped to it, see
    /// [`RetagConfig::effective_max_depth`].
    pub max_depth: usize,
    /// Separator used by the built-in rebase strategy
    pub separator: String,
}

impl RetagConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With recursion ceiling
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Ceiling the walk enforces
    ///
    /// The configured value can only lower the ceiling.
    #[inline]
    #[must_use]
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH)
    }

    /// With rebase separator
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for RetagConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Per-call options
///
/// Holds the editor for custom retags, the traversal configuration and the
/// starting recursion level.
#[derive(Clone, Default)]
pub struct RetagOptions {
    /// Editor used by custom retags
    pub editor: Option<Editor>,
    /// Traversal configuration
    pub config: RetagConfig,
    /// Recursion level the walk starts from
    pub start_depth: usize,
}

impl RetagOptions {
    /// Create empty options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With editor closure
    #[inline]
    #[must_use]
    pub fn with_editor(mut self, editor: impl Fn(&mut Node, &str) + Send + Sync + 'static) -> Self {
        self.editor = Some(Arc::new(editor));
        self
    }

    /// With shared editor
    #[inline]
    #[must_use]
    pub fn with_shared_editor(mut self, editor: Editor) -> Self {
        self.editor = Some(editor);
        self
    }

    /// With traversal configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: RetagConfig) -> Self {
        self.config = config;
        self
    }

    /// Start counting recursion levels from `depth`
    #[inline]
    #[must_use]
    pub fn starting_at(mut self, depth: usize) -> Self {
        self.start_depth = depth;
        self
    }

    /// Editor wrapped as a strategy, if present
    #[must_use]
    pub fn custom_editor(&self) -> Option<CustomEditor> {
        self.editor.clone().map(CustomEditor::from_editor)
    }
}

impl fmt::Debug for RetagOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetagOptions")
            .field("editor", &self.editor.as_ref().map(|_| "<editor>"))
            .field("config", &self.config)
            .field("start_depth", &self.start_depth)
            .finish()
    }
}
