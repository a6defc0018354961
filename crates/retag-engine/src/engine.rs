//! Depth-first retagging traversal
//!
//! [`Retagger`] walks every value reachable from a root and hands each tagged
//! node to its strategy before descending into that node's children.
//!
//! # Visit order
//! 1. Bump the recursion level and check it against the ceiling
//! 2. If the node is tagged, apply the strategy
//! 3. Walk every child of the node's shape, in slot order
//!
//! Descent always happens, whatever the strategy did to the tag.
//!
//! No lock is held while a strategy runs. The strategy edits a copy of the
//! node, which is written back before the children are walked.

use crate::config::RetagConfig;
use crate::error::{RetagError, RetagResult};
use retag_strategy::RetagStrategy;
use retag_value::{Node, NodeRef, Value};
use serde::Serialize;

/// Counters collected during one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RetagReport {
    /// Values entered, leaves included
    pub values_visited: usize,
    /// Container nodes entered
    pub nodes_visited: usize,
    /// Strategy invocations (one per tagged node per path)
    pub strategy_calls: usize,
    /// Strategy invocations that left a different tag behind
    pub tags_changed: usize,
    /// Deepest recursion level reached
    pub max_depth: usize,
}

/// Traversal driver bound to one strategy
///
/// # Example
/// ```rust
/// use retag_engine::Retagger;
/// use retag_strategy::Rebase;
/// use retag_value::{Tag, Value};
///
/// let root = Value::sequence([Value::sequence([]).blessed("AOne")]).blessed("Root");
/// let report = Retagger::new(Rebase::new()).run_with_report(&root, "And")?;
///
/// assert_eq!(report.strategy_calls, 2);
/// assert_eq!(report.tags_changed, 2);
/// assert_eq!(root.tag(), Some(Tag::new("And::Root")));
/// # Ok::<(), retag_engine::RetagError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Retagger<S> {
    strategy: S,
    config: RetagConfig,
    start_depth: usize,
}

impl<S: RetagStrategy> Retagger<S> {
    /// Create driver with default configuration
    #[inline]
    #[must_use]
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            config: RetagConfig::default(),
            start_depth: 0,
        }
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

    /// Active strategy
    #[inline]
    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Retag everything reachable from `root` and hand `root` back
    ///
    /// # Errors
    /// Returns [`RetagError::RecursionLimitExceeded`] if the walk goes deeper than
    /// the configured ceiling. Retags applied before that point are kept.
    pub fn run<'v>(&self, root: &'v Value, namespace: &str) -> RetagResult<&'v Value> {
        self.run_with_report(root, namespace)?;
        Ok(root)
    }

    /// Retag everything reachable from `root` and report what was visited
    ///
    /// # Errors
    /// Same as [`Retagger::run`]
    pub fn run_with_report(&self, root: &Value, namespace: &str) -> RetagResult<RetagReport> {
        let limit = self.config.effective_max_depth();
        tracing::debug!(
            strategy = self.strategy.name(),
            namespace,
            max_depth = limit,
            start_depth = self.start_depth,
            "starting retag"
        );

        let mut walk = Walk {
            strategy: &self.strategy,
            namespace,
            limit,
            report: RetagReport::default(),
        };

        match walk.visit(root, self.start_depth) {
            Ok(()) => {
                tracing::debug!(
                    strategy = self.strategy.name(),
                    visited = walk.report.values_visited,
                    calls = walk.report.strategy_calls,
                    changed = walk.report.tags_changed,
                    max_depth = walk.report.max_depth,
                    "retag finished"
                );
                Ok(walk.report)
            }
            Err(e) => {
                tracing::warn!(
                    strategy = self.strategy.name(),
                    calls = walk.report.strategy_calls,
                    "retag aborted: {}",
                    e
                );
                Err(e)
            }
        }
    }
}

/// State of one traversal
struct Walk<'a, S: ?Sized> {
    strategy: &'a S,
    namespace: &'a str,
    limit: usize,
    report: RetagReport,
}

impl<S: RetagStrategy + ?Sized> Walk<'_, S> {
    fn visit(&mut self, value: &Value, depth: usize) -> RetagResult<()> {
        match value {
            Value::Leaf(_) => self.enter(depth).map(|_| ()),
            Value::Node(node) => self.visit_node(node, depth),
        }
    }

    /// Count one traversal step and enforce the ceiling
    fn enter(&mut self, depth: usize) -> RetagResult<usize> {
        // The limit never exceeds MAX_DEPTH, so saturation still trips the guard
        let depth = depth.saturating_add(1);
        if depth > self.limit {
            return Err(RetagError::RecursionLimitExceeded {
                depth,
                limit: self.limit,
            });
        }
        self.report.values_visited += 1;
        self.report.max_depth = self.report.max_depth.max(depth);
        Ok(depth)
    }

    fn visit_node(&mut self, node: &NodeRef, depth: usize) -> RetagResult<()> {
        let depth = self.enter(depth)?;
        self.report.nodes_visited += 1;

        let snapshot = {
            let guard = node.read();
            guard.is_tagged().then(|| Node::clone(&guard))
        };

        // The strategy runs unlocked, so it may read the structure through any
        // handle, this node included. Aliases and cycles are re-entered below.
        let children: Vec<Value> = match snapshot {
            Some(mut edited) => {
                let before = edited.tag().cloned();
                self.strategy.apply(&mut edited, self.namespace);
                self.report.strategy_calls += 1;
                if edited.tag() != before.as_ref() {
                    self.report.tags_changed += 1;
                }
                tracing::trace!(
                    depth,
                    from = ?before,
                    to = ?edited.tag(),
                    "retagged node"
                );
                let children = edited.body().children().into_iter().cloned().collect();
                *node.write() = edited;
                children
            }
            None => node.read().body().children().into_iter().cloned().collect(),
        };

        for child in &children {
            self.visit(child, depth)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retag_strategy::{CustomEditor, Rebase, Rebless};
    use retag_value::{Body, Mapping, Node, Tag};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn chain(levels: usize) -> Value {
        let mut value = Value::from(0);
        for _ in 0..levels {
            value = Value::scalar_ref(value).blessed("Link");
        }
        value
    }

    #[test]
    fn leaf_root_is_visited_once() {
        let root = Value::from("lonely");
        let report = Retagger::new(Rebless).run_with_report(&root, "X").unwrap();
        assert_eq!(report.values_visited, 1);
        assert_eq!(report.nodes_visited, 0);
        assert_eq!(report.strategy_calls, 0);
        assert_eq!(report.max_depth, 1);
    }

    #[test]
    fn report_counts_leaves_and_nodes() {
        let root = Value::mapping([
            ("a", Value::from(1)),
            ("b", Value::sequence([Value::from(2), Value::from(3)]).blessed("B")),
        ]);
        let report = Retagger::new(Rebless).run_with_report(&root, "X").unwrap();
        assert_eq!(report.values_visited, 5);
        assert_eq!(report.nodes_visited, 2);
        assert_eq!(report.strategy_calls, 1);
        assert_eq!(report.max_depth, 3);
    }

    #[test]
    fn run_returns_same_root() {
        let root = Value::sequence([]).blessed("AOne");
        let returned = Retagger::new(Rebless).run(&root, "Beatless").unwrap();
        assert!(returned
            .as_node()
            .unwrap()
            .ptr_eq(root.as_node().unwrap()));
        assert_eq!(returned.tag(), Some(Tag::new("Beatless")));
    }

    #[test]
    fn chain_at_ceiling_passes() {
        // 999 links plus the leaf sit on levels 1..=1000
        let root = chain(999);
        let report = Retagger::new(Rebless).run_with_report(&root, "X").unwrap();
        assert_eq!(report.max_depth, 1000);
        assert_eq!(report.strategy_calls, 999);
    }

    #[test]
    fn chain_past_ceiling_fails() {
        let root = chain(1000);
        let err = Retagger::new(Rebless).run(&root, "X").unwrap_err();
        assert!(matches!(
            err,
            RetagError::RecursionLimitExceeded {
                depth: 1001,
                limit: 1000
            }
        ));
    }

    #[test]
    fn maximal_start_depth_is_rejected() {
        let root = chain(1);
        let err = Retagger::new(Rebless)
            .starting_at(usize::MAX)
            .run(&root, "X")
            .unwrap_err();
        assert!(matches!(
            err,
            RetagError::RecursionLimitExceeded {
                depth: usize::MAX,
                limit: 1000
            }
        ));
        assert_eq!(root.tag(), Some(Tag::new("Link")));
    }

    #[test]
    fn raised_ceiling_is_clamped_on_cycles() {
        let node = NodeRef::new(Node::tagged("Loop", Body::ScalarRef(Value::undef())));
        *node.write().body_mut() = Body::ScalarRef(Value::Node(node.clone()));
        let root = Value::Node(node.clone());

        let err = Retagger::new(Rebless)
            .with_config(RetagConfig::new().with_max_depth(10_000_000))
            .run(&root, "X")
            .unwrap_err();
        assert!(matches!(
            err,
            RetagError::RecursionLimitExceeded {
                depth: 1001,
                limit: 1000
            }
        ));

        *node.write().body_mut() = Body::ScalarRef(Value::undef());
    }

    #[test]
    fn editor_may_lock_the_node_it_edits() {
        let root = Value::sequence([Value::sequence([]).blessed("Inner")]).blessed("Outer");
        let observed = root.clone();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let editor = CustomEditor::new(move |node: &mut Node, ns: &str| {
            log.lock().push(observed.tag().map(Tag::into_string));
            node.bless(ns);
        });

        Retagger::new(editor).run(&root, "X").unwrap();

        // The root is written back once its own edit returns
        assert_eq!(
            *seen.lock(),
            vec![Some("Outer".to_string()), Some("X".to_string())]
        );
        assert_eq!(root.at(0).unwrap().tag(), Some(Tag::new("X")));
    }

    #[test]
    fn unchanged_tags_are_not_counted_as_changes() {
        let root = Value::sequence([Value::sequence([]).blessed("X")]).blessed("Y");
        let report = Retagger::new(Rebless).run_with_report(&root, "X").unwrap();
        assert_eq!(report.strategy_calls, 2);
        assert_eq!(report.tags_changed, 1);
    }

    #[test]
    fn failure_keeps_ancestor_retags() {
        let root = chain(5);
        let config = RetagConfig::new().with_max_depth(3);
        let err = Retagger::new(Rebless)
            .with_config(config)
            .run(&root, "Partial")
            .unwrap_err();
        assert!(err.is_recursion_limit());

        let tags: Vec<String> = root
            .tags_preorder()
            .into_iter()
            .map(Tag::into_string)
            .collect();
        assert_eq!(tags, vec!["Partial", "Partial", "Partial", "Link", "Link"]);
    }

    #[test]
    fn start_depth_counts_against_ceiling() {
        let root = chain(2);
        let config = RetagConfig::new().with_max_depth(5);

        assert!(Retagger::new(Rebless)
            .with_config(config.clone())
            .starting_at(2)
            .run(&root, "X")
            .is_ok());
        assert!(Retagger::new(Rebless)
            .with_config(config)
            .starting_at(3)
            .run(&root, "X")
            .is_err());
    }

    #[test]
    fn cycle_hits_ceiling_instead_of_hanging() {
        let node = NodeRef::new(Node::tagged("Loop", Body::ScalarRef(Value::undef())));
        *node.write().body_mut() = Body::ScalarRef(Value::Node(node.clone()));
        let root = Value::Node(node.clone());

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let counting = CustomEditor::new(move |_: &mut Node, _: &str| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let err = Retagger::new(counting)
            .with_config(RetagConfig::new().with_max_depth(50))
            .run(&root, "X")
            .unwrap_err();
        assert!(err.is_recursion_limit());
        assert_eq!(calls.load(Ordering::SeqCst), 50);

        // Break the cycle so the test does not leak
        *node.write().body_mut() = Body::ScalarRef(Value::undef());
    }

    #[test]
    fn compound_slots_are_all_walked() {
        let mut mapping = Mapping::new();
        mapping.insert("m".to_string(), Value::sequence([]).blessed("M"));
        let root = Value::compound(
            Value::sequence([]).blessed("S"),
            vec![Value::sequence([]).blessed("Q")],
            mapping,
        )
        .blessed("C");

        Retagger::new(Rebase::new()).run(&root, "Z").unwrap();

        let tags: Vec<String> = root
            .tags_preorder()
            .into_iter()
            .map(Tag::into_string)
            .collect();
        assert_eq!(tags, vec!["Z::C", "Z::S", "Z::Q", "Z::M"]);
    }

    #[test]
    fn strategy_sees_tag_before_children() {
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let log = Arc::clone(&order);
        let recorder = CustomEditor::new(move |node: &mut Node, _: &str| {
            if let Some(tag) = node.tag() {
                log.lock().push(tag.to_string());
            }
        });

        let root = Value::sequence([
            Value::sequence([Value::sequence([]).blessed("Grandchild")]).blessed("Child"),
            Value::sequence([]).blessed("Sibling"),
        ])
        .blessed("Parent");
        Retagger::new(recorder).run(&root, "").unwrap();

        assert_eq!(
            *order.lock(),
            vec!["Parent", "Child", "Grandchild", "Sibling"]
        );
    }

    #[test]
    fn dyn_strategy_drives_walk() {
        let strategy: Arc<dyn RetagStrategy> = Arc::new(Rebless);
        let root = Value::sequence([Value::sequence([]).blessed("Inner")]);
        Retagger::new(strategy).run(&root, "Outer").unwrap();
        assert_eq!(root.at(0).unwrap().tag(), Some(Tag::new("Outer")));
    }
}
