//! Public retag operations
//!
//! Thin wrappers that pick a strategy and hand it to [`Retagger`]:
//!
//! | Operation | Tag after retag under `NS` |
//! |---|---|
//! | [`rebless`] | `NS` |
//! | [`rebase`] | `NS::old` |
//! | [`retag_custom`] | whatever the editor writes |
//!
//! Every operation returns the root it was given.

use crate::config::RetagOptions;
use crate::engine::Retagger;
use crate::error::{RetagError, RetagResult};
use retag_strategy::{Rebase, Rebless, StrategyRegistry, CUSTOM};
use retag_value::Value;

/// Replace the tag of every tagged node with `namespace`
///
/// # Errors
/// Returns [`RetagError::RecursionLimitExceeded`] for structures deeper than
/// the default ceiling
pub fn rebless<'v>(root: &'v Value, namespace: &str) -> RetagResult<&'v Value> {
    rebless_with(root, namespace, &RetagOptions::default())
}

/// [`rebless`] with explicit configuration and starting depth
///
/// # Errors
/// Same as [`rebless`], against `options.config.max_depth`
pub fn rebless_with<'v>(
    root: &'v Value,
    namespace: &str,
    options: &RetagOptions,
) -> RetagResult<&'v Value> {
    Retagger::new(Rebless)
        .with_config(options.config.clone())
        .starting_at(options.start_depth)
        .run(root, namespace)
}

/// Move every tagged node under `namespace`
///
/// `AOne` becomes `namespace::AOne`.
///
/// # Errors
/// Returns [`RetagError::RecursionLimitExceeded`] for structures deeper than
/// the default ceiling
pub fn rebase<'v>(root: &'v Value, namespace: &str) -> RetagResult<&'v Value> {
    rebase_with(root, namespace, &RetagOptions::default())
}

/// [`rebase`] with explicit configuration and starting depth
///
/// The separator comes from `options.config.separator`.
///
/// # Errors
/// Same as [`rebase`], against `options.config.max_depth`
pub fn rebase_with<'v>(
    root: &'v Value,
    namespace: &str,
    options: &RetagOptions,
) -> RetagResult<&'v Value> {
    let strategy = Rebase::new().with_separator(options.config.separator.as_str());
    Retagger::new(strategy)
        .with_config(options.config.clone())
        .starting_at(options.start_depth)
        .run(root, namespace)
}

/// Hand every tagged node to the editor in `options`
///
/// # Errors
/// - [`RetagError::Configuration`] if `options` has no editor; nothing is visited
/// - [`RetagError::RecursionLimitExceeded`] for structures deeper than the ceiling
pub fn retag_custom<'v>(
    root: &'v Value,
    namespace: &str,
    options: &RetagOptions,
) -> RetagResult<&'v Value> {
    let editor = options.custom_editor().ok_or_else(RetagError::missing_editor)?;
    Retagger::new(editor)
        .with_config(options.config.clone())
        .starting_at(options.start_depth)
        .run(root, namespace)
}

/// Retag with a strategy looked up by name
///
/// `custom` always resolves to the editor in `options`; every other name is
/// looked up in `registry`. Registered strategies keep their own settings, so
/// `options.config.separator` does not apply to them.
///
/// # Errors
/// - [`RetagError::Configuration`] for an unknown name or a missing editor
/// - [`RetagError::RecursionLimitExceeded`] for structures deeper than the ceiling
pub fn retag_named<'v>(
    root: &'v Value,
    namespace: &str,
    name: &str,
    registry: &StrategyRegistry,
    options: &RetagOptions,
) -> RetagResult<&'v Value> {
    if name == CUSTOM {
        return retag_custom(root, namespace, options);
    }

    let strategy = registry
        .get(name)
        .ok_or_else(|| RetagError::unknown_strategy(name))?;
    Retagger::new(strategy)
        .with_config(options.config.clone())
        .starting_at(options.start_depth)
        .run(root, namespace)
}
