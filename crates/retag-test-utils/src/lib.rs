//! Testing utilities for the retag workspace
//!
//! Shared fixtures, generated trees, and tracing setup.

#![allow(missing_docs)]

use proptest::prelude::*;
use retag_value::{Tag, Value};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once; later calls are no-ops
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// The reference structure:
///
/// ```text
/// AOne {
///   one: AOne { hey: "ho" },
///   two: ATwo { list: [ AThree { three: 3 }, 5, "noise" ] },
/// }
/// ```
pub fn beatles() -> Value {
    Value::mapping([
        (
            "one",
            Value::mapping([("hey", Value::from("ho"))]).blessed("AOne"),
        ),
        (
            "two",
            Value::mapping([(
                "list",
                Value::sequence([
                    Value::mapping([("three", Value::from(3))]).blessed("AThree"),
                    Value::from(5),
                    Value::from("noise"),
                ]),
            )])
            .blessed("ATwo"),
        ),
    ])
    .blessed("AOne")
}

/// `levels` nested scalar references, each tagged `tag`, ending in a leaf
pub fn chain(levels: usize, tag: &str) -> Value {
    let mut value = Value::from(0);
    for _ in 0..levels {
        value = Value::scalar_ref(value).blessed(tag);
    }
    value
}

/// Tags in depth-first pre-order, as plain strings
pub fn tags_of(value: &Value) -> Vec<String> {
    value
        .tags_preorder()
        .into_iter()
        .map(Tag::into_string)
        .collect()
}

/// Plain description of an acyclic tree, rebuilt fresh for every test case
#[derive(Debug, Clone)]
pub enum TreeSpec {
    Leaf(i64),
    ScalarRef {
        tag: Option<String>,
        inner: Box<TreeSpec>,
    },
    Sequence {
        tag: Option<String>,
        items: Vec<TreeSpec>,
    },
    Mapping {
        tag: Option<String>,
        entries: Vec<TreeSpec>,
    },
}

impl TreeSpec {
    /// Build a live value; mapping keys are `k0`, `k1`, ...
    pub fn build(&self) -> Value {
        let (value, tag) = match self {
            Self::Leaf(n) => return Value::from(*n),
            Self::ScalarRef { tag, inner } => (Value::scalar_ref(inner.build()), tag),
            Self::Sequence { tag, items } => {
                (Value::sequence(items.iter().map(Self::build)), tag)
            }
            Self::Mapping { tag, entries } => (
                Value::mapping(
                    entries
                        .iter()
                        .enumerate()
                        .map(|(i, entry)| (format!("k{i}"), entry.build())),
                ),
                tag,
            ),
        };
        match tag {
            Some(tag) => value.blessed(tag.as_str()),
            None => value,
        }
    }

    /// Tags in the order a depth-first pre-order walk meets them
    pub fn tags(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_tags(&mut out);
        out
    }

    fn collect_tags(&self, out: &mut Vec<String>) {
        let (tag, children): (&Option<String>, Vec<&TreeSpec>) = match self {
            Self::Leaf(_) => return,
            Self::ScalarRef { tag, inner } => (tag, vec![inner.as_ref()]),
            Self::Sequence { tag, items } => (tag, items.iter().collect()),
            Self::Mapping { tag, entries } => (tag, entries.iter().collect()),
        };
        if let Some(tag) = tag {
            out.push(tag.clone());
        }
        for child in children {
            child.collect_tags(out);
        }
    }
}

fn arb_tag() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Z][a-z]{0,5}")
}

/// Generated trees of scalar refs, sequences and mappings
pub fn arb_tree() -> impl Strategy<Value = TreeSpec> {
    let leaf = any::<i64>().prop_map(TreeSpec::Leaf);
    leaf.prop_recursive(6, 64, 4, |inner| {
        prop_oneof![
            (arb_tag(), inner.clone()).prop_map(|(tag, inner)| TreeSpec::ScalarRef {
                tag,
                inner: Box::new(inner),
            }),
            (arb_tag(), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(tag, items)| TreeSpec::Sequence { tag, items }),
            (arb_tag(), prop::collection::vec(inner, 0..4))
                .prop_map(|(tag, entries)| TreeSpec::Mapping { tag, entries }),
        ]
    })
}
