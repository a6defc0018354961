//! Runtime type tags
//!
//! Provides [`Tag`], the runtime type identifier attached to tagged nodes.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator between the segments of a hierarchical tag
pub const DEFAULT_SEPARATOR: &str = "::";

/// Runtime type identifier of a tagged node
///
/// A tag is an opaque name. Hierarchical tags join their segments with
/// [`DEFAULT_SEPARATOR`], so `And::AOne` has the segments `["And", "AOne"]`.
/// Tags are never validated: any string, including the empty one, is a tag.
///
/// # Examples
/// - `AOne` → single segment
/// - `And::AOne` → rooted at `And`, leaf `AOne`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Create tag from a name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Full tag name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into segments on [`DEFAULT_SEPARATOR`]
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(DEFAULT_SEPARATOR)
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Outermost segment
    #[inline]
    #[must_use]
    pub fn root(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// Innermost segment
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0
            .rsplit(DEFAULT_SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// Prefix this tag with `namespace`, joined by `separator`
    ///
    /// `Tag::new("AOne").rebased("And", "::")` is `And::AOne`.
    #[inline]
    #[must_use]
    pub fn rebased(&self, namespace: &str, separator: &str) -> Self {
        Self(format!("{namespace}{separator}{}", self.0))
    }

    /// Check whether this tag lives under `namespace`
    ///
    /// # Examples
    /// - `And::AOne` is under `And`
    /// - `Andrew::AOne` is NOT under `And`
    #[inline]
    #[must_use]
    pub fn is_under(&self, namespace: &str) -> bool {
        self.0
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with(DEFAULT_SEPARATOR))
    }

    /// Consume into the owned name
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
