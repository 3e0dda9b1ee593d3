//! # Pane identifiers
//!
//! Pane and split ids are opaque strings. New ids are minted through an
//! [`IdGenerator`] handed to every operation that creates nodes, so the
//! embedding application decides how ids look. The engine relies on the
//! generator never repeating a value that is still in the tree.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Default prefix for generated pane ids.
pub const DEFAULT_ID_PREFIX: &str = "pane";

/// Identifier of a pane (leaf or split).
///
/// # Example
///
/// ```rust
/// use workbench_core::PaneId;
///
/// let id = PaneId::from("editor");
/// assert_eq!(id.as_str(), "editor");
/// assert_eq!(id.to_string(), "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    /// Create an id from any string.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PaneId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for PaneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PaneId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PaneId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PaneId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Source of fresh pane ids.
pub trait IdGenerator {
    /// Produce an id that does not collide with any id handed out before.
    fn next_id(&mut self) -> PaneId;
}

/// Generate a random pane id of the form `pane-<uuid>`.
///
/// # Example
///
/// ```rust
/// use workbench_core::ids::generate_pane_id;
///
/// let a = generate_pane_id();
/// let b = generate_pane_id();
/// assert!(a.as_str().starts_with("pane-"));
/// assert_ne!(a, b);
/// ```
pub fn generate_pane_id() -> PaneId {
    PaneId(format!("{}-{}", DEFAULT_ID_PREFIX, Uuid::new_v4()))
}

/// Random ids backed by UUID v4.
#[derive(Debug, Clone)]
pub struct UuidIdGenerator {
    prefix: String,
}

impl UuidIdGenerator {
    /// Create a generator with the default `pane` prefix.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    /// Create a generator with a custom prefix.
    pub fn with_prefix<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> PaneId {
        PaneId(format!("{}-{}", self.prefix, Uuid::new_v4()))
    }
}

/// Deterministic ids of the form `<prefix>-<n>`.
///
/// Useful for tests and reproducible sessions. The counter starts at 1.
///
/// # Example
///
/// ```rust
/// use workbench_core::ids::{IdGenerator, SequentialIdGenerator};
///
/// let mut ids = SequentialIdGenerator::new("n");
/// assert_eq!(ids.next_id().as_str(), "n-1");
/// assert_eq!(ids.next_id().as_str(), "n-2");
/// ```
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: u64,
}

impl SequentialIdGenerator {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> PaneId {
        self.counter += 1;
        PaneId(format!("{}-{}", self.prefix, self.counter))
    }
}
