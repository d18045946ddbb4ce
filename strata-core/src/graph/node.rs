//! Node Identifiers
//!
//! This module defines what the engine needs from a node identifier.
//!
//! Identifiers are opaque: the engine only hashes them and compares them for
//! equality. No ordering is required. The one piece of validation the engine
//! performs is rejecting "blank" identifiers (an empty string key, for
//! example), which are always a caller bug.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

/// An opaque, hashable identifier for a node in the dependency graph.
///
/// `Debug` is required so that errors can name the offending node.
pub trait NodeKey: Clone + Eq + Hash + Debug {
    /// Whether this identifier is blank and must be rejected.
    ///
    /// Defaults to `false`; string-like identifiers treat the empty string
    /// as blank.
    fn is_blank(&self) -> bool {
        false
    }
}

impl NodeKey for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl NodeKey for &str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl NodeKey for Box<str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl NodeKey for Arc<str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl NodeKey for Rc<str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl NodeKey for Cow<'_, str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! opaque_keys {
    ($($ty:ty),* $(,)?) => {
        $(impl NodeKey for $ty {})*
    };
}

opaque_keys!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char);

impl<A: NodeKey, B: NodeKey> NodeKey for (A, B) {
    fn is_blank(&self) -> bool {
        self.0.is_blank() || self.1.is_blank()
    }
}
