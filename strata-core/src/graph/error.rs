//! Error types for grouping operations
//!
//! Grouping is total except for two cases: malformed identifiers, which are
//! rejected before any work is done, and cyclic dependency sets, which are
//! detected by level assignment.

use std::fmt::Debug;
use thiserror::Error;

/// Result type for grouping operations over identifiers of type `N`
pub type GroupingResult<T, N> = Result<T, GroupingError<N>>;

/// Errors that can occur while grouping a dependency graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GroupingError<N: Debug> {
    /// A key or dependency value is not a usable identifier
    #[error("invalid node identifier {node:?}: {reason}")]
    InvalidNode {
        /// The rejected identifier
        node: N,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The dependency set contains at least one cycle
    #[error("dependency cycle involving {cycle:?} ({unresolved} node(s) left without a level)")]
    CycleDetected {
        /// Nodes on the cycle, in depends-on order. Holds a single
        /// unresolved node when cycle tracing is disabled.
        cycle: Vec<N>,
        /// Number of nodes that could not be assigned a level
        unresolved: usize,
    },
}

impl<N: Debug> GroupingError<N> {
    /// Creates an invalid node error
    pub fn invalid_node(node: N, reason: &'static str) -> Self {
        Self::InvalidNode { node, reason }
    }

    /// Creates a cycle detected error
    pub fn cycle(cycle: Vec<N>, unresolved: usize) -> Self {
        Self::CycleDetected { cycle, unresolved }
    }

    /// Returns true if this error reports a dependency cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }

    /// Returns the reported cycle members, if this is a cycle error
    pub fn cycle_nodes(&self) -> Option<&[N]> {
        match self {
            Self::CycleDetected { cycle, .. } => Some(cycle),
            _ => None,
        }
    }
}
