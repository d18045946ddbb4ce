//! Group Materializer
//!
//! Collects nodes that share a level into one group and orders the groups by
//! ascending level. Group 0 holds the nodes nothing depends on; the last
//! group holds the nodes transitively required by the most.
//!
//! Groups are sets. No order is promised among the members of a group; sort
//! at the presentation boundary if a stable order is needed.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::levels::Levels;
use super::node::NodeKey;

/// An ordered sequence of unordered groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Groups<N: NodeKey> {
    groups: Vec<HashSet<N>>,
}

impl<N: NodeKey> Groups<N> {
    /// Get the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get the group at the given level.
    pub fn get(&self, level: usize) -> Option<&HashSet<N>> {
        self.groups.get(level)
    }

    /// Iterate over the groups in ascending level order.
    pub fn iter(&self) -> std::slice::Iter<'_, HashSet<N>> {
        self.groups.iter()
    }

    /// Total number of nodes across all groups.
    pub fn node_count(&self) -> usize {
        self.groups.iter().map(HashSet::len).sum()
    }

    /// Find the index of the group containing a node.
    ///
    /// This is a linear scan over the groups.
    pub fn position(&self, node: &N) -> Option<usize> {
        self.groups.iter().position(|group| group.contains(node))
    }

    /// Unwrap into the plain list of sets.
    pub fn into_inner(self) -> Vec<HashSet<N>> {
        self.groups
    }

    /// Copy the groups out with members sorted, for display and comparison.
    pub fn to_sorted(&self) -> Vec<Vec<N>>
    where
        N: Ord,
    {
        self.groups
            .iter()
            .map(|group| {
                let mut members: Vec<N> = group.iter().cloned().collect();
                members.sort();
                members
            })
            .collect()
    }
}

impl<N: NodeKey> IntoIterator for Groups<N> {
    type Item = HashSet<N>;
    type IntoIter = std::vec::IntoIter<HashSet<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a, N: NodeKey> IntoIterator for &'a Groups<N> {
    type Item = &'a HashSet<N>;
    type IntoIter = std::slice::Iter<'a, HashSet<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Turn a level assignment into ordered groups.
///
/// An empty assignment yields no groups at all, not one empty group.
pub fn materialize<N: NodeKey>(levels: Levels<N>) -> Groups<N> {
    let (nodes, levels, depth) = levels.into_parts();

    let mut sizes = vec![0usize; depth];
    for &level in &levels {
        sizes[level] += 1;
    }

    let mut groups: Vec<HashSet<N>> = sizes.into_iter().map(HashSet::with_capacity).collect();
    for (node, level) in nodes.into_iter().zip(levels) {
        groups[level].insert(node);
    }

    debug!(groups = groups.len(), "materialized dependency groups");

    Groups { groups }
}
