//! Level Assignment
//!
//! Assigns every node of a normalized graph an integer level such that each
//! node sits strictly before everything it depends on.
//!
//! # Algorithm
//!
//! This is Kahn's algorithm run on the "is depended upon by" relation and
//! batched by wavefront:
//!
//! 1. Count the pending dependents of every node in one pass over the edges.
//! 2. The first wavefront is every node nobody depends on.
//! 3. Give the whole wavefront the current level, then release each of its
//!    dependencies once. A dependency whose pending count drops to zero joins
//!    the next wavefront.
//! 4. Repeat until the wavefront is empty.
//!
//! A node's level is therefore `1 + max(level of its dependents)`, or `0` if
//! it has none. A node with no dependencies of its own is *not* level 0 when
//! something needs it: it waits for the last of its dependents.
//!
//! Every edge is touched twice and every node joins exactly one wavefront, so
//! the whole pass is `O(V + E)` regardless of shape (long chains, wide stars).
//!
//! If some nodes never reach a pending count of zero, they sit on or behind a
//! cycle and no level assignment exists.

use std::collections::HashMap;

use indexmap::IndexSet;
use serde::ser::{Serialize, Serializer};
use tracing::{debug, warn};

use super::cycle;
use super::error::{GroupingError, GroupingResult};
use super::node::NodeKey;
use super::normalize::Graph;
use crate::config::CycleReport;

/// The level of every node of a graph.
#[derive(Debug, Clone)]
pub struct Levels<N> {
    /// Nodes in the same order as the graph they came from.
    nodes: IndexSet<N>,

    /// `levels[i]` is the level of `nodes[i]`.
    levels: Vec<usize>,

    /// Number of distinct levels.
    depth: usize,
}

impl<N: NodeKey> Levels<N> {
    /// Get the level of a node.
    pub fn get(&self, node: &N) -> Option<usize> {
        self.nodes.get_index_of(node).map(|index| self.levels[index])
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node has a level.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of distinct levels, which is the highest level plus one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Iterate over `(node, level)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&N, usize)> + '_ {
        self.nodes.iter().zip(self.levels.iter().copied())
    }

    /// Copy the levels into a plain map.
    pub fn to_map(&self) -> HashMap<N, usize> {
        self.iter().map(|(node, level)| (node.clone(), level)).collect()
    }

    pub(crate) fn into_parts(self) -> (IndexSet<N>, Vec<usize>, usize) {
        (self.nodes, self.levels, self.depth)
    }
}

impl<N: NodeKey + Serialize> Serialize for Levels<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Assign levels, tracing the offending cycle on failure.
pub fn assign_levels<N: NodeKey>(graph: Graph<N>) -> GroupingResult<Levels<N>, N> {
    assign_levels_with(graph, CycleReport::default())
}

/// Assign levels, reporting cycles as configured.
///
/// Fails with [`GroupingError::CycleDetected`] if the graph has a cycle; no
/// partial assignment is returned.
pub fn assign_levels_with<N: NodeKey>(
    graph: Graph<N>,
    report: CycleReport,
) -> GroupingResult<Levels<N>, N> {
    let node_count = graph.node_count();
    let targets = graph.targets();

    let mut pending = vec![0usize; node_count];
    for dependencies in targets {
        for &dependency in dependencies {
            pending[dependency] += 1;
        }
    }

    let mut levels = vec![0usize; node_count];
    let mut frontier: Vec<usize> = (0..node_count).filter(|&node| pending[node] == 0).collect();
    let mut next = Vec::new();
    let mut depth = 0;
    let mut assigned = 0;

    while !frontier.is_empty() {
        for &node in &frontier {
            levels[node] = depth;
            for &dependency in &targets[node] {
                pending[dependency] -= 1;
                // Edges are distinct, so this fires once per node.
                if pending[dependency] == 0 {
                    next.push(dependency);
                }
            }
        }

        assigned += frontier.len();
        depth += 1;
        frontier.clear();
        std::mem::swap(&mut frontier, &mut next);
    }

    if assigned < node_count {
        let unresolved = node_count - assigned;
        let members: Vec<usize> = match report {
            CycleReport::Trace => cycle::trace(targets, &pending),
            CycleReport::First => cycle::first_unresolved(&pending).into_iter().collect(),
        };
        let cycle: Vec<N> = members
            .into_iter()
            .map(|index| graph.node_at(index).clone())
            .collect();

        warn!(unresolved, ?cycle, "dependency cycle detected");
        return Err(GroupingError::cycle(cycle, unresolved));
    }

    debug!(nodes = node_count, levels = depth, "assigned dependency levels");

    Ok(Levels {
        nodes: graph.into_nodes(),
        levels,
        depth,
    })
}
