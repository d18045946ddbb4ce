//! Dependency Grouper
//!
//! Runs the three stages end to end: normalize, assign levels, materialize.

use crate::config::GroupingOptions;
use crate::graph::{
    assign_levels_with, materialize, normalize, Graph, GroupingResult, Groups, NodeKey,
};

/// Groups dependency mappings according to a fixed set of options.
///
/// Holds no state between calls; one grouper can be shared by any number of
/// threads.
#[derive(Debug, Clone, Default)]
pub struct DependencyGrouper {
    options: GroupingOptions,
}

impl DependencyGrouper {
    /// Create a grouper with the given options.
    pub fn new(options: GroupingOptions) -> Self {
        Self { options }
    }

    /// Get the options this grouper runs with.
    pub fn options(&self) -> &GroupingOptions {
        &self.options
    }

    /// Group a raw `node -> dependencies` mapping.
    pub fn group<N, I, D>(&self, raw: I) -> GroupingResult<Groups<N>, N>
    where
        N: NodeKey,
        I: IntoIterator<Item = (N, D)>,
        D: IntoIterator<Item = N>,
    {
        self.group_graph(normalize(raw)?)
    }

    /// Group an already normalized graph.
    pub fn group_graph<N: NodeKey>(&self, graph: Graph<N>) -> GroupingResult<Groups<N>, N> {
        let levels = assign_levels_with(graph, self.options.cycle_report)?;
        Ok(materialize(levels))
    }
}

/// Group a raw `node -> dependencies` mapping with default options.
///
/// Nodes nothing depends on land in the first group; nodes everything else
/// transitively needs land in the last one.
///
/// ```
/// use std::collections::HashMap;
/// use strata_core::group_by_dependencies;
///
/// let raw = HashMap::from([
///     ("app", vec!["lib", "log"]),
///     ("lib", vec!["log"]),
/// ]);
/// let groups = group_by_dependencies(raw).unwrap();
///
/// assert_eq!(groups.to_sorted(), vec![vec!["app"], vec!["lib"], vec!["log"]]);
/// ```
pub fn group_by_dependencies<N, I, D>(raw: I) -> GroupingResult<Groups<N>, N>
where
    N: NodeKey,
    I: IntoIterator<Item = (N, D)>,
    D: IntoIterator<Item = N>,
{
    DependencyGrouper::default().group(raw)
}
