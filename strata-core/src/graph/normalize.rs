//! Graph Normalizer
//!
//! Turns a raw `node -> dependencies` mapping into a closed graph. Every
//! identifier that shows up anywhere, as a key or only as a dependency value,
//! becomes a node. Identifiers that never appear as keys are leaves with no
//! dependencies of their own.
//!
//! Nodes are interned into dense indices in discovery order, so the later
//! stages can keep their working state in plain vectors instead of hash maps.

use indexmap::IndexSet;
use smallvec::SmallVec;
use tracing::debug;

use super::error::{GroupingError, GroupingResult};
use super::node::NodeKey;

/// Dependency list of a single node, as dense node indices.
pub(crate) type Targets = SmallVec<[usize; 4]>;

/// A closed dependency graph.
///
/// Invariant: every edge endpoint is a node of the graph, and each
/// `(dependent, dependency)` pair is stored at most once.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    /// All nodes, in discovery order. The position is the node's index.
    nodes: IndexSet<N>,

    /// `dependencies[i]` lists the nodes that node `i` depends on.
    dependencies: Vec<Targets>,

    /// Number of distinct edges.
    edge_count: usize,
}

impl<N: NodeKey> Graph<N> {
    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of distinct dependency edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if the graph contains a node.
    pub fn contains(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Iterate over all nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    /// Get the direct dependencies of a node.
    ///
    /// Returns `None` if the node is not part of the graph.
    pub fn dependencies_of(&self, node: &N) -> Option<impl Iterator<Item = &N> + '_> {
        let index = self.nodes.get_index_of(node)?;
        Some(self.dependencies[index].iter().map(|&target| &self.nodes[target]))
    }

    /// Iterate over all edges as `(dependent, dependency)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.dependencies
            .iter()
            .enumerate()
            .flat_map(move |(source, targets)| {
                targets
                    .iter()
                    .map(move |&target| (&self.nodes[source], &self.nodes[target]))
            })
    }

    /// Build the graph with every edge reversed.
    ///
    /// Node indices are preserved.
    pub fn transpose(&self) -> Graph<N> {
        let mut dependencies: Vec<Targets> = vec![Targets::new(); self.nodes.len()];
        for (source, targets) in self.dependencies.iter().enumerate() {
            for &target in targets {
                dependencies[target].push(source);
            }
        }

        Graph {
            nodes: self.nodes.clone(),
            dependencies,
            edge_count: self.edge_count,
        }
    }

    pub(crate) fn node_at(&self, index: usize) -> &N {
        &self.nodes[index]
    }

    pub(crate) fn targets(&self) -> &[Targets] {
        &self.dependencies
    }

    pub(crate) fn into_nodes(self) -> IndexSet<N> {
        self.nodes
    }
}

/// Normalize a raw dependency mapping into a closed graph.
///
/// Accepts anything that iterates as `(key, dependencies)` pairs: a
/// `HashMap<N, Vec<N>>`, a `BTreeMap`, a vector of tuples. Keys that repeat
/// have their dependency lists merged. Self-loops are kept; level assignment
/// reports them as cycles.
///
/// Fails only if an identifier is blank.
pub fn normalize<N, I, D>(raw: I) -> GroupingResult<Graph<N>, N>
where
    N: NodeKey,
    I: IntoIterator<Item = (N, D)>,
    D: IntoIterator<Item = N>,
{
    let mut nodes = IndexSet::new();
    let mut dependencies: Vec<Targets> = Vec::new();

    for (key, values) in raw {
        let source = intern(&mut nodes, &mut dependencies, key)?;
        for value in values {
            let target = intern(&mut nodes, &mut dependencies, value)?;
            dependencies[source].push(target);
        }
    }

    // Collapse parallel edges. `stamp[t] == s` means s -> t was already kept.
    let mut stamp = vec![usize::MAX; nodes.len()];
    let mut edge_count = 0;
    for (source, targets) in dependencies.iter_mut().enumerate() {
        targets.retain(|target| {
            let target = *target;
            if stamp[target] == source {
                false
            } else {
                stamp[target] = source;
                true
            }
        });
        edge_count += targets.len();
    }

    debug!(nodes = nodes.len(), edges = edge_count, "normalized dependency graph");

    Ok(Graph {
        nodes,
        dependencies,
        edge_count,
    })
}

fn intern<N: NodeKey>(
    nodes: &mut IndexSet<N>,
    dependencies: &mut Vec<Targets>,
    node: N,
) -> GroupingResult<usize, N> {
    if node.is_blank() {
        return Err(GroupingError::invalid_node(node, "identifier is blank"));
    }

    let (index, inserted) = nodes.insert_full(node);
    if inserted {
        dependencies.push(Targets::new());
    }
    Ok(index)
}
