//! Cycle diagnostics
//!
//! Runs only after level assignment has failed. At that point every node
//! still holding a non-zero pending count is unresolved, and every
//! unresolved node has at least one unresolved dependent (that is what keeps
//! its count above zero). Repeatedly stepping from a node to one of its
//! unresolved dependents must therefore revisit a node, and the revisited
//! stretch is a real cycle.
//!
//! The walk is linear: one pass over the edges to pick a dependent per node,
//! then at most `V` steps.

use super::normalize::Targets;

/// Index of the first node that never received a level.
pub(crate) fn first_unresolved(pending: &[usize]) -> Option<usize> {
    pending.iter().position(|&count| count > 0)
}

/// Find one cycle among the unresolved nodes.
///
/// The result is in depends-on order: each node depends on the next, and the
/// last depends on the first. Empty if nothing is unresolved.
pub(crate) fn trace(targets: &[Targets], pending: &[usize]) -> Vec<usize> {
    let Some(start) = first_unresolved(pending) else {
        return Vec::new();
    };

    // held_by[w] is some unresolved node depending on w.
    let mut held_by: Vec<Option<usize>> = vec![None; targets.len()];
    for (source, dependencies) in targets.iter().enumerate() {
        if pending[source] == 0 {
            continue;
        }
        for &dependency in dependencies {
            held_by[dependency] = Some(source);
        }
    }

    let mut position: Vec<Option<usize>> = vec![None; targets.len()];
    let mut path = Vec::new();
    let mut current = start;

    loop {
        if let Some(index) = position[current] {
            // path runs dependency -> dependent, flip it.
            let mut cycle = path.split_off(index);
            cycle.reverse();
            return cycle;
        }

        position[current] = Some(path.len());
        path.push(current);

        match held_by[current] {
            Some(dependent) => current = dependent,
            None => return path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::normalize::normalize;

    fn pending_counts(targets: &[Targets]) -> Vec<usize> {
        let mut pending = vec![0; targets.len()];
        for dependencies in targets {
            for &dependency in dependencies {
                pending[dependency] += 1;
            }
        }
        pending
    }

    fn names(graph: &crate::graph::Graph<&'static str>, cycle: &[usize]) -> Vec<&'static str> {
        cycle.iter().map(|&index| *graph.node_at(index)).collect()
    }

    #[test]
    fn nothing_unresolved_gives_empty_trace() {
        let graph = normalize(vec![("A", vec!["B"])]).unwrap();
        assert!(trace(graph.targets(), &[0, 0]).is_empty());
        assert_eq!(first_unresolved(&[0, 0]), None);
    }

    #[test]
    fn trace_follows_depends_on_order() {
        let graph = normalize(vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec!["A"])]).unwrap();
        let targets = graph.targets();
        let cycle = names(&graph, &trace(targets, &pending_counts(targets)));

        assert_eq!(cycle.len(), 3);
        for (i, node) in cycle.iter().enumerate() {
            let next = cycle[(i + 1) % cycle.len()];
            assert!(graph.dependencies_of(node).unwrap().any(|dep| *dep == next));
        }
    }

    #[test]
    fn trace_skips_acyclic_tail() {
        // T hangs off the cycle and is unresolved too, but is not on it.
        let graph = normalize(vec![
            ("T", vec![]),
            ("X", vec!["Y"]),
            ("Y", vec!["X", "T"]),
        ])
        .unwrap();
        let targets = graph.targets();

        let mut cycle = names(&graph, &trace(targets, &pending_counts(targets)));
        cycle.sort();
        assert_eq!(cycle, vec!["X", "Y"]);
    }
}
