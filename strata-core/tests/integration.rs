//! Integration Tests for Dependency Grouping
//!
//! These tests run the full pipeline (normalize, assign levels, materialize)
//! on the reference scenarios and check the invariants on the results.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::thread;

use strata_core::{group_by_dependencies, DependencyGrouper, GroupingError, GroupingOptions};

fn sorted_groups(raw: Vec<(&'static str, Vec<&'static str>)>) -> Vec<Vec<&'static str>> {
    group_by_dependencies(raw).unwrap().to_sorted()
}

fn lineage() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("A", vec![]),
        ("B", vec!["A"]),
        ("C", vec!["A", "B"]),
        ("D", vec!["C", "B", "A"]),
        ("E", vec!["C", "D"]),
    ]
}

/// An empty mapping yields no groups at all.
#[test]
fn empty_mapping_gives_no_groups() {
    let raw: HashMap<String, Vec<String>> = HashMap::new();
    let groups = group_by_dependencies(raw).unwrap();

    assert!(groups.is_empty());
    assert_eq!(groups.len(), 0);
}

/// Every node in the lineage depends on all earlier ones.
#[test]
fn lineage_is_one_node_per_group() {
    assert_eq!(
        sorted_groups(lineage()),
        vec![vec!["E"], vec!["D"], vec!["C"], vec!["B"], vec!["A"]]
    );
}

/// Z never appears as a key but still gets a group.
#[test]
fn implicit_leaf_is_grouped() {
    let mut raw = lineage();
    raw.push(("X", vec!["Z"]));

    assert_eq!(
        sorted_groups(raw),
        vec![vec!["E", "X"], vec!["D", "Z"], vec!["C"], vec!["B"], vec!["A"]]
    );
}

/// Shared dependencies wait for every dependent; unrelated nodes go first.
#[test]
fn shared_dependencies_go_after_all_dependents() {
    let raw = vec![
        ("P1", vec!["A1", "A2", "A3"]),
        ("P2", vec!["A1", "A2", "A3"]),
        ("A1", vec![]),
        ("A2", vec![]),
        ("A3", vec![]),
        ("I", vec![]),
    ];

    assert_eq!(
        sorted_groups(raw),
        vec![vec!["I", "P1", "P2"], vec!["A1", "A2", "A3"]]
    );
}

/// A three-node loop is rejected and the error names the loop.
#[test]
fn three_node_cycle_is_rejected() {
    let raw = vec![("A", vec!["B"]), ("B", vec!["C"]), ("C", vec!["A"])];
    let err = group_by_dependencies(raw).unwrap_err();

    assert!(err.is_cycle());
    let mut cycle = err.cycle_nodes().unwrap().to_vec();
    cycle.sort();
    assert_eq!(cycle, vec!["A", "B", "C"]);
    assert!(err.to_string().starts_with("dependency cycle involving"));
}

/// A cycle anywhere fails the whole call, even next to valid nodes.
#[test]
fn cycle_in_one_component_fails_everything() {
    let mut raw = lineage();
    raw.push(("Q", vec!["R"]));
    raw.push(("R", vec!["Q"]));

    match group_by_dependencies(raw).unwrap_err() {
        GroupingError::CycleDetected { mut cycle, unresolved } => {
            cycle.sort();
            assert_eq!(cycle, vec!["Q", "R"]);
            assert_eq!(unresolved, 2);
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

/// Ordering and minimality hold for every edge of the lineage.
#[test]
fn every_edge_goes_forward_by_minimal_steps() {
    let raw = lineage();
    let groups = group_by_dependencies(raw.clone()).unwrap();

    for (dependent, dependencies) in &raw {
        let from = groups.position(dependent).unwrap();
        for dependency in dependencies {
            assert!(from < groups.position(dependency).unwrap());
        }
    }

    for (node, _) in &raw {
        let level = groups.position(node).unwrap();
        let deepest_dependent = raw
            .iter()
            .filter(|(_, deps)| deps.contains(node))
            .map(|(dependent, _)| groups.position(dependent).unwrap())
            .max();
        assert_eq!(level, deepest_dependent.map_or(0, |l| l + 1));
    }
}

/// Any map type works as input, including one parsed from JSON.
#[test]
fn mapping_parsed_from_json() {
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(
        r#"{
            "MATERIAL-1": ["GENE-1", "GENE-2"],
            "MATERIAL-2": ["GENE-2"],
            "GENE-1": []
        }"#,
    )
    .unwrap();

    let groups = group_by_dependencies(raw).unwrap();
    let json = serde_json::to_value(groups.to_sorted()).unwrap();

    assert_eq!(
        json,
        serde_json::json!([["MATERIAL-1", "MATERIAL-2"], ["GENE-1", "GENE-2"]])
    );
}

/// Independent graphs can be grouped from many threads at once.
#[test]
fn concurrent_callers_do_not_interfere() {
    let grouper = Arc::new(DependencyGrouper::new(GroupingOptions::default()));

    let handles: Vec<_> = (0..8u32)
        .map(|worker| {
            let grouper = Arc::clone(&grouper);
            thread::spawn(move || {
                let base = worker * 1_000;
                let raw: Vec<(u32, Vec<u32>)> = (0..500)
                    .map(|i| (base + i + 1, vec![base + i]))
                    .collect();
                grouper.group(raw).unwrap()
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        let groups = handle.join().unwrap();
        let base = worker as u32 * 1_000;

        assert_eq!(groups.len(), 501);
        assert_eq!(groups.get(0), Some(&HashSet::from([base + 500])));
        assert_eq!(groups.get(500), Some(&HashSet::from([base])));
    }
}
