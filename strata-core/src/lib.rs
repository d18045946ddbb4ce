//! Strata Core
//!
//! This crate provides a dependency-level grouping engine. Given entities and
//! a directed "depends on" relation among them, it computes an ordered list
//! of groups such that every entity sits in a strictly earlier group than
//! everything it depends on.
//!
//! The defining property is that an entity is placed one level after the
//! *last* of its dependents. Something many entities need lands in the final
//! group even when it has no dependencies itself. Cyclic dependency sets are
//! rejected with a dedicated error.
//!
//! The engine is a pure, synchronous function over an in-memory graph. It
//! runs in `O(V + E)` time and keeps no state between calls.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: normalization, level assignment, cycle tracing, materialization
//! - `grouper`: the end-to-end entry points
//! - `entity`: batching of caller entities by their dependencies
//! - `config`: options for error reporting
//!
//! The crate can also be built as a Python extension module via PyO3 with
//! the `python` feature.
//!
//! # Example
//!
//! ```rust
//! use strata_core::group_by_dependencies;
//!
//! let raw = vec![
//!     ("A", vec![]),
//!     ("B", vec!["A"]),
//!     ("C", vec!["A", "B"]),
//!     ("D", vec!["C", "B", "A"]),
//!     ("E", vec!["C", "D"]),
//! ];
//! let groups = group_by_dependencies(raw).unwrap();
//!
//! assert_eq!(
//!     groups.to_sorted(),
//!     vec![vec!["E"], vec!["D"], vec!["C"], vec!["B"], vec!["A"]],
//! );
//! ```

pub mod config;
pub mod entity;
pub mod graph;
mod grouper;

#[cfg(feature = "python")]
mod python;

pub use config::{CycleReport, GroupingOptions};
pub use entity::{group_entities, BatchOrder, Dependent};
pub use graph::{Graph, GroupingError, GroupingResult, Groups, Levels, NodeKey};
pub use grouper::{group_by_dependencies, DependencyGrouper};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types and functions.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
