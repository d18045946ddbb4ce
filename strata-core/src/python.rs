//! Python Bindings
//!
//! Exposes the grouping engine to Python when built with the `python`
//! feature. Identifiers are plain strings on the Python side.

use std::collections::{HashMap, HashSet};

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::graph::{GroupingError, Groups};

create_exception!(
    _core,
    DependencyCycleError,
    PyValueError,
    "Raised when the dependency mapping contains a cycle."
);

/// Group a `{node: [dependencies]}` dict into a list of sets.
///
/// Nodes nothing depends on come first. Raises `DependencyCycleError` on a
/// cycle and `ValueError` on a blank identifier.
#[pyfunction]
#[pyo3(name = "group_by_dependencies")]
fn py_group_by_dependencies(
    mapping: HashMap<String, Vec<String>>,
) -> PyResult<Vec<HashSet<String>>> {
    crate::group_by_dependencies(mapping)
        .map(Groups::into_inner)
        .map_err(|err| match err {
            GroupingError::CycleDetected { .. } => DependencyCycleError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        })
}

/// Register the Python-exposed functions and types on the module.
pub(crate) fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_group_by_dependencies, m)?)?;
    m.add(
        "DependencyCycleError",
        m.py().get_type_bound::<DependencyCycleError>(),
    )?;
    Ok(())
}
