//! Grouping Options
//!
//! Knobs that change how failures are reported. They never change which
//! levels a valid graph gets.

use serde::{Deserialize, Serialize};

/// How much detail a cycle error carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleReport {
    /// Walk the unresolved nodes and report one actual cycle.
    #[default]
    Trace,

    /// Report a single unresolved node and skip the extra pass.
    First,
}

/// Options for [`crate::DependencyGrouper`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupingOptions {
    /// Detail level of cycle errors
    pub cycle_report: CycleReport,
}

impl GroupingOptions {
    /// Parse options from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the cycle report detail.
    pub fn with_cycle_report(mut self, cycle_report: CycleReport) -> Self {
        self.cycle_report = cycle_report;
        self
    }
}
