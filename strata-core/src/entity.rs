//! Entity Batching
//!
//! Splits a batch of caller entities into sub-batches that can be processed
//! one after another, for example registering new records whose parents may
//! be part of the same batch.
//!
//! The caller describes each entity by a key and the keys it depends on.
//! Keys that name no entity in the batch (references to records that
//! already exist) still take part in grouping but are never emitted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{assign_levels_with, normalize, GroupingError, GroupingResult, NodeKey};
use crate::grouper::DependencyGrouper;

/// An entity that can be batched by its dependencies.
pub trait Dependent {
    /// Identifier type shared by the entity and its dependencies.
    type Key: NodeKey;

    /// This entity's identifier.
    fn key(&self) -> Self::Key;

    /// Identifiers of the entities this one depends on.
    fn dependencies(&self) -> Vec<Self::Key>;
}

/// Which end of the dependency relation comes first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOrder {
    /// An entity comes before everything it depends on (deletion order).
    #[default]
    DependentsFirst,

    /// An entity comes after everything it depends on (registration order).
    DependenciesFirst,
}

impl DependencyGrouper {
    /// Split entities into ordered batches.
    ///
    /// Entities sharing a key land in the same batch. Within a batch,
    /// entities keep their input order. Batches that would only contain
    /// external references are dropped.
    pub fn batch<T: Dependent>(
        &self,
        items: Vec<T>,
        order: BatchOrder,
    ) -> GroupingResult<Vec<Vec<T>>, T::Key> {
        let keys: Vec<T::Key> = items.iter().map(T::key).collect();
        let graph = normalize(
            keys.iter()
                .cloned()
                .zip(items.iter().map(T::dependencies)),
        )?;

        let report = self.options().cycle_report;
        let levels = match order {
            BatchOrder::DependentsFirst => assign_levels_with(graph, report)?,
            BatchOrder::DependenciesFirst => {
                // Cycles on the transposed graph come back in depended-on-by
                // order; flip them so callers always see depends-on order.
                assign_levels_with(graph.transpose(), report).map_err(|err| match err {
                    GroupingError::CycleDetected {
                        mut cycle,
                        unresolved,
                    } => {
                        cycle.reverse();
                        GroupingError::cycle(cycle, unresolved)
                    }
                    other => other,
                })?
            }
        };

        let mut batches: Vec<Vec<T>> = (0..levels.depth()).map(|_| Vec::new()).collect();
        for (key, item) in keys.iter().zip(items) {
            if let Some(level) = levels.get(key) {
                batches[level].push(item);
            }
        }
        batches.retain(|batch| !batch.is_empty());

        debug!(batches = batches.len(), ?order, "split entities into batches");
        Ok(batches)
    }
}

/// Split entities into ordered batches with default options.
pub fn group_entities<T: Dependent>(
    items: Vec<T>,
    order: BatchOrder,
) -> GroupingResult<Vec<Vec<T>>, T::Key> {
    DependencyGrouper::default().batch(items, order)
}
