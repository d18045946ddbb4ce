//! Dependency Grouping
//!
//! This module implements the dependency-level grouping engine: given a set
//! of nodes and a "depends on" relation, it computes an ordered sequence of
//! groups such that every node sits in a strictly earlier group than
//! everything it depends on.
//!
//! # Overview
//!
//! Data flows strictly forward through three stages:
//!
//! - `normalize`: raw `node -> dependencies` mapping to a closed [`Graph`]
//! - `levels`: wavefront peeling that gives every node a level, or fails on
//!   a cycle
//! - `groups`: levels to an ordered list of sets
//!
//! # Design Decisions
//!
//! 1. Nodes are interned to dense indices once, during normalization. The
//!    peeling loop keeps its pending counters and wavefronts in vectors, so
//!    the hot path does no hashing.
//!
//! 2. All working state is created per call and dropped on return. Nothing
//!    is shared between calls, so independent graphs can be grouped from
//!    several threads at once.
//!
//! 3. Cycle tracing is a separate pass that only runs on failure, and it is
//!    linear as well.

mod cycle;
mod error;
mod groups;
mod levels;
mod node;
mod normalize;

pub use error::{GroupingError, GroupingResult};
pub use groups::{materialize, Groups};
pub use levels::{assign_levels, assign_levels_with, Levels};
pub use node::NodeKey;
pub use normalize::{normalize, Graph};
