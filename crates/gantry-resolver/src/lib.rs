//! Gantry Resolver
//!
//! This crate turns serializable pipeline definitions into locked flowgraphs.
//! Resolution validates graph structure, replaces `tool.task` references with
//! their registered IO contracts, and rejects flows that could never execute
//! (no nodes, no entry nodes, no exit nodes).
//!
//! The [`TaskRegistry`] trait is the seam for task lookup; [`TableRegistry`]
//! is the in-memory implementation backed by a pipeline's own task table.

mod error;
mod registry;
mod resolver;

pub use error::ResolveError;
pub use registry::{TableRegistry, TaskRegistry};
pub use resolver::{Resolver, StandardResolver};
