//! Gantry Config
//!
//! This crate contains the serializable pipeline configuration types for Gantry.
//! These types represent flow definitions before they are validated and locked
//! by the resolver.
//!
//! Configuration can be loaded from:
//! - JSON files produced by project tooling
//! - The external schema store (as JSON blobs)
//!
//! A [`PipelineDef`] declares, per named flow, the node set and the directed
//! edges between nodes, plus the per-task IO contracts those nodes resolve to.
//! A [`RunScope`] carries everything that scopes a single invocation: optional
//! node or step pins, declarative from/to step lists, the prune set, and the
//! clean flag. Scope state is always passed explicitly; nothing here is read
//! from ambient process state.

mod edge;
mod flow;
mod node;
mod scope;
mod task;

pub use edge::EdgeDef;
pub use flow::{FlowDef, PipelineDef};
pub use node::{NodeDef, NodeRef};
pub use scope::RunScope;
pub use task::TaskDef;
