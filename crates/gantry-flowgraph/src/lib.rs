//! Gantry Flowgraph
//!
//! This crate provides the "locked" flowgraph representation for Gantry.
//! A locked flowgraph is a validated, resolved form of a flow configuration
//! that planning and traversal can trust.
//!
//! Key differences from `gantry-config`:
//! - Graph structure is validated (unique nodes, valid edges)
//! - Every node carries its resolved task and IO contract
//! - Traversals answer from locked state only, never from disk
//!
//! The main entry points are [`Pipeline`] for flow lookup and [`Flowgraph`]
//! for everything graph-shaped: reachability sweeps, scoped entry/exit
//! resolution, execution-set enumeration, and topological layering.

mod error;
mod graph;
mod node;
mod order;
mod pipeline;
mod render;
mod scope;

pub use error::FlowgraphError;
pub use graph::Flowgraph;
pub use node::{Node, NodeId, StandardTask, TaskKind, node_artifact_name};
pub use pipeline::Pipeline;
pub use render::{FlowgraphView, NodeView};
pub use scope::prune_set;
