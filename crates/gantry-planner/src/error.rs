use gantry_flowgraph::{FlowgraphError, NodeId};
use thiserror::Error;

/// Errors raised while planning a run.
///
/// Every variant is fatal to the plan: nothing is auto-repaired, nothing is
/// mutated, and planning can safely be retried after the configuration is
/// fixed.
#[derive(Debug, Error)]
pub enum PlanError {
  /// Scoping removed upstream connections a node cannot run without.
  #[error("flowgraph connection from {} to '{node}' is missing", fmt_nodes(.lost))]
  MissingConnection { node: NodeId, lost: Vec<NodeId> },

  /// Pruning disconnected one or more exit steps entirely.
  #[error("these final steps in '{flow}' can not be reached: {}", .steps.join(", "))]
  UnreachableExit { flow: String, steps: Vec<String> },

  /// A node requires an artifact none of its inputs deliver.
  #[error("node '{node}' will not receive required input '{artifact}'")]
  MissingInput { node: NodeId, artifact: String },

  /// Two inputs deliver the same artifact name to one node.
  #[error("node '{node}' receives '{artifact}' from multiple input tasks")]
  AmbiguousInput { node: NodeId, artifact: String },

  /// Flow lookup, scope resolution, or traversal failed.
  #[error(transparent)]
  Graph(#[from] FlowgraphError),
}

fn fmt_nodes(nodes: &[NodeId]) -> String {
  let nodes: Vec<String> = nodes.iter().map(NodeId::to_string).collect();
  nodes.join(", ")
}
