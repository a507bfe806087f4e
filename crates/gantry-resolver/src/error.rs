use gantry_flowgraph::{FlowgraphError, NodeId};
use thiserror::Error;

/// Errors produced while locking a pipeline definition.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// A node's task reference is not of the `tool.task` form.
  #[error("node '{node}' has a malformed task reference '{task}'")]
  InvalidTaskRef { node: NodeId, task: String },

  /// A task reference names no registered task.
  #[error("task '{task}' required by node '{node}' is not registered")]
  UnknownTask { node: NodeId, task: String },

  /// Two flows in the same pipeline share a name.
  #[error("flow '{flow}' is defined more than once")]
  DuplicateFlow { flow: String },

  /// A flow declares no nodes at all.
  #[error("flow '{flow}' has no nodes")]
  EmptyFlow { flow: String },

  /// Every node has an upstream input, so nothing can start.
  #[error("flow '{flow}' has no entry nodes")]
  NoEntryNodes { flow: String },

  /// Every node feeds another node, so nothing terminates the flow.
  #[error("flow '{flow}' has no exit nodes")]
  NoExitNodes { flow: String },

  /// Structural graph validation failed.
  #[error(transparent)]
  Graph(#[from] FlowgraphError),
}
