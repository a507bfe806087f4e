use thiserror::Error;

use crate::node::NodeId;

/// Errors surfaced by flowgraph construction and traversal.
#[derive(Debug, Error)]
pub enum FlowgraphError {
  /// The requested flow is not part of the pipeline.
  #[error("flow '{flow}' is not defined")]
  UnknownFlow { flow: String },

  /// A scope referenced a step the flow does not declare.
  #[error("step '{step}' is not defined in the '{flow}' flowgraph")]
  UnknownStep { flow: String, step: String },

  /// A scope or edge referenced a node the flow does not declare.
  #[error("node '{node}' is not defined in the '{flow}' flowgraph")]
  UnknownNode { flow: String, node: NodeId },

  /// Two node declarations share the same `(step, index)` identity.
  #[error("node '{node}' is declared more than once in the '{flow}' flowgraph")]
  DuplicateNode { flow: String, node: NodeId },

  /// The same dependency edge was declared twice.
  #[error("duplicate edge from '{from}' to '{to}' in the '{flow}' flowgraph")]
  DuplicateEdge {
    flow: String,
    from: NodeId,
    to: NodeId,
  },

  /// Path enumeration re-entered a node already on its own path.
  #[error("path {} would form a cycle with '{node}'", fmt_path(.path))]
  Cycle { path: Vec<NodeId>, node: NodeId },
}

fn fmt_path(path: &[NodeId]) -> String {
  let nodes: Vec<String> = path.iter().map(NodeId::to_string).collect();
  nodes.join(" -> ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cycle_error_renders_the_offending_path() {
    let err = FlowgraphError::Cycle {
      path: vec![NodeId::new("syn", "0"), NodeId::new("place", "0")],
      node: NodeId::new("syn", "0"),
    };
    assert_eq!(
      err.to_string(),
      "path syn0 -> place0 would form a cycle with 'syn0'"
    );
  }
}
