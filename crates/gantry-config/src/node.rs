use serde::{Deserialize, Serialize};

pub(crate) fn default_index() -> String {
  "0".to_string()
}

/// A node declaration within a flow.
///
/// Nodes are identified by `(step, index)`; the index distinguishes parallel
/// variants of the same step and defaults to `"0"`. The `task` field is a
/// `"tool.task"` reference, e.g. `"yosys.syn_asic"` or `"builtin.join"`; the
/// distinguished tool `builtin` marks pass-through nodes with no fixed IO
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
  pub step: String,
  #[serde(default = "default_index")]
  pub index: String,
  pub task: String,
}

/// Reference to a node by `(step, index)`, used in edges and prune lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
  pub step: String,
  #[serde(default = "default_index")]
  pub index: String,
}

impl NodeRef {
  pub fn new(step: impl Into<String>, index: impl Into<String>) -> Self {
    Self {
      step: step.into(),
      index: index.into(),
    }
  }
}
