use std::fmt;

use gantry_config::NodeRef;
use serde::{Deserialize, Serialize};

/// Identity of a single node within a flow: a named `step` plus a parallel
/// `index`. Two nodes of the same step are variants of the same stage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
  pub step: String,
  pub index: String,
}

impl NodeId {
  pub fn new(step: impl Into<String>, index: impl Into<String>) -> Self {
    Self {
      step: step.into(),
      index: index.into(),
    }
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.step, self.index)
  }
}

impl From<&NodeRef> for NodeId {
  fn from(node: &NodeRef) -> Self {
    Self {
      step: node.step.clone(),
      index: node.index.clone(),
    }
  }
}

/// A tool task with a fixed IO contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardTask {
  pub tool: String,
  pub task: String,
  /// Artifact names the task consumes, as declared by its requirements.
  pub inputs: Vec<String>,
  /// Artifact names the task writes into its node's output directory.
  pub outputs: Vec<String>,
  /// Configuration keypaths the task reads at run time.
  pub require: Vec<String>,
}

/// The resolved task behind a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
  Standard(StandardTask),
  /// Forwards whatever its upstream nodes produce; no contract of its own.
  PassThrough { task: String },
}

/// A locked node: identity plus the task resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
  pub id: NodeId,
  pub kind: TaskKind,
}

impl Node {
  pub fn standard(id: NodeId, task: StandardTask) -> Self {
    Self {
      id,
      kind: TaskKind::Standard(task),
    }
  }

  pub fn pass_through(id: NodeId, task: impl Into<String>) -> Self {
    Self {
      id,
      kind: TaskKind::PassThrough { task: task.into() },
    }
  }

  pub fn is_pass_through(&self) -> bool {
    matches!(self.kind, TaskKind::PassThrough { .. })
  }

  /// Artifact names this node's task requires. Empty for pass-through nodes.
  pub fn required_inputs(&self) -> &[String] {
    match &self.kind {
      TaskKind::Standard(task) => &task.inputs,
      TaskKind::PassThrough { .. } => &[],
    }
  }

  /// Artifact names this node's task declares it will produce.
  pub fn declared_outputs(&self) -> &[String] {
    match &self.kind {
      TaskKind::Standard(task) => &task.outputs,
      TaskKind::PassThrough { .. } => &[],
    }
  }

  /// Configuration keypaths the task reads at run time.
  pub fn require_keys(&self) -> &[String] {
    match &self.kind {
      TaskKind::Standard(task) => &task.require,
      TaskKind::PassThrough { .. } => &[],
    }
  }

  /// Display label for the task: `tool/task`, or the bare task name for
  /// pass-through nodes.
  pub fn task_label(&self) -> String {
    match &self.kind {
      TaskKind::Standard(task) => format!("{}/{}", task.tool, task.task),
      TaskKind::PassThrough { task } => task.clone(),
    }
  }
}

/// Disambiguated artifact name tying `artifact` to the node that produced
/// it: `top.v` from `syn/0` becomes `top.syn0.v`. Used when several upstream
/// nodes provide the same artifact name.
pub fn node_artifact_name(artifact: &str, node: &NodeId) -> String {
  match artifact.split_once('.') {
    Some((stem, rest)) => format!("{stem}.{node}.{rest}"),
    None => format!("{artifact}.{node}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn node_id_display_joins_step_and_index() {
    let node = NodeId::new("syn", "0");
    assert_eq!(node.to_string(), "syn0");
  }

  #[test]
  fn artifact_name_inserts_node_after_first_segment() {
    let node = NodeId::new("syn", "0");
    assert_eq!(node_artifact_name("top.v", &node), "top.syn0.v");
    assert_eq!(node_artifact_name("top.map.v", &node), "top.syn0.map.v");
  }

  #[test]
  fn artifact_name_without_extension_appends_node() {
    let node = NodeId::new("place", "1");
    assert_eq!(node_artifact_name("netlist", &node), "netlist.place1");
  }
}
