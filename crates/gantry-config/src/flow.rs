use serde::{Deserialize, Serialize};

use crate::edge::EdgeDef;
use crate::node::NodeDef;
use crate::task::TaskDef;

/// A named flow: a directed graph of nodes and their dependency edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDef {
  pub name: String,
  pub nodes: Vec<NodeDef>,
  #[serde(default)]
  pub edges: Vec<EdgeDef>,
}

/// The complete graph declaration for one project.
///
/// This is the shape handed over by the external schema store: every flow the
/// project defines, plus the task table the flows' nodes resolve against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDef {
  pub project: String,
  pub flows: Vec<FlowDef>,
  #[serde(default)]
  pub tasks: Vec<TaskDef>,
}
