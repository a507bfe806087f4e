use serde::{Deserialize, Serialize};

/// Declared IO contract for one `(tool, task)` pair.
///
/// `inputs` lists the artifact names the task requires in its node's input
/// set; `outputs` lists the artifact names a successful run is guaranteed to
/// produce. `require` lists dotted configuration keypaths the task depends on
/// (entries starting with `input` are treated as graph-level inputs in the
/// visualization projection). The engine never invents these values; it only
/// validates consistency across edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
  pub tool: String,
  pub task: String,
  #[serde(default)]
  pub inputs: Vec<String>,
  #[serde(default)]
  pub outputs: Vec<String>,
  #[serde(default)]
  pub require: Vec<String>,
}
