use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::Flowgraph;
use crate::node::{Node, TaskKind, node_artifact_name};

/// Projection of a flowgraph for rendering and inspection: display labels,
/// IO slot labels, and label-to-label edges. Execution never consults this.
#[derive(Debug, Clone, Serialize)]
pub struct FlowgraphView {
  /// Configuration keypaths consumed as graph-level inputs.
  pub config_inputs: BTreeSet<String>,
  pub nodes: BTreeMap<String, NodeView>,
  pub edges: Vec<(String, String)>,
}

/// One rendered node: task label plus artifact-to-slot maps.
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
  pub task: String,
  pub inputs: BTreeMap<String, String>,
  pub outputs: BTreeMap<String, String>,
}

impl FlowgraphView {
  /// Full projection with IO slots and artifact-level edges.
  pub fn new(flow: &Flowgraph) -> Self {
    Self::build(flow, true)
  }

  /// Node-and-edge skeleton without IO contracts.
  pub fn bare(flow: &Flowgraph) -> Self {
    Self::build(flow, false)
  }

  fn build(flow: &Flowgraph, io: bool) -> Self {
    let mut config_inputs: BTreeSet<String> = BTreeSet::new();
    let mut nodes: BTreeMap<String, NodeView> = BTreeMap::new();
    let mut edges: Vec<(String, String)> = Vec::new();

    for node in flow.nodes() {
      let label = node.id.to_string();

      if !io {
        for input in flow.node_inputs(&node.id) {
          edges.push((input.to_string(), label.clone()));
        }
        nodes.insert(
          label,
          NodeView {
            task: node.task_label(),
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
          },
        );
        continue;
      }

      let (input_names, output_names) = node_io(flow, node);
      let graph_keys = config_input_keys(node);

      let mut inputs: BTreeMap<String, String> = input_names
        .iter()
        .map(|name| (name.clone(), format!("input-{name}")))
        .collect();
      for key in &graph_keys {
        inputs.insert(key.clone(), format!("input-{key}"));
        config_inputs.insert(key.clone());
        edges.push((key.clone(), format!("{label}:input-{key}")));
      }
      let outputs: BTreeMap<String, String> = output_names
        .iter()
        .map(|name| (name.clone(), format!("output-{name}")))
        .collect();

      // artifact edges; shared names fall back to their origin-tagged form
      for (artifact, providers) in flow.input_provides(&node.id) {
        for upstream in providers {
          let slot = if input_names.contains(&artifact) {
            artifact.clone()
          } else {
            let named = node_artifact_name(&artifact, &upstream);
            if !input_names.contains(&named) {
              continue;
            }
            named
          };
          edges.push((
            format!("{upstream}:output-{artifact}"),
            format!("{label}:input-{slot}"),
          ));
        }
      }

      nodes.insert(
        label,
        NodeView {
          task: node.task_label(),
          inputs,
          outputs,
        },
      );
    }

    Self {
      config_inputs,
      nodes,
      edges,
    }
  }
}

/// A node's rendered IO: the declared contract for standard tasks, the
/// forwarded upstream artifacts for pass-through nodes.
fn node_io(flow: &Flowgraph, node: &Node) -> (BTreeSet<String>, BTreeSet<String>) {
  match &node.kind {
    TaskKind::Standard(task) => (
      task.inputs.iter().cloned().collect(),
      task.outputs.iter().cloned().collect(),
    ),
    TaskKind::PassThrough { .. } => {
      let gathered = flow.gather_outputs(&node.id);
      (gathered.clone(), gathered)
    }
  }
}

fn config_input_keys(node: &Node) -> BTreeSet<String> {
  node
    .require_keys()
    .iter()
    .filter(|key| key.split('.').next() == Some("input"))
    .cloned()
    .collect()
}
