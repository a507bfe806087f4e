use gantry_flowgraph::NodeId;
use serde::{Deserialize, Serialize};

/// The computed plan for one run: what executes, in which order, and what is
/// already covered by persisted results.
///
/// Plans are recomputed per invocation and handed to the scheduler as plain
/// data; the planner keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
  pub run_id: String,
  pub flow: String,
  /// Nodes to execute, grouped into layers safe to run in parallel. A layer
  /// only starts once the previous layer has completed.
  pub layers: Vec<Vec<NodeId>>,
  /// Execution-set nodes whose persisted results are reused; the scheduler
  /// skips these.
  pub satisfied: Vec<NodeId>,
}

impl RunPlan {
  /// Every node the plan will execute, in layer order.
  pub fn nodes(&self) -> Vec<NodeId> {
    self.layers.iter().flatten().cloned().collect()
  }

  /// True when nothing needs to execute.
  pub fn is_empty(&self) -> bool {
    self.layers.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn nodes_flatten_in_layer_order() {
    let plan = RunPlan {
      run_id: "run".to_string(),
      flow: "asicflow".to_string(),
      layers: vec![
        vec![NodeId::new("import", "0")],
        vec![NodeId::new("syn", "0"), NodeId::new("syn", "1")],
      ],
      satisfied: vec![],
    };

    assert_eq!(
      plan.nodes(),
      vec![
        NodeId::new("import", "0"),
        NodeId::new("syn", "0"),
        NodeId::new("syn", "1"),
      ]
    );
    assert!(!plan.is_empty());
    assert!(RunPlan { layers: vec![], ..plan }.is_empty());
  }
}
