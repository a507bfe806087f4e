use std::collections::BTreeSet;

use gantry_config::RunScope;
use gantry_flowgraph::{FlowgraphError, NodeId, Pipeline};
use gantry_manifest::BuildLayout;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::check::{check_execution_inputs, check_flowgraph_io, check_reachable_exits};
use crate::error::PlanError;
use crate::plan::RunPlan;
use crate::resume::resume_plan;

/// Computes run plans against a locked pipeline and a build area.
///
/// Planning is synchronous and side-effect free apart from reading persisted
/// manifests and output listings; nothing is cached between invocations.
pub struct RunPlanner {
  layout: BuildLayout,
}

impl RunPlanner {
  /// Create a planner over the given build layout.
  pub fn new(layout: BuildLayout) -> Self {
    Self { layout }
  }

  /// Plan one run of `scope.flow`.
  ///
  /// The stages, in order: flow lookup, prune validation, execution-set
  /// computation (which resolves entries/exits and detects cycles),
  /// connection and reachability checks, IO contract validation, resume
  /// reduction, and finally layering of whatever remains.
  #[instrument(
    name = "plan_run",
    skip(self, pipeline, scope),
    fields(
      project = %pipeline.project(),
      flow = %scope.flow,
    )
  )]
  pub fn plan(&self, pipeline: &Pipeline, scope: &RunScope) -> Result<RunPlan, PlanError> {
    let run_id = Uuid::new_v4().to_string();
    info!(run_id = %run_id, flow = %scope.flow, "plan_started");

    match self.plan_inner(pipeline, scope, &run_id) {
      Ok(plan) => {
        info!(
          run_id = %run_id,
          executing = plan.nodes().len(),
          satisfied = plan.satisfied.len(),
          layers = plan.layers.len(),
          "plan_completed"
        );
        Ok(plan)
      }
      Err(err) => {
        error!(run_id = %run_id, error = %err, "plan_failed");
        Err(err)
      }
    }
  }

  fn plan_inner(
    &self,
    pipeline: &Pipeline,
    scope: &RunScope,
    run_id: &str,
  ) -> Result<RunPlan, PlanError> {
    let flow = pipeline.flow(&scope.flow)?;

    // prune references must name real nodes before they silently drop paths
    for node in &scope.prune {
      let node = NodeId::from(node);
      if !flow.contains(&node) {
        return Err(PlanError::Graph(FlowgraphError::UnknownNode {
          flow: flow.name().to_string(),
          node,
        }));
      }
    }

    let set = flow.nodes_to_execute(scope)?;

    check_execution_inputs(flow, scope, &set)?;
    check_reachable_exits(flow, scope)?;
    check_flowgraph_io(flow, &set, &self.layout)?;

    let resume = resume_plan(flow, &set, scope, &self.layout);
    let remaining: BTreeSet<NodeId> = resume.removed;
    let layers = flow.layered_order(&remaining);

    Ok(RunPlan {
      run_id: run_id.to_string(),
      flow: flow.name().to_string(),
      layers,
      satisfied: resume.satisfied.into_iter().collect(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use gantry_config::NodeRef;
  use gantry_flowgraph::{Flowgraph, Node, StandardTask};

  fn task_node(step: &str, index: &str, inputs: &[&str], outputs: &[&str]) -> Node {
    Node::standard(
      NodeId::new(step, index),
      StandardTask {
        tool: "toolchain".to_string(),
        task: step.to_string(),
        inputs: inputs.iter().map(|s| s.to_string()).collect(),
        outputs: outputs.iter().map(|s| s.to_string()).collect(),
        require: vec![],
      },
    )
  }

  fn edge(from: (&str, &str), to: (&str, &str)) -> (NodeId, NodeId) {
    (NodeId::new(from.0, from.1), NodeId::new(to.0, to.1))
  }

  fn pipeline() -> Pipeline {
    let flow = Flowgraph::new(
      "asicflow",
      vec![
        task_node("import", "0", &[], &["top.v"]),
        task_node("syn", "0", &["top.v"], &["top.vg"]),
      ],
      &[edge(("import", "0"), ("syn", "0"))],
    )
    .unwrap();
    Pipeline::new("gcd", [flow])
  }

  fn planner(dir: &tempfile::TempDir) -> RunPlanner {
    RunPlanner::new(BuildLayout {
      build_dir: dir.path().to_path_buf(),
      project: "gcd".to_string(),
      job: "job0".to_string(),
    })
  }

  #[test]
  fn plans_a_fresh_run() {
    let dir = tempfile::tempdir().unwrap();
    let plan = planner(&dir).plan(&pipeline(), &RunScope::new("asicflow")).unwrap();

    assert_eq!(plan.flow, "asicflow");
    assert_eq!(
      plan.layers,
      vec![vec![NodeId::new("import", "0")], vec![NodeId::new("syn", "0")]]
    );
    assert!(plan.satisfied.is_empty());
    assert!(!plan.run_id.is_empty());
  }

  #[test]
  fn unknown_flow_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = planner(&dir)
      .plan(&pipeline(), &RunScope::new("fpgaflow"))
      .unwrap_err();
    assert!(matches!(
      err,
      PlanError::Graph(FlowgraphError::UnknownFlow { flow }) if flow == "fpgaflow"
    ));
  }

  #[test]
  fn unknown_prune_reference_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut scope = RunScope::new("asicflow");
    scope.prune = vec![NodeRef::new("cts", "0")];

    let err = planner(&dir).plan(&pipeline(), &scope).unwrap_err();
    assert!(matches!(
      err,
      PlanError::Graph(FlowgraphError::UnknownNode { node, .. })
        if node == NodeId::new("cts", "0")
    ));
  }
}
