use std::collections::BTreeSet;

use gantry_config::RunScope;
use gantry_flowgraph::{Flowgraph, NodeId};
use gantry_manifest::{BuildLayout, NodeManifest, NodeStatus};
use tracing::{debug, warn};

/// Split of an execution set into nodes that must run and nodes whose
/// persisted results can be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePlan {
  /// Nodes that must (re)execute: their own state is distrusted, or an
  /// upstream node's is.
  pub removed: BTreeSet<NodeId>,
  /// Nodes whose persisted results still stand.
  pub satisfied: BTreeSet<NodeId>,
}

/// Decides which execution-set nodes still need to run.
///
/// A persisted result counts only when the node's manifest parses, matches
/// the node, and records success; any doubt marks the node failed.
/// Everything only reachable through a failed node is re-executed too, since
/// its inputs are about to change. With `clean` set, resume is disabled and
/// the whole set runs.
pub fn resume_plan(
  flow: &Flowgraph,
  set: &[NodeId],
  scope: &RunScope,
  layout: &BuildLayout,
) -> ResumePlan {
  if scope.clean {
    return ResumePlan {
      removed: set.iter().cloned().collect(),
      satisfied: BTreeSet::new(),
    };
  }

  let failed: BTreeSet<NodeId> = set
    .iter()
    .filter(|node| node_failed(flow, node, layout))
    .cloned()
    .collect();

  // nodes still reachable once failures are pruned hold trustworthy results
  let keep = flow.pruned_nodes(&failed);

  let mut removed = BTreeSet::new();
  let mut satisfied = BTreeSet::new();
  for node in set {
    if keep.contains(node) {
      satisfied.insert(node.clone());
    } else {
      removed.insert(node.clone());
    }
  }

  ResumePlan { removed, satisfied }
}

fn node_failed(flow: &Flowgraph, node: &NodeId, layout: &BuildLayout) -> bool {
  if !layout.node_dir(&node.step, &node.index).is_dir() {
    debug!(node = %node, "node_never_ran");
    return true;
  }

  match NodeManifest::read(&layout.manifest_path(&node.step, &node.index)) {
    Ok(manifest) => {
      if manifest.flow != flow.name()
        || manifest.step != node.step
        || manifest.index != node.index
      {
        warn!(node = %node, manifest_flow = %manifest.flow, "node_manifest_mismatch");
        return true;
      }
      if manifest.status != NodeStatus::Success {
        debug!(node = %node, status = ?manifest.status, "node_not_successful");
        return true;
      }
      false
    }
    Err(error) => {
      // the directory exists but its record is unusable; treat as failed
      warn!(node = %node, error = %error, "node_manifest_unreadable");
      true
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;
  use gantry_flowgraph::{Node, StandardTask};
  use std::fs;

  fn task_node(step: &str, index: &str) -> Node {
    Node::standard(
      NodeId::new(step, index),
      StandardTask {
        tool: "toolchain".to_string(),
        task: step.to_string(),
        inputs: vec![],
        outputs: vec![],
        require: vec![],
      },
    )
  }

  fn edge(from: (&str, &str), to: (&str, &str)) -> (NodeId, NodeId) {
    (NodeId::new(from.0, from.1), NodeId::new(to.0, to.1))
  }

  fn id(step: &str, index: &str) -> NodeId {
    NodeId::new(step, index)
  }

  /// import0 -> synth0 -> place0 -> route0
  fn linear_flow() -> Flowgraph {
    Flowgraph::new(
      "asicflow",
      vec![
        task_node("import", "0"),
        task_node("synth", "0"),
        task_node("place", "0"),
        task_node("route", "0"),
      ],
      &[
        edge(("import", "0"), ("synth", "0")),
        edge(("synth", "0"), ("place", "0")),
        edge(("place", "0"), ("route", "0")),
      ],
    )
    .unwrap()
  }

  fn layout(dir: &tempfile::TempDir) -> BuildLayout {
    BuildLayout {
      build_dir: dir.path().to_path_buf(),
      project: "gcd".to_string(),
      job: "job0".to_string(),
    }
  }

  fn record(layout: &BuildLayout, flow: &str, step: &str, status: NodeStatus) {
    let outputs = layout.outputs_dir(step, "0");
    fs::create_dir_all(&outputs).unwrap();
    let manifest = NodeManifest {
      project: layout.project.clone(),
      flow: flow.to_string(),
      step: step.to_string(),
      index: "0".to_string(),
      status,
      outputs: vec![],
      started_at: Utc::now(),
      completed_at: Some(Utc::now()),
    };
    manifest.write(&layout.manifest_path(step, "0")).unwrap();
  }

  fn full_set(flow: &Flowgraph) -> Vec<NodeId> {
    flow.nodes_to_execute(&RunScope::new(flow.name())).unwrap()
  }

  #[test]
  fn failure_mid_flow_reruns_the_failed_node_and_downstream() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    record(&layout, "asicflow", "import", NodeStatus::Success);
    record(&layout, "asicflow", "synth", NodeStatus::Success);
    record(&layout, "asicflow", "place", NodeStatus::Error);
    record(&layout, "asicflow", "route", NodeStatus::Success);

    let plan = resume_plan(&flow, &full_set(&flow), &RunScope::new("asicflow"), &layout);
    assert_eq!(plan.removed, BTreeSet::from([id("place", "0"), id("route", "0")]));
    assert_eq!(plan.satisfied, BTreeSet::from([id("import", "0"), id("synth", "0")]));
  }

  #[test]
  fn never_ran_nodes_all_execute() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    let plan = resume_plan(&flow, &full_set(&flow), &RunScope::new("asicflow"), &layout);
    assert_eq!(plan.removed.len(), 4);
    assert!(plan.satisfied.is_empty());
  }

  #[test]
  fn corrupt_manifest_counts_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    record(&layout, "asicflow", "import", NodeStatus::Success);
    record(&layout, "asicflow", "synth", NodeStatus::Success);
    record(&layout, "asicflow", "place", NodeStatus::Success);
    record(&layout, "asicflow", "route", NodeStatus::Success);
    fs::write(layout.manifest_path("synth", "0"), "{ not json").unwrap();

    let plan = resume_plan(&flow, &full_set(&flow), &RunScope::new("asicflow"), &layout);
    assert!(plan.removed.contains(&id("synth", "0")));
    assert!(plan.removed.contains(&id("route", "0")));
    assert_eq!(plan.satisfied, BTreeSet::from([id("import", "0")]));
  }

  #[test]
  fn manifest_for_another_flow_counts_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    record(&layout, "asicflow", "import", NodeStatus::Success);
    record(&layout, "lintflow", "synth", NodeStatus::Success);

    let plan = resume_plan(&flow, &full_set(&flow), &RunScope::new("asicflow"), &layout);
    assert!(plan.satisfied.contains(&id("import", "0")));
    assert!(plan.removed.contains(&id("synth", "0")));
  }

  #[test]
  fn missing_manifest_with_existing_dir_counts_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    record(&layout, "asicflow", "import", NodeStatus::Success);
    fs::create_dir_all(layout.outputs_dir("synth", "0")).unwrap();

    let plan = resume_plan(&flow, &full_set(&flow), &RunScope::new("asicflow"), &layout);
    assert!(plan.satisfied.contains(&id("import", "0")));
    assert!(plan.removed.contains(&id("synth", "0")));
  }

  #[test]
  fn clean_disables_resume() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    for step in ["import", "synth", "place", "route"] {
      record(&layout, "asicflow", step, NodeStatus::Success);
    }

    let mut scope = RunScope::new("asicflow");
    scope.clean = true;
    let plan = resume_plan(&flow, &full_set(&flow), &scope, &layout);
    assert_eq!(plan.removed.len(), 4);
    assert!(plan.satisfied.is_empty());
  }

  #[test]
  fn fully_successful_set_is_fully_satisfied() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let flow = linear_flow();

    for step in ["import", "synth", "place", "route"] {
      record(&layout, "asicflow", step, NodeStatus::Success);
    }

    let plan = resume_plan(&flow, &full_set(&flow), &RunScope::new("asicflow"), &layout);
    assert!(plan.removed.is_empty());
    assert_eq!(plan.satisfied.len(), 4);
  }
}
