use std::collections::BTreeSet;

use gantry_config::RunScope;
use gantry_flowgraph::{Flowgraph, NodeId, TaskKind, node_artifact_name, prune_set};
use gantry_manifest::BuildLayout;

use crate::error::PlanError;

/// Verifies that scoping left every non-entry node of the execution set with
/// the inputs it needs: standard tasks keep all of their declared inputs,
/// pass-through nodes keep at least one.
pub(crate) fn check_execution_inputs(
  flow: &Flowgraph,
  scope: &RunScope,
  set: &[NodeId],
) -> Result<(), PlanError> {
  let entries: BTreeSet<NodeId> = flow.execution_entry_nodes(scope)?.into_iter().collect();
  let kept = flow.pruned_nodes(&prune_set(scope));

  for node in set {
    if entries.contains(node) {
      continue;
    }
    let pass_through = flow.node(node).is_some_and(|n| n.is_pass_through());
    let inputs = flow.node_inputs(node);
    let surviving = inputs.iter().filter(|input| kept.contains(*input)).count();

    let ok = if pass_through {
      surviving > 0
    } else {
      surviving == inputs.len()
    };
    if !ok {
      let lost: Vec<NodeId> = inputs
        .iter()
        .filter(|input| !kept.contains(*input))
        .cloned()
        .collect();
      return Err(PlanError::MissingConnection {
        node: node.clone(),
        lost,
      });
    }
  }
  Ok(())
}

/// Verifies the exit steps of the scope are still reachable once pruning is
/// applied.
pub(crate) fn check_reachable_exits(flow: &Flowgraph, scope: &RunScope) -> Result<(), PlanError> {
  let unreachable = flow.unreachable_exit_steps(scope)?;
  if unreachable.is_empty() {
    return Ok(());
  }
  Err(PlanError::UnreachableExit {
    flow: flow.name().to_string(),
    steps: unreachable.into_iter().collect(),
  })
}

/// Validates the IO contract of every standard node in the execution set.
///
/// In-set inputs contribute their declared outputs, gathered through
/// pass-through chains. Out-of-set inputs contribute whatever their
/// persisted `outputs/` directory holds; a missing directory contributes
/// nothing, since resume checks flag that state on their own. An artifact is
/// matched under its origin-tagged name whenever the requirement list asks
/// for that form. The same name arriving twice is ambiguous and fatal.
pub(crate) fn check_flowgraph_io(
  flow: &Flowgraph,
  set: &[NodeId],
  layout: &BuildLayout,
) -> Result<(), PlanError> {
  let members: BTreeSet<&NodeId> = set.iter().collect();

  for node in set {
    let requirements = match flow.node(node).map(|n| &n.kind) {
      Some(TaskKind::Standard(task)) => &task.inputs,
      // pass-through nodes forward whatever they receive
      Some(TaskKind::PassThrough { .. }) | None => continue,
    };

    let mut delivered: BTreeSet<String> = BTreeSet::new();
    for input in flow.node_inputs(node) {
      let artifacts: Vec<String> = if members.contains(input) {
        flow.gather_outputs(input).into_iter().collect()
      } else {
        layout
          .list_outputs(&input.step, &input.index)
          .unwrap_or_default()
      };

      for artifact in artifacts {
        let tagged = node_artifact_name(&artifact, input);
        let name = if requirements.contains(&tagged) {
          tagged
        } else {
          artifact
        };
        if !delivered.insert(name.clone()) {
          return Err(PlanError::AmbiguousInput {
            node: node.clone(),
            artifact: name,
          });
        }
      }
    }

    for requirement in requirements {
      if !delivered.contains(requirement) {
        return Err(PlanError::MissingInput {
          node: node.clone(),
          artifact: requirement.clone(),
        });
      }
    }
  }
  Ok(())
}
