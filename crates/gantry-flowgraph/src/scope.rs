use std::collections::BTreeSet;

use gantry_config::RunScope;

use crate::Flowgraph;
use crate::error::FlowgraphError;
use crate::node::NodeId;

/// The scope's prune list as a node set.
pub fn prune_set(scope: &RunScope) -> BTreeSet<NodeId> {
  scope.prune.iter().map(NodeId::from).collect()
}

impl Flowgraph {
  /// Resolves the nodes a scoped run starts from.
  ///
  /// Priority: an exact `(step, index)` pin, a step-only pin, the scope's
  /// `from` list when the scope addresses this flow, and finally the
  /// structural entry nodes.
  pub fn execution_entry_nodes(&self, scope: &RunScope) -> Result<Vec<NodeId>, FlowgraphError> {
    if let Some(step) = &scope.step {
      return self.pinned_nodes(step, scope.index.as_deref());
    }
    if scope.flow == self.name && !scope.from.is_empty() {
      return self.step_list_nodes(&scope.from);
    }
    Ok(self.entry_nodes())
  }

  /// Resolves the nodes a scoped run ends at. Mirrors entry resolution with
  /// the scope's `to` list and the structural exit nodes.
  pub fn execution_exit_nodes(&self, scope: &RunScope) -> Result<Vec<NodeId>, FlowgraphError> {
    if let Some(step) = &scope.step {
      return self.pinned_nodes(step, scope.index.as_deref());
    }
    if scope.flow == self.name && !scope.to.is_empty() {
      return self.step_list_nodes(&scope.to);
    }
    Ok(self.exit_nodes())
  }

  fn pinned_nodes(&self, step: &str, index: Option<&str>) -> Result<Vec<NodeId>, FlowgraphError> {
    match index {
      Some(index) => {
        let node = NodeId::new(step, index);
        if !self.contains(&node) {
          return Err(FlowgraphError::UnknownNode {
            flow: self.name.clone(),
            node,
          });
        }
        Ok(vec![node])
      }
      None => self.step_list_nodes(&[step.to_string()]),
    }
  }

  fn step_list_nodes(&self, steps: &[String]) -> Result<Vec<NodeId>, FlowgraphError> {
    let mut nodes = Vec::new();
    for step in steps {
      let step_nodes = self.select_nodes(Some(std::slice::from_ref(step)), None);
      if step_nodes.is_empty() {
        return Err(FlowgraphError::UnknownStep {
          flow: self.name.clone(),
          step: step.clone(),
        });
      }
      nodes.extend(step_nodes);
    }
    Ok(nodes)
  }

  /// The exact set of nodes a scoped run must execute, in path discovery
  /// order.
  ///
  /// When the resolved entry and exit nodes coincide the set is returned
  /// directly, minus pruned nodes. Otherwise every simple path from an entry
  /// node to an exit node is enumerated depth-first and their nodes
  /// collected; a node re-entering its own path fails with
  /// [`FlowgraphError::Cycle`].
  pub fn nodes_to_execute(&self, scope: &RunScope) -> Result<Vec<NodeId>, FlowgraphError> {
    let from = self.execution_entry_nodes(scope)?;
    let to = self.execution_exit_nodes(scope)?;
    let prune = prune_set(scope);

    if from == to {
      return Ok(from.into_iter().filter(|node| !prune.contains(node)).collect());
    }
    self.paths_between(&from, &to.into_iter().collect(), &prune)
  }

  /// The execution set obtained by entering the graph at `starts` instead of
  /// the scope's entry nodes. Used to replan runs part-way through.
  pub fn nodes_from(
    &self,
    scope: &RunScope,
    starts: &[NodeId],
  ) -> Result<Vec<NodeId>, FlowgraphError> {
    for start in starts {
      if !self.contains(start) {
        return Err(FlowgraphError::UnknownNode {
          flow: self.name.clone(),
          node: start.clone(),
        });
      }
    }
    let to = self.execution_exit_nodes(scope)?;
    let prune = prune_set(scope);
    self.paths_between(starts, &to.into_iter().collect(), &prune)
  }

  /// Exit steps no path can reach from the scoped entry nodes once pruning
  /// is applied. A step is only reported when none of its indices are
  /// reachable.
  pub fn unreachable_exit_steps(&self, scope: &RunScope) -> Result<BTreeSet<String>, FlowgraphError> {
    let from = self.execution_entry_nodes(scope)?;
    let to = self.execution_exit_nodes(scope)?;
    let reachable = self.reachable(from, &prune_set(scope));

    let mut steps = BTreeSet::new();
    for node in to {
      if reachable.contains(&node) {
        continue;
      }
      if !reachable.iter().any(|reached| reached.step == node.step) {
        steps.insert(node.step);
      }
    }
    Ok(steps)
  }

  fn paths_between(
    &self,
    from: &[NodeId],
    to: &BTreeSet<NodeId>,
    prune: &BTreeSet<NodeId>,
  ) -> Result<Vec<NodeId>, FlowgraphError> {
    let mut execute: Vec<NodeId> = Vec::new();
    let mut seen: BTreeSet<NodeId> = BTreeSet::new();
    for start in from {
      self.collect_paths(start, to, prune, &mut execute, &mut seen)?;
    }
    Ok(execute)
  }

  /// Depth-first enumeration of every simple path from `start` into `to`.
  /// Whenever the path reaches a node in `to`, all of its nodes are recorded
  /// into `execute` (first occurrence wins). Expansion continues past `to`
  /// members, so paths running through one exit into another are counted.
  fn collect_paths(
    &self,
    start: &NodeId,
    to: &BTreeSet<NodeId>,
    prune: &BTreeSet<NodeId>,
    execute: &mut Vec<NodeId>,
    seen: &mut BTreeSet<NodeId>,
  ) -> Result<(), FlowgraphError> {
    if prune.contains(start) {
      return Ok(());
    }

    // frame: (node, forward edges, cursor into them); on_path mirrors the stack
    let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> =
      vec![(start.clone(), self.node_outputs(start), 0)];
    let mut on_path: BTreeSet<NodeId> = BTreeSet::from([start.clone()]);

    if to.contains(start) && seen.insert(start.clone()) {
      execute.push(start.clone());
    }

    loop {
      let next_child = match stack.last_mut() {
        Some((_, outputs, cursor)) if *cursor < outputs.len() => {
          let child = outputs[*cursor].clone();
          *cursor += 1;
          Some(child)
        }
        Some(_) => None,
        None => break,
      };

      match next_child {
        Some(child) => {
          if prune.contains(&child) {
            continue;
          }
          if on_path.contains(&child) {
            let path: Vec<NodeId> = stack.iter().map(|(node, _, _)| node.clone()).collect();
            return Err(FlowgraphError::Cycle { path, node: child });
          }
          if to.contains(&child) {
            for (node, _, _) in &stack {
              if seen.insert(node.clone()) {
                execute.push(node.clone());
              }
            }
            if seen.insert(child.clone()) {
              execute.push(child.clone());
            }
          }
          on_path.insert(child.clone());
          let outputs = self.node_outputs(&child);
          stack.push((child, outputs, 0));
        }
        None => {
          if let Some((node, _, _)) = stack.pop() {
            on_path.remove(&node);
          }
        }
      }
    }

    Ok(())
  }
}
