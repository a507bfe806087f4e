use std::collections::{BTreeMap, BTreeSet};

use crate::Flowgraph;
use crate::node::NodeId;

impl Flowgraph {
  /// Layers the whole graph into batches that are safe to run in parallel.
  ///
  /// Seeded from the structural entry nodes, or from the exit nodes with
  /// every edge flipped when `reverse` is set (the orientation used for
  /// upstream cleanup walks).
  pub fn execution_order(&self, reverse: bool) -> Vec<Vec<NodeId>> {
    let mut edge_map: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    for (to, inputs) in &self.inputs {
      for from in inputs {
        if reverse {
          edge_map.entry(to.clone()).or_default().insert(from.clone());
        } else {
          edge_map.entry(from.clone()).or_default().insert(to.clone());
        }
      }
    }

    let seeds = if reverse { self.exit_nodes() } else { self.entry_nodes() };
    layered(edge_map, seeds)
  }

  /// Layers an execution set into parallel batches.
  ///
  /// Level zero holds the members with no dependency inside the set, so a
  /// mid-graph set starts at its own frontier. Each node lands at the
  /// deepest level any path assigns it, which keeps it after all of its
  /// in-set inputs.
  pub fn layered_order(&self, nodes: &BTreeSet<NodeId>) -> Vec<Vec<NodeId>> {
    let mut edge_map: BTreeMap<NodeId, BTreeSet<NodeId>> = BTreeMap::new();
    let mut dependent: BTreeSet<NodeId> = BTreeSet::new();
    for to in nodes {
      for from in self.node_inputs(to) {
        if nodes.contains(from) {
          edge_map.entry(from.clone()).or_default().insert(to.clone());
          dependent.insert(to.clone());
        }
      }
    }

    let seeds = nodes
      .iter()
      .filter(|node| !dependent.contains(*node))
      .cloned()
      .collect();
    layered(edge_map, seeds)
  }
}

/// Breadth-first levelization: each pass consumes the forward edges of the
/// previous level, then a backwards de-duplication keeps only the deepest
/// occurrence of every node.
fn layered(mut edge_map: BTreeMap<NodeId, BTreeSet<NodeId>>, seeds: Vec<NodeId>) -> Vec<Vec<NodeId>> {
  if seeds.is_empty() {
    return Vec::new();
  }

  let mut levels: Vec<BTreeSet<NodeId>> = vec![seeds.into_iter().collect()];
  loop {
    let mut next: BTreeSet<NodeId> = BTreeSet::new();
    if let Some(current) = levels.last() {
      for node in current {
        if let Some(targets) = edge_map.remove(node) {
          next.extend(targets);
        }
      }
    }
    if next.is_empty() {
      break;
    }
    levels.push(next);
  }

  let mut used: BTreeSet<NodeId> = BTreeSet::new();
  let mut order: Vec<Vec<NodeId>> = Vec::new();
  for level in levels.iter().rev() {
    let kept: Vec<NodeId> = level
      .iter()
      .filter(|node| !used.contains(*node))
      .cloned()
      .collect();
    used.extend(level.iter().cloned());
    order.push(kept);
  }
  order.reverse();
  order
}
