use std::collections::{BTreeMap, BTreeSet};

use crate::error::FlowgraphError;
use crate::node::{Node, NodeId, TaskKind};

/// A locked flow: the node set plus each node's ordered upstream input list.
///
/// Construction enforces the structural invariants - node identity is unique,
/// every edge endpoint is a declared node, and no edge appears twice. All
/// traversals answer from the locked state only; nothing is read from disk or
/// ambient process state.
#[derive(Debug, Clone)]
pub struct Flowgraph {
  pub(crate) name: String,
  pub(crate) nodes: BTreeMap<NodeId, Node>,
  /// Per-node input lists, in edge declaration order.
  pub(crate) inputs: BTreeMap<NodeId, Vec<NodeId>>,
}

impl Flowgraph {
  /// Builds a flowgraph from locked nodes and dependency edges.
  pub fn new(
    name: impl Into<String>,
    nodes: Vec<Node>,
    edges: &[(NodeId, NodeId)],
  ) -> Result<Self, FlowgraphError> {
    let name = name.into();

    let mut node_map: BTreeMap<NodeId, Node> = BTreeMap::new();
    for node in nodes {
      let id = node.id.clone();
      if node_map.insert(id.clone(), node).is_some() {
        return Err(FlowgraphError::DuplicateNode {
          flow: name,
          node: id,
        });
      }
    }

    let mut inputs: BTreeMap<NodeId, Vec<NodeId>> = node_map
      .keys()
      .map(|id| (id.clone(), Vec::new()))
      .collect();

    for (from, to) in edges {
      if !node_map.contains_key(from) {
        return Err(FlowgraphError::UnknownNode {
          flow: name,
          node: from.clone(),
        });
      }
      match inputs.get_mut(to) {
        Some(list) => {
          if list.contains(from) {
            return Err(FlowgraphError::DuplicateEdge {
              flow: name,
              from: from.clone(),
              to: to.clone(),
            });
          }
          list.push(from.clone());
        }
        None => {
          return Err(FlowgraphError::UnknownNode {
            flow: name,
            node: to.clone(),
          });
        }
      }
    }

    Ok(Self {
      name,
      nodes: node_map,
      inputs,
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn contains(&self, node: &NodeId) -> bool {
    self.nodes.contains_key(node)
  }

  pub fn node(&self, node: &NodeId) -> Option<&Node> {
    self.nodes.get(node)
  }

  pub fn nodes(&self) -> impl Iterator<Item = &Node> {
    self.nodes.values()
  }

  /// Every node identity in the flow, in `(step, index)` order.
  pub fn node_ids(&self) -> Vec<NodeId> {
    self.nodes.keys().cloned().collect()
  }

  /// Node identities filtered by step and index name lists. A `None` filter
  /// matches everything.
  pub fn select_nodes(&self, steps: Option<&[String]>, indices: Option<&[String]>) -> Vec<NodeId> {
    self
      .nodes
      .keys()
      .filter(|id| steps.is_none_or(|steps| steps.contains(&id.step)))
      .filter(|id| indices.is_none_or(|indices| indices.contains(&id.index)))
      .cloned()
      .collect()
  }

  /// The node's declared inputs, in edge declaration order. Unknown nodes
  /// have no inputs.
  pub fn node_inputs(&self, node: &NodeId) -> &[NodeId] {
    self
      .inputs
      .get(node)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// Nodes that consume `node` as an input. Answered by scanning every input
  /// list, so cost grows with total fan-in; fine at flowgraph scale.
  pub fn node_outputs(&self, node: &NodeId) -> Vec<NodeId> {
    self
      .inputs
      .iter()
      .filter(|(_, inputs)| inputs.contains(node))
      .map(|(id, _)| id.clone())
      .collect()
  }

  /// Nodes with no declared inputs.
  pub fn entry_nodes(&self) -> Vec<NodeId> {
    self
      .inputs
      .iter()
      .filter(|(_, inputs)| inputs.is_empty())
      .map(|(id, _)| id.clone())
      .collect()
  }

  /// Nodes no other node consumes as an input.
  pub fn exit_nodes(&self) -> Vec<NodeId> {
    let consumed: BTreeSet<&NodeId> = self.inputs.values().flatten().collect();
    self
      .inputs
      .keys()
      .filter(|id| !consumed.contains(id))
      .cloned()
      .collect()
  }

  /// Forward sweep from `from`, honoring the prune set.
  ///
  /// Pruned nodes are dropped before they are visited, which also cuts off
  /// everything only reachable through them. The staged frontier sweep
  /// refuses to re-expand visited nodes, so it terminates even when the
  /// graph contains a cycle.
  pub fn reachable(
    &self,
    from: impl IntoIterator<Item = NodeId>,
    prune: &BTreeSet<NodeId>,
  ) -> BTreeSet<NodeId> {
    self.reachable_when(from, prune, |_| true)
  }

  /// [`Flowgraph::reachable`] with a node predicate: nodes failing `cond`
  /// are neither visited nor expanded.
  pub fn reachable_when<F>(
    &self,
    from: impl IntoIterator<Item = NodeId>,
    prune: &BTreeSet<NodeId>,
    cond: F,
  ) -> BTreeSet<NodeId>
  where
    F: Fn(&NodeId) -> bool,
  {
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut frontier: BTreeSet<NodeId> = from.into_iter().collect();

    while !frontier.is_empty() {
      let mut next = BTreeSet::new();
      for node in frontier {
        if prune.contains(&node) || !cond(&node) {
          continue;
        }
        if visited.insert(node.clone()) {
          next.extend(self.node_outputs(&node));
        }
      }
      frontier = next;
    }

    visited
  }

  /// The whole graph as seen under a prune set: everything reachable from
  /// the structural entry nodes once `prune` is applied.
  pub fn pruned_nodes(&self, prune: &BTreeSet<NodeId>) -> BTreeSet<NodeId> {
    self.reachable(self.entry_nodes(), prune)
  }

  /// The node's inputs that survive pruning the graph by `prune`.
  pub fn pruned_node_inputs(&self, node: &NodeId, prune: &BTreeSet<NodeId>) -> Vec<NodeId> {
    let kept = self.pruned_nodes(prune);
    self
      .node_inputs(node)
      .iter()
      .filter(|input| kept.contains(*input))
      .cloned()
      .collect()
  }

  /// Artifact names `node` makes available downstream. Standard tasks
  /// contribute their declared outputs; pass-through nodes forward the
  /// union of their own inputs' outputs.
  pub fn gather_outputs(&self, node: &NodeId) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    self.gather_outputs_inner(node, &mut seen)
  }

  fn gather_outputs_inner(&self, node: &NodeId, seen: &mut BTreeSet<NodeId>) -> BTreeSet<String> {
    // guard against revisiting: a malformed pass-through loop must not recurse forever
    if !seen.insert(node.clone()) {
      return BTreeSet::new();
    }
    match self.node(node).map(|n| &n.kind) {
      Some(TaskKind::Standard(task)) => task.outputs.iter().cloned().collect(),
      Some(TaskKind::PassThrough { .. }) => {
        let mut outputs = BTreeSet::new();
        for input in self.node_inputs(node) {
          outputs.extend(self.gather_outputs_inner(input, seen));
        }
        outputs
      }
      None => BTreeSet::new(),
    }
  }

  /// Which upstream node provides which artifact to `node`, by declared
  /// contract. Artifacts map to every provider, so callers can detect
  /// ambiguous names.
  pub fn input_provides(&self, node: &NodeId) -> BTreeMap<String, Vec<NodeId>> {
    let mut provides: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
    for input in self.node_inputs(node) {
      for artifact in self.gather_outputs(input) {
        provides.entry(artifact).or_default().push(input.clone());
      }
    }
    provides
  }
}
