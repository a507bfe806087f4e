use std::collections::HashSet;

use gantry_config::{FlowDef, NodeDef, PipelineDef};
use gantry_flowgraph::{Flowgraph, Node, NodeId, Pipeline, StandardTask};

use crate::error::ResolveError;
use crate::registry::TaskRegistry;

/// Resolver transforms a [`PipelineDef`] into a locked [`Pipeline`].
pub trait Resolver {
  /// Resolve a pipeline definition into locked flowgraphs.
  ///
  /// This process:
  /// 1. Validates graph structure (unique nodes, valid edges)
  /// 2. Resolves every task reference against the registry
  /// 3. Rejects degenerate flows that could never execute
  fn resolve(&self, def: PipelineDef) -> Result<Pipeline, ResolveError>;
}

/// Standard resolver implementation backed by a task registry.
pub struct StandardResolver<R: TaskRegistry> {
  registry: R,
}

impl<R: TaskRegistry> StandardResolver<R> {
  /// Create a new resolver with the given task registry.
  pub fn new(registry: R) -> Self {
    Self { registry }
  }

  fn resolve_flow(&self, def: FlowDef) -> Result<Flowgraph, ResolveError> {
    if def.nodes.is_empty() {
      return Err(ResolveError::EmptyFlow { flow: def.name });
    }

    let mut nodes = Vec::with_capacity(def.nodes.len());
    for node in &def.nodes {
      nodes.push(self.resolve_node(node)?);
    }

    let edges: Vec<(NodeId, NodeId)> = def
      .edges
      .iter()
      .map(|edge| (NodeId::from(&edge.from), NodeId::from(&edge.to)))
      .collect();

    let graph = Flowgraph::new(def.name.clone(), nodes, &edges)?;

    if graph.entry_nodes().is_empty() {
      return Err(ResolveError::NoEntryNodes { flow: def.name });
    }
    if graph.exit_nodes().is_empty() {
      return Err(ResolveError::NoExitNodes { flow: def.name });
    }

    Ok(graph)
  }

  fn resolve_node(&self, def: &NodeDef) -> Result<Node, ResolveError> {
    let id = NodeId::new(&def.step, &def.index);

    let (tool, task) = match def.task.split_once('.') {
      Some((tool, task)) if !tool.is_empty() && !task.is_empty() => (tool, task),
      _ => {
        return Err(ResolveError::InvalidTaskRef {
          node: id,
          task: def.task.clone(),
        });
      }
    };

    if tool == "builtin" {
      return Ok(Node::pass_through(id, task));
    }

    match self.registry.get(tool, task) {
      Some(contract) => Ok(Node::standard(
        id,
        StandardTask {
          tool: contract.tool,
          task: contract.task,
          inputs: contract.inputs,
          outputs: contract.outputs,
          require: contract.require,
        },
      )),
      None => Err(ResolveError::UnknownTask {
        node: id,
        task: def.task.clone(),
      }),
    }
  }
}

impl<R: TaskRegistry> Resolver for StandardResolver<R> {
  fn resolve(&self, def: PipelineDef) -> Result<Pipeline, ResolveError> {
    let mut names: HashSet<String> = HashSet::new();
    let mut flows = Vec::with_capacity(def.flows.len());
    for flow in def.flows {
      if !names.insert(flow.name.clone()) {
        return Err(ResolveError::DuplicateFlow { flow: flow.name });
      }
      flows.push(self.resolve_flow(flow)?);
    }
    Ok(Pipeline::new(def.project, flows))
  }
}
