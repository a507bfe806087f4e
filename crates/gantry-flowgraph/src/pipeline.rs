use std::collections::BTreeMap;

use crate::Flowgraph;
use crate::error::FlowgraphError;

/// The locked graph store: every flow of one project, addressed by name.
#[derive(Debug, Clone)]
pub struct Pipeline {
  project: String,
  flows: BTreeMap<String, Flowgraph>,
}

impl Pipeline {
  pub fn new(project: impl Into<String>, flows: impl IntoIterator<Item = Flowgraph>) -> Self {
    Self {
      project: project.into(),
      flows: flows
        .into_iter()
        .map(|flow| (flow.name().to_string(), flow))
        .collect(),
    }
  }

  pub fn project(&self) -> &str {
    &self.project
  }

  pub fn flow(&self, name: &str) -> Result<&Flowgraph, FlowgraphError> {
    self.flows.get(name).ok_or_else(|| FlowgraphError::UnknownFlow {
      flow: name.to_string(),
    })
  }

  pub fn flow_names(&self) -> Vec<&str> {
    self.flows.keys().map(String::as_str).collect()
  }
}
