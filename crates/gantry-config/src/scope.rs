use serde::{Deserialize, Serialize};

use crate::node::NodeRef;

/// Everything that scopes a single planning invocation.
///
/// `flow` names the flow the scope options were written for; engine queries
/// against a different flow ignore `from`/`to`. The `step`/`index` pins take
/// priority over the declarative `from`/`to` lists, which in turn take
/// priority over the structural entry/exit nodes of the graph. `prune` names
/// nodes to treat as absent, together with everything only reachable through
/// them. `clean` disables resume, forcing every scoped node to execute.
///
/// A scope is recomputed per invocation and never persisted as topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunScope {
  pub flow: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub step: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub index: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub from: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub to: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub prune: Vec<NodeRef>,
  #[serde(default)]
  pub clean: bool,
}

impl RunScope {
  /// An unconstrained scope for the given flow: structural entry and exit
  /// nodes, nothing pruned, resume enabled.
  pub fn new(flow: impl Into<String>) -> Self {
    Self {
      flow: flow.into(),
      step: None,
      index: None,
      from: Vec::new(),
      to: Vec::new(),
      prune: Vec::new(),
      clean: false,
    }
  }
}
