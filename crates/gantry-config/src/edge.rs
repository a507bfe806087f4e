use serde::{Deserialize, Serialize};

use crate::node::NodeRef;

/// A directed edge from an upstream node to a downstream node.
///
/// The declaration order of a flow's edges defines the ordered upstream-input
/// list of each target node. Declaring the same edge twice is a structural
/// error caught when the flow is locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDef {
  pub from: NodeRef,
  pub to: NodeRef,
}
