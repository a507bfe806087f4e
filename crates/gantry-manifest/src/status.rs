use serde::{Deserialize, Serialize};

/// Status of one node, persisted after a run.
///
/// Only `Success` lets resume planning treat a node's prior results as
/// satisfied; every other status forces re-execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
  Pending,
  Running,
  Success,
  Error,
  Skipped,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serializes_snake_case() {
    assert_eq!(serde_json::to_string(&NodeStatus::Success).unwrap(), "\"success\"");
    assert_eq!(
      serde_json::from_str::<NodeStatus>("\"error\"").unwrap(),
      NodeStatus::Error
    );
  }
}
