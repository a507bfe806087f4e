use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::status::NodeStatus;

/// The per-node output manifest.
///
/// Written by the external scheduler into the node's `outputs/` directory
/// once the node reaches a terminal state; read back by resume planning on
/// the next invocation. Encodes at minimum the node's terminal status and
/// its produced-artifact listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeManifest {
  pub project: String,
  pub flow: String,
  pub step: String,
  pub index: String,
  pub status: NodeStatus,
  #[serde(default)]
  pub outputs: Vec<String>,
  pub started_at: DateTime<Utc>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub completed_at: Option<DateTime<Utc>>,
}

impl NodeManifest {
  /// Read a manifest from disk.
  pub fn read(path: &Path) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    let manifest = serde_json::from_str(&content)?;
    Ok(manifest)
  }

  /// Write the manifest to disk as pretty-printed JSON.
  pub fn write(&self, path: &Path) -> Result<(), Error> {
    let content = serde_json::to_string_pretty(self)?;
    fs::write(path, content)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_manifest() -> NodeManifest {
    NodeManifest {
      project: "gcd".to_string(),
      flow: "asicflow".to_string(),
      step: "syn".to_string(),
      index: "0".to_string(),
      status: NodeStatus::Success,
      outputs: vec!["gcd.vg".to_string()],
      started_at: Utc::now(),
      completed_at: Some(Utc::now()),
    }
  }

  #[test]
  fn round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gcd.pkg.json");

    let manifest = sample_manifest();
    manifest.write(&path).unwrap();

    let read = NodeManifest::read(&path).unwrap();
    assert_eq!(read, manifest);
  }

  #[test]
  fn rejects_corrupt_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gcd.pkg.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(NodeManifest::read(&path), Err(Error::Parse(_))));
  }

  #[test]
  fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.pkg.json");

    assert!(matches!(NodeManifest::read(&path), Err(Error::Io(_))));
  }
}
