//! Gantry Manifest
//!
//! This crate defines the persisted per-node state the planning engine reads
//! when resuming a run. The external scheduler owns the writes: after a node
//! reaches a terminal state it records a [`NodeManifest`] inside the node's
//! `outputs/` directory, named deterministically from the project name. The
//! planner only ever reads these files.
//!
//! [`BuildLayout`] captures the directory scheme shared with the scheduler:
//! `<build_dir>/<project>/<job>/<step>/<index>/outputs/`.

mod layout;
mod manifest;
mod status;

pub use layout::BuildLayout;
pub use manifest::NodeManifest;
pub use status::NodeStatus;

/// Error type for manifest and layout reads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The manifest file is not valid JSON for a [`NodeManifest`].
  #[error("invalid manifest: {0}")]
  Parse(#[from] serde_json::Error),
}
