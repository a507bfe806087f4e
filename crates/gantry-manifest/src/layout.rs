use std::fs;
use std::path::PathBuf;

use crate::Error;

/// Directory scheme for one build tree.
///
/// Every node owns a working directory under
/// `<build_dir>/<project>/<job>/<step>/<index>`, with produced artifacts and
/// the node manifest inside its `outputs/` subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
  pub build_dir: PathBuf,
  pub project: String,
  pub job: String,
}

impl BuildLayout {
  /// The working directory of a node.
  pub fn node_dir(&self, step: &str, index: &str) -> PathBuf {
    self
      .build_dir
      .join(&self.project)
      .join(&self.job)
      .join(step)
      .join(index)
  }

  /// The outputs directory of a node.
  pub fn outputs_dir(&self, step: &str, index: &str) -> PathBuf {
    self.node_dir(step, index).join("outputs")
  }

  /// The manifest filename, derived deterministically from the project name.
  pub fn manifest_filename(&self) -> String {
    format!("{}.pkg.json", self.project)
  }

  /// The path of a node's persisted manifest.
  pub fn manifest_path(&self, step: &str, index: &str) -> PathBuf {
    self.outputs_dir(step, index).join(self.manifest_filename())
  }

  /// List the artifact names present in a node's outputs directory,
  /// excluding the manifest file. Sorted for deterministic reporting.
  pub fn list_outputs(&self, step: &str, index: &str) -> Result<Vec<String>, Error> {
    let manifest = self.manifest_filename();
    let mut outputs = Vec::new();

    for entry in fs::read_dir(self.outputs_dir(step, index))? {
      let entry = entry?;
      let name = match entry.file_name().into_string() {
        Ok(name) => name,
        Err(_) => continue,
      };
      if name != manifest {
        outputs.push(name);
      }
    }

    outputs.sort();
    Ok(outputs)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn test_layout(build_dir: PathBuf) -> BuildLayout {
    BuildLayout {
      build_dir,
      project: "gcd".to_string(),
      job: "job0".to_string(),
    }
  }

  #[test]
  fn node_paths_follow_scheme() {
    let layout = test_layout(PathBuf::from("build"));

    assert_eq!(layout.node_dir("syn", "0"), PathBuf::from("build/gcd/job0/syn/0"));
    assert_eq!(
      layout.manifest_path("syn", "0"),
      PathBuf::from("build/gcd/job0/syn/0/outputs/gcd.pkg.json")
    );
  }

  #[test]
  fn list_outputs_excludes_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let layout = test_layout(dir.path().to_path_buf());

    let outputs = layout.outputs_dir("syn", "0");
    fs::create_dir_all(&outputs).unwrap();
    fs::write(outputs.join("gcd.vg"), "module gcd;").unwrap();
    fs::write(outputs.join("gcd.pkg.json"), "{}").unwrap();

    assert_eq!(layout.list_outputs("syn", "0").unwrap(), vec!["gcd.vg"]);
  }

  #[test]
  fn missing_outputs_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let layout = test_layout(dir.path().to_path_buf());

    assert!(matches!(layout.list_outputs("syn", "0"), Err(Error::Io(_))));
  }
}
