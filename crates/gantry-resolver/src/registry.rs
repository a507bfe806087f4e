use std::collections::HashMap;

use gantry_config::TaskDef;

/// Source of task IO contracts for the resolver.
///
/// The distinguished `builtin` tool never reaches the registry; its tasks
/// are pass-through and carry no contract.
pub trait TaskRegistry {
  /// Look up the contract declared for a `(tool, task)` pair.
  fn get(&self, tool: &str, task: &str) -> Option<TaskDef>;
}

/// In-memory registry, usually built from the pipeline's own task table.
pub struct TableRegistry {
  tasks: HashMap<String, TaskDef>,
}

impl TableRegistry {
  pub fn new(tasks: impl IntoIterator<Item = TaskDef>) -> Self {
    Self {
      tasks: tasks
        .into_iter()
        .map(|task| (format!("{}.{}", task.tool, task.task), task))
        .collect(),
    }
  }

  pub fn insert(&mut self, task: TaskDef) {
    self
      .tasks
      .insert(format!("{}.{}", task.tool, task.task), task);
  }
}

impl TaskRegistry for TableRegistry {
  fn get(&self, tool: &str, task: &str) -> Option<TaskDef> {
    self.tasks.get(&format!("{tool}.{task}")).cloned()
  }
}
