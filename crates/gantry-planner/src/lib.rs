//! Gantry Planner
//!
//! This crate turns a locked pipeline plus a run scope into a [`RunPlan`]:
//! the exact nodes to execute, layered for parallelism, with nodes already
//! covered by persisted results split out as satisfied.
//!
//! Planning validates before it plans:
//! - scope references (flow, steps, nodes, prune entries) must exist
//! - scoping must not cut a node off from inputs it requires
//! - every exit step must stay reachable under pruning
//! - every standard task's declared inputs must be deliverable, either by
//!   in-set upstream contracts or by artifacts already on disk
//!
//! Resume reduction then drops nodes whose persisted manifests record
//! success, unless the scope's `clean` flag disables resume. All of this is
//! synchronous and per-invocation; the planner holds no state besides the
//! build layout it reads from.

mod check;
mod error;
mod plan;
mod planner;
mod resume;

pub use error::PlanError;
pub use plan::RunPlan;
pub use planner::RunPlanner;
pub use resume::{ResumePlan, resume_plan};
