//! Multi-stage deployment runs
//!
//! A run is a [`DeployPlan`]: an ordered list of stages, each either a
//! progress reconciliation, a single artifact copy or a tree mirror. The
//! [`Deployer`] checks every precondition before touching anything, then
//! runs the stages in order. A failing stage is recorded in the
//! [`DeploySummary`] and the run moves on.

mod plan;
mod reporting;
mod runner;

pub use plan::{DeployPlan, Stage, StageKind};
pub use reporting::DeployReporter;
pub use runner::{DeploySummary, Deployer, StageOutcome, StageResult};
