mod enumerate;
mod orchestrator;
mod plan;
mod request;
mod runner;

pub use enumerate::VersionList;
pub use orchestrator::{
    NullProgress, OrchestratorError, Progress, RestoreOutcome, UpgradeOutcome, execute,
};
pub use plan::{PlanStep, UpgradePlan, plan_upgrade};
pub use request::{RequestError, UpgradeRequest, VersionGroup, build_request};
pub use runner::{Invoker, NullRunProgress, RunProgress, RunSummary, run_each};
