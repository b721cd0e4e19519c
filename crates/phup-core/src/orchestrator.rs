use std::fmt;
use thiserror::Error;

use phup_backend::{BackendError, PackageManager, VersionToken};

use crate::plan::{PlanStep, UpgradePlan};

/// Observer for step announcements; the CLI prints banners through this,
/// tests pass [`NullProgress`].
pub trait Progress {
    fn on_step(&mut self, step: &PlanStep);
}

#[derive(Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn on_step(&mut self, _step: &PlanStep) {}
}

/// What happened to the compensating re-link of the originally active
/// version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    NotNeeded,
    Restored(VersionToken),
    Failed {
        version: VersionToken,
        error: BackendError,
    },
}

impl fmt::Display for RestoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNeeded => write!(f, "no active version to restore"),
            Self::Restored(version) => {
                write!(f, "restored {} as the active version", version.formula())
            }
            Self::Failed { version, error } => {
                write!(f, "failed to restore {}: {error}", version.formula())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// A step failed; the remaining sequence was abandoned but the
    /// compensating restore was still attempted.
    #[error("{step} failed: {source}")]
    Step {
        step: String,
        #[source]
        source: BackendError,
        restore: RestoreOutcome,
    },

    /// Every step succeeded but the final re-link of the active version
    /// did not.
    #[error("restoring active version {} failed: {source}", version.formula())]
    Restore {
        version: VersionToken,
        #[source]
        source: BackendError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeOutcome {
    pub steps_run: usize,
    pub restore: RestoreOutcome,
}

/// Execute the plan sequentially. Any failing package-manager call is fatal
/// to the remaining sequence (no retries), but the re-link of the version
/// active at start still runs, and its failure is reported without masking
/// the original error.
pub async fn execute(
    manager: &dyn PackageManager,
    plan: &UpgradePlan,
    progress: &mut dyn Progress,
) -> Result<UpgradeOutcome, OrchestratorError> {
    for (index, step) in plan.steps.iter().enumerate() {
        progress.on_step(step);
        let result = match step {
            PlanStep::Unlink(version) => manager.unlink(&version.formula()).await,
            PlanStep::Link(version) => manager.link(&version.formula()).await,
            PlanStep::Upgrade(package) => manager.upgrade(&package.formula()).await,
        };

        if let Err(source) = result {
            log::error!("{step} failed, abandoning remaining {} steps", plan.steps.len() - index - 1);
            let restore = attempt_restore(manager, plan.restore.as_ref(), progress).await;
            return Err(OrchestratorError::Step {
                step: step.to_string(),
                source,
                restore,
            });
        }
    }

    let Some(version) = plan.restore.as_ref() else {
        return Ok(UpgradeOutcome {
            steps_run: plan.steps.len(),
            restore: RestoreOutcome::NotNeeded,
        });
    };

    progress.on_step(&PlanStep::Link(version.clone()));
    match manager.link(&version.formula()).await {
        Ok(()) => Ok(UpgradeOutcome {
            steps_run: plan.steps.len(),
            restore: RestoreOutcome::Restored(version.clone()),
        }),
        Err(source) => Err(OrchestratorError::Restore {
            version: version.clone(),
            source,
        }),
    }
}

async fn attempt_restore(
    manager: &dyn PackageManager,
    restore: Option<&VersionToken>,
    progress: &mut dyn Progress,
) -> RestoreOutcome {
    let Some(version) = restore else {
        return RestoreOutcome::NotNeeded;
    };

    progress.on_step(&PlanStep::Link(version.clone()));
    match manager.link(&version.formula()).await {
        Ok(()) => RestoreOutcome::Restored(version.clone()),
        Err(error) => {
            log::error!("compensating restore of {} failed: {error}", version.formula());
            RestoreOutcome::Failed {
                version: version.clone(),
                error,
            }
        }
    }
}
