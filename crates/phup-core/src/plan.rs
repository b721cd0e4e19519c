use std::fmt;

use phup_backend::{InstalledPackages, Package, VersionToken};

use crate::request::UpgradeRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    Unlink(VersionToken),
    /// Link without upgrading, solely to make the version's extensions
    /// upgradable.
    Link(VersionToken),
    Upgrade(Package),
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlink(version) => write!(f, "unlink {}", version.formula()),
            Self::Link(version) => write!(f, "link {}", version.formula()),
            Self::Upgrade(package) => write!(f, "upgrade {}", package.formula()),
        }
    }
}

/// The full sequenced protocol, computed up front from immutable inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradePlan {
    pub steps: Vec<PlanStep>,
    /// The version that was active at process start, to re-link exactly
    /// once at the end.
    pub restore: Option<VersionToken>,
}

/// Build the unlink-all, per-version upgrade, re-link-active sequence.
#[must_use]
pub fn plan_upgrade(
    installed: &InstalledPackages,
    request: &UpgradeRequest,
    active: Option<&VersionToken>,
) -> UpgradePlan {
    let mut steps = Vec::new();

    // Every installed interpreter gets unlinked, not just the requested
    // ones; conflicting versions cannot be linked simultaneously.
    for version in installed.versions() {
        steps.push(PlanStep::Unlink(version));
    }

    for group in request.groups() {
        if group.interpreter_requested {
            // Upgrading re-links the version as a side effect.
            steps.push(PlanStep::Upgrade(Package::Interpreter(
                group.version.clone(),
            )));
        } else {
            steps.push(PlanStep::Link(group.version.clone()));
        }
        for extension in &group.extensions {
            steps.push(PlanStep::Upgrade(extension.clone()));
        }
        steps.push(PlanStep::Unlink(group.version.clone()));
    }

    UpgradePlan {
        steps,
        restore: active.cloned(),
    }
}
