use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::BackendError;

#[derive(Debug, Clone)]
pub struct ManagerInfo {
    pub name: &'static str,
    pub path: PathBuf,
    pub version: Option<String>,
    pub in_path: bool,
}

/// The seam between the orchestration logic and the concrete package
/// manager. Mutating operations (`link`, `unlink`, `upgrade`) run with
/// inherited stdio so the manager's own output reaches the user; queries
/// capture stdout for parsing.
#[async_trait]
pub trait PackageManager: Send + Sync + PackageManagerClone {
    fn name(&self) -> &'static str;

    fn info(&self) -> &ManagerInfo;

    /// Identifiers of every installed formula, one per line of the
    /// manager's list output.
    async fn list_formulas(&self) -> Result<Vec<String>, BackendError>;

    /// Link a formula into the shared prefix, overwriting conflicting files.
    async fn link(&self, formula: &str) -> Result<(), BackendError>;

    /// Remove a formula's symlinks from the shared prefix.
    async fn unlink(&self, formula: &str) -> Result<(), BackendError>;

    /// Upgrade a formula. Upgrading an unlinked formula re-links it as a
    /// side effect of the manager's install step.
    async fn upgrade(&self, formula: &str) -> Result<(), BackendError>;

    /// Installation prefix of a formula.
    async fn prefix(&self, formula: &str) -> Result<PathBuf, BackendError>;
}

pub trait PackageManagerClone: Send + Sync {
    fn clone_box(&self) -> Box<dyn PackageManager>;
}

impl<T> PackageManagerClone for T
where
    T: 'static + PackageManager + Clone,
{
    fn clone_box(&self) -> Box<dyn PackageManager> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn PackageManager> {
    fn clone(&self) -> Box<dyn PackageManager> {
        self.clone_box()
    }
}

impl<T: PackageManager + Clone + 'static> From<T> for Box<dyn PackageManager> {
    fn from(manager: T) -> Self {
        Box::new(manager)
    }
}
