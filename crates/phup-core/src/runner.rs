use async_trait::async_trait;
use log::{debug, warn};
use std::ffi::OsString;
use std::path::Path;

use phup_backend::{PackageManager, VersionToken};

use crate::enumerate::VersionList;

/// Launches one version's executable. The CLI spawns a real process with
/// inherited stdio; tests record.
#[async_trait]
pub trait Invoker {
    /// Returns the exit code, or `None` when the process was terminated by
    /// a signal.
    async fn invoke(&mut self, binary: &Path, args: &[OsString]) -> std::io::Result<Option<i32>>;
}

/// Observer for per-version announcements, the batch counterpart of
/// [`crate::Progress`].
pub trait RunProgress {
    fn on_version(&mut self, version: &VersionToken);
}

#[derive(Debug, Default)]
pub struct NullRunProgress;

impl RunProgress for NullRunProgress {
    fn on_version(&mut self, _version: &VersionToken) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub invoked: usize,
    pub skipped: usize,
}

/// Invoke the forwarded arguments against every installed version in
/// ascending order. Best effort throughout: a version whose prefix cannot
/// be resolved is skipped, and neither a failing spawn nor a non-zero exit
/// status stops the loop.
pub async fn run_each(
    manager: &dyn PackageManager,
    versions: &VersionList,
    args: &[OsString],
    invoker: &mut dyn Invoker,
    progress: &mut dyn RunProgress,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for version in versions.tokens() {
        progress.on_version(version);

        let prefix = match manager.prefix(&version.formula()).await {
            Ok(prefix) => prefix,
            Err(error) => {
                warn!("skipping {}: {error}", version.formula());
                summary.skipped += 1;
                continue;
            }
        };

        let binary = prefix.join("bin").join("php");
        match invoker.invoke(&binary, args).await {
            Ok(code) => debug!("{} exited with {code:?}", binary.display()),
            Err(error) => warn!("{}: {error}", binary.display()),
        }
        summary.invoked += 1;
    }

    summary
}
