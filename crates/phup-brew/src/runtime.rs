use log::{debug, warn};
use tokio::process::Command;
use which::which;

use phup_backend::{BackendError, VersionToken};

use crate::parse::parse_version_banner;

/// Probe the currently linked PHP version by parsing the first line of
/// `php -v`. Returns `None` when no `php` is on `$PATH` or the banner is
/// not recognizable; there is then no active version to restore.
pub async fn active_version() -> Result<Option<VersionToken>, BackendError> {
    let Ok(php) = which("php") else {
        debug!("No php binary on PATH, no active version");
        return Ok(None);
    };

    let output = Command::new(&php).arg("-v").output().await?;

    if !output.status.success() {
        warn!(
            "php -v exited with {:?}, treating active version as unknown",
            output.status.code()
        );
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let token = parse_version_banner(&stdout);
    debug!(
        "Active version probe at {}: {:?}",
        php.display(),
        token.as_ref().map(VersionToken::as_str)
    );
    Ok(token)
}
