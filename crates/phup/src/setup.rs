use log::debug;

use phup_backend::{BackendError, InstalledPackages, PackageManager};
use phup_brew::{BrewClient, detect_brew};

/// Locate brew and build a client for it.
///
/// # Errors
/// Returns [`BackendError::NotFound`] when no brew binary can be located.
pub async fn connect() -> Result<BrewClient, BackendError> {
    let detection = detect_brew().await;
    if !detection.found {
        return Err(BackendError::NotFound);
    }

    let client = detection.client();
    debug!(
        "Using brew {} at {}",
        client.info().version.as_deref().unwrap_or("(unknown)"),
        client.info().path.display()
    );
    Ok(client)
}

/// Query the manager for installed formulas and classify the versioned
/// PHP packages among them.
///
/// # Errors
/// Returns an error if the list query fails.
pub async fn load_installed(
    manager: &dyn PackageManager,
) -> Result<InstalledPackages, BackendError> {
    let identifiers = manager.list_formulas().await?;
    Ok(InstalledPackages::from_identifiers(
        identifiers.iter().map(String::as_str),
    ))
}
