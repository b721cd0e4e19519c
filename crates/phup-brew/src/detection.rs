use std::path::PathBuf;
use tokio::process::Command;
use which::which;

use crate::client::BrewClient;

#[derive(Debug, Clone)]
pub struct BrewDetection {
    pub found: bool,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
    pub in_path: bool,
}

impl BrewDetection {
    /// Build a client from the detection result, falling back to the bare
    /// binary name when nothing was found.
    #[must_use]
    pub fn client(&self) -> BrewClient {
        let path = self.path.clone().unwrap_or_else(|| PathBuf::from("brew"));
        BrewClient::new(path, self.version.clone(), self.in_path)
    }
}

pub async fn detect_brew() -> BrewDetection {
    if let Ok(path) = which("brew") {
        let version = get_brew_version(&path).await;
        return BrewDetection {
            found: true,
            path: Some(path),
            version,
            in_path: true,
        };
    }

    for path in common_brew_paths() {
        if path.exists() {
            let version = get_brew_version(&path).await;
            return BrewDetection {
                found: true,
                path: Some(path),
                version,
                in_path: false,
            };
        }
    }

    BrewDetection {
        found: false,
        path: None,
        version: None,
        in_path: false,
    }
}

fn common_brew_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/opt/homebrew/bin/brew"),
        PathBuf::from("/usr/local/bin/brew"),
        PathBuf::from("/home/linuxbrew/.linuxbrew/bin/brew"),
    ]
}

async fn get_brew_version(path: &PathBuf) -> Option<String> {
    let output = Command::new(path).arg("--version").output().await.ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next()?.trim();
    Some(
        first_line
            .strip_prefix("Homebrew ")
            .unwrap_or(first_line)
            .to_string(),
    )
}
