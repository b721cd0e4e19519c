use async_trait::async_trait;
use log::{debug, error, info, trace};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use phup_backend::{BackendError, ManagerInfo, PackageManager};

use crate::parse::parse_formula_identifiers;

#[derive(Clone)]
pub struct BrewClient {
    info: ManagerInfo,
}

impl BrewClient {
    #[must_use]
    pub fn new(path: PathBuf, version: Option<String>, in_path: bool) -> Self {
        Self {
            info: ManagerInfo {
                name: "brew",
                path,
                version,
                in_path,
            },
        }
    }

    fn build_command(&self, args: &[&str]) -> Command {
        debug!(
            "Building brew command: {} {}",
            self.info.path.display(),
            args.join(" ")
        );

        let mut cmd = Command::new(&self.info.path);
        cmd.args(args);
        cmd.env("HOMEBREW_NO_AUTO_UPDATE", "1");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Run a query, capturing stdout for parsing.
    async fn capture(&self, args: &[&str]) -> Result<String, BackendError> {
        info!("Executing brew query: {}", args.join(" "));

        let output = self.build_command(args).output().await?;

        debug!("brew exit status: {:?}", output.status);
        trace!("brew stdout: {}", String::from_utf8_lossy(&output.stdout));

        if !output.stderr.is_empty() {
            trace!("brew stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            error!("brew query failed: args={args:?}, stderr='{stderr}'");
            Err(BackendError::CommandFailed { stderr })
        }
    }

    /// Run a mutating call with inherited stdio so brew's own progress and
    /// error text reaches the user directly.
    async fn run(&self, args: &[&str]) -> Result<(), BackendError> {
        info!("Executing brew command: {}", args.join(" "));

        let status = self
            .build_command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            let code = status.code().unwrap_or(-1);
            error!("brew command failed: args={args:?}, code={code}");
            Err(BackendError::ExitStatus { code })
        }
    }
}

#[async_trait]
impl PackageManager for BrewClient {
    fn name(&self) -> &'static str {
        "brew"
    }

    fn info(&self) -> &ManagerInfo {
        &self.info
    }

    async fn list_formulas(&self) -> Result<Vec<String>, BackendError> {
        let output = self.capture(&["list", "--formula"]).await?;
        Ok(parse_formula_identifiers(&output))
    }

    async fn link(&self, formula: &str) -> Result<(), BackendError> {
        self.run(&["link", "--overwrite", formula]).await
    }

    async fn unlink(&self, formula: &str) -> Result<(), BackendError> {
        self.run(&["unlink", formula]).await
    }

    async fn upgrade(&self, formula: &str) -> Result<(), BackendError> {
        self.run(&["upgrade", formula]).await
    }

    async fn prefix(&self, formula: &str) -> Result<PathBuf, BackendError> {
        let output = self.capture(&["--prefix", formula]).await?;
        let path = output.trim();
        if path.is_empty() {
            return Err(BackendError::parse("brew --prefix", "empty output"));
        }
        Ok(PathBuf::from(path))
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::path::PathBuf;

    use phup_backend::PackageManager;

    use super::BrewClient;

    fn client() -> BrewClient {
        BrewClient::new(PathBuf::from("/usr/local/bin/brew"), None, true)
    }

    fn args_of(cmd: &tokio::process::Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn build_command_targets_detected_binary() {
        let cmd = client().build_command(&["list", "--formula"]);

        assert_eq!(
            cmd.as_std().get_program(),
            OsStr::new("/usr/local/bin/brew")
        );
        assert_eq!(args_of(&cmd), vec!["list", "--formula"]);
    }

    #[test]
    fn build_command_disables_auto_update_and_color() {
        let cmd = client().build_command(&["upgrade", "php56"]);
        let envs: Vec<(String, Option<String>)> = cmd
            .as_std()
            .get_envs()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.map(|v| v.to_string_lossy().into_owned()),
                )
            })
            .collect();

        assert!(envs.contains(&(
            "HOMEBREW_NO_AUTO_UPDATE".to_string(),
            Some("1".to_string())
        )));
        assert!(envs.contains(&("NO_COLOR".to_string(), Some("1".to_string()))));
    }

    #[test]
    fn info_reports_brew_identity() {
        let client = client();

        assert_eq!(client.name(), "brew");
        assert_eq!(client.info().name, "brew");
        assert!(client.info().in_path);
    }
}
