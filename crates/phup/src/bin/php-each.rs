use async_trait::async_trait;
use clap::Parser;
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitCode, Stdio};
use tokio::process::Command;

use phup::{logging, setup};
use phup_backend::VersionToken;
use phup_core::{Invoker, RunProgress, VersionList, run_each};

/// Run a command against every installed Homebrew PHP version in turn.
/// All arguments are forwarded verbatim to each version's `php` executable;
/// per-invocation exit statuses are not aggregated.
#[derive(Parser)]
#[command(
    name = "php-each",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARG")]
    args: Vec<OsString>,
}

struct Banner;

impl RunProgress for Banner {
    fn on_version(&mut self, version: &VersionToken) {
        println!("==> php {} ({})", version.dotted(), version.formula());
    }
}

struct ProcessInvoker;

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn invoke(&mut self, binary: &Path, args: &[OsString]) -> std::io::Result<Option<i32>> {
        let status = Command::new(binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;
        Ok(status.code())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_from_env();
    let cli = Cli::parse();

    let manager = match setup::connect().await {
        Ok(manager) => manager,
        Err(error) => {
            eprintln!("php-each: {error}");
            return ExitCode::FAILURE;
        }
    };

    let installed = match setup::load_installed(&manager).await {
        Ok(installed) => installed,
        Err(error) => {
            eprintln!("php-each: {error}");
            return ExitCode::FAILURE;
        }
    };

    let summary = run_each(
        &manager,
        &VersionList::from_installed(&installed),
        &cli.args,
        &mut ProcessInvoker,
        &mut Banner,
    )
    .await;
    log::debug!(
        "ran {} versions, skipped {}",
        summary.invoked,
        summary.skipped
    );

    ExitCode::SUCCESS
}
