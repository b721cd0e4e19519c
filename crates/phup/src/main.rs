use clap::Parser;
use std::process::ExitCode;

use phup::{logging, setup};
use phup_core::{
    OrchestratorError, PlanStep, Progress, RequestError, VersionList, build_request, execute,
    plan_upgrade,
};

/// Upgrade Homebrew PHP versions and their extensions side by side,
/// restoring the originally active version afterwards.
#[derive(Parser)]
#[command(name = "phup", version)]
struct Cli {
    /// Version or extension identifiers to upgrade (`56`, `php70`,
    /// `56-xdebug`); the `php` prefix is optional.
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,
}

const EXIT_USAGE: u8 = 1;
const EXIT_UNKNOWN_PACKAGE: u8 = 2;

struct Banner;

impl Progress for Banner {
    fn on_step(&mut self, step: &PlanStep) {
        println!("==> {step}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_from_env();
    let cli = Cli::parse();

    let manager = match setup::connect().await {
        Ok(manager) => manager,
        Err(error) => {
            eprintln!("phup: {error}");
            return ExitCode::FAILURE;
        }
    };

    let installed = match setup::load_installed(&manager).await {
        Ok(installed) => installed,
        Err(error) => {
            eprintln!("phup: {error}");
            return ExitCode::FAILURE;
        }
    };

    let request = match build_request(&cli.packages, &installed) {
        Ok(request) => request,
        Err(RequestError::NoArguments) => {
            let versions = VersionList::from_installed(&installed);
            eprintln!("Usage: phup <PACKAGE>...");
            eprintln!();
            eprintln!("Installed PHP versions: {}", versions.display_join());
            return ExitCode::from(EXIT_USAGE);
        }
        Err(error @ RequestError::UnknownPackage { .. }) => {
            eprintln!("phup: {error}");
            eprintln!(
                "Installed packages: {}",
                installed.identifiers().join(", ")
            );
            return ExitCode::from(EXIT_UNKNOWN_PACKAGE);
        }
    };

    let active = match phup_brew::active_version().await {
        Ok(active) => active,
        Err(error) => {
            eprintln!("phup: could not probe the active version: {error}");
            None
        }
    };

    let plan = plan_upgrade(&installed, &request, active.as_ref());
    match execute(&manager, &plan, &mut Banner).await {
        Ok(outcome) => {
            println!("==> Done: {}", outcome.restore);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("phup: {error}");
            if let OrchestratorError::Step { restore, .. } = &error {
                eprintln!("phup: {restore}");
            }
            ExitCode::FAILURE
        }
    }
}
