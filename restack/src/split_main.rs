mod logging;

use clap::Parser;
use restack_core::{git::CliGitProvider, plan::RebaseAction, split};
use std::process::ExitCode;

/// Split-commit helper, run by the `exec` lines of restack's generated
/// rebase scripts. Narrows the commit git just picked down to the given
/// paths and, for actions other than pick, re-queues the narrowed commit
/// under that action.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Rebase action for the narrowed commit
    #[arg(short, long, default_value = "pick")]
    action: String,

    /// Paths to keep in the narrowed commit
    #[arg(required = true)]
    paths: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = logging::setup_logging(log::LevelFilter::Info) {
        eprintln!("warning: failed to initialise logging: {error}");
    }

    let Some(action) = RebaseAction::parse(&cli.action) else {
        eprintln!("restack-split: unknown action '{}'", cli.action);
        return ExitCode::from(2);
    };

    let repo = match std::env::current_dir() {
        Ok(repo) => repo,
        Err(error) => {
            eprintln!("restack-split: {error}");
            return ExitCode::from(2);
        }
    };

    // A non-zero exit here makes git stop the whole rebase, which is exactly
    // what a failed split requires.
    match split::run_split(&CliGitProvider, &repo, action, &cli.paths) {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            log::error!("split failed: {error:#}");
            eprintln!("restack-split: {error:#}");
            ExitCode::from(1)
        }
    }
}
