mod cli;
mod logging;

use clap::{Parser, Subcommand};
use restack_core::{config, git::CliGitProvider};
use std::{path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(
    version,
    about = "Interactive git rebase editor with file-level commit splitting",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Override path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Upstream to rebase onto, plus any extra `git rebase` arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    rebase_args: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit a rebase todo script in place (set `restack edit` as your
    /// GIT_SEQUENCE_EDITOR)
    Edit { todo_file: PathBuf },
    /// Overwrite a rebase todo file with a precompiled script
    #[command(hide = true)]
    ReplaceTodo { source: PathBuf, todo_file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = logging::setup_logging(log::LevelFilter::Info) {
        eprintln!("warning: failed to initialise logging: {error}");
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let cli_error = cli::CliError::system(error.to_string());
            cli::print_error(&cli_error);
            return ExitCode::from(2);
        }
    };

    let git = CliGitProvider;

    let result = match cli.command {
        Some(Commands::Edit { todo_file }) => cli::cmd_edit(&config, &git, &todo_file),
        Some(Commands::ReplaceTodo { source, todo_file }) => {
            cli::cmd_replace_todo(&source, &todo_file)
        }
        None => cli::cmd_rebase(&config, &git, &cli.rebase_args),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            cli::print_error(&error);
            let code: u8 = match error.code() {
                1 => 1,
                _ => 2,
            };
            ExitCode::from(code)
        }
    }
}
