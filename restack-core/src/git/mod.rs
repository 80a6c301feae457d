mod cli;
mod mock;
mod provider;

pub use cli::CliGitProvider;
pub use mock::MockGitProvider;
pub use provider::{CommitDetails, GitProvider, RebaseOutcome};
