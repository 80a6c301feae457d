pub mod action;
pub mod config;
pub mod distribute;
pub mod git;
pub mod history;
pub mod plan;
pub mod selection;
pub mod split;
pub mod state;
pub mod todo;

// Re-export commonly used types at crate root
pub use action::Action;
pub use config::Config;
pub use distribute::{DistributeError, distribute_changes};
pub use git::{CliGitProvider, CommitDetails, GitProvider, MockGitProvider, RebaseOutcome};
pub use history::History;
pub use plan::{FileChange, Plan, RebaseAction, RebaseItem};
pub use state::{EditorMode, EditorState};
