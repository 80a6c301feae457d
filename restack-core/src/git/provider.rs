use std::path::{Path, PathBuf};

use anyhow::Result;

/// Everything the plan model needs to know about one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDetails {
    /// Full object id.
    pub id: String,
    /// Full commit message, body included.
    pub message: String,
    /// Paths the commit changed relative to its parent.
    pub changed_paths: Vec<String>,
}

/// Result of driving a whole `git rebase -i` run.
#[derive(Debug, Clone)]
pub struct RebaseOutcome {
    pub success: bool,
    /// Combined stdout and stderr, surfaced to the user verbatim.
    pub output: String,
}

/// Abstraction over git operations, so logic that talks to a repository can
/// run against a mock in tests.
pub trait GitProvider {
    fn commit_details(&self, repo: &Path, rev: &str) -> Result<CommitDetails>;

    /// Commits in `<upstream>..HEAD`, oldest first (replay order).
    fn commits_in_range(&self, repo: &Path, upstream: &str) -> Result<Vec<CommitDetails>>;

    fn head_commit(&self, repo: &Path) -> Result<CommitDetails>;

    /// `reset --mixed HEAD~1`: step back one commit, keep its changes in the
    /// working tree.
    fn reset_keep_changes(&self, repo: &Path) -> Result<()>;

    /// `reset --hard HEAD~1`: step back one commit, discard its changes.
    fn reset_discard_changes(&self, repo: &Path) -> Result<()>;

    fn stage_paths(&self, repo: &Path, paths: &[String]) -> Result<()>;

    fn commit_with_message(&self, repo: &Path, message: &str) -> Result<()>;

    /// Discard unstaged working tree changes.
    fn restore_worktree(&self, repo: &Path) -> Result<()>;

    /// Path to the in-progress rebase's remaining todo script.
    fn rebase_todo_path(&self, repo: &Path) -> Result<PathBuf>;

    /// Run `git rebase -i <args>` with `GIT_SEQUENCE_EDITOR` pointed at
    /// `sequence_editor`, capturing everything git prints.
    fn run_interactive_rebase(
        &self,
        repo: &Path,
        args: &[String],
        sequence_editor: &str,
    ) -> Result<RebaseOutcome>;
}
