use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Result, anyhow, bail};

use super::provider::{CommitDetails, GitProvider, RebaseOutcome};

/// Scripted provider for tests that need git-shaped behavior without a real
/// repository. Records every mutating call so tests can assert on the exact
/// sequence of operations.
pub struct MockGitProvider {
    pub commits: Vec<CommitDetails>,
    /// Successive answers for `head_commit`, consumed front to back.
    head_sequence: Mutex<Vec<CommitDetails>>,
    /// Error message to return from `stage_paths`, if any.
    pub stage_error: Mutex<Option<String>>,
    pub todo_path: PathBuf,
    pub calls: Mutex<Vec<String>>,
}

impl MockGitProvider {
    pub fn new(commits: Vec<CommitDetails>) -> Self {
        Self {
            commits,
            head_sequence: Mutex::new(Vec::new()),
            stage_error: Mutex::new(None),
            todo_path: PathBuf::from("/mock/git-rebase-todo"),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_head_sequence(self, heads: Vec<CommitDetails>) -> Self {
        *self.head_sequence.lock().unwrap() = heads;
        self
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GitProvider for MockGitProvider {
    fn commit_details(&self, _repo: &Path, rev: &str) -> Result<CommitDetails> {
        self.commits
            .iter()
            .find(|c| c.id.starts_with(rev))
            .cloned()
            .ok_or_else(|| anyhow!("unknown rev: {rev}"))
    }

    fn commits_in_range(&self, _repo: &Path, _upstream: &str) -> Result<Vec<CommitDetails>> {
        Ok(self.commits.clone())
    }

    fn head_commit(&self, _repo: &Path) -> Result<CommitDetails> {
        let mut heads = self.head_sequence.lock().unwrap();
        if heads.is_empty() {
            bail!("mock head sequence exhausted");
        }
        Ok(heads.remove(0))
    }

    fn reset_keep_changes(&self, _repo: &Path) -> Result<()> {
        self.record("reset-keep".to_string());
        Ok(())
    }

    fn reset_discard_changes(&self, _repo: &Path) -> Result<()> {
        self.record("reset-discard".to_string());
        Ok(())
    }

    fn stage_paths(&self, _repo: &Path, paths: &[String]) -> Result<()> {
        self.record(format!("stage {}", paths.join(" ")));
        if let Some(message) = self.stage_error.lock().unwrap().take() {
            bail!("{message}");
        }
        Ok(())
    }

    fn commit_with_message(&self, _repo: &Path, message: &str) -> Result<()> {
        let summary = message.lines().next().unwrap_or_default();
        self.record(format!("commit {summary}"));
        Ok(())
    }

    fn restore_worktree(&self, _repo: &Path) -> Result<()> {
        self.record("restore".to_string());
        Ok(())
    }

    fn rebase_todo_path(&self, _repo: &Path) -> Result<PathBuf> {
        Ok(self.todo_path.clone())
    }

    fn run_interactive_rebase(
        &self,
        _repo: &Path,
        args: &[String],
        sequence_editor: &str,
    ) -> Result<RebaseOutcome> {
        self.record(format!("rebase {} [{sequence_editor}]", args.join(" ")));
        Ok(RebaseOutcome {
            success: true,
            output: String::new(),
        })
    }
}
