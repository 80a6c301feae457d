use std::{
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::Result;

use super::provider::{CommitDetails, GitProvider, RebaseOutcome};

pub struct CliGitProvider;

impl CliGitProvider {
    fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
        let output = Command::new("git").args(args).current_dir(repo).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("git {} failed: {stderr}", args.first().unwrap_or(&""));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitProvider for CliGitProvider {
    fn commit_details(&self, repo: &Path, rev: &str) -> Result<CommitDetails> {
        let id = Self::run_git(repo, &["rev-parse", &format!("{rev}^{{commit}}")])?
            .trim()
            .to_string();
        let message = Self::run_git(repo, &["log", "-1", "--format=%B", &id])?
            .trim_end_matches('\n')
            .to_string();
        let changed_paths = Self::run_git(repo, &["show", "--format=", "--name-only", &id])?
            .lines()
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Ok(CommitDetails {
            id,
            message,
            changed_paths,
        })
    }

    fn commits_in_range(&self, repo: &Path, upstream: &str) -> Result<Vec<CommitDetails>> {
        let range = format!("{upstream}..HEAD");
        Self::run_git(repo, &["rev-list", "--reverse", &range])?
            .lines()
            .map(|rev| self.commit_details(repo, rev))
            .collect()
    }

    fn head_commit(&self, repo: &Path) -> Result<CommitDetails> {
        self.commit_details(repo, "HEAD")
    }

    fn reset_keep_changes(&self, repo: &Path) -> Result<()> {
        Self::run_git(repo, &["reset", "--mixed", "HEAD~1"])?;
        Ok(())
    }

    fn reset_discard_changes(&self, repo: &Path) -> Result<()> {
        Self::run_git(repo, &["reset", "--hard", "HEAD~1"])?;
        Ok(())
    }

    fn stage_paths(&self, repo: &Path, paths: &[String]) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        Self::run_git(repo, &args)?;
        Ok(())
    }

    fn commit_with_message(&self, repo: &Path, message: &str) -> Result<()> {
        Self::run_git(repo, &["commit", "-m", message])?;
        Ok(())
    }

    fn restore_worktree(&self, repo: &Path) -> Result<()> {
        Self::run_git(repo, &["restore", "."])?;
        Ok(())
    }

    fn rebase_todo_path(&self, repo: &Path) -> Result<PathBuf> {
        let path = Self::run_git(repo, &["rev-parse", "--git-path", "rebase-merge/git-rebase-todo"])?
            .trim()
            .to_string();
        let path = PathBuf::from(path);
        // --git-path answers relative to the working directory it ran in
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(repo.join(path))
        }
    }

    fn run_interactive_rebase(
        &self,
        repo: &Path,
        args: &[String],
        sequence_editor: &str,
    ) -> Result<RebaseOutcome> {
        let output = Command::new("git")
            .args(["rebase", "-i"])
            .args(args)
            .env("GIT_SEQUENCE_EDITOR", sequence_editor)
            .current_dir(repo)
            .output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(RebaseOutcome {
            success: output.status.success(),
            output: combined,
        })
    }
}
