//! The split helper: run mid-rebase by an `exec` directive, directly after
//! git picked the commit being split. It narrows that commit down to the
//! declared paths and, for any action other than `pick`, re-queues the
//! narrowed commit under that action by prepending a directive to the
//! remaining todo script.

use std::path::Path;

use anyhow::Context;
use log::info;

use crate::git::GitProvider;
use crate::plan::RebaseAction;
use crate::todo;

pub fn run_split(
    git: &dyn GitProvider,
    repo: &Path,
    action: RebaseAction,
    paths: &[String],
) -> anyhow::Result<()> {
    let picked = git.head_commit(repo)?;
    info!(
        "narrowing {} to {} path(s) with action {action}",
        picked.id,
        paths.len()
    );

    // Step back keeping the full change in the working tree, then re-commit
    // just the declared subset under the original message.
    git.reset_keep_changes(repo)?;
    git.stage_paths(repo, paths)
        .context("failed to stage the declared paths, aborting the rebase")?;
    git.commit_with_message(repo, &picked.message)?;
    // The excluded changes are re-expressed by other plan items; drop them.
    git.restore_worktree(repo)?;

    if action == RebaseAction::Pick {
        return Ok(());
    }

    // The narrowed commit must not stay on the branch as-is. Take it back
    // off and hand it to git as the very next directive, under the real
    // action. Git re-reads the todo file before each step, so a prepend is
    // all it takes.
    let narrowed = git.head_commit(repo)?;
    git.reset_discard_changes(repo)?;
    let todo_path = git.rebase_todo_path(repo)?;
    let summary = narrowed.message.lines().next().unwrap_or_default();
    let directive = format!("{action} {} {summary}", narrowed.id);
    info!("prepending to {}: {directive}", todo_path.display());
    todo::prepend_directive(&todo_path, &directive)?;
    Ok(())
}
