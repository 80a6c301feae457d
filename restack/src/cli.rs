use std::{env, fs, path::Path, path::PathBuf};

use log::info;
use restack_core::{
    config::Config,
    git::{CommitDetails, GitProvider},
    plan::{Plan, RebaseAction, RebaseItem},
    state::EditorState,
    todo,
};
use restack_tui::{EditorOutcome, Theme};

pub type CliResult<T> = Result<T, CliError>;

/// User errors (bad input, user abort) exit 1; system errors exit 2.
#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(value.to_string())
    }
}

pub fn print_error(error: &CliError) {
    eprintln!("{}", error.message());
}

fn plan_from_commits(commits: Vec<CommitDetails>, actions: Option<&[RebaseAction]>) -> Plan {
    Plan::new(
        commits
            .into_iter()
            .enumerate()
            .map(|(i, commit)| {
                let action = actions
                    .and_then(|a| a.get(i).copied())
                    .unwrap_or(RebaseAction::Pick);
                RebaseItem::new(commit.id, commit.message, action, commit.changed_paths)
            })
            .collect(),
    )
}

fn run_editor(config: &Config, state: &mut EditorState) -> anyhow::Result<EditorOutcome> {
    let theme = Theme::from_config(&config.theme);
    let mut terminal = ratatui::init();
    let result = restack_tui::run(&mut terminal, state, &theme);
    ratatui::restore();
    result
}

fn current_repo() -> CliResult<PathBuf> {
    env::current_dir().map_err(|e| CliError::system(e.to_string()))
}

/// Plan for the default flow: the commits in `upstream..HEAD`, oldest first,
/// all picked.
fn load_range_plan(git: &dyn GitProvider, repo: &Path, upstream: &str) -> CliResult<Plan> {
    let commits = git
        .commits_in_range(repo, upstream)
        .map_err(CliError::from)?;
    if commits.is_empty() {
        return Err(CliError::user(format!("no commits in {upstream}..HEAD")));
    }
    Ok(plan_from_commits(commits, None))
}

/// Plan for sequence-editor mode: parse git's script and resolve each rev
/// back into full commit details.
fn load_todo_plan(git: &dyn GitProvider, repo: &Path, text: &str) -> CliResult<Plan> {
    let directives = todo::parse_todo(text).map_err(CliError::from)?;
    if directives.is_empty() {
        return Err(CliError::user("nothing to edit in the todo script"));
    }

    let mut commits = Vec::with_capacity(directives.len());
    let mut actions = Vec::with_capacity(directives.len());
    for directive in &directives {
        commits.push(
            git.commit_details(repo, &directive.rev)
                .map_err(CliError::from)?,
        );
        actions.push(directive.action);
    }
    Ok(plan_from_commits(commits, Some(&actions)))
}

/// The default flow: load the commits upstream..HEAD, edit the plan, then
/// drive `git rebase -i` with the compiled script swapped in through the
/// hidden `replace-todo` editor hook.
pub fn cmd_rebase(config: &Config, git: &dyn GitProvider, rebase_args: &[String]) -> CliResult<()> {
    let Some(upstream) = rebase_args.first() else {
        return Err(CliError::user(
            "usage: restack <upstream> [extra git rebase arguments]",
        ));
    };
    let repo = current_repo()?;
    let mut state = EditorState::new(load_range_plan(git, &repo, upstream)?);
    match run_editor(config, &mut state).map_err(CliError::from)? {
        EditorOutcome::Aborted => Err(CliError::user("aborted, repository left untouched")),
        EditorOutcome::Submitted => {
            let script = todo::compile_todo(state.plan());
            let compiled = env::temp_dir().join(format!("restack-todo-{}", std::process::id()));
            fs::write(&compiled, &script).map_err(|e| CliError::system(e.to_string()))?;
            info!("compiled script at {}:\n{script}", compiled.display());

            let exe = env::current_exe().map_err(|e| CliError::system(e.to_string()))?;
            let sequence_editor = format!(
                "{} replace-todo {}",
                todo::shell_quote(&exe.to_string_lossy()),
                todo::shell_quote(&compiled.to_string_lossy())
            );
            let outcome = git
                .run_interactive_rebase(&repo, rebase_args, &sequence_editor)
                .map_err(CliError::from)?;
            let _ = fs::remove_file(&compiled);

            print!("{}", outcome.output);
            if outcome.success {
                Ok(())
            } else {
                Err(CliError::user("git rebase exited with an error"))
            }
        }
    }
}

/// Sequence-editor mode: edit the todo script git generated, in place. Exits
/// non-zero on abort so git cancels the whole rebase.
pub fn cmd_edit(config: &Config, git: &dyn GitProvider, todo_file: &Path) -> CliResult<()> {
    let repo = current_repo()?;
    let text = fs::read_to_string(todo_file).map_err(|e| CliError::system(e.to_string()))?;
    let mut state = EditorState::new(load_todo_plan(git, &repo, &text)?);
    match run_editor(config, &mut state).map_err(CliError::from)? {
        EditorOutcome::Aborted => Err(CliError::user("aborted, rebase cancelled")),
        EditorOutcome::Submitted => {
            let script = todo::compile_todo(state.plan());
            todo::write_todo_atomic(todo_file, &script).map_err(CliError::from)?;
            Ok(())
        }
    }
}

/// The editor hook behind the default flow: replace git's generated todo
/// with the script that was compiled before the rebase started.
pub fn cmd_replace_todo(source: &Path, todo_file: &Path) -> CliResult<()> {
    let script = fs::read_to_string(source).map_err(|e| CliError::system(e.to_string()))?;
    todo::write_todo_atomic(todo_file, &script).map_err(CliError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restack_core::git::MockGitProvider;

    fn commit(id: &str, message: &str, paths: &[&str]) -> CommitDetails {
        CommitDetails {
            id: id.to_string(),
            message: message.to_string(),
            changed_paths: paths.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[test]
    fn test_plan_from_commits_defaults_to_pick() {
        let plan = plan_from_commits(vec![commit("a", "one", &["x.rs"])], None);
        assert_eq!(plan.get(0).unwrap().action, RebaseAction::Pick);
        assert!(plan.get(0).unwrap().all_included());
    }

    #[test]
    fn test_plan_from_commits_keeps_parsed_actions() {
        let plan = plan_from_commits(
            vec![commit("a", "one", &[]), commit("b", "two", &[])],
            Some(&[RebaseAction::Pick, RebaseAction::Squash]),
        );
        assert_eq!(plan.get(1).unwrap().action, RebaseAction::Squash);
    }

    #[test]
    fn test_load_range_plan_picks_every_commit() {
        let git = MockGitProvider::new(vec![
            commit("1111111aaaa", "one", &["x.rs"]),
            commit("2222222bbbb", "two", &["y.rs"]),
        ]);
        let plan = load_range_plan(&git, Path::new("/repo"), "main").unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.get(0).unwrap().origin_id, "1111111aaaa");
        assert_eq!(plan.get(1).unwrap().action, RebaseAction::Pick);
    }

    #[test]
    fn test_load_range_plan_rejects_empty_range() {
        let git = MockGitProvider::new(Vec::new());
        let err = load_range_plan(&git, Path::new("/repo"), "main").unwrap_err();
        assert_eq!(err.code(), 1);
        assert!(err.message().contains("main..HEAD"));
    }

    #[test]
    fn test_load_todo_plan_resolves_short_revs_and_keeps_actions() {
        let git = MockGitProvider::new(vec![
            commit("1111111aaaa", "one", &["x.rs"]),
            commit("2222222bbbb", "two", &["y.rs"]),
        ]);
        let plan = load_todo_plan(
            &git,
            Path::new("/repo"),
            "pick 1111111 one\nsquash 2222222 two\n",
        )
        .unwrap();

        assert_eq!(plan.get(0).unwrap().origin_id, "1111111aaaa");
        assert_eq!(
            plan.get(0).unwrap().included_paths().collect::<Vec<_>>(),
            vec!["x.rs"]
        );
        assert_eq!(plan.get(1).unwrap().action, RebaseAction::Squash);
    }

    #[test]
    fn test_load_todo_plan_fails_on_unknown_rev() {
        let git = MockGitProvider::new(vec![commit("1111111aaaa", "one", &[])]);
        let err =
            load_todo_plan(&git, Path::new("/repo"), "pick 9999999 gone\n").unwrap_err();
        assert_eq!(err.code(), 2);
        assert!(err.message().contains("9999999"));
    }

    #[test]
    fn test_load_todo_plan_rejects_comment_only_script() {
        let git = MockGitProvider::new(Vec::new());
        let err = load_todo_plan(&git, Path::new("/repo"), "# empty\n").unwrap_err();
        assert_eq!(err.code(), 1);
    }

    #[test]
    fn test_replace_todo_overwrites_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("compiled");
        let target = dir.path().join("git-rebase-todo");
        fs::write(&source, "pick 1234567 one\n").unwrap();
        fs::write(&target, "pick aaaaaaa generated by git\n").unwrap();

        cmd_replace_todo(&source, &target).unwrap();
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "pick 1234567 one\n"
        );
    }

    #[test]
    fn test_replace_todo_missing_source_is_system_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_replace_todo(
            &dir.path().join("missing"),
            &dir.path().join("git-rebase-todo"),
        )
        .unwrap_err();
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_cli_error_codes() {
        assert_eq!(CliError::user("bad input").code(), 1);
        assert_eq!(CliError::system("io failure").code(), 2);
        assert_eq!(CliError::from(anyhow::anyhow!("boom")).code(), 2);
    }
}
