//! Compiling a plan down to a `git rebase -i` todo script, parsing git's own
//! scripts back into directives, and the atomic rewrites both entry points
//! rely on.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};

use crate::plan::{Plan, RebaseAction};

/// Name of the helper binary the compiled script invokes via `exec`.
pub const SPLIT_HELPER_BIN: &str = "restack-split";

/// Render the plan as a rebase todo script.
///
/// Items that keep or drop a whole commit compile to a single directive.
/// An item that keeps a strict subset of its files compiles to a `pick`
/// followed by an `exec` line that hands the included paths (and the real
/// action) to the split helper.
pub fn compile_todo(plan: &Plan) -> String {
    let mut script = String::new();
    for item in plan.items() {
        let whole_commit = item.action == RebaseAction::Drop || item.all_included();
        if whole_commit {
            script.push_str(&format!(
                "{} {} {}\n",
                item.action,
                item.short_id(),
                item.summary()
            ));
        } else if item.none_included() {
            script.push_str(&format!("drop {} {}\n", item.short_id(), item.summary()));
        } else {
            script.push_str(&format!("pick {} {}\n", item.short_id(), item.summary()));
            script.push_str(&format!(
                "exec {} -a {}{}\n",
                SPLIT_HELPER_BIN,
                item.action,
                item.included_paths()
                    .map(|p| format!(" {}", shell_quote(p)))
                    .collect::<String>()
            ));
        }
    }
    script
}

/// Findings that make a plan unsafe to hand to git. Empty means valid.
///
/// The one structural rule: per origin commit, across every item in the
/// plan, each file change may be included at most once. Copies exist to
/// split a commit, not to apply the same change twice.
pub fn validate_plan(plan: &Plan) -> Vec<String> {
    let mut seen: HashMap<(&str, &str), u32> = HashMap::new();
    for item in plan.items() {
        for path in item.included_paths() {
            *seen.entry((item.origin_id.as_str(), path)).or_default() += 1;
        }
    }
    let mut findings: Vec<String> = seen
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|((origin, path), _)| {
            let short = &origin[..origin.len().min(7)];
            format!("{path} is included more than once for commit {short}")
        })
        .collect();
    findings.sort();
    findings
}

/// One directive of a todo script git generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDirective {
    pub action: RebaseAction,
    pub rev: String,
}

/// Parse the todo script git hands to its sequence editor. Comment and blank
/// lines are skipped; anything else must be `<action> <rev> [summary]` with
/// an action the editor can represent.
pub fn parse_todo(text: &str) -> anyhow::Result<Vec<TodoDirective>> {
    let mut directives = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut words = trimmed.split_whitespace();
        let keyword = words.next().unwrap_or_default();
        let Some(action) = RebaseAction::parse(keyword) else {
            bail!("unsupported todo directive: {trimmed}");
        };
        let Some(rev) = words.next() else {
            bail!("todo directive has no revision: {trimmed}");
        };
        directives.push(TodoDirective {
            action,
            rev: rev.to_string(),
        });
    }
    Ok(directives)
}

/// Quote a path for the shell only when it needs it, so the common case
/// stays readable in the script.
pub fn shell_quote(path: &str) -> Cow<'_, str> {
    let safe = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._-/+,@%=:".contains(c));
    if safe {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("'{}'", path.replace('\'', r"'\''")))
    }
}

/// Replace the file at `path` with `content` by writing a sibling and
/// renaming over the original, so a reader only ever sees the old script or
/// the new one.
pub fn write_todo_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    let tmp = path.with_extension("new");
    fs::write(&tmp, content).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// Prepend a single directive to the remaining todo script. Git re-reads the
/// file before each step, so the new line becomes the very next thing it
/// executes; everything below is left byte for byte as it was.
pub fn prepend_directive(path: &Path, directive: &str) -> anyhow::Result<()> {
    let existing = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    write_todo_atomic(path, &format!("{directive}\n{existing}"))
}
