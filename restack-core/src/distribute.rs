//! Re-squash file changes out of a set of source commits into the target
//! commits that should have contained them, expressed purely as a plan
//! rewrite (drops plus fixups) that git can replay.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::plan::{Plan, RebaseAction, RebaseItem};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistributeError {
    /// A commit was marked as both source and target.
    #[error("cannot distribute commits into themselves: {}", .0.join(", "))]
    SourceTargetOverlap(Vec<String>),

    /// A source file is included by more than one target, so there is no
    /// single commit its change can be folded into.
    #[error("files are included in more than one target commit: {}", .0.join(", "))]
    AmbiguousFiles(Vec<String>),
}

/// Fold the included file changes of every source commit into the target
/// commits that include the same paths.
///
/// On success the returned plan keeps every non-target item in place (with
/// sources turned into `drop`), and follows each target with one `fixup`
/// copy per overlapping source, restricted to the overlapping paths. A
/// source whose paths no target includes contributes no fixup; its change
/// is simply dropped.
pub fn distribute_changes(
    sources: &[usize],
    targets: &[usize],
    plan: &Plan,
) -> Result<Plan, DistributeError> {
    let source_set: HashSet<usize> = sources.iter().copied().collect();
    let target_set: HashSet<usize> = targets.iter().copied().collect();

    let overlapping: Vec<String> = (0..plan.len())
        .filter(|i| source_set.contains(i) && target_set.contains(i))
        .filter_map(|i| plan.get(i))
        .map(|item| item.short_id().to_string())
        .collect();
    if !overlapping.is_empty() {
        return Err(DistributeError::SourceTargetOverlap(overlapping));
    }

    let mut sorted_sources: Vec<usize> = source_set.iter().copied().collect();
    sorted_sources.sort_unstable();

    let source_files: HashSet<&str> = sorted_sources
        .iter()
        .filter_map(|&i| plan.get(i))
        .flat_map(RebaseItem::included_paths)
        .collect();

    // Each distributable path must land in exactly one target.
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut ambiguous: BTreeSet<&str> = BTreeSet::new();
    for (i, item) in plan.items().iter().enumerate() {
        if !target_set.contains(&i) {
            continue;
        }
        for path in item.included_paths().filter(|p| source_files.contains(p)) {
            if !claimed.insert(path) {
                ambiguous.insert(path);
            }
        }
    }
    if !ambiguous.is_empty() {
        return Err(DistributeError::AmbiguousFiles(
            ambiguous.into_iter().map(str::to_string).collect(),
        ));
    }

    let mut items = Vec::with_capacity(plan.len());
    for (i, item) in plan.items().iter().enumerate() {
        if target_set.contains(&i) {
            items.push(item.clone());
            let target_files: HashSet<&str> = item.included_paths().collect();
            for &s in &sorted_sources {
                let Some(source) = plan.get(s) else { continue };
                let common: HashSet<&str> = source
                    .included_paths()
                    .filter(|p| target_files.contains(p))
                    .collect();
                if common.is_empty() {
                    continue;
                }
                let mut fixup = source.restricted_to(&common);
                fixup.action = RebaseAction::Fixup;
                items.push(fixup);
            }
        } else if source_set.contains(&i) {
            items.push(item.with_action(RebaseAction::Drop));
        } else {
            items.push(item.clone());
        }
    }
    Ok(Plan::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, paths: &[&str]) -> RebaseItem {
        RebaseItem::new(
            id.to_string(),
            format!("commit {id}"),
            RebaseAction::Pick,
            paths.iter().map(|p| (*p).to_string()),
        )
    }

    fn actions(plan: &Plan) -> Vec<(RebaseAction, &str)> {
        plan.items()
            .iter()
            .map(|i| (i.action, i.origin_id.as_str()))
            .collect()
    }

    #[test]
    fn test_overlapping_source_and_target_rejected() {
        let plan = Plan::new(vec![item("aaaaaaaaaa", &["x"]), item("bbbbbbbbbb", &["x"])]);
        let err = distribute_changes(&[1], &[1], &plan).unwrap_err();
        assert_eq!(
            err,
            DistributeError::SourceTargetOverlap(vec!["bbbbbbb".to_string()])
        );
        assert!(err.to_string().contains("bbbbbbb"));
    }

    #[test]
    fn test_path_included_by_two_targets_rejected() {
        let plan = Plan::new(vec![
            item("src", &["x", "y"]),
            item("t1", &["x"]),
            item("t2", &["x"]),
        ]);
        let err = distribute_changes(&[0], &[1, 2], &plan).unwrap_err();
        assert_eq!(err, DistributeError::AmbiguousFiles(vec!["x".to_string()]));
        // The plan itself is untouched, the caller still holds it
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_source_split_across_two_targets() {
        let plan = Plan::new(vec![
            item("src", &["x", "y"]),
            item("b", &["x"]),
            item("c", &["y"]),
            item("d", &["z"]),
        ]);
        let result = distribute_changes(&[0], &[1, 2], &plan).unwrap();
        assert_eq!(
            actions(&result),
            vec![
                (RebaseAction::Drop, "src"),
                (RebaseAction::Pick, "b"),
                (RebaseAction::Fixup, "src"),
                (RebaseAction::Pick, "c"),
                (RebaseAction::Fixup, "src"),
                (RebaseAction::Pick, "d"),
            ]
        );
        let fixup_for_b: Vec<&str> = result.get(2).unwrap().included_paths().collect();
        assert_eq!(fixup_for_b, vec!["x"]);
        let fixup_for_c: Vec<&str> = result.get(4).unwrap().included_paths().collect();
        assert_eq!(fixup_for_c, vec!["y"]);
    }

    #[test]
    fn test_target_without_overlap_gets_no_fixup() {
        let plan = Plan::new(vec![item("src", &["x"]), item("b", &["unrelated"])]);
        let result = distribute_changes(&[0], &[1], &plan).unwrap();
        assert_eq!(
            actions(&result),
            vec![(RebaseAction::Drop, "src"), (RebaseAction::Pick, "b")]
        );
    }

    #[test]
    fn test_excluded_source_paths_do_not_distribute() {
        let mut src = item("src", &["x", "y"]);
        src.file_changes.get_mut("x").unwrap().included = false;
        let plan = Plan::new(vec![src, item("b", &["x", "y"])]);
        let result = distribute_changes(&[0], &[1], &plan).unwrap();
        assert_eq!(result.len(), 3);
        let fixup_paths: Vec<&str> = result.get(2).unwrap().included_paths().collect();
        assert_eq!(fixup_paths, vec!["y"]);
    }
}
