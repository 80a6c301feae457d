use std::ops::Range;

use crate::distribute::distribute_changes;
use crate::history::History;
use crate::plan::{Plan, RebaseAction};
use crate::selection::{block_for_move, gather_block, rotate_down, rotate_up};
use crate::todo::validate_plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// A contiguous block is being moved through the plan.
    Moving,
    /// Distribute sources are captured; the selection now picks targets.
    SelectingDistributeTargets,
}

/// Which pane owns navigation and toggle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneFocus {
    #[default]
    Plan,
    /// The file list that narrows which columns the plan shows.
    Files,
}

/// Mutable editing session over a plan history. All plan changes go through
/// `push_plan`, which records a snapshot and re-sizes the selection; the
/// cursor, selection, and mode never enter history themselves.
#[derive(Debug)]
pub struct EditorState {
    history: History,
    pub mode: EditorMode,
    pub focus: PaneFocus,
    pub active_index: usize,
    /// Cursor into `visible_files`, when a file column is focused.
    pub active_file_index: Option<usize>,
    /// Parallel to the current plan's items.
    pub selected: Vec<bool>,
    /// Every path the session's commits touch, fixed for the whole session.
    pub all_files: Vec<String>,
    /// Parallel to `all_files`; rows the file pane has hidden are `false`.
    file_shown: Vec<bool>,
    /// Cursor into `all_files` while the file pane is focused.
    pub file_cursor: usize,
    /// Column list for the file grid: the shown subset of `all_files`.
    /// Filtering is display-only; hidden files keep their inclusion flags.
    pub visible_files: Vec<String>,
    pub error: Option<String>,
    move_run: Option<Range<usize>>,
    distribute_sources: Option<Vec<usize>>,
}

impl EditorState {
    pub fn new(plan: Plan) -> Self {
        let all_files = plan.visible_files();
        let file_shown = vec![true; all_files.len()];
        let visible_files = all_files.clone();
        let selected = vec![false; plan.len()];
        Self {
            history: History::new(plan),
            mode: EditorMode::Idle,
            focus: PaneFocus::Plan,
            active_index: 0,
            active_file_index: None,
            selected,
            all_files,
            file_shown,
            file_cursor: 0,
            visible_files,
            error: None,
            move_run: None,
            distribute_sources: None,
        }
    }

    pub fn plan(&self) -> &Plan {
        self.history.current()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect()
    }

    pub fn validation_errors(&self) -> Vec<String> {
        validate_plan(self.plan())
    }

    /// The rows the next action applies to.
    fn block(&self) -> Vec<usize> {
        block_for_move(&self.selected_indices(), self.active_index)
    }

    fn push_plan(&mut self, plan: Plan) {
        let len = plan.len();
        self.history.push(plan);
        self.selected = vec![false; len];
        self.active_index = self.active_index.min(len.saturating_sub(1));
    }

    fn after_history_move(&mut self) {
        let len = self.plan().len();
        self.selected = vec![false; len];
        self.active_index = self.active_index.min(len.saturating_sub(1));
        self.mode = EditorMode::Idle;
        self.move_run = None;
        self.distribute_sources = None;
        self.error = None;
    }

    /// Hand navigation and toggle keys to the other pane. No-op when the
    /// session has no files to filter.
    pub fn toggle_focus(&mut self) {
        if self.all_files.is_empty() {
            return;
        }
        self.focus = match self.focus {
            PaneFocus::Plan => PaneFocus::Files,
            PaneFocus::Files => PaneFocus::Plan,
        };
    }

    pub fn is_file_shown(&self, index: usize) -> bool {
        self.file_shown.get(index).copied().unwrap_or(false)
    }

    fn rebuild_visible_files(&mut self) {
        self.visible_files = self
            .all_files
            .iter()
            .zip(&self.file_shown)
            .filter_map(|(path, &shown)| shown.then(|| path.clone()))
            .collect();
        // The file cursor in the grid indexes visible_files; drop it rather
        // than guess where it should land after the columns change.
        self.active_file_index = None;
    }

    fn toggle_file_shown(&mut self) {
        if let Some(flag) = self.file_shown.get_mut(self.file_cursor) {
            *flag = !*flag;
            self.rebuild_visible_files();
        }
    }

    pub fn cursor_up(&mut self) {
        if self.focus == PaneFocus::Files {
            self.file_cursor = self.file_cursor.saturating_sub(1);
        } else if self.mode == EditorMode::Moving {
            self.rotate_block(rotate_up);
        } else {
            self.active_index = self.active_index.saturating_sub(1);
        }
    }

    pub fn cursor_down(&mut self) {
        if self.focus == PaneFocus::Files {
            if self.file_cursor + 1 < self.all_files.len() {
                self.file_cursor += 1;
            }
        } else if self.mode == EditorMode::Moving {
            self.rotate_block(rotate_down);
        } else if self.active_index + 1 < self.plan().len() {
            self.active_index += 1;
        }
    }

    fn rotate_block(&mut self, rotate: fn(&Plan, &Range<usize>) -> Option<(Plan, Range<usize>)>) {
        let Some(run) = self.move_run.clone() else {
            return;
        };
        if let Some((plan, new_run)) = rotate(self.plan(), &run) {
            self.push_plan(plan);
            for i in new_run.clone() {
                self.selected[i] = true;
            }
            self.active_index = new_run.start;
            self.move_run = Some(new_run);
        }
    }

    pub fn toggle_select(&mut self) {
        if self.focus == PaneFocus::Files {
            self.toggle_file_shown();
            return;
        }
        if self.mode != EditorMode::Moving
            && let Some(flag) = self.selected.get_mut(self.active_index)
        {
            *flag = !*flag;
        }
    }

    /// Select every row, or clear the selection when the active row is
    /// already selected. In the file pane: show or hide every file instead.
    pub fn select_all(&mut self) {
        if self.focus == PaneFocus::Files {
            let target = !self.is_file_shown(self.file_cursor);
            self.file_shown.fill(target);
            self.rebuild_visible_files();
            return;
        }
        if self.mode == EditorMode::Moving {
            return;
        }
        let target = !self.selected.get(self.active_index).copied().unwrap_or(false);
        self.selected.fill(target);
    }

    pub fn toggle_move_mode(&mut self) {
        if self.focus == PaneFocus::Files || self.plan().is_empty() {
            return;
        }
        match self.mode {
            EditorMode::Idle => {
                let block = self.block();
                let (plan, run) = gather_block(self.plan(), &block);
                self.push_plan(plan);
                for i in run.clone() {
                    self.selected[i] = true;
                }
                self.active_index = run.start;
                self.move_run = Some(run);
                self.mode = EditorMode::Moving;
            }
            EditorMode::Moving => {
                if let Some(run) = self.move_run.take() {
                    self.active_index = run.start;
                }
                self.selected.fill(false);
                self.mode = EditorMode::Idle;
            }
            EditorMode::SelectingDistributeTargets => {}
        }
    }

    pub fn set_action(&mut self, action: RebaseAction) {
        if self.focus == PaneFocus::Files || self.mode != EditorMode::Idle {
            return;
        }
        let block = self.block();
        let plan = self.plan().with_actions(&block, action);
        self.push_plan(plan);
    }

    pub fn copy_active(&mut self) {
        if self.focus == PaneFocus::Files || self.mode != EditorMode::Idle {
            return;
        }
        let plan = self.plan().with_item_copied(self.active_index);
        self.push_plan(plan);
    }

    /// Columns of `visible_files` the active item actually touches.
    fn file_columns(&self) -> Vec<usize> {
        let Some(item) = self.plan().get(self.active_index) else {
            return Vec::new();
        };
        self.visible_files
            .iter()
            .enumerate()
            .filter_map(|(i, path)| item.file_changes.contains_key(path).then_some(i))
            .collect()
    }

    pub fn file_right(&mut self) {
        let columns = self.file_columns();
        let next = match self.active_file_index {
            None => columns.first().copied(),
            Some(current) => columns
                .iter()
                .copied()
                .find(|&i| i > current)
                .or(Some(current)),
        };
        self.active_file_index = next;
    }

    /// Stepping left past the first column drops the file focus entirely.
    pub fn file_left(&mut self) {
        if let Some(current) = self.active_file_index {
            self.active_file_index = self
                .file_columns()
                .into_iter()
                .rev()
                .find(|&i| i < current);
        }
    }

    pub fn toggle_file(&mut self) {
        if self.focus == PaneFocus::Files {
            self.toggle_file_shown();
            return;
        }
        if self.mode != EditorMode::Idle {
            return;
        }
        let Some(path) = self
            .active_file_index
            .and_then(|i| self.visible_files.get(i))
            .cloned()
        else {
            return;
        };
        let plan = self.plan().with_file_toggled(self.active_index, &path);
        if &plan != self.plan() {
            self.push_plan(plan);
        }
    }

    pub fn undo(&mut self) {
        if self.history.undo() {
            self.after_history_move();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            self.after_history_move();
        }
    }

    /// First press captures the sources and switches to target selection;
    /// second press runs the distribution against the selected targets.
    pub fn distribute(&mut self) {
        if self.focus == PaneFocus::Files {
            return;
        }
        match self.mode {
            EditorMode::Idle => {
                self.distribute_sources = Some(self.block());
                self.selected.fill(false);
                self.mode = EditorMode::SelectingDistributeTargets;
                self.error = None;
            }
            EditorMode::SelectingDistributeTargets => {
                let Some(sources) = self.distribute_sources.clone() else {
                    return;
                };
                let targets = self.block();
                match distribute_changes(&sources, &targets, self.plan()) {
                    Ok(plan) => {
                        self.push_plan(plan);
                        self.distribute_sources = None;
                        self.mode = EditorMode::Idle;
                        self.error = None;
                    }
                    // Selection kept so the user can adjust and retry
                    Err(err) => self.error = Some(err.to_string()),
                }
            }
            EditorMode::Moving => {}
        }
    }

    /// Whether Esc has a pending distribute to cancel.
    pub fn distribute_pending(&self) -> bool {
        self.mode == EditorMode::SelectingDistributeTargets
    }

    pub fn cancel_distribute(&mut self) {
        if self.mode == EditorMode::SelectingDistributeTargets {
            self.distribute_sources = None;
            self.selected.fill(false);
            self.mode = EditorMode::Idle;
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::RebaseItem;

    fn plan_of(specs: &[(&str, &[&str])]) -> Plan {
        Plan::new(
            specs
                .iter()
                .map(|(id, paths)| {
                    RebaseItem::new(
                        (*id).to_string(),
                        format!("commit {id}"),
                        RebaseAction::Pick,
                        paths.iter().map(|p| (*p).to_string()),
                    )
                })
                .collect(),
        )
    }

    fn ids(state: &EditorState) -> Vec<&str> {
        state
            .plan()
            .items()
            .iter()
            .map(|i| i.origin_id.as_str())
            .collect()
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut state = EditorState::new(plan_of(&[("a", &[]), ("b", &[])]));
        state.cursor_up();
        assert_eq!(state.active_index, 0);
        state.cursor_down();
        state.cursor_down();
        assert_eq!(state.active_index, 1);
    }

    #[test]
    fn test_select_all_toggles_on_active_membership() {
        let mut state = EditorState::new(plan_of(&[("a", &[]), ("b", &[])]));
        state.select_all();
        assert_eq!(state.selected, vec![true, true]);
        state.select_all();
        assert_eq!(state.selected, vec![false, false]);
    }

    #[test]
    fn test_move_mode_gathers_then_rotates() {
        let mut state =
            EditorState::new(plan_of(&[("a", &[]), ("b", &[]), ("c", &[]), ("d", &[])]));
        state.selected = vec![true, false, true, false];
        state.toggle_move_mode();

        assert_eq!(state.mode, EditorMode::Moving);
        // Gathered with the bottom row keeping index 2
        assert_eq!(ids(&state), vec!["b", "a", "c", "d"]);
        assert_eq!(state.selected, vec![false, true, true, false]);
        assert_eq!(state.active_index, 1);

        state.cursor_up();
        assert_eq!(ids(&state), vec!["a", "c", "b", "d"]);
        assert_eq!(state.active_index, 0);

        state.toggle_move_mode();
        assert_eq!(state.mode, EditorMode::Idle);
        assert_eq!(state.selected, vec![false; 4]);
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut state = EditorState::new(plan_of(&[("a", &[]), ("b", &[]), ("c", &[])]));
        state.active_index = 1;
        state.toggle_move_mode();
        state.cursor_up();
        state.cursor_down();
        assert_eq!(ids(&state), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_set_action_applies_to_selection_and_clears_it() {
        let mut state = EditorState::new(plan_of(&[("a", &[]), ("b", &[]), ("c", &[])]));
        state.selected = vec![true, false, true];
        state.set_action(RebaseAction::Squash);

        let actions: Vec<RebaseAction> =
            state.plan().items().iter().map(|i| i.action).collect();
        assert_eq!(
            actions,
            vec![
                RebaseAction::Squash,
                RebaseAction::Pick,
                RebaseAction::Squash
            ]
        );
        assert_eq!(state.selected, vec![false; 3]);
    }

    #[test]
    fn test_copy_resizes_selection() {
        let mut state = EditorState::new(plan_of(&[("a", &[]), ("b", &[])]));
        state.copy_active();
        assert_eq!(state.plan().len(), 3);
        assert_eq!(state.selected.len(), 3);
    }

    #[test]
    fn test_undo_resets_selection_and_mode() {
        let mut state = EditorState::new(plan_of(&[("a", &[]), ("b", &[])]));
        state.set_action(RebaseAction::Drop);
        state.selected = vec![true, true];
        state.mode = EditorMode::SelectingDistributeTargets;

        state.undo();
        assert_eq!(state.plan().get(0).unwrap().action, RebaseAction::Pick);
        assert_eq!(state.selected, vec![false, false]);
        assert_eq!(state.mode, EditorMode::Idle);

        state.redo();
        assert_eq!(state.plan().get(0).unwrap().action, RebaseAction::Drop);
    }

    #[test]
    fn test_file_cursor_skips_columns_the_item_lacks() {
        let mut state = EditorState::new(plan_of(&[
            ("a", &["one.rs", "three.rs"]),
            ("b", &["two.rs"]),
        ]));
        // visible_files is ["one.rs", "three.rs", "two.rs"]; item a has
        // columns 0 and 1
        state.file_right();
        assert_eq!(state.active_file_index, Some(0));
        state.file_right();
        assert_eq!(state.active_file_index, Some(1));
        state.file_right();
        assert_eq!(state.active_file_index, Some(1));
        state.file_left();
        assert_eq!(state.active_file_index, Some(0));
        state.file_left();
        assert_eq!(state.active_file_index, None);
    }

    #[test]
    fn test_toggle_file_flips_inclusion_once() {
        let mut state = EditorState::new(plan_of(&[("a", &["one.rs"])]));
        state.file_right();
        state.toggle_file();
        assert!(!state.plan().get(0).unwrap().file_changes["one.rs"].included);

        state.undo();
        assert!(state.plan().get(0).unwrap().file_changes["one.rs"].included);
    }

    #[test]
    fn test_distribute_two_step_flow() {
        let mut state = EditorState::new(plan_of(&[
            ("src", &["x", "y"]),
            ("b", &["x"]),
            ("c", &["y"]),
        ]));
        state.distribute();
        assert!(state.distribute_pending());

        state.selected = vec![false, true, true];
        state.distribute();
        assert_eq!(state.mode, EditorMode::Idle);
        assert!(state.error.is_none());
        assert_eq!(state.plan().len(), 5);
        assert_eq!(
            state.plan().get(0).unwrap().action,
            RebaseAction::Drop
        );
    }

    #[test]
    fn test_distribute_error_keeps_session_open() {
        let mut state = EditorState::new(plan_of(&[
            ("src", &["x"]),
            ("b", &["x"]),
            ("c", &["x"]),
        ]));
        state.distribute();
        state.selected = vec![false, true, true];
        state.distribute();

        assert!(state.distribute_pending());
        assert!(state.error.as_deref().unwrap_or_default().contains('x'));
        assert_eq!(state.plan().len(), 3);

        state.cancel_distribute();
        assert_eq!(state.mode, EditorMode::Idle);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_move_mode_noop_on_empty_plan() {
        let mut state = EditorState::new(Plan::default());
        state.toggle_move_mode();
        assert_eq!(state.mode, EditorMode::Idle);
    }

    #[test]
    fn test_file_pane_narrows_visible_columns() {
        let mut state = EditorState::new(plan_of(&[
            ("a", &["one.rs", "two.rs"]),
            ("b", &["two.rs", "three.rs"]),
        ]));
        assert_eq!(state.visible_files, vec!["one.rs", "two.rs", "three.rs"]);

        state.toggle_focus();
        assert_eq!(state.focus, PaneFocus::Files);
        state.cursor_down();
        state.toggle_select();
        assert!(!state.is_file_shown(1));
        assert_eq!(state.visible_files, vec!["one.rs", "three.rs"]);

        state.toggle_select();
        assert_eq!(state.visible_files, vec!["one.rs", "two.rs", "three.rs"]);
    }

    #[test]
    fn test_file_pane_filter_is_display_only() {
        let mut state = EditorState::new(plan_of(&[("a", &["one.rs", "two.rs"])]));
        let before = state.plan().clone();

        state.toggle_focus();
        state.toggle_select();
        assert_eq!(state.visible_files, vec!["two.rs"]);
        // Hiding a column never touches the plan or its history
        assert_eq!(state.plan(), &before);
        state.undo();
        assert_eq!(state.plan(), &before);
    }

    #[test]
    fn test_hiding_a_column_drops_the_grid_file_cursor() {
        let mut state = EditorState::new(plan_of(&[("a", &["one.rs", "two.rs"])]));
        state.file_right();
        assert_eq!(state.active_file_index, Some(0));

        state.toggle_focus();
        state.toggle_select();
        assert_eq!(state.active_file_index, None);
    }

    #[test]
    fn test_file_pane_select_all_hides_and_restores_everything() {
        let mut state = EditorState::new(plan_of(&[("a", &["one.rs", "two.rs"])]));
        state.toggle_focus();
        state.select_all();
        assert!(state.visible_files.is_empty());
        state.select_all();
        assert_eq!(state.visible_files, vec!["one.rs", "two.rs"]);
    }

    #[test]
    fn test_plan_actions_ignored_while_file_pane_focused() {
        let mut state = EditorState::new(plan_of(&[("a", &["one.rs"]), ("b", &[])]));
        state.toggle_focus();
        state.set_action(RebaseAction::Drop);
        state.copy_active();
        state.toggle_move_mode();
        assert_eq!(state.plan().get(0).unwrap().action, RebaseAction::Pick);
        assert_eq!(state.plan().len(), 2);
        assert_eq!(state.mode, EditorMode::Idle);
    }

    #[test]
    fn test_focus_toggle_noop_without_files() {
        let mut state = EditorState::new(plan_of(&[("a", &[])]));
        state.toggle_focus();
        assert_eq!(state.focus, PaneFocus::Plan);
    }

    #[test]
    fn test_validation_errors_surface_duplicate_inclusion() {
        let mut state = EditorState::new(plan_of(&[("a", &["one.rs"])]));
        state.copy_active();
        assert_eq!(state.validation_errors().len(), 1);
    }
}
