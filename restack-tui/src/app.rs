use crate::{components, keymap, theme::Theme};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use restack_core::{action::Action, state::EditorState};

/// How the editing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// The plan passed validation and should be handed to git.
    Submitted,
    /// The user backed out; leave the repository untouched.
    Aborted,
}

pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut EditorState,
    theme: &Theme,
) -> anyhow::Result<EditorOutcome> {
    let mut show_help = false;

    loop {
        terminal.draw(|f| draw(f, state, theme, show_help))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if show_help {
                match keymap::resolve_action(key) {
                    Some(Action::Quit) => return Ok(EditorOutcome::Aborted),
                    Some(Action::ToggleHelp | Action::Cancel) => show_help = false,
                    _ => {}
                }
                continue;
            }

            // Clear error on any keypress
            state.error = None;

            let Some(action) = keymap::resolve_action(key) else {
                continue;
            };
            match action {
                Action::ToggleHelp => show_help = true,
                Action::Quit => return Ok(EditorOutcome::Aborted),
                Action::Cancel => {
                    if state.distribute_pending() {
                        state.cancel_distribute();
                    } else {
                        return Ok(EditorOutcome::Aborted);
                    }
                }
                Action::Submit => {
                    let findings = state.validation_errors();
                    if findings.is_empty() {
                        return Ok(EditorOutcome::Submitted);
                    }
                    log::debug!("submit blocked: {findings:?}");
                    state.error = Some(findings.join("; "));
                }
                other => apply(other, state),
            }
        }
    }
}

fn apply(action: Action, state: &mut EditorState) {
    match action {
        Action::CursorUp => state.cursor_up(),
        Action::CursorDown => state.cursor_down(),
        Action::FileLeft => state.file_left(),
        Action::FileRight => state.file_right(),
        Action::ToggleSelect => state.toggle_select(),
        Action::SelectAll => state.select_all(),
        Action::SetAction(rebase_action) => state.set_action(rebase_action),
        Action::ToggleMoveMode => state.toggle_move_mode(),
        Action::CopyItem => state.copy_active(),
        Action::ToggleFile => state.toggle_file(),
        Action::ToggleFocus => state.toggle_focus(),
        Action::Undo => state.undo(),
        Action::Redo => state.redo(),
        Action::Distribute => state.distribute(),
        Action::Submit | Action::Cancel | Action::Quit | Action::ToggleHelp => {}
    }
}

fn draw(f: &mut Frame, state: &EditorState, theme: &Theme, show_help: bool) {
    let chunks = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(f.area());

    let panes =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[0]);

    components::file_pane::draw(f, panes[0], state, theme);
    components::plan_table::draw(f, panes[1], state, theme);
    components::status_bar::draw(f, chunks[1], state, theme);
    components::error_bar::draw(f, chunks[2], state, theme);

    if show_help {
        components::help::draw(f, theme);
    }
}
