use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use restack_core::action::Action;
use restack_core::plan::RebaseAction;

/// Resolve a key event into an Action. Keys are mode-independent; the state
/// decides what (if anything) an action means in the current mode.
pub fn resolve_action(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => Some(Action::SelectAll),
            KeyCode::Char('z') => Some(Action::Undo),
            KeyCode::Char('y') => Some(Action::Redo),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::FileLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::FileRight),
        KeyCode::Char('v') => Some(Action::ToggleSelect),
        KeyCode::Char('p') => Some(Action::SetAction(RebaseAction::Pick)),
        KeyCode::Char('f') => Some(Action::SetAction(RebaseAction::Fixup)),
        KeyCode::Char('s') => Some(Action::SetAction(RebaseAction::Squash)),
        KeyCode::Char('e') => Some(Action::SetAction(RebaseAction::Edit)),
        KeyCode::Char('r') => Some(Action::SetAction(RebaseAction::Reword)),
        KeyCode::Char('d') => Some(Action::SetAction(RebaseAction::Drop)),
        KeyCode::Char('m') => Some(Action::ToggleMoveMode),
        KeyCode::Char('c') => Some(Action::CopyItem),
        KeyCode::Char('t') => Some(Action::ToggleFile),
        KeyCode::Char('q') => Some(Action::Distribute),
        KeyCode::Tab => Some(Action::ToggleFocus),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Submit),
        _ => None,
    }
}
