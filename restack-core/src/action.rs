use crate::plan::RebaseAction;

/// Everything the UI can ask the editor to do. Components translate key
/// presses into actions; the state (or the app, for the few that concern
/// the surrounding UI) applies them. The UI never touches the plan directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    FileLeft,
    FileRight,
    ToggleSelect,
    SelectAll,
    SetAction(RebaseAction),
    ToggleMoveMode,
    CopyItem,
    ToggleFile,
    /// Switch between the plan table and the file-filter pane.
    ToggleFocus,
    Undo,
    Redo,
    /// Begin a distribute (capturing the sources), or confirm it (using the
    /// current selection as targets) when one is already pending.
    Distribute,
    /// Esc: cancel a pending distribute, close the help overlay, or abort
    /// the editor.
    Cancel,
    /// Ctrl+C: abort the editor unconditionally, whatever is pending.
    Quit,
    Submit,
    ToggleHelp,
}
