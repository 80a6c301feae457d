use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use restack_core::state::{EditorMode, EditorState, PaneFocus};

use crate::theme::Theme;

fn hints(mode: EditorMode, focus: PaneFocus) -> &'static [(&'static str, &'static str)] {
    if focus == PaneFocus::Files {
        return &[
            ("j/k", "move"),
            ("v/t", "show/hide column"),
            ("ctrl+a", "show/hide all"),
            ("tab", "back to plan"),
        ];
    }
    match mode {
        EditorMode::Idle => &[
            ("j/k", "move"),
            ("v", "select"),
            ("p/f/s/e/r/d", "action"),
            ("m", "move block"),
            ("c", "copy"),
            ("t", "toggle file"),
            ("q", "distribute"),
            ("tab", "files"),
            ("enter", "start rebase"),
            ("?", "help"),
        ],
        EditorMode::Moving => &[("j/k", "shift block"), ("m", "done")],
        EditorMode::SelectingDistributeTargets => &[
            ("v", "select target"),
            ("q", "distribute"),
            ("esc", "cancel"),
        ],
    }
}

pub fn draw(f: &mut Frame, area: Rect, state: &EditorState, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints(state.mode, state.focus) {
        spans.push(Span::styled(*key, Style::default().fg(theme.hint)));
        spans.push(Span::styled(
            format!(" {label}  "),
            Style::default().fg(theme.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
