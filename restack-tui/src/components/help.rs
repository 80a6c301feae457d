use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use crate::theme::Theme;

enum Entry {
    Section(&'static str),
    Binding(&'static str, &'static str),
}

const ENTRIES: &[Entry] = &[
    Entry::Section("navigation"),
    Entry::Binding("j/k, up/down", "move between commits (shift the block in move mode)"),
    Entry::Binding("h/l, left/right", "move the file cursor"),
    Entry::Binding("tab", "switch between the plan and the file list"),
    Entry::Section("selection"),
    Entry::Binding("v", "select/deselect the current commit"),
    Entry::Binding("ctrl+a", "select all (or clear the selection)"),
    Entry::Section("editing"),
    Entry::Binding("p f s e r d", "set action: pick, fixup, squash, edit, reword, drop"),
    Entry::Binding("m", "start/finish moving the selected block"),
    Entry::Binding("c", "copy the current commit (for splitting)"),
    Entry::Binding("t", "include/exclude the file under the cursor (in the file list: show/hide its column)"),
    Entry::Binding("q", "distribute: mark sources, then select targets and press q again"),
    Entry::Section("history"),
    Entry::Binding("ctrl+z", "undo"),
    Entry::Binding("ctrl+y", "redo"),
    Entry::Section("session"),
    Entry::Binding("enter", "validate the plan and start the rebase"),
    Entry::Binding("esc", "cancel a pending distribute, or abort without touching the repo"),
    Entry::Binding("ctrl+c", "abort unconditionally"),
    Entry::Binding("?", "toggle this help"),
];

/// Help overlay showing keybindings.
pub fn draw(f: &mut Frame, theme: &Theme) {
    let popup_area = super::centered_rect(70, 80, f.area());
    f.render_widget(Clear, popup_area);

    let items: Vec<ListItem<'_>> = ENTRIES
        .iter()
        .map(|entry| match entry {
            Entry::Section(name) => ListItem::new(Line::from(Span::styled(
                format!("{name}:"),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))),
            Entry::Binding(key, description) => ListItem::new(Line::from(vec![
                Span::styled(
                    format!("  {key:<16}"),
                    Style::default()
                        .fg(theme.hint)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {description}")),
            ])),
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" help - key bindings (esc: close) ")
            .border_style(Style::default().fg(theme.accent)),
    );
    f.render_widget(list, popup_area);
}
