use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use restack_core::{
    plan::{RebaseAction, RebaseItem},
    state::{EditorMode, EditorState},
};

use crate::theme::Theme;

/// File columns are headed by the path's basename, truncated so one wide
/// path doesn't push the others off screen.
const MAX_FILE_COLUMN_WIDTH: usize = 12;

pub fn draw(f: &mut Frame, area: Rect, state: &EditorState, theme: &Theme) {
    let files = &state.visible_files;

    let mut header_cells = vec![
        Cell::from("action"),
        Cell::from("commit"),
        Cell::from("summary"),
    ];
    for (i, path) in files.iter().enumerate() {
        let mut style = Style::default().fg(theme.title);
        if state.active_file_index == Some(i) {
            style = Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        header_cells.push(Cell::from(column_title(path)).style(style));
    }
    let header = Row::new(header_cells).style(Style::default().fg(theme.title));

    let mut widths = vec![
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Min(24),
    ];
    widths.extend(files.iter().map(|path| Constraint::Length(column_width(path))));

    let rows = state.plan().items().iter().enumerate().map(|(i, item)| {
        let mut cells = vec![
            Cell::from(item.action.as_str()).style(action_style(item.action, theme)),
            Cell::from(item.short_id().to_string()).style(Style::default().fg(theme.muted)),
            Cell::from(item.summary().to_string()),
        ];
        for path in files {
            let style = match file_marker(item, path) {
                "●" => Style::default().fg(theme.success),
                "·" => Style::default().fg(theme.muted),
                _ => Style::default(),
            };
            cells.push(Cell::from(file_marker(item, path)).style(style));
        }

        let mut row = Row::new(cells);
        if i == state.active_index {
            row = row.style(
                Style::default()
                    .bg(theme.accent)
                    .fg(theme.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            );
        } else if state.selected.get(i).copied().unwrap_or(false) {
            row = row.style(Style::default().bg(theme.secondary).fg(theme.highlight_fg));
        }
        row
    });

    let (title, border_color) = match state.mode {
        EditorMode::Idle => (" rebase plan ", theme.border),
        EditorMode::Moving => (" rebase plan (moving block) ", theme.warning),
        EditorMode::SelectingDistributeTargets => {
            (" rebase plan (select distribute targets) ", theme.warning)
        }
    };

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(table, area);
}

fn action_style(action: RebaseAction, theme: &Theme) -> Style {
    let color = match action {
        RebaseAction::Pick => theme.success,
        RebaseAction::Drop => theme.error,
        RebaseAction::Squash | RebaseAction::Fixup => theme.secondary,
        RebaseAction::Edit | RebaseAction::Reword => theme.warning,
    };
    Style::default().fg(color)
}

/// Marker for one cell of the file grid: included, excluded, or not part of
/// this commit at all.
fn file_marker(item: &RebaseItem, path: &str) -> &'static str {
    match item.file_changes.get(path) {
        Some(change) if change.included => "●",
        Some(_) => "·",
        None => " ",
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn column_title(path: &str) -> String {
    let name = basename(path);
    if name.chars().count() > MAX_FILE_COLUMN_WIDTH {
        let mut truncated: String = name.chars().take(MAX_FILE_COLUMN_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    } else {
        name.to_string()
    }
}

fn column_width(path: &str) -> u16 {
    u16::try_from(column_title(path).chars().count().max(3)).unwrap_or(u16::MAX)
}
