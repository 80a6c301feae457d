use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use restack_core::state::{EditorState, PaneFocus};

use crate::theme::Theme;

/// Side pane listing every path the session's commits touch. Toggling a row
/// shows or hides that file's column in the plan table; the plan itself is
/// never changed from here.
pub fn draw(f: &mut Frame, area: Rect, state: &EditorState, theme: &Theme) {
    let focused = state.focus == PaneFocus::Files;

    let items: Vec<ListItem<'_>> = state
        .all_files
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let shown = state.is_file_shown(i);
            let marker_style = if shown {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.muted)
            };
            let mut item = ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker(shown)), marker_style),
                Span::raw(path.clone()),
            ]));
            if focused && i == state.file_cursor {
                item = item.style(
                    Style::default()
                        .bg(theme.accent)
                        .fg(theme.highlight_fg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            item
        })
        .collect();

    let border_color = if focused { theme.accent } else { theme.border };
    let shown_count = state.visible_files.len();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title(shown_count, state.all_files.len()))
            .border_style(Style::default().fg(border_color)),
    );
    f.render_widget(list, area);
}

fn marker(shown: bool) -> &'static str {
    if shown { "●" } else { "·" }
}

/// Counts appear in the title only once something is hidden.
fn title(shown: usize, total: usize) -> String {
    if shown == total {
        " files ".to_string()
    } else {
        format!(" files ({shown}/{total}) ")
    }
}
