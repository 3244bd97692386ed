//! Entry list rendering.
//!
//! Draws the window of entries starting at the scroll offset. The offset is
//! owned by the core's scroll sync, so the selection may be out of view
//! after a mouse-wheel scroll.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use dirnav_core::fs::entry::DirectoryEntry;

/// Renders the entry list inside a bordered block titled `title`.
/// Directories are shown in blue+bold; the selected item is reversed.
pub fn render_file_list(
    f: &mut Frame,
    area: Rect,
    entries: &[DirectoryEntry],
    selected: usize,
    offset: usize,
    title: &str,
    show_permission_marker: bool,
) {
    let height = usize::from(area.height.saturating_sub(2));
    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, entry)| {
            let marker = if i == selected { "> " } else { "  " };
            let lock = if show_permission_marker && !entry.permitted() {
                "! "
            } else {
                "  "
            };
            let suffix = if entry.is_dir() { "/" } else { "" };
            let mut style = entry_style(entry);
            if i == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(lock, Style::default().fg(Color::Red)),
                Span::styled(format!("{}{suffix}", entry.file_name()), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_owned())
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(list, area);
}

fn entry_style(entry: &DirectoryEntry) -> Style {
    if !entry.permitted() {
        Style::default().fg(Color::DarkGray)
    } else if entry.is_dir() {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if entry.is_hidden() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(entries: &[DirectoryEntry], selected: usize, offset: usize) -> Vec<String> {
        let backend = TestBackend::new(30, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_file_list(f, f.area(), entries, selected, offset, "t", true))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn entry_style_dir_is_bold_blue() {
        let style = entry_style(&DirectoryEntry::dir("src"));
        assert_eq!(style.fg, Some(Color::Blue));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn entry_style_hidden_is_dark_gray() {
        let style = entry_style(&DirectoryEntry::file(".env"));
        assert_eq!(style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn entry_style_unpermitted_is_dimmed() {
        let style = entry_style(&DirectoryEntry::dir("root").with_permitted(false));
        assert_eq!(style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn draws_window_from_offset() {
        let entries: Vec<_> = (0..10).map(|i| DirectoryEntry::file(format!("f{i}"))).collect();
        let rows = draw(&entries, 3, 2);
        // four inner rows: f2..f5
        assert!(rows[1].contains("f2"));
        assert!(rows[2].contains("> ") && rows[2].contains("f3"));
        assert!(rows[4].contains("f5"));
        assert!(!rows.iter().any(|r| r.contains("f6")));
    }

    #[test]
    fn marks_unpermitted_entries() {
        let entries = vec![DirectoryEntry::dir("root").with_permitted(false)];
        let rows = draw(&entries, 0, 0);
        assert!(rows[1].contains("! root/"));
    }
}
