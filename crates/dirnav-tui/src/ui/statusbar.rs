//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selected entry, the copy source, a
//! search-results indicator and the last notification.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use dirnav_core::fs::entry::DirectoryEntry;

use crate::app::StatusLine;

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub selected_index: usize,
    pub selected_entry: Option<&'a DirectoryEntry>,
    pub filtered: bool,
    pub copy_source: Option<&'a str>,
    pub status: Option<&'a StatusLine>,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>) {
    let bg = Color::DarkGray;
    let line = Line::from(statusbar_spans(props, bg));
    let bar = Paragraph::new(line).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn statusbar_spans(props: &StatusBarProps<'_>, bg: Color) -> Vec<Span<'static>> {
    let position = if props.entry_count > 0 {
        format!(" {}/{}", props.selected_index + 1, props.entry_count)
    } else {
        " 0/0".to_owned()
    };

    let entry_info = props
        .selected_entry
        .map(|e| {
            if e.is_dir() {
                format!("  [DIR] {}", e.file_name())
            } else {
                format!("  {}", e.file_name())
            }
        })
        .unwrap_or_default();

    let filtered = if props.filtered { " [search]" } else { "" };

    let clipboard = props
        .copy_source
        .map(|name| format!("  [copy: {name}]"))
        .unwrap_or_default();

    let status_span = props
        .status
        .map(|status| {
            let fg = if status.is_error { Color::Red } else { Color::White };
            Span::styled(
                format!("  {}", status.text),
                Style::default()
                    .fg(fg)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    vec![
        Span::styled(
            position,
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(entry_info, Style::default().fg(Color::White).bg(bg)),
        Span::styled(
            filtered.to_owned(),
            Style::default()
                .fg(Color::Yellow)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(clipboard, Style::default().fg(Color::Green).bg(bg)),
        status_span,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props<'a>() -> StatusBarProps<'a> {
        StatusBarProps {
            entry_count: 0,
            selected_index: 0,
            selected_entry: None,
            filtered: false,
            copy_source: None,
            status: None,
        }
    }

    fn text(props: &StatusBarProps<'_>) -> String {
        statusbar_spans(props, Color::DarkGray)
            .iter()
            .map(|s| s.content.as_ref().to_owned())
            .collect()
    }

    #[test]
    fn empty_listing_shows_zero_position() {
        assert_eq!(text(&props()), " 0/0");
    }

    #[test]
    fn shows_position_and_directory_marker() {
        let entry = DirectoryEntry::dir("src");
        let p = StatusBarProps {
            entry_count: 4,
            selected_index: 1,
            selected_entry: Some(&entry),
            ..props()
        };
        assert_eq!(text(&p), " 2/4  [DIR] src");
    }

    #[test]
    fn shows_search_and_clipboard() {
        let p = StatusBarProps {
            filtered: true,
            copy_source: Some("c.txt"),
            ..props()
        };
        let t = text(&p);
        assert!(t.contains("[search]"));
        assert!(t.contains("[copy: c.txt]"));
    }

    #[test]
    fn error_status_is_red() {
        let status = StatusLine {
            text: "delete x failed: boom".to_owned(),
            is_error: true,
        };
        let p = StatusBarProps {
            status: Some(&status),
            ..props()
        };
        let spans = statusbar_spans(&p, Color::DarkGray);
        let last = spans.last().unwrap();
        assert_eq!(last.content.as_ref(), "  delete x failed: boom");
        assert_eq!(last.style.fg, Some(Color::Red));
    }
}
