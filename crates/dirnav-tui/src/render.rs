use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode};
use crate::ui::breadcrumb::render_breadcrumb;
use crate::ui::panel::render_file_list;
use crate::ui::popup::{help_lines, prompt_lines, render_popup};
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub list: Rect,
    /// The list without its border: where entry rows are drawn.
    pub list_inner: Rect,
    pub status: Rect,
}

/// Splits the screen into header, entry list and status bar.
pub fn layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let list_inner = Block::default().borders(Borders::ALL).inner(chunks[1]);
    AppLayout {
        header: chunks[0],
        list: chunks[1],
        list_inner,
        status: chunks[2],
    }
}

/// Main render function — composes the full UI layout each frame.
pub fn render(f: &mut Frame, app: &App) {
    let regions = layout(f.area());
    let browser = app.browser();
    let state = browser.state();
    let search = browser.search();

    let query = if search.is_active() || state.is_filtered() {
        Some((search.query(), search.is_active()))
    } else {
        None
    };
    render_breadcrumb(f, regions.header, state.current_path(), query);

    let title = if state.is_pending() {
        " loading… "
    } else {
        ""
    };
    render_file_list(
        f,
        regions.list,
        state.entries(),
        state.selected_index(),
        browser.scroll().offset(),
        title,
        app.show_permission_marker(),
    );

    let props = StatusBarProps {
        entry_count: state.entries().len(),
        selected_index: state.selected_index(),
        selected_entry: state.selected_entry(),
        filtered: state.is_filtered(),
        copy_source: browser.clipboard().get().map(|c| c.file_name()),
        status: app.status(),
    };
    render_statusbar(f, regions.status, &props);

    match app.mode() {
        AppMode::Help => {
            render_popup(f, "Help", &help_lines(app.action_registry(), app.keymap()));
        }
        AppMode::Prompt => {
            if let Some(prompt) = browser.prompt() {
                render_popup(f, prompt.title(), &prompt_lines(prompt));
            }
        }
        AppMode::Normal | AppMode::Search => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_reserves_header_and_status_rows() {
        let regions = layout(Rect::new(0, 0, 80, 24));
        assert_eq!(regions.header, Rect::new(0, 0, 80, 1));
        assert_eq!(regions.status, Rect::new(0, 23, 80, 1));
        assert_eq!(regions.list, Rect::new(0, 1, 80, 22));
        assert_eq!(regions.list_inner, Rect::new(1, 2, 78, 20));
    }
}
