use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use dirnav_core::action::ActionRegistry;
use dirnav_core::config::keymap::Keymap;
use dirnav_core::nav::prompt::NamePrompt;

/// Renders a centered popup dialog with the given title and message lines.
pub fn render_popup(f: &mut Frame, title: &str, lines: &[String]) {
    let area = centered_rect(60, 60, f.area());

    f.render_widget(Clear, area);

    let content: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();

    let popup = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_owned())
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(popup, area);
}

/// One line per registered action with the keys currently bound to it.
pub fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    let mut lines: Vec<String> = registry
        .all()
        .iter()
        .filter_map(|d| {
            let keys = keymap.keys_for_action(d.action)?;
            Some(format!("{:<14} {:<10} {}", keys.join(" "), d.category.label(), d.description))
        })
        .collect();
    lines.push(String::new());
    lines.push("Arrows move and enter, Esc leaves search or a name prompt".to_owned());
    lines.push("Press Esc or ? to close".to_owned());
    lines
}

/// Body of the rename / create popup.
pub fn prompt_lines(prompt: &NamePrompt) -> Vec<String> {
    vec![
        format!("New name: {}_", prompt.input()),
        String::new(),
        "Enter to confirm, Esc to cancel".to_owned(),
    ]
}

/// Calculates a centered rectangle of the given percentage size within the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_bound_actions() {
        let lines = help_lines(&ActionRegistry::new(), &Keymap::default());
        assert!(lines.iter().any(|l| l.starts_with("dd") && l.contains("Delete selected entry")));
        assert!(lines.iter().any(|l| l.starts_with("Ctrl+c")));
        assert!(lines.iter().any(|l| l.starts_with("Enter l")));
    }

    #[test]
    fn help_lists_rename_and_create() {
        let lines = help_lines(&ActionRegistry::new(), &Keymap::default());
        assert!(lines.iter().any(|l| l.starts_with("R ") && l.contains("Rename")));
        assert!(lines.iter().any(|l| l.starts_with("N ") && l.contains("directory")));
    }

    #[test]
    fn prompt_shows_typed_name_with_cursor() {
        let mut prompt = NamePrompt::create_file();
        prompt.push_char('a');
        let lines = prompt_lines(&prompt);
        assert_eq!(lines[0], "New name: a_");
        assert!(lines[2].contains("Esc"));
    }

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 60, parent);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.x, 20);
        assert!(rect.y > 0);
    }
}
