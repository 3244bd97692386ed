use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the header row: a breadcrumb trail for `current_dir`, followed by
/// the search query when one is being typed or applied.
/// Example: " ~ / projects / dirnav   /rep_"
pub fn render_breadcrumb(
    f: &mut Frame,
    area: Rect,
    current_dir: &Path,
    query: Option<(&str, bool)>,
) {
    let mut parts = breadcrumb_spans(current_dir, &home_dir());

    if let Some((query, active)) = query {
        let cursor = if active { "_" } else { "" };
        parts.push(Span::raw("   "));
        parts.push(Span::styled(
            format!("/{query}{cursor}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let breadcrumb = Paragraph::new(Line::from(parts)).style(Style::default().bg(Color::Black));
    f.render_widget(breadcrumb, area);
}

fn breadcrumb_spans(current_dir: &Path, home: &Path) -> Vec<Span<'static>> {
    let sep = Style::default().fg(Color::DarkGray);
    let comp = Style::default().fg(Color::White);

    match current_dir.strip_prefix(home) {
        Ok(stripped) if home != Path::new("/") => {
            let mut p = vec![Span::styled(
                " ~",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )];
            for component in stripped.components() {
                p.push(Span::styled(" / ", sep));
                p.push(Span::styled(
                    component.as_os_str().to_string_lossy().into_owned(),
                    comp,
                ));
            }
            p
        }
        _ => vec![Span::styled(format!(" {}", current_dir.display()), comp)],
    }
}

/// Returns the home directory, falling back to "/" if unavailable.
fn home_dir() -> std::path::PathBuf {
    std::env::var("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("/"))
}
