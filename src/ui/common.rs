//! Common UI components shared across pages.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Page, PageSnapshot};
use crate::data::format::format_ago;

/// Render the header bar: app name, source and fetch state.
pub fn render_header(frame: &mut Frame, app: &App, snapshot: &PageSnapshot, area: Rect) {
    let (icon_style, state) = match (&snapshot.error, snapshot.loading) {
        (Some(_), _) => (Style::default().fg(app.theme.error), "error"),
        (None, true) => (Style::default().fg(app.theme.highlight), "refreshing"),
        (None, false) => (Style::default().add_modifier(Modifier::DIM), "idle"),
    };

    let line = Line::from(vec![
        Span::styled(" ● ", icon_style),
        Span::styled("STATUSWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description()),
        Span::raw(" │ "),
        Span::styled(state, icon_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available pages.
///
/// Highlights the currently mounted page.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Dashboard "), Line::from(" 2:Status Page ")];

    let selected = match app.page() {
        Page::Dashboard => 0,
        Page::StatusPage => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Status bar text for a page snapshot.
///
/// A failed refresh is shown as a retry prompt alongside whatever data is
/// still on screen.
pub fn status_text(snapshot: &PageSnapshot, now: Instant) -> String {
    let mut parts = Vec::new();

    if let Some(updated_at) = snapshot.updated_at {
        parts.push(format!("Updated {}", format_ago(now.saturating_duration_since(updated_at))));
    }

    if snapshot.loading {
        parts.push("⟳ refreshing".to_string());
    } else if snapshot.data.is_none() && snapshot.error.is_none() {
        parts.push("Loading...".to_string());
    }

    if let Some(err) = &snapshot.error {
        parts.push(format!("Error: {} | r:retry", err));
    }

    parts.push("Tab:switch Enter:detail r:refresh ?:help q:quit".to_string());
    format!(" {}", parts.join(" | "))
}

/// Render the status bar at the bottom.
///
/// Temporary status messages take precedence over the fetch state.
pub fn render_status_bar(frame: &mut Frame, app: &App, snapshot: &PageSnapshot, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let style = if snapshot.error.is_some() {
        Style::default().fg(app.theme.error)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let paragraph = Paragraph::new(status_text(snapshot, Instant::now())).style(style);
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current page.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  Tab 1/2     Switch page"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       View detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Detail"),
        Line::from("  ←/→ h/l     Move along heartbeats"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Refresh now"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::app::PageData;
    use crate::data::DashboardData;
    use crate::error::Error;

    fn snapshot() -> PageSnapshot {
        PageSnapshot {
            data: None,
            loading: false,
            error: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_text_initial_load() {
        let text = status_text(
            &PageSnapshot {
                loading: true,
                ..snapshot()
            },
            Instant::now(),
        );
        assert!(text.contains("refreshing"));
        assert!(!text.contains("Updated"));
    }

    #[test]
    fn test_status_text_error_keeps_age() {
        let updated_at = Instant::now();
        let now = updated_at + Duration::from_secs(90);
        let text = status_text(
            &PageSnapshot {
                data: Some(PageData::Dashboard(Arc::new(DashboardData::default()))),
                error: Some(Error::NetworkFailure("connection refused".into())),
                updated_at: Some(updated_at),
                ..snapshot()
            },
            now,
        );
        assert!(text.contains("Updated 1m ago"));
        assert!(text.contains("Error: Network failure: connection refused | r:retry"));
    }
}
