//! Dashboard page rendering.
//!
//! Summary counts on top, then the monitor and agent tables.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use statuswatch_types::Status;

use crate::app::App;
use crate::data::{AgentCounts, DashboardData, MonitorCounts};
use crate::ui::tables;

/// Render the dashboard page.
pub fn render(frame: &mut Frame, app: &App, data: &DashboardData, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Summary counts
        Constraint::Fill(1),   // Monitors
        Constraint::Fill(1),   // Agents
    ])
    .split(area);

    let counts = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(chunks[0]);
    render_monitor_counts(frame, app, data.monitor_counts(), counts[0]);
    render_agent_counts(frame, app, data.agent_counts(), counts[1]);

    let (monitor_row, agent_row) = tables::split_selection(app.selected_index, data.monitors.len());
    tables::render_monitors(frame, app, &data.monitors, monitor_row, chunks[1]);
    tables::render_agents(frame, app, &data.agents, agent_row, chunks[2]);
}

fn render_monitor_counts(frame: &mut Frame, app: &App, counts: MonitorCounts, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {}", counts.up), app.theme.status_style(Status::Up)),
        Span::raw(" up  "),
        Span::styled(format!("{}", counts.down), app.theme.status_style(Status::Down)),
        Span::raw(" down  "),
        Span::styled(format!("{}", counts.total), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" total"),
    ]);
    frame.render_widget(Paragraph::new(line).block(card(app, " Monitors ")), area);
}

fn render_agent_counts(frame: &mut Frame, app: &App, counts: AgentCounts, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {}", counts.active), app.theme.status_style(Status::Up)),
        Span::raw(" active  "),
        Span::styled(format!("{}", counts.inactive), app.theme.status_style(Status::Down)),
        Span::raw(" inactive  "),
        Span::styled(format!("{}", counts.total), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" total"),
    ]);
    frame.render_widget(Paragraph::new(line).block(card(app, " Agents ")), area);
}

fn card<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}
