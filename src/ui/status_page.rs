//! Public status page rendering.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use statuswatch_types::StatusPageData;

use crate::app::App;
use crate::ui::tables;

/// Render the status page: title and description, then both tables.
pub fn render(frame: &mut Frame, app: &App, data: &StatusPageData, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Title + description
        Constraint::Fill(1),   // Monitors
        Constraint::Fill(1),   // Agents
    ])
    .split(area);

    let heading = vec![
        Line::from(Span::styled(
            format!(" {}", data.display_title()),
            app.theme.header.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", data.display_description()),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(heading).block(block).wrap(Wrap { trim: true }), chunks[0]);

    let (monitor_row, agent_row) = tables::split_selection(app.selected_index, data.monitors.len());
    tables::render_monitors(frame, app, &data.monitors, monitor_row, chunks[1]);
    tables::render_agents(frame, app, &data.agents, agent_row, chunks[2]);
}
