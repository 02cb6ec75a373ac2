//! Monitor and agent tables shared by both pages.
//!
//! Rows are selected through a single index that runs over monitors first,
//! then agents, so each table receives the part of that index it owns.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use statuswatch_types::{Agent, Monitor};

use crate::app::App;
use crate::data::format::{format_bytes, format_percent, format_uptime};
use crate::data::MonitoredEntity;
use crate::ui::heartbeat;

/// Width of the compact heartbeat column.
const HEARTBEAT_WIDTH: u16 = 24;

/// Split the combined selection into (monitor row, agent row).
pub fn split_selection(selected: usize, monitor_count: usize) -> (Option<usize>, Option<usize>) {
    if selected < monitor_count {
        (Some(selected), None)
    } else {
        (None, Some(selected - monitor_count))
    }
}

pub fn render_monitors(
    frame: &mut Frame,
    app: &App,
    monitors: &[Monitor],
    selected: Option<usize>,
    area: Rect,
) {
    let header = Row::new(vec!["Monitor", "Status", "Uptime", "Resp", "Heartbeat"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = monitors
        .iter()
        .map(|m| {
            let heartbeat = m.heartbeat();
            Row::new(vec![
                Cell::from(m.name.clone()),
                Cell::from(m.status.as_str()).style(app.theme.status_style(m.status)),
                Cell::from(format_uptime(m.uptime_percent())),
                Cell::from(
                    m.response_time
                        .map(|ms| format!("{}ms", ms))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(heartbeat::compact_line(&heartbeat.grid, &app.theme)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Min(8),
        Constraint::Min(8),
        Constraint::Min(7),
        Constraint::Length(HEARTBEAT_WIDTH),
    ];

    let title = format!(" Monitors ({}) ", monitors.len());
    render_table(frame, app, Table::new(rows, widths).header(header), title, selected, area);
}

pub fn render_agents(
    frame: &mut Frame,
    app: &App,
    agents: &[Agent],
    selected: Option<usize>,
    area: Rect,
) {
    let header = Row::new(vec!["Agent", "Status", "CPU", "Mem", "Disk", "Net ↓/↑", "Heartbeat"])
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = agents
        .iter()
        .map(|a| {
            let heartbeat = a.heartbeat();
            let network = match (a.network_rx, a.network_tx) {
                (Some(rx), Some(tx)) => format!("{}/{}", format_bytes(rx), format_bytes(tx)),
                _ => "-".to_string(),
            };

            Row::new(vec![
                Cell::from(a.name.clone()),
                Cell::from(a.status.as_str()).style(app.theme.status_style(a.display_status())),
                Cell::from(format_percent(a.cpu)),
                Cell::from(format_percent(a.memory_percent())),
                Cell::from(format_percent(a.disk_percent())),
                Cell::from(network),
                Cell::from(heartbeat::compact_line(&heartbeat.grid, &app.theme)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Min(8),
        Constraint::Min(6),
        Constraint::Min(6),
        Constraint::Min(6),
        Constraint::Fill(2),
        Constraint::Length(HEARTBEAT_WIDTH),
    ];

    let title = format!(" Agents ({}) ", agents.len());
    render_table(frame, app, Table::new(rows, widths).header(header), title, selected, area);
}

fn render_table(
    frame: &mut Frame,
    app: &App,
    table: Table,
    title: String,
    selected: Option<usize>,
    area: Rect,
) {
    let border = if selected.is_some() {
        app.theme.highlight
    } else {
        app.theme.border
    };

    let table = table
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(selected);

    frame.render_stateful_widget(table, area, &mut state);
}
