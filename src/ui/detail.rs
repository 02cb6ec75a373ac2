//! Detail overlay rendering.
//!
//! Displays a modal overlay with the full heartbeat grid of the selected
//! monitor or agent. The cell under the cursor shows its tooltip.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use statuswatch_types::Agent;

use crate::app::{App, PageSnapshot, Selected};
use crate::data::format::{format_bytes, format_percent, format_timestamp};
use crate::data::MonitoredEntity;
use crate::ui::heartbeat;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 52;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the entity detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, snapshot: &PageSnapshot, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(selected) = snapshot.selected(app.selected_index) else {
        return;
    };
    let entity = selected.entity();
    let heartbeat = entity.heartbeat();

    let info = info_lines(app, selected);

    // Grid rows, tooltip, uptime and legend under the info block
    let overlay_width = (area.width / 10 * 9).clamp(MIN_OVERLAY_WIDTH, 70);
    let content_height = info.len() as u16 + heartbeat.grid.row_count() as u16 + 6;
    let overlay_height = (content_height + 2).clamp(MIN_OVERLAY_HEIGHT, area.height);

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(format!(" {} ", entity.name()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Length(info.len() as u16),
        Constraint::Length(1),
        Constraint::Length(heartbeat.grid.row_count() as u16),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(Paragraph::new(info), chunks[0]);

    let grid = heartbeat::grid_lines(&heartbeat.grid, &app.theme, Some(app.detail_cursor));
    frame.render_widget(Paragraph::new(grid), chunks[2]);

    let tooltip = heartbeat
        .grid
        .cell(app.detail_cursor)
        .and_then(|cell| cell.appearance().tooltip)
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(tooltip, Style::default().add_modifier(Modifier::BOLD))),
        chunks[3],
    );

    frame.render_widget(Paragraph::new(heartbeat.uptime_label()), chunks[4]);
    frame.render_widget(Paragraph::new(heartbeat::legend_line(&app.theme)), chunks[5]);

    let footer = Paragraph::new("←/→:move ↑/↓:entity Esc:close")
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(footer, chunks[7]);
}

fn info_lines<'a>(app: &App, selected: Selected<'a>) -> Vec<Line<'a>> {
    let entity = selected.entity();
    let status = entity.display_status();

    let mut lines = vec![Line::from(vec![
        Span::raw(" Status: "),
        Span::styled(status.as_str(), app.theme.status_style(status)),
    ])];

    match selected {
        Selected::Monitor(monitor) => {
            if let Some(url) = &monitor.url {
                lines.push(Line::from(format!(" URL: {}", url)));
            }
            if let Some(checked) = &monitor.last_checked {
                lines.push(Line::from(format!(" Last checked: {}", format_timestamp(checked))));
            }
        }
        Selected::Agent(agent) => lines.extend(agent_lines(agent)),
    }

    lines
}

/// Resource figures when the agent reports them, identity otherwise.
fn agent_lines(agent: &Agent) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    if agent.has_resources() {
        lines.push(Line::from(format!(
            " CPU: {}  Memory: {}  Disk: {}",
            format_percent(agent.cpu),
            format_percent(agent.memory_percent()),
            format_percent(agent.disk_percent()),
        )));
        if let (Some(rx), Some(tx)) = (agent.network_rx, agent.network_tx) {
            lines.push(Line::from(format!(
                " Network: ↓ {}  ↑ {}",
                format_bytes(rx),
                format_bytes(tx)
            )));
        }
    }

    lines.push(Line::from(format!(
        " Host: {}  IP: {}",
        or_dash(&agent.hostname),
        or_dash(&agent.ip_address)
    )));
    lines.push(Line::from(format!(
        " OS: {}  Version: {}",
        or_dash(&agent.os),
        or_dash(&agent.version)
    )));

    if let Some(updated) = &agent.updated_at {
        lines.push(Line::from(format!(" Updated: {}", format_timestamp(updated))));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_agent_lines_with_resources() {
        let agent = Agent {
            cpu: Some(12.5),
            memory_total: Some(1000),
            memory_used: Some(250),
            network_rx: Some(2048),
            network_tx: Some(512),
            hostname: Some("web-1".to_string()),
            ..Agent::default()
        };

        let text = text(&agent_lines(&agent));
        assert!(text.contains("CPU: 12.5%  Memory: 25.0%  Disk: -"));
        assert!(text.contains("Network: ↓ 2.0 KB  ↑ 512 B"));
        assert!(text.contains("Host: web-1  IP: -"));
    }

    #[test]
    fn test_agent_lines_identity_only() {
        let agent = Agent {
            os: Some("linux".to_string()),
            version: Some("1.2.0".to_string()),
            ..Agent::default()
        };

        let text = text(&agent_lines(&agent));
        assert!(!text.contains("CPU"));
        assert!(text.contains("OS: linux  Version: 1.2.0"));
    }
}
