//! Terminal UI rendering using ratatui.
//!
//! Each page is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Summary counts plus monitor and agent tables
//! - [`status_page`]: Public status page with title and description
//! - [`tables`]: Monitor and agent tables shared by both pages
//! - [`heartbeat`]: Heartbeat grid glyphs, compact and full
//! - [`detail`]: Modal overlay with the full grid and cell tooltip
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Page Content                         │
//! │ (dashboard/status_page::render)      │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top:
//!    - detail::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod dashboard;
pub mod detail;
pub mod heartbeat;
pub mod status_page;
pub mod tables;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, PageData, PageSnapshot};

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 12;

/// Draw one frame.
pub fn render(frame: &mut Frame, app: &App, snapshot: &PageSnapshot) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5u16.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, snapshot, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match &snapshot.data {
        Some(PageData::Dashboard(data)) => dashboard::render(frame, app, data, chunks[2]),
        Some(PageData::StatusPage(data)) => status_page::render(frame, app, data, chunks[2]),
        None => {
            let text = if snapshot.error.is_some() {
                "No data. Press r to retry."
            } else {
                "Loading..."
            };
            let paragraph = Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(paragraph, chunks[2]);
        }
    }

    common::render_status_bar(frame, app, snapshot, chunks[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, snapshot, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
