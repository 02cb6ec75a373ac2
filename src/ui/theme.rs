//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use statuswatch_types::Status;

use crate::data::palette::{self, Hue, Swatch};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for errors and the retry prompt.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Terminal color for a palette swatch.
    pub fn swatch(&self, swatch: Swatch) -> Color {
        swatch_color(swatch)
    }

    /// Get style for a status label
    pub fn status_style(&self, status: Status) -> Style {
        let style = Style::default().fg(self.swatch(palette::base_color(status)));
        match status {
            Status::Down => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}

/// Open Color values for shades 0-9; anything darker clamps to 9.
fn swatch_color(swatch: Swatch) -> Color {
    const GREEN: [u32; 10] = [
        0xebfbee, 0xd3f9d8, 0xb2f2bb, 0x8ce99a, 0x69db7c, 0x51cf66, 0x40c057, 0x37b24d,
        0x2f9e44, 0x2b8a3e,
    ];
    const RED: [u32; 10] = [
        0xfff5f5, 0xffe3e3, 0xffc9c9, 0xffa8a8, 0xff8787, 0xff6b6b, 0xfa5252, 0xf03e3e,
        0xe03131, 0xc92a2a,
    ];
    const GRAY: [u32; 10] = [
        0xf8f9fa, 0xf1f3f5, 0xe9ecef, 0xdee2e6, 0xced4da, 0xadb5bd, 0x868e96, 0x495057,
        0x343a40, 0x212529,
    ];

    let scale = match swatch.hue {
        Hue::Green => &GREEN,
        Hue::Red => &RED,
        Hue::Gray => &GRAY,
    };
    Color::from_u32(scale[usize::from(swatch.shade).min(scale.len() - 1)])
}
