//! Status colors.
//!
//! Colors are expressed as a hue plus a shade on a 1–12 scale (higher is
//! darker and more saturated), independent of any rendering backend. The UI
//! theme maps them onto terminal colors.

use statuswatch_types::Status;

/// Shade used for a cell at rest.
pub const BASE_SHADE: u8 = 5;

/// Shade used for a focused/hovered cell.
pub const HOVER_SHADE: u8 = 6;

/// Shade used for placeholder cells.
pub const PLACEHOLDER_SHADE: u8 = 3;

/// Color family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Green,
    Red,
    Gray,
}

/// A hue at a given shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swatch {
    pub hue: Hue,
    pub shade: u8,
}

impl Swatch {
    pub const fn new(hue: Hue, shade: u8) -> Self {
        Self { hue, shade }
    }
}

/// Neutral "no data yet" color, lighter than any status color.
pub const PLACEHOLDER: Swatch = Swatch::new(Hue::Gray, PLACEHOLDER_SHADE);

/// Hue family for a status.
pub fn hue(status: Status) -> Hue {
    match status {
        Status::Up => Hue::Green,
        Status::Down => Hue::Red,
        Status::Unknown => Hue::Gray,
    }
}

/// Resting color for a status.
pub fn base_color(status: Status) -> Swatch {
    Swatch::new(hue(status), BASE_SHADE)
}

/// Focus color for a status: same hue, one shade darker.
pub fn hover_color(status: Status) -> Swatch {
    Swatch::new(hue(status), HOVER_SHADE)
}
