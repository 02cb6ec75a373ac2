//! Heartbeat grid layout.
//!
//! Turns a monitor's raw heartbeat history into a bounded, row-wrapped grid:
//! at most [`MAX_DISPLAYED_POINTS`] of the most recent samples, padded with
//! placeholders up to [`MIN_DISPLAYED_POINTS`], split into rows of
//! [`POINTS_PER_ROW`].
//!
//! The layout is a pure function of its input. It never sorts, dedupes or
//! interpolates; samples are shown exactly in the order given.

use statuswatch_types::{Status, StatusSample};

use super::format::sample_tooltip;
use super::palette::{self, Swatch};

/// Number of cells in every full row.
pub const POINTS_PER_ROW: usize = 24;

/// Grids are padded with placeholders up to this many cells.
pub const MIN_DISPLAYED_POINTS: usize = 24;

/// Only the most recent samples up to this count are shown.
pub const MAX_DISPLAYED_POINTS: usize = 72;

/// A single position in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    /// A real heartbeat.
    Sample(StatusSample),
    /// Padding for histories shorter than the minimum. Carries no status.
    Placeholder,
}

impl GridCell {
    /// The sample's status, `None` for placeholders.
    pub fn status(&self) -> Option<Status> {
        match self {
            GridCell::Sample(sample) => Some(sample.status),
            GridCell::Placeholder => None,
        }
    }

    /// The sample's timestamp, if any.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            GridCell::Sample(sample) => sample.timestamp.as_deref(),
            GridCell::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, GridCell::Placeholder)
    }

    /// Colors, tooltip and interactivity for rendering this cell.
    pub fn appearance(&self) -> CellAppearance {
        match self {
            GridCell::Sample(sample) => CellAppearance {
                color: palette::base_color(sample.status),
                hover: palette::hover_color(sample.status),
                tooltip: Some(sample_tooltip(sample)),
                interactive: true,
            },
            GridCell::Placeholder => CellAppearance {
                color: palette::PLACEHOLDER,
                hover: palette::PLACEHOLDER,
                tooltip: None,
                interactive: false,
            },
        }
    }
}

/// How a cell should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAppearance {
    /// Resting color.
    pub color: Swatch,
    /// Color while focused or hovered.
    pub hover: Swatch,
    /// Hover text, `None` for placeholders.
    pub tooltip: Option<String>,
    /// Whether the cell reacts to focus/hover at all.
    pub interactive: bool,
}

/// Row-major grid of heartbeat cells.
///
/// Every row except possibly the last holds exactly [`POINTS_PER_ROW`] cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    rows: Vec<Vec<GridCell>>,
}

impl GridModel {
    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total cells, samples and placeholders.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn placeholder_count(&self) -> usize {
        self.cells().filter(|c| c.is_placeholder()).count()
    }

    pub fn sample_count(&self) -> usize {
        self.cell_count() - self.placeholder_count()
    }

    /// All cells in display order.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flatten()
    }

    /// The cell at a flat display index.
    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.rows.get(index / POINTS_PER_ROW)?.get(index % POINTS_PER_ROW)
    }

    /// Flat index of the most recent real sample.
    pub fn last_sample_index(&self) -> Option<usize> {
        self.sample_count().checked_sub(1)
    }
}

/// Lay out a heartbeat history as a grid.
///
/// Keeps the last [`MAX_DISPLAYED_POINTS`] samples, appends placeholders up to
/// [`MIN_DISPLAYED_POINTS`] cells, then wraps into rows of [`POINTS_PER_ROW`].
pub fn layout(history: &[StatusSample]) -> GridModel {
    let start = history.len().saturating_sub(MAX_DISPLAYED_POINTS);

    let mut cells: Vec<GridCell> = history[start..].iter().cloned().map(GridCell::Sample).collect();

    let missing = MIN_DISPLAYED_POINTS.saturating_sub(cells.len());
    cells.extend(std::iter::repeat(GridCell::Placeholder).take(missing));

    let rows = cells.chunks(POINTS_PER_ROW).map(<[GridCell]>::to_vec).collect();

    GridModel { rows }
}
