//! Heartbeat grid rendering.
//!
//! Each cell is one glyph colored by its [`CellAppearance`](crate::data::CellAppearance).
//! Placeholders use a lighter glyph so they read as "no data" rather than as
//! a status.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use statuswatch_types::Status;

use crate::data::format::status_label;
use crate::data::{palette, GridCell, GridModel, POINTS_PER_ROW};
use crate::ui::Theme;

/// Glyph for a real heartbeat.
pub const SAMPLE_GLYPH: &str = "■";
/// Glyph for a placeholder.
pub const PLACEHOLDER_GLYPH: &str = "·";

fn glyph(cell: &GridCell) -> &'static str {
    if cell.is_placeholder() {
        PLACEHOLDER_GLYPH
    } else {
        SAMPLE_GLYPH
    }
}

/// The most recent [`POINTS_PER_ROW`] cells on one line, for table rows.
pub fn compact_line(grid: &GridModel, theme: &Theme) -> Line<'static> {
    let cells: Vec<&GridCell> = grid.cells().collect();
    let start = cells.len().saturating_sub(POINTS_PER_ROW);

    let spans: Vec<Span> = cells[start..]
        .iter()
        .map(|cell| {
            let appearance = cell.appearance();
            Span::styled(glyph(cell), Style::default().fg(theme.swatch(appearance.color)))
        })
        .collect();

    Line::from(spans)
}

/// Every row of the grid, cells separated by a space.
///
/// The cell at `cursor` is drawn in its hover color. Placeholders never take
/// the hover treatment.
pub fn grid_lines(grid: &GridModel, theme: &Theme, cursor: Option<usize>) -> Vec<Line<'static>> {
    grid.rows()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .flat_map(|(col, cell)| {
                    let index = row_index * POINTS_PER_ROW + col;
                    let appearance = cell.appearance();

                    let style = if cursor == Some(index) && appearance.interactive {
                        Style::default()
                            .fg(theme.swatch(appearance.hover))
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                    } else {
                        Style::default().fg(theme.swatch(appearance.color))
                    };

                    [Span::styled(glyph(cell), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Color key shown under a full grid.
pub fn legend_line(theme: &Theme) -> Line<'static> {
    let swatch = |status| Style::default().fg(theme.swatch(palette::base_color(status)));

    Line::from(vec![
        Span::styled(SAMPLE_GLYPH, swatch(Status::Up)),
        Span::raw(format!(" {}  ", status_label(Status::Up))),
        Span::styled(SAMPLE_GLYPH, swatch(Status::Down)),
        Span::raw(format!(" {}  ", status_label(Status::Down))),
        Span::styled(PLACEHOLDER_GLYPH, Style::default().fg(theme.swatch(palette::PLACEHOLDER))),
        Span::raw(" no data"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use statuswatch_types::StatusSample;

    use crate::data::layout;

    fn history(statuses: &[Status]) -> Vec<StatusSample> {
        statuses.iter().copied().map(StatusSample::new).collect()
    }

    #[test]
    fn test_compact_line_short_history() {
        let theme = Theme::dark();
        let grid = layout(&history(&[Status::Up, Status::Up, Status::Down]));
        let line = compact_line(&grid, &theme);

        assert_eq!(line.spans.len(), 24);
        assert_eq!(line.spans[0].content, SAMPLE_GLYPH);
        assert_eq!(line.spans[2].style.fg, Some(theme.swatch(palette::base_color(Status::Down))));
        assert!(line.spans[3..].iter().all(|s| s.content == PLACEHOLDER_GLYPH));
    }

    #[test]
    fn test_compact_line_keeps_latest() {
        let theme = Theme::dark();
        let mut statuses = vec![Status::Up; 40];
        statuses.push(Status::Down);
        let grid = layout(&history(&statuses));

        let line = compact_line(&grid, &theme);
        assert_eq!(line.spans.len(), 24);
        let last = line.spans.last().unwrap();
        assert_eq!(last.style.fg, Some(theme.swatch(palette::base_color(Status::Down))));
    }

    #[test]
    fn test_grid_lines_cursor() {
        let theme = Theme::dark();
        let grid = layout(&history(&[Status::Up; 30]));
        let lines = grid_lines(&grid, &theme, Some(25));

        assert_eq!(lines.len(), 2);
        // Glyph plus separator per cell.
        assert_eq!(lines[0].spans.len(), 48);
        assert_eq!(lines[1].spans.len(), 12);

        let focused = &lines[1].spans[2];
        assert_eq!(focused.style.fg, Some(theme.swatch(palette::hover_color(Status::Up))));
        assert!(focused.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_placeholder_ignores_cursor() {
        let theme = Theme::dark();
        let grid = layout(&history(&[Status::Up]));
        let lines = grid_lines(&grid, &theme, Some(5));

        let placeholder = &lines[0].spans[10];
        assert_eq!(placeholder.content, PLACEHOLDER_GLYPH);
        assert_eq!(placeholder.style.fg, Some(theme.swatch(palette::PLACEHOLDER)));
        assert!(!placeholder.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_legend() {
        let line = legend_line(&Theme::dark());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "■ normal  ■ fault  · no data");
    }
}
