//! Fog-of-war disclosure around the agent.

use maze_runner_core::CellCoord;

use crate::grid::Grid;

/// Reveals every cell within `radius` Manhattan steps of `center`, plus the end cell.
///
/// Returns the cells whose flag changed, sorted in row-major order. Revealing
/// never hides a cell, so repeated or overlapping calls only grow the revealed
/// set. Walls inside the radius are revealed like any other cell.
pub(crate) fn reveal(grid: &mut Grid, center: CellCoord, radius: u32) -> Vec<CellCoord> {
    let mut revealed = Vec::new();
    let (columns, rows) = grid.view().dimensions();

    if columns > 0 && rows > 0 && center.column() < columns && center.row() < rows {
        let first_row = center.row().saturating_sub(radius);
        let last_row = center.row().saturating_add(radius).min(rows - 1);
        for row in first_row..=last_row {
            let remaining = radius - row.abs_diff(center.row());
            let first_column = center.column().saturating_sub(remaining);
            let last_column = center.column().saturating_add(remaining).min(columns - 1);
            for column in first_column..=last_column {
                let cell = CellCoord::new(column, row);
                if grid.mark_revealed(cell) {
                    revealed.push(cell);
                }
            }
        }
    }

    let end = grid.end();
    if grid.mark_revealed(end) {
        revealed.push(end);
        revealed.sort_by_key(|cell| (cell.row(), cell.column()));
    }

    revealed
}
