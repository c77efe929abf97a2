//! Random maze generation.

use maze_runner_core::{CellCoord, MazeLayout, SessionConfig};
use rand::Rng;

/// Draws a new layout from the provided random source.
///
/// The start lies in the left quarter of the columns and the end in the right
/// quarter. Every other cell independently becomes a wall with the configured
/// probability, so the result may be unsolvable. `config` must already be
/// validated.
pub(crate) fn generate_layout<R>(config: &SessionConfig, rng: &mut R) -> MazeLayout
where
    R: Rng + ?Sized,
{
    let columns = config.columns;
    let rows = config.rows;
    let quarter = (columns / 4).max(1);

    let start = CellCoord::new(rng.gen_range(0..quarter), rng.gen_range(0..rows));
    let end = CellCoord::new(
        columns - 1 - rng.gen_range(0..quarter),
        rng.gen_range(0..rows),
    );

    let probability = f64::from(config.wall_probability).clamp(0.0, 1.0);
    let mut walls = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let cell = CellCoord::new(column, row);
            if cell == start || cell == end {
                continue;
            }
            if rng.gen_bool(probability) {
                walls.push(cell);
            }
        }
    }

    MazeLayout {
        columns,
        rows,
        start,
        end,
        walls,
    }
}
