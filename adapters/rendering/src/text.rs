//! Plain-text rendering of scenes for terminals and logs.

use std::collections::HashSet;

use maze_runner_core::CellCoord;

use crate::{CellVisual, Scene};

/// Glyph used for the agent.
pub const AGENT_GLYPH: char = '@';
/// Glyph used for cells on the active path.
pub const PATH_GLYPH: char = '*';
/// Glyph used for cells on the guide route.
pub const GUIDE_GLYPH: char = '+';

/// Glyph drawn for a cell visual without overlays.
#[must_use]
pub const fn cell_glyph(visual: CellVisual) -> char {
    match visual {
        CellVisual::Hidden => '~',
        CellVisual::Floor => '.',
        CellVisual::Wall => '#',
        CellVisual::Trail => 'o',
        CellVisual::Start => 'S',
        CellVisual::End => 'E',
    }
}

/// Renders the scene as one line per row followed by the HUD status line.
///
/// The agent is drawn above every other layer, then start and end markers,
/// then the active path, then the guide route.
#[must_use]
pub fn render_scene(scene: &Scene) -> String {
    let active: HashSet<CellCoord> = scene.active_path.iter().copied().collect();
    let guide: HashSet<CellCoord> = scene.guide_path.iter().copied().collect();
    let columns = scene.tile_grid.columns as usize;
    let mut output = String::with_capacity((columns + 1) * scene.tile_grid.rows as usize + 64);

    for row in 0..scene.tile_grid.rows {
        for column in 0..scene.tile_grid.columns {
            let cell = CellCoord::new(column, row);
            let visual = scene.visual_at(cell).unwrap_or(CellVisual::Hidden);
            let glyph = if scene.agent == Some(cell) {
                AGENT_GLYPH
            } else if matches!(visual, CellVisual::Start | CellVisual::End) {
                cell_glyph(visual)
            } else if active.contains(&cell) {
                PATH_GLYPH
            } else if guide.contains(&cell) {
                GUIDE_GLYPH
            } else {
                cell_glyph(visual)
            };
            output.push(glyph);
        }
        output.push('\n');
    }

    if let Some(route) = scene.hud.route_header() {
        output.push_str(&route);
        output.push('\n');
    }
    output.push_str(&scene.hud.status_line());
    output.push('\n');
    output
}
