#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Runner adapters.

pub mod text;

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_runner_core::{Algorithm, CellCoord, CellState, Direction, GamePhase, GridView, Stats};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Manual step requested on this frame.
    pub move_direction: Option<Direction>,
    /// Whether the player asked the selected algorithm to solve the maze.
    pub solve: bool,
    /// Whether the player asked to select the next algorithm.
    pub cycle_algorithm: bool,
    /// Whether the player flipped edit mode.
    pub toggle_edit_mode: bool,
    /// Whether the player flipped the guide overlay.
    pub toggle_guide: bool,
    /// Whether the player flipped the reveal-all overlay.
    pub toggle_reveal_all: bool,
    /// Whether the player asked for a freshly generated maze.
    pub new_session: bool,
    /// Whether the player started the mission from the briefing.
    pub start_mission: bool,
    /// Whether the player asked to return to the menu.
    pub return_to_menu: bool,
    /// Cell under the cursor, if the cursor lies on the maze.
    pub cursor_cell: Option<CellCoord>,
    /// Whether the primary pointer button went down on this frame.
    pub pointer_pressed: bool,
    /// Whether the primary pointer button is held down.
    pub pointer_held: bool,
}

impl FrameInput {
    /// Merges actions from `other` into `self`.
    ///
    /// Boolean actions are combined with a logical or. Optional values from
    /// `self` take precedence.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            move_direction: self.move_direction.or(other.move_direction),
            solve: self.solve || other.solve,
            cycle_algorithm: self.cycle_algorithm || other.cycle_algorithm,
            toggle_edit_mode: self.toggle_edit_mode || other.toggle_edit_mode,
            toggle_guide: self.toggle_guide || other.toggle_guide,
            toggle_reveal_all: self.toggle_reveal_all || other.toggle_reveal_all,
            new_session: self.new_session || other.new_session,
            start_mission: self.start_mission || other.start_mission,
            return_to_menu: self.return_to_menu || other.return_to_menu,
            cursor_cell: self.cursor_cell.or(other.cursor_cell),
            pointer_pressed: self.pointer_pressed || other.pointer_pressed,
            pointer_held: self.pointer_held || other.pointer_held,
        }
    }
}

/// Describes the square cell grid rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell expressed in world units.
    pub cell_length: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Default side length of a cell in world units.
    pub const DEFAULT_CELL_LENGTH: f32 = 24.0;

    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
            line_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Cell containing the world-space position.
    ///
    /// Returns `None` when the position lies outside the grid.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let column = (position.x / self.cell_length).floor();
        let row = (position.y / self.cell_length).floor();
        if column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }
        Some(CellCoord::new(column as u32, row as u32))
    }

    /// World-space position of the cell's top-left corner.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }

    /// World-space position of the cell's center.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }
}

/// Visual classification of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellVisual {
    /// Covered by fog.
    Hidden,
    /// Revealed open floor.
    Floor,
    /// Revealed wall.
    Wall,
    /// Floor the agent has already walked over.
    Trail,
    /// Entry cell.
    Start,
    /// Goal cell.
    End,
}

impl CellVisual {
    /// Classifies a cell. `reveal_all` lifts the fog without touching the maze.
    #[must_use]
    pub const fn classify(state: CellState, reveal_all: bool) -> Self {
        if !state.revealed && !reveal_all {
            Self::Hidden
        } else if state.start {
            Self::Start
        } else if state.end {
            Self::End
        } else if state.wall {
            Self::Wall
        } else if state.visited {
            Self::Trail
        } else {
            Self::Floor
        }
    }
}

/// Status values displayed next to the maze.
#[derive(Clone, Debug, PartialEq)]
pub struct HudPresentation {
    /// Greeting shown on the menu.
    pub banner: String,
    /// Lifecycle phase of the session.
    pub phase: GamePhase,
    /// Algorithm used by the next solve request.
    pub algorithm: Algorithm,
    /// Step and exploration counters.
    pub stats: Stats,
    /// Whether edit mode is switched on.
    pub edit_mode: bool,
    /// Whether the guide overlay is switched on.
    pub guide_enabled: bool,
    /// Whether the agent is walking a path.
    pub navigating: bool,
    /// Entry cell of the current maze.
    pub start: Option<CellCoord>,
    /// Objective cell of the current maze.
    pub end: Option<CellCoord>,
    /// Manhattan distance from the agent to the objective.
    pub distance_to_goal: Option<u32>,
}

impl HudPresentation {
    /// Creates a HUD resting on the menu.
    #[must_use]
    pub fn new<T>(banner: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            banner: banner.into(),
            phase: GamePhase::Menu,
            algorithm: Algorithm::default(),
            stats: Stats::default(),
            edit_mode: false,
            guide_enabled: false,
            navigating: false,
            start: None,
            end: None,
            distance_to_goal: None,
        }
    }

    /// Start and objective coordinates, when a maze is loaded.
    #[must_use]
    pub fn route_header(&self) -> Option<String> {
        let (start, end) = self.start.zip(self.end)?;
        Some(format!("start {start} | objective {end}"))
    }

    /// Single-line summary of the HUD state.
    #[must_use]
    pub fn status_line(&self) -> String {
        let phase = match self.phase {
            GamePhase::Menu => "Menu",
            GamePhase::Briefing => "Briefing",
            GamePhase::Running => "Running",
            GamePhase::Won => "Escaped!",
        };
        let mut line = format!(
            "{phase} | {} | steps {} | explored {}",
            self.algorithm, self.stats.steps, self.stats.explored
        );
        if let Some(distance) = self.distance_to_goal {
            line.push_str(&format!(" | to go {distance}"));
        }
        if self.edit_mode {
            line.push_str(" | edit");
        }
        if self.guide_enabled {
            line.push_str(" | guide");
        }
        line
    }
}

/// Scene description combining the maze, the agent and the overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Row-major cell visuals.
    pub cells: Vec<CellVisual>,
    /// Cell occupied by the agent.
    pub agent: Option<CellCoord>,
    /// Remaining cells of the path being walked.
    pub active_path: Vec<CellCoord>,
    /// Advisory route to the goal.
    pub guide_path: Vec<CellCoord>,
    /// Whether fog is lifted for display.
    pub reveal_all: bool,
    /// Status values shown beside the maze.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a scene without a maze.
    #[must_use]
    pub fn new(tile_grid: TileGridPresentation, hud: HudPresentation) -> Self {
        Self {
            tile_grid,
            cells: Vec::new(),
            agent: None,
            active_path: Vec::new(),
            guide_path: Vec::new(),
            reveal_all: false,
            hud,
        }
    }

    /// Rebuilds the cell visuals from the provided grid, resizing if needed.
    pub fn populate_cells(&mut self, grid: &GridView<'_>) {
        let (columns, rows) = grid.dimensions();
        self.tile_grid.columns = columns;
        self.tile_grid.rows = rows;
        self.cells.clear();
        let reveal_all = self.reveal_all;
        self.cells.extend(
            grid.iter()
                .map(|(_, state)| CellVisual::classify(state, reveal_all)),
        );
    }

    /// Removes every maze-dependent element.
    pub fn clear_maze(&mut self) {
        self.cells.clear();
        self.agent = None;
        self.active_path.clear();
        self.guide_path.clear();
    }

    /// Visual of the provided cell, `None` outside the grid.
    #[must_use]
    pub fn visual_at(&self, cell: CellCoord) -> Option<CellVisual> {
        if cell.column() >= self.tile_grid.columns || cell.row() >= self.tile_grid.rows {
            return None;
        }
        let index = cell.row() as usize * self.tile_grid.columns as usize + cell.column() as usize;
        self.cells.get(index).copied()
    }

    /// Iterates over the cell visuals with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, CellVisual)> + '_ {
        let columns = self.tile_grid.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, visual)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *visual)
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Runner scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    #[error("cell_length must be positive and finite (received {cell_length})")]
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: u32, rows: u32) -> TileGridPresentation {
        TileGridPresentation::new(columns, rows, 10.0, Color::from_rgb_u8(0, 0, 0))
            .expect("valid grid")
    }

    #[test]
    fn tile_grid_creation_rejects_degenerate_cell_length() {
        for cell_length in [0.0, -3.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                TileGridPresentation::new(4, 4, cell_length, Color::from_rgb_u8(0, 0, 0)),
                Err(RenderingError::InvalidCellLength { .. })
            ));
        }
    }

    #[test]
    fn cell_at_maps_world_space_to_cells() {
        let presentation = grid(4, 3);

        assert_eq!(
            presentation.cell_at(Vec2::new(15.0, 29.9)),
            Some(CellCoord::new(1, 2))
        );
        assert_eq!(presentation.cell_at(Vec2::new(40.0, 5.0)), None);
        assert_eq!(presentation.cell_at(Vec2::new(-0.1, 5.0)), None);
        assert_eq!(
            presentation.cell_center(CellCoord::new(1, 2)),
            Vec2::new(15.0, 25.0)
        );
    }

    #[test]
    fn classify_respects_fog_and_reveal_all() {
        let hidden_wall = CellState {
            wall: true,
            ..CellState::default()
        };
        assert_eq!(CellVisual::classify(hidden_wall, false), CellVisual::Hidden);
        assert_eq!(CellVisual::classify(hidden_wall, true), CellVisual::Wall);

        let trail = CellState {
            visited: true,
            revealed: true,
            ..CellState::default()
        };
        assert_eq!(CellVisual::classify(trail, false), CellVisual::Trail);
    }

    #[test]
    fn populate_cells_resizes_grid() {
        let cells = vec![
            CellState {
                revealed: true,
                ..CellState::default()
            };
            6
        ];
        let view = GridView::new(&cells, 3, 2);
        let mut scene = Scene::new(grid(1, 1), HudPresentation::new("hi"));

        scene.populate_cells(&view);

        assert_eq!((scene.tile_grid.columns, scene.tile_grid.rows), (3, 2));
        assert_eq!(scene.visual_at(CellCoord::new(2, 1)), Some(CellVisual::Floor));
        assert_eq!(scene.visual_at(CellCoord::new(3, 1)), None);
        assert_eq!(scene.iter_cells().count(), 6);
    }

    #[test]
    fn combine_merges_actions() {
        let keyboard = FrameInput {
            solve: true,
            cursor_cell: Some(CellCoord::new(1, 1)),
            ..FrameInput::default()
        };
        let panel = FrameInput {
            toggle_guide: true,
            cursor_cell: Some(CellCoord::new(5, 5)),
            ..FrameInput::default()
        };

        let merged = keyboard.combine(panel);

        assert!(merged.solve && merged.toggle_guide);
        assert_eq!(merged.cursor_cell, Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn color_helpers_keep_other_channels() {
        let base = Color::new(0.0, 0.5, 1.0, 1.0);

        let lighter = base.lighten(0.5);
        assert_eq!(lighter, Color::new(0.5, 0.75, 1.0, 1.0));
        assert_eq!(base.with_alpha(0.25), Color::new(0.0, 0.5, 1.0, 0.25));
        assert_eq!(base.lighten(4.0), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn status_line_reports_distance_and_route() {
        let mut hud = HudPresentation::new("hi");
        assert_eq!(hud.route_header(), None);

        hud.phase = GamePhase::Running;
        hud.start = Some(CellCoord::new(0, 1));
        hud.end = Some(CellCoord::new(5, 1));
        hud.distance_to_goal = Some(5);

        assert_eq!(
            hud.status_line(),
            "Running | A* | steps 0 | explored 0 | to go 5"
        );
        assert_eq!(
            hud.route_header().as_deref(),
            Some("start (1, 0) | objective (1, 5)")
        );
    }

    #[test]
    fn status_line_lists_active_modes() {
        let mut hud = HudPresentation::new("hi");
        hud.phase = GamePhase::Running;
        hud.stats = Stats {
            steps: 3,
            explored: 12,
        };
        hud.guide_enabled = true;

        assert_eq!(
            hud.status_line(),
            "Running | A* | steps 3 | explored 12 | guide"
        );
    }
}
