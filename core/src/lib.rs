#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! [`GridView`] snapshots, and respond exclusively with new command batches.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Runner.";

/// Default number of grid rows created for a new session.
pub const DEFAULT_ROWS: u32 = 20;

/// Default number of grid columns created for a new session.
pub const DEFAULT_COLUMNS: u32 = 40;

/// Default probability that a generated cell becomes a wall.
pub const DEFAULT_WALL_PROBABILITY: f32 = 0.3;

/// Default Manhattan radius disclosed around the agent.
pub const DEFAULT_REVEAL_RADIUS: u32 = 2;

/// Largest number of cells a grid may hold.
pub const MAX_CELLS: u64 = 1 << 20;

fn exceeds_cell_limit(columns: u32, rows: u32) -> bool {
    u64::from(columns) * u64::from(rows) > MAX_CELLS
}

/// Lifecycle stage of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No maze is being played; every gameplay request is rejected.
    Menu,
    /// A maze exists but the mission has not been started yet.
    Briefing,
    /// The agent may move and the maze may be edited.
    Running,
    /// The agent reached the goal. Terminal until a new session starts.
    Won,
}

impl GamePhase {
    /// Reports whether wall edits are accepted in this phase.
    #[must_use]
    pub const fn allows_edits(self) -> bool {
        matches!(self, Self::Briefing | Self::Running)
    }
}

/// Search strategies available for routing the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Unweighted breadth-first search. Always returns a shortest path.
    #[serde(alias = "bfs", alias = "breadth-first")]
    BreadthFirst,
    /// Depth-first search. Returns some path, not necessarily the shortest.
    #[serde(alias = "dfs", alias = "depth-first")]
    DepthFirst,
    /// Best-first search ordered by steps taken plus Manhattan distance.
    #[serde(alias = "astar", alias = "a-star", alias = "a*")]
    AStar,
}

impl Algorithm {
    /// Every algorithm in presentation order.
    pub const ALL: [Algorithm; 3] = [Self::BreadthFirst, Self::DepthFirst, Self::AStar];

    /// Short label shown to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BreadthFirst => "BFS",
            Self::DepthFirst => "DFS",
            Self::AStar => "A*",
        }
    }

    /// Algorithm that follows this one when cycling through [`Algorithm::ALL`].
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::BreadthFirst => Self::DepthFirst,
            Self::DepthFirst => Self::AStar,
            Self::AStar => Self::BreadthFirst,
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::AStar
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::BreadthFirst),
            "dfs" | "depth-first" => Ok(Self::DepthFirst),
            "a*" | "astar" | "a-star" => Ok(Self::AStar),
            _ => Err(ParseAlgorithmError(value.to_owned())),
        }
    }
}

/// Error returned when an algorithm name cannot be recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown algorithm '{0}', expected one of bfs, dfs, astar")]
pub struct ParseAlgorithmError(String);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the current maze and generates a new one.
    NewSession {
        /// Grid dimensions, wall density and disclosure radius.
        config: SessionConfig,
        /// Seed feeding the generator so sessions can be reproduced.
        seed: u64,
    },
    /// Discards the current maze and installs an explicit layout.
    LoadLayout {
        /// Layout describing the new maze.
        layout: MazeLayout,
        /// Manhattan radius revealed around the agent.
        reveal_radius: u32,
    },
    /// Starts the mission so the agent may move.
    StartMission,
    /// Leaves the current session and returns to the menu.
    ReturnToMenu,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Flips the wall state of a cell.
    ToggleWall {
        /// Cell whose wall state should flip.
        cell: CellCoord,
    },
    /// Requests a single manual agent step in the provided direction.
    MoveAgent {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Moves the agent onto the next cell of a planned path.
    ///
    /// Unlike [`Command::MoveAgent`] the destination is not checked for walls:
    /// a planned path is a snapshot of the grid at planning time.
    AdvanceAgent {
        /// Cell the agent should occupy after the step.
        to: CellCoord,
    },
    /// Records the exploration count of the latest navigation search.
    RecordSearch {
        /// Number of cells expanded by the search.
        explored: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a fresh maze replaced the previous one.
    SessionCreated {
        /// Number of columns in the new grid.
        columns: u32,
        /// Number of rows in the new grid.
        rows: u32,
        /// Cell where the agent starts.
        start: CellCoord,
        /// Cell the agent must reach.
        end: CellCoord,
    },
    /// Reports that a session could not be created.
    SessionRejected {
        /// Specific reason the session was refused.
        reason: SessionError,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
    },
    /// Confirms that a wall was added or removed.
    WallToggled {
        /// Cell that changed.
        cell: CellCoord,
        /// Wall state after the toggle.
        wall: bool,
    },
    /// Reports that a wall edit was rejected.
    WallToggleRejected {
        /// Cell targeted by the edit.
        cell: CellCoord,
        /// Specific reason the edit failed.
        reason: EditError,
    },
    /// Confirms that the agent moved between two cells.
    AgentMoved {
        /// Cell the agent occupied before moving.
        from: CellCoord,
        /// Cell the agent occupies after moving.
        to: CellCoord,
    },
    /// Reports that an agent move was rejected.
    AgentMoveRejected {
        /// Specific reason the move failed.
        reason: MoveError,
    },
    /// Lists cells that became visible, in row-major order.
    CellsRevealed {
        /// Newly revealed cells.
        cells: Vec<CellCoord>,
    },
    /// Announces that the agent arrived on the goal cell.
    GoalReached {
        /// Steps taken during the session.
        steps: u32,
    },
    /// Confirms that the stats now carry a new exploration count.
    SearchRecorded {
        /// Number of cells expanded by the search.
        explored: u32,
    },
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Cell reached by stepping once from `cell`, if it does not underflow.
    ///
    /// Upper bounds are not checked; callers validate against the grid.
    #[must_use]
    pub fn step_from(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Self::North => Some(CellCoord::new(cell.column(), cell.row().checked_sub(1)?)),
            Self::East => Some(CellCoord::new(cell.column().checked_add(1)?, cell.row())),
            Self::South => Some(CellCoord::new(cell.column(), cell.row().checked_add(1)?)),
            Self::West => Some(CellCoord::new(cell.column().checked_sub(1)?, cell.row())),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent_to(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Flags describing a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellState {
    /// The cell blocks movement and search.
    pub wall: bool,
    /// The cell is where the agent entered the maze.
    pub start: bool,
    /// The cell is the objective.
    pub end: bool,
    /// The agent has stood on this cell during the session.
    pub visited: bool,
    /// The cell is no longer hidden by fog.
    pub revealed: bool,
}

impl CellState {
    /// Reports whether the editor may not change this cell.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        self.start || self.end
    }
}

/// Read-only view into the dense row-major cell grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellState],
    columns: u32,
    rows: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellState], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Provides the dimensions of the grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Number of cells backing the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Row-major index of the cell, if it lies within the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Coordinate of the cell stored at the provided row-major index.
    #[must_use]
    pub fn coord(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cells.len() || self.columns == 0 {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Flags of the provided cell, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell blocks traversal. Cells outside the grid block.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.cell(cell).map_or(true, |state| state.wall)
    }

    /// Reports whether the cell has been revealed.
    #[must_use]
    pub fn is_revealed(&self, cell: CellCoord) -> bool {
        self.cell(cell).map_or(false, |state| state.revealed)
    }

    /// Orthogonal in-bounds neighbours ordered up, down, left, right.
    #[must_use]
    pub fn neighbors(&self, cell: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::default();
        if !self.contains(cell) {
            return neighbors;
        }

        if cell.row() > 0 {
            neighbors.push(CellCoord::new(cell.column(), cell.row() - 1));
        }
        if cell.row() + 1 < self.rows {
            neighbors.push(CellCoord::new(cell.column(), cell.row() + 1));
        }
        if cell.column() > 0 {
            neighbors.push(CellCoord::new(cell.column() - 1, cell.row()));
        }
        if cell.column() + 1 < self.columns {
            neighbors.push(CellCoord::new(cell.column() + 1, cell.row()));
        }

        neighbors
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + 'a {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, state)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *state)
        })
    }
}

/// Iterator over at most four orthogonal neighbours.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

/// Complete description of a maze that the world can install.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Cell where the agent starts.
    pub start: CellCoord,
    /// Cell the agent must reach.
    pub end: CellCoord,
    /// Cells that block movement.
    pub walls: Vec<CellCoord>,
}

impl MazeLayout {
    /// Creates a layout without walls.
    #[must_use]
    pub fn open(columns: u32, rows: u32, start: CellCoord, end: CellCoord) -> Self {
        Self {
            columns,
            rows,
            start,
            end,
            walls: Vec::new(),
        }
    }

    /// Adds walls to the layout.
    #[must_use]
    pub fn with_walls<I>(mut self, walls: I) -> Self
    where
        I: IntoIterator<Item = CellCoord>,
    {
        self.walls.extend(walls);
        self
    }

    /// Checks the structural invariants of the layout.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(LayoutError::EmptyGrid);
        }
        if exceeds_cell_limit(self.columns, self.rows) {
            return Err(LayoutError::TooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let inside = |cell: CellCoord| cell.column() < self.columns && cell.row() < self.rows;
        if !inside(self.start) {
            return Err(LayoutError::StartOutOfBounds(self.start));
        }
        if !inside(self.end) {
            return Err(LayoutError::EndOutOfBounds(self.end));
        }
        if self.start == self.end {
            return Err(LayoutError::StartIsEnd(self.start));
        }
        for &wall in &self.walls {
            if !inside(wall) {
                return Err(LayoutError::WallOutOfBounds(wall));
            }
            if wall == self.start || wall == self.end {
                return Err(LayoutError::ProtectedWall(wall));
            }
        }
        Ok(())
    }
}

/// Parameters controlling maze generation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of columns in generated grids.
    pub columns: u32,
    /// Number of rows in generated grids.
    pub rows: u32,
    /// Independent probability that a non start/end cell becomes a wall.
    pub wall_probability: f32,
    /// Manhattan radius revealed around the agent after every move.
    pub reveal_radius: u32,
}

impl SessionConfig {
    /// Checks that the configuration can produce a grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < 2 {
            return Err(ConfigError::TooFewColumns(self.columns));
        }
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if exceeds_cell_limit(self.columns, self.rows) {
            return Err(ConfigError::TooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(ConfigError::WallProbability);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            reveal_radius: DEFAULT_REVEAL_RADIUS,
        }
    }
}

/// Counters presented to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    /// Agent displacements during the session.
    pub steps: u32,
    /// Cells expanded by the most recent navigation search.
    pub explored: u32,
}

/// Reasons an agent move may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MoveError {
    /// The mission is not running, so movement is disabled.
    #[error("the agent can only move while the mission is running")]
    InvalidPhase,
    /// The destination lies outside the grid.
    #[error("destination lies outside the grid")]
    OutOfBounds,
    /// The destination is a wall.
    #[error("destination is blocked by a wall")]
    Blocked,
    /// The destination does not share an edge with the agent's cell.
    #[error("destination is not adjacent to the agent")]
    NotAdjacent,
}

/// Reasons a wall edit may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum EditError {
    /// Edits are only accepted during the briefing and the running mission.
    #[error("the maze cannot be edited in the current phase")]
    InvalidPhase,
    /// The cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The cell is the start or the end and must stay open.
    #[error("start and end cells cannot be edited")]
    Protected,
}

/// Reasons a [`SessionConfig`] is unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// Start and end need distinct column bands.
    #[error("grid needs at least 2 columns, got {0}")]
    TooFewColumns(u32),
    /// The grid has no rows.
    #[error("grid needs at least 1 row")]
    NoRows,
    /// The grid holds more than [`MAX_CELLS`] cells.
    #[error("a {columns}x{rows} grid exceeds the limit of {MAX_CELLS} cells")]
    TooLarge {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The wall probability is not a probability.
    #[error("wall probability must lie within 0.0..=1.0")]
    WallProbability,
}

/// Reasons a [`MazeLayout`] is unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum LayoutError {
    /// The layout has no cells.
    #[error("layout has no cells")]
    EmptyGrid,
    /// The layout holds more than [`MAX_CELLS`] cells.
    #[error("a {columns}x{rows} layout exceeds the limit of {MAX_CELLS} cells")]
    TooLarge {
        /// Layout column count.
        columns: u32,
        /// Layout row count.
        rows: u32,
    },
    /// The start cell lies outside the grid.
    #[error("start {0} lies outside the grid")]
    StartOutOfBounds(CellCoord),
    /// The end cell lies outside the grid.
    #[error("end {0} lies outside the grid")]
    EndOutOfBounds(CellCoord),
    /// Start and end share a cell.
    #[error("start and end share cell {0}")]
    StartIsEnd(CellCoord),
    /// A wall lies outside the grid.
    #[error("wall {0} lies outside the grid")]
    WallOutOfBounds(CellCoord),
    /// A wall covers the start or the end.
    #[error("wall {0} covers the start or the end")]
    ProtectedWall(CellCoord),
}

/// Reasons a session could not be created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SessionError {
    /// The generation parameters were invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The layout was invalid.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn maze_layout_round_trips_through_bincode() {
        let layout = MazeLayout::open(5, 4, CellCoord::new(0, 0), CellCoord::new(4, 3))
            .with_walls([CellCoord::new(2, 1), CellCoord::new(2, 2)]);
        assert_round_trip(&layout);
    }

    #[test]
    fn session_config_round_trips_through_bincode() {
        assert_round_trip(&SessionConfig::default());
    }

    #[test]
    fn neighbors_follow_up_down_left_right_order() {
        let cells = vec![CellState::default(); 9];
        let view = GridView::new(&cells, 3, 3);

        let neighbors: Vec<_> = view.neighbors(CellCoord::new(1, 1)).collect();

        assert_eq!(
            neighbors,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
            ]
        );
    }

    #[test]
    fn neighbors_skip_cells_outside_the_grid() {
        let cells = vec![CellState::default(); 6];
        let view = GridView::new(&cells, 3, 2);

        let corner: Vec<_> = view.neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(corner, vec![CellCoord::new(0, 1), CellCoord::new(1, 0)]);

        let far_corner: Vec<_> = view.neighbors(CellCoord::new(2, 1)).collect();
        assert_eq!(far_corner, vec![CellCoord::new(2, 0), CellCoord::new(1, 1)]);

        assert_eq!(view.neighbors(CellCoord::new(5, 5)).count(), 0);
    }

    #[test]
    fn index_and_coord_are_inverse() {
        let cells = vec![CellState::default(); 12];
        let view = GridView::new(&cells, 4, 3);

        for (coord, _) in view.iter() {
            let index = view.index(coord).expect("cell inside grid");
            assert_eq!(view.coord(index), Some(coord));
        }
        assert_eq!(view.index(CellCoord::new(4, 0)), None);
        assert_eq!(view.coord(12), None);
    }

    #[test]
    fn cells_outside_grid_count_as_walls() {
        let cells = vec![CellState::default(); 4];
        let view = GridView::new(&cells, 2, 2);
        assert!(!view.is_wall(CellCoord::new(1, 1)));
        assert!(view.is_wall(CellCoord::new(2, 0)));
    }

    #[test]
    fn direction_steps_stop_at_zero() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(Direction::North.step_from(origin), None);
        assert_eq!(Direction::West.step_from(origin), None);
        assert_eq!(Direction::East.step_from(origin), Some(CellCoord::new(1, 0)));
        assert_eq!(Direction::South.step_from(origin), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn algorithm_names_parse_case_insensitively() {
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::BreadthFirst));
        assert_eq!("dfs".parse::<Algorithm>(), Ok(Algorithm::DepthFirst));
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn algorithm_cycle_visits_every_variant() {
        let mut algorithm = Algorithm::default();
        let mut seen = Vec::new();
        for _ in 0..Algorithm::ALL.len() {
            seen.push(algorithm);
            algorithm = algorithm.next();
        }
        seen.sort_by_key(|algorithm| algorithm.label());
        let mut expected = Algorithm::ALL.to_vec();
        expected.sort_by_key(|algorithm| algorithm.label());
        assert_eq!(seen, expected);
        assert_eq!(algorithm, Algorithm::default());
    }

    #[test]
    fn layout_validation_rejects_protected_walls() {
        let start = CellCoord::new(0, 0);
        let layout = MazeLayout::open(3, 3, start, CellCoord::new(2, 2)).with_walls([start]);
        assert_eq!(layout.validate(), Err(LayoutError::ProtectedWall(start)));
    }

    #[test]
    fn layout_validation_rejects_shared_start_and_end() {
        let cell = CellCoord::new(1, 1);
        let layout = MazeLayout::open(3, 3, cell, cell);
        assert_eq!(layout.validate(), Err(LayoutError::StartIsEnd(cell)));
    }

    #[test]
    fn oversized_grids_fail_validation() {
        let layout = MazeLayout::open(
            u32::MAX,
            u32::MAX,
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
        );
        assert_eq!(
            layout.validate(),
            Err(LayoutError::TooLarge {
                columns: u32::MAX,
                rows: u32::MAX,
            })
        );

        let config = SessionConfig {
            columns: 2048,
            rows: 1024,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { .. })
        ));

        let at_limit = SessionConfig {
            columns: 1024,
            rows: 1024,
            ..SessionConfig::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));
    }

    #[test]
    fn session_config_validation_rejects_bad_probability() {
        let config = SessionConfig {
            wall_probability: 1.5,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WallProbability));
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }
}
