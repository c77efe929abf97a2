#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid search strategies used to route the agent through the maze.
//!
//! Every strategy reads an immutable [`GridView`], treats walls as impassable
//! and records its bookkeeping in a caller-owned [`SearchScratch`]. The origin
//! cell is always expandable, even when a wall has been placed on it.

mod a_star;
mod breadth_first;
mod depth_first;
mod scratch;

use log::debug;
use maze_runner_core::{Algorithm, CellCoord, GridView};

pub use a_star::AStar;
pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;
pub use scratch::SearchScratch;

/// Result of a single search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cells from the one after the origin through the goal. Empty when the
    /// goal is unreachable or equals the origin.
    pub path: Vec<CellCoord>,
    /// Cells in the order they were expanded.
    pub explored: Vec<CellCoord>,
    /// Whether the goal was expanded.
    pub reached: bool,
}

impl SearchOutcome {
    /// Number of expanded cells, saturating at `u32::MAX`.
    #[must_use]
    pub fn explored_count(&self) -> u32 {
        u32::try_from(self.explored.len()).unwrap_or(u32::MAX)
    }
}

/// Strategy that expands the grid from an origin towards a goal.
pub trait SearchStrategy {
    /// Algorithm implemented by the strategy.
    fn algorithm(&self) -> Algorithm;

    /// Expands cells from `start` until `goal` is expanded or the frontier is
    /// exhausted, appending each expanded cell to `explored`.
    ///
    /// `scratch` has been reset for the grid. Returns whether the goal was
    /// expanded.
    fn explore(
        &self,
        grid: &GridView<'_>,
        start: usize,
        goal: usize,
        scratch: &mut SearchScratch,
        explored: &mut Vec<CellCoord>,
    ) -> bool;

    /// Searches for a path from `start` to `goal`.
    ///
    /// Out-of-bounds endpoints and a walled goal produce an empty outcome.
    fn search(
        &self,
        grid: &GridView<'_>,
        start: CellCoord,
        goal: CellCoord,
        scratch: &mut SearchScratch,
    ) -> SearchOutcome {
        let (Some(start_index), Some(goal_index)) = (grid.index(start), grid.index(goal)) else {
            return SearchOutcome::default();
        };
        if start != goal && grid.is_wall(goal) {
            return SearchOutcome::default();
        }

        scratch.reset(grid.len());
        let mut explored = Vec::new();
        let reached = self.explore(grid, start_index, goal_index, scratch, &mut explored);
        let path = if reached {
            reconstruct_path(grid, scratch, start, goal)
        } else {
            Vec::new()
        };

        SearchOutcome {
            path,
            explored,
            reached,
        }
    }
}

/// Returns the strategy implementing `algorithm`.
#[must_use]
pub fn strategy(algorithm: Algorithm) -> &'static dyn SearchStrategy {
    match algorithm {
        Algorithm::BreadthFirst => &BreadthFirst,
        Algorithm::DepthFirst => &DepthFirst,
        Algorithm::AStar => &AStar,
    }
}

/// Runs `algorithm` from `start` to `goal`, logging the result.
pub fn search(
    algorithm: Algorithm,
    grid: &GridView<'_>,
    start: CellCoord,
    goal: CellCoord,
    scratch: &mut SearchScratch,
) -> SearchOutcome {
    let outcome = strategy(algorithm).search(grid, start, goal, scratch);
    debug!(
        "{algorithm} {start} -> {goal}: explored {}, path {}{}",
        outcome.explored.len(),
        outcome.path.len(),
        if outcome.reached { "" } else { " (unreachable)" }
    );
    outcome
}

/// Follows the parent chain recorded in `scratch` from `goal` back to `start`.
///
/// The returned path excludes `start` and ends with `goal`. It is empty when
/// the goal was never reached or equals the start.
#[must_use]
pub fn reconstruct_path(
    grid: &GridView<'_>,
    scratch: &SearchScratch,
    start: CellCoord,
    goal: CellCoord,
) -> Vec<CellCoord> {
    let (Some(start_index), Some(goal_index)) = (grid.index(start), grid.index(goal)) else {
        return Vec::new();
    };

    let mut path = Vec::new();
    let mut current = goal_index;
    while current != start_index {
        let (Some(cell), Some(previous)) = (grid.coord(current), scratch.previous(current)) else {
            return Vec::new();
        };
        if path.len() >= grid.len() {
            return Vec::new();
        }
        path.push(cell);
        current = previous;
    }

    path.reverse();
    path
}

/// Indices of the non-wall neighbours of `index`, ordered up, down, left, right.
fn open_neighbors(grid: GridView<'_>, index: usize) -> impl Iterator<Item = usize> + '_ {
    grid.coord(index)
        .map(|cell| grid.neighbors(cell))
        .into_iter()
        .flatten()
        .filter(move |neighbor| !grid.is_wall(*neighbor))
        .filter_map(move |neighbor| grid.index(neighbor))
}
