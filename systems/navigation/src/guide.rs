//! Advisory route from the agent to the goal.

use log::trace;
use maze_runner_core::{CellCoord, GridView};
use maze_runner_system_pathfinding::{AStar, SearchScratch, SearchStrategy};

/// Cached A* route recomputed whenever the agent or the walls change.
///
/// The guide owns a scratch separate from the playback planner.
#[derive(Clone, Debug, Default)]
pub(crate) struct Guide {
    enabled: bool,
    stale: bool,
    path: Vec<CellCoord>,
    scratch: SearchScratch,
}

impl Guide {
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.stale = true;
        }
        if !enabled {
            self.path.clear();
        }
        self.enabled = enabled;
    }

    pub(crate) const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn invalidate(&mut self) {
        self.stale = true;
    }

    pub(crate) fn clear(&mut self) {
        self.path.clear();
        self.stale = true;
    }

    /// Recomputes the route if it is stale. `active` is false whenever the
    /// guide must not be shown.
    pub(crate) fn refresh(
        &mut self,
        active: bool,
        grid: Option<&GridView<'_>>,
        agent: CellCoord,
        end: CellCoord,
    ) {
        let Some(grid) = grid.filter(|_| active && self.enabled) else {
            self.clear();
            return;
        };
        if !self.stale {
            return;
        }

        let outcome = AStar.search(grid, agent, end, &mut self.scratch);
        trace!("guide {agent} -> {end}: {} steps", outcome.path.len());
        self.path = outcome.path;
        self.stale = false;
    }

    pub(crate) fn path(&self) -> &[CellCoord] {
        &self.path
    }
}
