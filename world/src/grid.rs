//! Dense cell grid owned by the world crate.

use maze_runner_core::{CellCoord, CellState, EditError, GridView, LayoutError, MazeLayout};

/// Row-major grid holding the wall, visited and revealed flags of every cell.
///
/// The start and end cells are fixed when the grid is built and can never
/// become walls. Search scratch data lives with each planner, not here.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellState>,
    start: CellCoord,
    end: CellCoord,
}

impl Grid {
    /// Builds a grid from a validated layout.
    pub(crate) fn from_layout(layout: &MazeLayout) -> Result<Self, LayoutError> {
        layout.validate()?;

        let too_large = LayoutError::TooLarge {
            columns: layout.columns,
            rows: layout.rows,
        };
        let capacity = usize::try_from(u64::from(layout.columns) * u64::from(layout.rows))
            .map_err(|_| too_large)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(capacity)
            .map_err(|_| too_large)?;
        cells.resize(capacity, CellState::default());

        let mut grid = Self {
            columns: layout.columns,
            rows: layout.rows,
            cells,
            start: layout.start,
            end: layout.end,
        };

        if let Some(state) = grid.state_mut(layout.start) {
            state.start = true;
        }
        if let Some(state) = grid.state_mut(layout.end) {
            state.end = true;
        }
        for &wall in &layout.walls {
            if let Some(state) = grid.state_mut(wall) {
                state.wall = true;
            }
        }

        Ok(grid)
    }

    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.columns, self.rows)
    }

    pub(crate) const fn start(&self) -> CellCoord {
        self.start
    }

    pub(crate) const fn end(&self) -> CellCoord {
        self.end
    }

    /// Flips the wall flag of the cell, returning the new wall state.
    pub(crate) fn toggle_wall(&mut self, cell: CellCoord) -> Result<bool, EditError> {
        let state = self.state_mut(cell).ok_or(EditError::OutOfBounds)?;
        if state.is_protected() {
            return Err(EditError::Protected);
        }
        state.wall = !state.wall;
        Ok(state.wall)
    }

    /// Marks the cell visited. Returns `true` when the flag changed.
    pub(crate) fn mark_visited(&mut self, cell: CellCoord) -> bool {
        match self.state_mut(cell) {
            Some(state) if !state.visited => {
                state.visited = true;
                true
            }
            _ => false,
        }
    }

    /// Marks the cell revealed. Returns `true` when the flag changed.
    pub(crate) fn mark_revealed(&mut self, cell: CellCoord) -> bool {
        match self.state_mut(cell) {
            Some(state) if !state.revealed => {
                state.revealed = true;
                true
            }
            _ => false,
        }
    }

    fn state_mut(&mut self, cell: CellCoord) -> Option<&mut CellState> {
        let index = self.view().index(cell)?;
        self.cells.get_mut(index)
    }
}
