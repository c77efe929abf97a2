//! Unweighted breadth-first search.

use std::collections::VecDeque;

use maze_runner_core::{Algorithm, CellCoord, GridView};

use crate::{open_neighbors, SearchScratch, SearchStrategy};

/// Expands cells in FIFO order, yielding a path with the fewest steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirst;

impl SearchStrategy for BreadthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BreadthFirst
    }

    fn explore(
        &self,
        grid: &GridView<'_>,
        start: usize,
        goal: usize,
        scratch: &mut SearchScratch,
        explored: &mut Vec<CellCoord>,
    ) -> bool {
        let mut frontier = VecDeque::new();
        scratch.record(start, 0, None);
        frontier.push_back(start);

        while let Some(current) = frontier.pop_front() {
            if !scratch.close(current) {
                continue;
            }
            if let Some(cell) = grid.coord(current) {
                explored.push(cell);
            }
            if current == goal {
                return true;
            }

            let next_distance = scratch.distance(current).unwrap_or(0).saturating_add(1);
            for neighbor in open_neighbors(*grid, current) {
                if scratch.distance(neighbor).is_none() {
                    scratch.record(neighbor, next_distance, Some(current));
                    frontier.push_back(neighbor);
                }
            }
        }

        false
    }
}
