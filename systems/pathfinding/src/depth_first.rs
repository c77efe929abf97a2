//! Stack-based depth-first search.

use maze_runner_core::{Algorithm, CellCoord, GridView};

use crate::{open_neighbors, SearchScratch, SearchStrategy};

/// Expands cells in LIFO order.
///
/// Neighbours are pushed up, down, left, right, so the rightward neighbour is
/// expanded first. An unexpanded cell takes the most recent cell that pushed it
/// as its parent. The first descent that reaches the goal wins; the path is
/// valid but rarely the shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirst;

impl SearchStrategy for DepthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DepthFirst
    }

    fn explore(
        &self,
        grid: &GridView<'_>,
        start: usize,
        goal: usize,
        scratch: &mut SearchScratch,
        explored: &mut Vec<CellCoord>,
    ) -> bool {
        let mut stack = vec![start];
        scratch.record(start, 0, None);

        while let Some(current) = stack.pop() {
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
                if !scratch.is_closed(neighbor) {
                    scratch.record(neighbor, next_distance, Some(current));
                    stack.push(neighbor);
                }
            }
        }

        false
    }
}
