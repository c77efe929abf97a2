//! Manhattan-guided A* search.

use std::{cmp::Reverse, collections::BinaryHeap};

use maze_runner_core::{Algorithm, CellCoord, GridView};

use crate::{open_neighbors, SearchScratch, SearchStrategy};

/// Expands cells by lowest `g + h`, where `h` is the Manhattan distance to the goal.
///
/// Entries with equal `f` are expanded in discovery order. Stale heap entries
/// are skipped once their cell has been closed.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl SearchStrategy for AStar {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn explore(
        &self,
        grid: &GridView<'_>,
        start: usize,
        goal: usize,
        scratch: &mut SearchScratch,
        explored: &mut Vec<CellCoord>,
    ) -> bool {
        let Some(goal_cell) = grid.coord(goal) else {
            return false;
        };
        let heuristic = |index: usize| {
            grid.coord(index)
                .map_or(u32::MAX, |cell| cell.manhattan_distance(goal_cell))
        };

        let mut frontier = BinaryHeap::new();
        let mut sequence = 0_u64;
        scratch.record(start, 0, None);
        frontier.push(Reverse(FrontierEntry {
            estimate: heuristic(start),
            sequence,
            index: start,
        }));

        while let Some(Reverse(entry)) = frontier.pop() {
            let current = entry.index;
            if !scratch.close(current) {
                continue;
            }
            if let Some(cell) = grid.coord(current) {
                explored.push(cell);
            }
            if current == goal {
                return true;
            }

            let tentative = scratch.distance(current).unwrap_or(0).saturating_add(1);
            for neighbor in open_neighbors(*grid, current) {
                if scratch.is_closed(neighbor) {
                    continue;
                }
                if scratch.distance(neighbor).map_or(true, |known| tentative < known) {
                    scratch.record(neighbor, tentative, Some(current));
                    sequence += 1;
                    frontier.push(Reverse(FrontierEntry {
                        estimate: tentative.saturating_add(heuristic(neighbor)),
                        sequence,
                        index: neighbor,
                    }));
                }
            }
        }

        false
    }
}

/// Heap key ordered by estimate, then by discovery sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    estimate: u32,
    sequence: u64,
    index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_prefers_lower_estimate_then_earlier_discovery() {
        let mut heap = BinaryHeap::new();
        for (estimate, sequence, index) in [(5, 0, 10), (4, 2, 11), (4, 1, 12)] {
            heap.push(Reverse(FrontierEntry {
                estimate,
                sequence,
                index,
            }));
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|Reverse(entry)| entry.index))
            .collect();
        assert_eq!(order, vec![12, 11, 10]);
    }
}
