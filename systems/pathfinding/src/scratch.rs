//! Reusable per-search bookkeeping.

/// Distance, parent and closed-set buffers indexed by row-major cell index.
///
/// A planner owns one scratch and hands it to every search it runs. Buffers
/// grow to the largest grid seen and are cleared by [`SearchScratch::reset`]
/// before each search, so the grid itself never carries search state.
#[derive(Clone, Debug, Default)]
pub struct SearchScratch {
    distance: Vec<u32>,
    previous: Vec<Option<usize>>,
    closed: Vec<bool>,
}

impl SearchScratch {
    /// Creates an empty scratch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every buffer and sizes it for `cell_count` cells.
    pub fn reset(&mut self, cell_count: usize) {
        self.distance.clear();
        self.distance.resize(cell_count, u32::MAX);
        self.previous.clear();
        self.previous.resize(cell_count, None);
        self.closed.clear();
        self.closed.resize(cell_count, false);
    }

    /// Number of cells the scratch currently covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    /// Reports whether the scratch covers no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Steps from the search origin, or `None` if the cell was never reached.
    #[must_use]
    pub fn distance(&self, index: usize) -> Option<u32> {
        self.distance
            .get(index)
            .copied()
            .filter(|distance| *distance != u32::MAX)
    }

    /// Cell from which `index` was discovered.
    #[must_use]
    pub fn previous(&self, index: usize) -> Option<usize> {
        self.previous.get(index).copied().flatten()
    }

    /// Reports whether the cell has been expanded.
    #[must_use]
    pub fn is_closed(&self, index: usize) -> bool {
        self.closed.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn record(&mut self, index: usize, distance: u32, previous: Option<usize>) {
        if let Some(slot) = self.distance.get_mut(index) {
            *slot = distance;
        }
        if let Some(slot) = self.previous.get_mut(index) {
            *slot = previous;
        }
    }

    /// Marks the cell expanded. Returns `false` if it already was.
    pub(crate) fn close(&mut self, index: usize) -> bool {
        match self.closed.get_mut(index) {
            Some(closed) if !*closed => {
                *closed = true;
                true
            }
            _ => false,
        }
    }
}
