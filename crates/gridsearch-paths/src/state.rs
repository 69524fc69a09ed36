use std::collections::{HashMap, HashSet};

use gridsearch_core::Cell;

/// Parent pointers: `None` marks the root of a reconstruction.
pub type ParentMap = HashMap<Cell, Option<Cell>>;

/// The mutable record every search drives forward.
///
/// One `SearchState` belongs to one run at a time. Each algorithm resets it
/// when constructed, so nothing leaks from a previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub(crate) frontier: Vec<Cell>,
    pub(crate) explored: HashSet<Cell>,
    pub(crate) parent: ParentMap,
    pub(crate) path: Vec<Cell>,
}

impl SearchState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty every container.
    pub fn clear(&mut self) {
        self.frontier.clear();
        self.explored.clear();
        self.parent.clear();
        self.path.clear();
    }

    /// Clear, then register `root` as the only parent-map root.
    pub(crate) fn reset(&mut self, root: Cell) {
        self.clear();
        self.parent.insert(root, None);
    }

    /// Replace the frontier with the given cells.
    pub(crate) fn set_frontier(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.frontier.clear();
        self.frontier.extend(cells);
    }

    /// Cells awaiting expansion. Order carries no meaning and a cell may
    /// appear more than once (uniform-cost search keeps stale entries).
    #[inline]
    pub fn frontier(&self) -> &[Cell] {
        &self.frontier
    }

    /// Cells already expanded or, for the breadth-first searches, discovered.
    #[inline]
    pub fn explored(&self) -> &HashSet<Cell> {
        &self.explored
    }

    /// Parent pointers recorded so far.
    #[inline]
    pub fn parent(&self) -> &ParentMap {
        &self.parent
    }

    /// The reconstructed path, target first, start excluded. Empty until a
    /// search succeeds.
    #[inline]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn in_frontier(&self, c: Cell) -> bool {
        self.frontier.contains(&c)
    }

    pub fn is_explored(&self, c: Cell) -> bool {
        self.explored.contains(&c)
    }

    pub fn on_path(&self, c: Cell) -> bool {
        self.path.contains(&c)
    }

    /// Whether every container is empty.
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
            && self.explored.is_empty()
            && self.parent.is_empty()
            && self.path.is_empty()
    }
}
