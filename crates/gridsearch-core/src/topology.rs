//! The implicit grid graph searched by every algorithm.

use std::collections::HashSet;

use crate::config::{ConfigError, SearchConfig, validate_grid_size};
use crate::geom::{Cell, Direction};

/// A square `size x size` grid with six-way adjacency and optional walls.
///
/// Neighbors are produced in [`Direction::ALL`] order. That order decides
/// tie-breaks in every search, so it must not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    size: i32,
    walls: HashSet<Cell>,
}

impl Topology {
    /// Create an open grid of the given dimension.
    pub fn new(size: i32) -> Result<Self, ConfigError> {
        validate_grid_size(size)?;
        Ok(Self {
            size,
            walls: HashSet::new(),
        })
    }

    /// Grid dimension.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.size && c.col >= 0 && c.col < self.size
    }

    /// Whether `c` can be entered: in bounds and not a wall.
    #[inline]
    pub fn is_open(&self, c: Cell) -> bool {
        self.contains(c) && !self.walls.contains(&c)
    }

    /// Append the open neighbors of `c` into `buf`, in expansion order.
    /// The caller clears `buf` before calling.
    pub fn neighbors_into(&self, c: Cell, buf: &mut Vec<Cell>) {
        for d in Direction::ALL {
            let n = c + d;
            if self.is_open(n) {
                buf.push(n);
            }
        }
    }

    /// Open neighbors of `c`, in expansion order.
    pub fn neighbors(&self, c: Cell) -> Vec<Cell> {
        let mut buf = Vec::with_capacity(Direction::ALL.len());
        self.neighbors_into(c, &mut buf);
        buf
    }

    /// Whether a single move leads from `from` to `to`.
    pub fn is_adjacent(&self, from: Cell, to: Cell) -> bool {
        self.is_open(to) && Direction::between(from, to).is_some()
    }

    // -----------------------------------------------------------------------
    // Walls
    // -----------------------------------------------------------------------

    /// Whether `c` is a wall.
    #[inline]
    pub fn is_wall(&self, c: Cell) -> bool {
        self.walls.contains(&c)
    }

    /// Mark or unmark `c` as a wall. Out-of-bounds cells are ignored.
    pub fn set_wall(&mut self, c: Cell, wall: bool) {
        if !self.contains(c) {
            return;
        }
        if wall {
            self.walls.insert(c);
        } else {
            self.walls.remove(&c);
        }
    }

    /// Flip the wall state of `c`. Returns the new state.
    pub fn toggle_wall(&mut self, c: Cell) -> bool {
        let wall = !self.is_wall(c);
        self.set_wall(c, wall);
        wall && self.contains(c)
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        self.walls.clear();
    }

    /// Iterate over the current walls, in no particular order.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walls.iter().copied()
    }

    /// Row-major iterator over every cell of the grid.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Cell::new(row, col)))
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            size: crate::config::DEFAULT_GRID_SIZE,
            walls: HashSet::new(),
        }
    }
}

impl From<&SearchConfig> for Topology {
    fn from(config: &SearchConfig) -> Self {
        Self {
            size: config.grid_size(),
            walls: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(c: Cell, n: i32) -> Vec<Cell> {
        let (r, k) = (c.row, c.col);
        [
            (r - 1, k),
            (r, k + 1),
            (r + 1, k),
            (r + 1, k + 1),
            (r, k - 1),
            (r - 1, k - 1),
        ]
        .into_iter()
        .filter(|&(r, k)| r >= 0 && r < n && k >= 0 && k < n)
        .map(Cell::from)
        .collect()
    }

    #[test]
    fn interior_cell_has_six_neighbors_in_order() {
        let t = Topology::new(10).unwrap();
        assert_eq!(
            t.neighbors(Cell::new(5, 5)),
            vec![
                Cell::new(4, 5),
                Cell::new(5, 6),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 4),
                Cell::new(4, 4),
            ]
        );
    }

    #[test]
    fn corners_are_clipped() {
        let t = Topology::new(10).unwrap();
        assert_eq!(
            t.neighbors(Cell::new(0, 0)),
            vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
        assert_eq!(
            t.neighbors(Cell::new(9, 9)),
            vec![Cell::new(8, 9), Cell::new(9, 8), Cell::new(8, 8)]
        );
        // The anti-diagonal corners only get their cardinal neighbors.
        assert_eq!(
            t.neighbors(Cell::new(0, 9)),
            vec![Cell::new(1, 9), Cell::new(0, 8)]
        );
        assert_eq!(
            t.neighbors(Cell::new(9, 0)),
            vec![Cell::new(8, 0), Cell::new(9, 1)]
        );
    }

    #[test]
    fn every_cell_matches_reference_rule() {
        for n in 1..=6 {
            let t = Topology::new(n).unwrap();
            for c in t.cells() {
                assert_eq!(t.neighbors(c), expected(c, n), "cell {c} on {n}x{n}");
            }
        }
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let t = Topology::new(1).unwrap();
        assert!(t.neighbors(Cell::ORIGIN).is_empty());
    }

    #[test]
    fn walls_are_skipped() {
        let mut t = Topology::new(3).unwrap();
        t.set_wall(Cell::new(1, 1), true);
        assert_eq!(
            t.neighbors(Cell::new(0, 0)),
            vec![Cell::new(0, 1), Cell::new(1, 0)]
        );
        assert!(t.toggle_wall(Cell::new(0, 1)) && t.is_wall(Cell::new(0, 1)));
        assert!(!t.toggle_wall(Cell::new(0, 1)));
        t.clear_walls();
        assert_eq!(t.walls().count(), 0);
    }

    #[test]
    fn out_of_bounds_walls_are_ignored() {
        let mut t = Topology::new(3).unwrap();
        assert!(!t.toggle_wall(Cell::new(5, 5)));
        assert_eq!(t.walls().count(), 0);
    }

    #[test]
    fn cells_are_row_major() {
        let t = Topology::new(2).unwrap();
        let cells: Vec<_> = t.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 1)
            ]
        );
    }

    #[test]
    fn rejects_bad_size() {
        assert!(Topology::new(0).is_err());
    }

    #[test]
    fn built_from_config() {
        let cfg = SearchConfig::new(7, 3).unwrap();
        let t = Topology::from(&cfg);
        assert_eq!(t.size(), 7);
        assert_eq!(t.walls().count(), 0);
    }

    #[test]
    fn adjacency_respects_diagonal_rule() {
        let t = Topology::new(4).unwrap();
        assert!(t.is_adjacent(Cell::new(1, 1), Cell::new(2, 2)));
        assert!(t.is_adjacent(Cell::new(2, 2), Cell::new(1, 1)));
        assert!(!t.is_adjacent(Cell::new(1, 2), Cell::new(2, 1)));
        assert!(!t.is_adjacent(Cell::new(3, 3), Cell::new(4, 4)));
    }
}
