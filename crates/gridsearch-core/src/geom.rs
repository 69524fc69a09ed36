//! Geometry primitives: [`Cell`] and [`Direction`].
//!
//! Coordinates are `(row, col)` with rows growing downwards, so "up" is
//! `row - 1` and "right" is `col + 1`.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate.
///
/// Ordering is lexicographic on `(row, col)`. Uniform-cost search relies on
/// it to break ties between frontier entries of equal cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the cell shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The cell one step away in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset();
        self.shift(dr, dc)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add<Direction> for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Direction) -> Self {
        self.step(rhs)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the six moves allowed on the search grid.
///
/// Only the main diagonal is connected: down-right and up-left are moves,
/// up-right and down-left are not.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    DownRight,
    Left,
    UpLeft,
}

impl Direction {
    /// Every direction, in neighbor expansion order.
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::DownRight,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// `(drow, dcol)` offset of this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
            Self::Left => (0, -1),
            Self::UpLeft => (-1, -1),
        }
    }

    /// The direction that undoes this one.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::DownRight => Self::UpLeft,
            Self::Left => Self::Right,
            Self::UpLeft => Self::DownRight,
        }
    }

    /// The direction leading from `from` to the adjacent `to`, if any.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        let delta = (to.row - from.row, to.col - from.col);
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }
}
