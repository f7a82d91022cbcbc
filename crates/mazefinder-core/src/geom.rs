//! Geometry primitives: [`Pos`], [`Dir`] and [`Region`].
//!
//! Rows grow downwards and columns grow rightwards, matching the on-screen
//! layout of the sandbox.

use std::fmt;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A `(row, col)` grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// Create a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position one step in `dir`, or `None` if that would leave a
    /// `size × size` grid.
    #[inline]
    pub fn step(self, dir: Dir, size: usize) -> Option<Pos> {
        match dir {
            Dir::North => self.row.checked_sub(1).map(|row| Pos::new(row, self.col)),
            Dir::South => (self.row + 1 < size).then(|| Pos::new(self.row + 1, self.col)),
            Dir::East => (self.col + 1 < size).then(|| Pos::new(self.row, self.col + 1)),
            Dir::West => self.col.checked_sub(1).map(|col| Pos::new(self.row, col)),
        }
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Pos) -> bool {
        manhattan(self, other) == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> u32 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as u32
}

// ---------------------------------------------------------------------------
// Dir
// ---------------------------------------------------------------------------

/// One of the four orthogonal directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dir {
    North,
    South,
    East,
    West,
}

impl Dir {
    /// All directions, in neighbor-slot order.
    pub const ALL: [Dir; 4] = [Dir::North, Dir::South, Dir::East, Dir::West];

    /// The order in which searches examine neighbors.
    pub const SEARCH_ORDER: [Dir; 4] = [Dir::West, Dir::South, Dir::East, Dir::North];

    /// Slot index into a cell's neighbor array.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            Dir::North => 0,
            Dir::South => 1,
            Dir::East => 2,
            Dir::West => 3,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::South => Dir::North,
            Dir::East => Dir::West,
            Dir::West => Dir::East,
        }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// An inclusive rectangle `[top_left, bottom_right]`.
///
/// Unlike a half-open range, a region always holds at least one cell; use
/// [`Region::new`] to get `None` for inverted corners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub top_left: Pos,
    pub bottom_right: Pos,
}

impl Region {
    /// Build a region, or `None` if `bottom_right` lies above or left of
    /// `top_left`.
    #[inline]
    pub fn new(top_left: Pos, bottom_right: Pos) -> Option<Self> {
        (top_left.row <= bottom_right.row && top_left.col <= bottom_right.col).then_some(Self {
            top_left,
            bottom_right,
        })
    }

    /// The whole `size × size` grid.
    #[inline]
    pub fn square(size: usize) -> Self {
        Self {
            top_left: Pos::new(0, 0),
            bottom_right: Pos::new(size.saturating_sub(1), size.saturating_sub(1)),
        }
    }

    #[inline]
    pub fn width(self) -> usize {
        self.bottom_right.col - self.top_left.col + 1
    }

    #[inline]
    pub fn height(self) -> usize {
        self.bottom_right.row - self.top_left.row + 1
    }

    /// Number of cells in the region.
    #[inline]
    pub fn area(self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.row >= self.top_left.row
            && p.row <= self.bottom_right.row
            && p.col >= self.top_left.col
            && p.col <= self.bottom_right.col
    }

    /// Row-major iterator over every position in the region.
    pub fn iter(self) -> impl Iterator<Item = Pos> {
        let (c0, c1) = (self.top_left.col, self.bottom_right.col);
        (self.top_left.row..=self.bottom_right.row)
            .flat_map(move |row| (c0..=c1).map(move |col| Pos::new(row, col)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.top_left, self.bottom_right)
    }
}
