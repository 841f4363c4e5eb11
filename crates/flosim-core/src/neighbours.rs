//! 4-connected neighbour lookup on a bounded grid.
//!
//! Edges are closed: a neighbour that would fall outside the grid does not
//! exist. Shared by the advection and relaxation kernels.

use crate::grid::Dims;

/// One of the four orthogonal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward `x - 1`.
    Left,
    /// Toward `x + 1`.
    Right,
    /// Toward `y - 1`.
    Up,
    /// Toward `y + 1`.
    Down,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The direction pointing back.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// `(dx, dy)` offset of one step in this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

/// Flat index of the neighbour of `(x, y)` in direction `dir`, or `None`
/// if that neighbour lies outside the grid.
#[inline]
pub fn neighbour_flat(x: usize, y: usize, dims: Dims, dir: Direction) -> Option<usize> {
    let (dx, dy) = dir.offset();
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    dims.index(nx, ny)
}
