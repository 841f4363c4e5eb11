//! Error types for grid storage.

use crate::grid::Dims;
use std::error::Error;
use std::fmt;

/// Errors arising from grid access or grid arithmetic.
///
/// Both variants indicate a programming error in the caller: coordinates
/// and shapes are fixed at construction and never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate is outside `[0, width) x [0, height)`.
    IndexOutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// Two grids that must share dimensions do not.
    ShapeMismatch {
        /// Dimensions of the receiving grid.
        expected: Dims,
        /// Dimensions of the offending grid.
        found: Dims,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "index ({x}, {y}) out of range for grid [0, {width}) x [0, {height})"
            ),
            Self::ShapeMismatch { expected, found } => {
                write!(f, "shape mismatch: expected {expected}, found {found}")
            }
        }
    }
}

impl Error for GridError {}
