//! Dense two-dimensional grid storage.
//!
//! [`Grid`] is the storage primitive for every per-cell quantity in the
//! simulator: bed elevation, water depth, velocity components and layer
//! configuration. Cells are addressed by `(x, y)` where `x` is the column
//! and `y` the row, and stored row-major (`y * width + x`).

use crate::error::GridError;
use std::fmt;
use std::ops::{Index, IndexMut, Range};

/// Width and height of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Dims {
    /// Construct a `Dims` from width and height.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid described by these dimensions has no cells.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `(x, y)` lies inside the grid.
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Flat row-major index of `(x, y)`, or `None` if out of range.
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if self.contains(x, y) {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Flat index of `(x, y)` or an [`GridError::IndexOutOfRange`].
    pub fn checked_index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        self.index(x, y).ok_or(GridError::IndexOutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Inverse of [`index`](Self::index): `(x, y)` of a flat index.
    pub const fn coords(&self, i: usize) -> (usize, usize) {
        (i % self.width, i / self.width)
    }

    /// Fail with [`GridError::ShapeMismatch`] unless `other == self`.
    pub fn ensure_eq(&self, other: Dims) -> Result<(), GridError> {
        if *self == other {
            Ok(())
        } else {
            Err(GridError::ShapeMismatch {
                expected: *self,
                found: other,
            })
        }
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A dense `width x height` array of `T`.
///
/// The shape is fixed at construction. Checked accessors ([`get`](Self::get),
/// [`set`](Self::set)) return [`GridError::IndexOutOfRange`]; the
/// `Index<(x, y)>` impl panics instead and is meant for code that has
/// already established the coordinate is valid.
///
/// # Examples
///
/// ```
/// use flosim_core::Grid;
///
/// let mut g: Grid<f64> = Grid::new(4, 3);
/// g.set(2, 1, 5.0).unwrap();
/// assert_eq!(g.get(2, 1).unwrap(), 5.0);
/// assert_eq!(g[(2, 1)], 5.0);
/// assert!(g.get(4, 0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    dims: Dims,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a grid with every cell set to `T::default()` (zero / false).
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            dims: Dims::new(width, height),
            data: vec![value; width * height],
        }
    }

    /// Create a zero grid with the given dimensions.
    pub fn with_dims(dims: Dims) -> Self {
        Self::new(dims.width, dims.height)
    }

    /// Wrap row-major `data` as a grid.
    ///
    /// Returns `Err(GridError::ShapeMismatch)` if `data.len()` is not
    /// `width * height`; the `found` dimensions report the data length as
    /// a single row.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, GridError> {
        let dims = Dims::new(width, height);
        if data.len() != dims.cell_count() {
            return Err(GridError::ShapeMismatch {
                expected: dims,
                found: Dims::new(data.len(), 1),
            });
        }
        Ok(Self { dims, data })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            dims: Dims::new(width, height),
            data,
        }
    }

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<T, GridError> {
        let i = self.dims.checked_index(x, y)?;
        Ok(self.data[i])
    }

    /// Overwrite the cell at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), GridError> {
        let i = self.dims.checked_index(x, y)?;
        self.data[i] = value;
        Ok(())
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of all cells.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid and return its row-major storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Result<&[T], GridError> {
        let start = self.dims.checked_index(0, y)?;
        Ok(&self.data[start..start + self.dims.width])
    }

    /// Copy the rectangular window `xs x ys` into a new grid.
    ///
    /// Empty ranges yield an empty grid. Ranges reaching past the grid
    /// fail with [`GridError::IndexOutOfRange`] naming the first missing
    /// cell.
    pub fn window(&self, xs: Range<usize>, ys: Range<usize>) -> Result<Grid<T>, GridError> {
        if xs.end > self.dims.width || ys.end > self.dims.height {
            return Err(GridError::IndexOutOfRange {
                x: xs.end.saturating_sub(1).max(xs.start),
                y: ys.end.saturating_sub(1).max(ys.start),
                width: self.dims.width,
                height: self.dims.height,
            });
        }
        if xs.is_empty() || ys.is_empty() {
            return Ok(Grid {
                dims: Dims::new(xs.len(), ys.len()),
                data: Vec::new(),
            });
        }
        let w = xs.len();
        let h = ys.len();
        let mut data = Vec::with_capacity(w * h);
        for y in ys {
            let start = y * self.dims.width;
            data.extend_from_slice(&self.data[start + xs.start..start + xs.end]);
        }
        Ok(Grid {
            dims: Dims::new(w, h),
            data,
        })
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            dims: self.dims,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two same-shaped grids cell by cell.
    pub fn zip_map<U, V>(&self, other: &Grid<U>, f: impl Fn(T, U) -> V) -> Result<Grid<V>, GridError>
    where
        U: Copy + Default,
        V: Copy + Default,
    {
        self.dims.ensure_eq(other.dims)?;
        Ok(Grid {
            dims: self.dims,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let width = self.dims.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % width, i / width, v))
    }
}

impl Grid<f64> {
    /// Element-wise `self += other`.
    ///
    /// Returns `Err(GridError::ShapeMismatch)` and leaves `self` untouched
    /// if the shapes differ.
    pub fn add_assign(&mut self, other: &Grid<f64>) -> Result<(), GridError> {
        self.dims.ensure_eq(other.dims)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// A copy of this grid with every cell multiplied by `k`.
    pub fn scaled(&self, k: f64) -> Grid<f64> {
        self.map(|v| v * k)
    }

    /// Sum of all cells.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Smallest cell value, or `None` for an empty grid.
    pub fn min_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    /// Largest cell value, or `None` for an empty grid.
    pub fn max_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Whether every cell is finite (no NaN or infinity).
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(
            self.dims.contains(x, y),
            "index ({x}, {y}) out of range for grid {}",
            self.dims
        );
        &self.data[y * self.dims.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(
            self.dims.contains(x, y),
            "index ({x}, {y}) out of range for grid {}",
            self.dims
        );
        &mut self.data[y * self.dims.width + x]
    }
}
