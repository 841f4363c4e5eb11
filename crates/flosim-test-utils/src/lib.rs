//! Test utilities and mock layers for flosim development.
//!
//! Provides mock [`ControlLayer`](flosim_layer::ControlLayer)
//! implementations in [`fixtures`] and grid assertion helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstLayer, FailingLayer, MisshapenLayer, NanLayer};

use flosim_core::Grid;

/// A `width x height` grid with every cell set to `value`.
pub fn uniform_grid(width: usize, height: usize, value: f64) -> Grid<f64> {
    Grid::filled(width, height, value)
}

/// Assert that two grids share dimensions and differ by at most `tol`
/// in every cell.
///
/// Panics with the first offending cell's coordinates.
#[track_caller]
pub fn assert_grid_close(actual: &Grid<f64>, expected: &Grid<f64>, tol: f64) {
    assert_eq!(actual.dims(), expected.dims(), "grid dimensions differ");
    for ((x, y, a), (_, _, e)) in actual.cells().zip(expected.cells()) {
        assert!(
            (a - e).abs() <= tol,
            "cell ({x}, {y}): got {a}, expected {e} (tol {tol})"
        );
    }
}

/// Assert that every cell is `>= 0`.
#[track_caller]
pub fn assert_non_negative(grid: &Grid<f64>) {
    for (x, y, v) in grid.cells() {
        assert!(v >= 0.0, "cell ({x}, {y}) is negative: {v}");
    }
}

/// Assert that two grids are bit-for-bit identical.
#[track_caller]
pub fn assert_grid_bits_eq(actual: &Grid<f64>, expected: &Grid<f64>) {
    assert_eq!(actual.dims(), expected.dims(), "grid dimensions differ");
    for ((x, y, a), (_, _, e)) in actual.cells().zip(expected.cells()) {
        assert!(
            a.to_bits() == e.to_bits(),
            "cell ({x}, {y}): bits of {a} differ from {e}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_grids_pass() {
        let a = uniform_grid(2, 2, 1.0);
        let b = uniform_grid(2, 2, 1.0 + 1e-12);
        assert_grid_close(&a, &b, 1e-9);
    }

    #[test]
    #[should_panic(expected = "cell (0, 0)")]
    fn distant_grids_fail() {
        assert_grid_close(&uniform_grid(1, 1, 0.0), &uniform_grid(1, 1, 1.0), 0.5);
    }

    #[test]
    #[should_panic(expected = "negative")]
    fn negative_cell_detected() {
        let mut g = uniform_grid(2, 1, 0.0);
        g.set(1, 0, -1e-6).unwrap();
        assert_non_negative(&g);
    }
}
