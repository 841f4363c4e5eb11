//! Boundary closure for velocity fields.
//!
//! Under [`BoundaryPolicy::Closed`] no velocity component on the outer
//! ring of the grid may point out of it. Advection then has nothing to
//! lose through the edges.

use flosim_core::{Dims, Flow, VelocityField};

use crate::config::BoundaryPolicy;

/// Zero every outward-pointing component on the grid edge.
///
/// `vel_x.negative` on column 0, `vel_x.positive` on the last column,
/// `vel_y.negative` on row 0 and `vel_y.positive` on the last row.
pub fn close_boundary(vel_x: &mut VelocityField, vel_y: &mut VelocityField) {
    let dims = vel_x.dims();
    if dims.is_empty() {
        return;
    }
    let (w, h) = (dims.width, dims.height);
    for y in 0..h {
        vel_x.negative[(0, y)] = 0.0;
        vel_x.positive[(w - 1, y)] = 0.0;
    }
    let dims = vel_y.dims();
    if dims.is_empty() {
        return;
    }
    let (w, h) = (dims.width, dims.height);
    for x in 0..w {
        vel_y.negative[(x, 0)] = 0.0;
        vel_y.positive[(x, h - 1)] = 0.0;
    }
}

/// Apply `policy` to both fields.
pub fn apply_boundary(policy: BoundaryPolicy, vel_x: &mut VelocityField, vel_y: &mut VelocityField) {
    match policy {
        BoundaryPolicy::Closed => close_boundary(vel_x, vel_y),
        BoundaryPolicy::Open => {}
    }
}

/// The axis a velocity field moves water along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns: `vel_x`.
    X,
    /// Rows: `vel_y`.
    Y,
}

/// Whether a component of `axis`/`flow` written at `(x, y)` points out of
/// a grid with dimensions `dims`.
pub fn crosses_edge(axis: Axis, flow: Flow, x: usize, y: usize, dims: Dims) -> bool {
    match (axis, flow) {
        (Axis::X, Flow::Negative) => x == 0,
        (Axis::X, Flow::Positive) => x + 1 == dims.width,
        (Axis::Y, Flow::Negative) => y == 0,
        (Axis::Y, Flow::Positive) => y + 1 == dims.height,
    }
}
