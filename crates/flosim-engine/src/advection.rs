//! Upwind advection of water by the directional velocity fields.
//!
//! Every cell sends `water * v_dir * tau` toward each of its four sides.
//! A neighbour that exists receives that amount; flux sent past an edge is
//! lost. The kernel is pull-based: each output cell reads its own outflow
//! and its neighbours' inflow toward it, so the result depends only on the
//! input grids and never on iteration order.
//!
//! The outflow is not clamped. With `(v_l + v_r + v_u + v_d) * tau > 1`
//! a cell can be driven negative.

use flosim_core::{neighbour_flat, Direction, Flow, Grid, GridError, VelocityField};

/// The velocity component that carries water out of a cell toward `dir`.
fn outward<'a>(dir: Direction, vel_x: &'a VelocityField, vel_y: &'a VelocityField) -> &'a [f64] {
    match dir {
        Direction::Left => vel_x.component(Flow::Negative).as_slice(),
        Direction::Right => vel_x.component(Flow::Positive).as_slice(),
        Direction::Up => vel_y.component(Flow::Negative).as_slice(),
        Direction::Down => vel_y.component(Flow::Positive).as_slice(),
    }
}

/// Net change in water depth caused by advection over `tau`.
///
/// Returns a delta grid to be added to `water`. All four inputs must share
/// dimensions.
pub fn advect(
    water: &Grid<f64>,
    vel_x: &VelocityField,
    vel_y: &VelocityField,
    tau: f64,
) -> Result<Grid<f64>, GridError> {
    let dims = water.dims();
    dims.ensure_eq(vel_x.dims())?;
    dims.ensure_eq(vel_y.dims())?;

    let w = water.as_slice();
    let mut delta = Grid::with_dims(dims);
    let out = delta.as_mut_slice();

    for (i, cell) in out.iter_mut().enumerate() {
        let (x, y) = dims.coords(i);
        let mut inflow = 0.0;
        let mut outflow = 0.0;
        for dir in Direction::ALL {
            outflow += w[i] * outward(dir, vel_x, vel_y)[i] * tau;
            // The neighbour in `dir` sends toward us along the opposite side.
            if let Some(j) = neighbour_flat(x, y, dims, dir) {
                inflow += w[j] * outward(dir.opposite(), vel_x, vel_y)[j] * tau;
            }
        }
        *cell = inflow - outflow;
    }
    Ok(delta)
}
