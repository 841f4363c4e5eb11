//! Read-only view of basin state.

use crate::error::GridError;
use crate::grid::{Dims, Grid};
use crate::velocity::VelocityField;

/// Borrowed, read-only snapshot of a basin's grids.
///
/// Layers evaluate against a `BasinView` during a tick and renderers read
/// one between ticks. Nothing reachable from a view can mutate the basin.
#[derive(Clone, Copy, Debug)]
pub struct BasinView<'a> {
    bed: &'a Grid<f64>,
    water: &'a Grid<f64>,
    vel_x: &'a VelocityField,
    vel_y: &'a VelocityField,
}

impl<'a> BasinView<'a> {
    /// Assemble a view from grids the caller already keeps the same shape.
    ///
    /// Used by the basin, whose grids share dimensions by construction.
    /// Prefer [`checked`](Self::checked) for grids of unknown provenance.
    pub fn new(
        bed: &'a Grid<f64>,
        water: &'a Grid<f64>,
        vel_x: &'a VelocityField,
        vel_y: &'a VelocityField,
    ) -> Self {
        debug_assert_eq!(bed.dims(), water.dims());
        debug_assert_eq!(bed.dims(), vel_x.dims());
        debug_assert_eq!(bed.dims(), vel_y.dims());
        Self {
            bed,
            water,
            vel_x,
            vel_y,
        }
    }

    /// Assemble a view, verifying that every grid matches `bed`.
    ///
    /// Returns `Err(GridError::ShapeMismatch)` on the first grid whose
    /// dimensions differ.
    pub fn checked(
        bed: &'a Grid<f64>,
        water: &'a Grid<f64>,
        vel_x: &'a VelocityField,
        vel_y: &'a VelocityField,
    ) -> Result<Self, GridError> {
        let dims = bed.dims();
        dims.ensure_eq(water.dims())?;
        dims.ensure_eq(vel_x.dims())?;
        dims.ensure_eq(vel_y.dims())?;
        Ok(Self::new(bed, water, vel_x, vel_y))
    }

    /// Shared dimensions of every grid in the view.
    pub fn dims(&self) -> Dims {
        self.bed.dims()
    }

    /// Terrain elevation.
    pub fn bed(&self) -> &'a Grid<f64> {
        self.bed
    }

    /// Water depth.
    pub fn water(&self) -> &'a Grid<f64> {
        self.water
    }

    /// Horizontal velocity components.
    pub fn vel_x(&self) -> &'a VelocityField {
        self.vel_x
    }

    /// Vertical velocity components.
    pub fn vel_y(&self) -> &'a VelocityField {
        self.vel_y
    }
}
