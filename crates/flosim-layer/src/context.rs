//! Execution context passed to layers during a tick.

use flosim_core::{BasinView, Dims, Grid, TickId, VelocityField};

/// Read-only inputs for one layer evaluation.
///
/// Every layer in a tick sees the same context: the basin state as it was
/// at the start of the tick, never another layer's output. `tau` is the
/// effective duration, already scaled by the basin's damping coefficient.
#[derive(Clone, Copy, Debug)]
pub struct LayerContext<'a> {
    view: BasinView<'a>,
    tau: f64,
    tick_id: TickId,
}

impl<'a> LayerContext<'a> {
    /// Construct a context.
    ///
    /// Typically called by the basin. Tests build one directly from a
    /// [`BasinView`] over hand-made grids.
    pub fn new(view: BasinView<'a>, tau: f64, tick_id: TickId) -> Self {
        Self {
            view,
            tau,
            tick_id,
        }
    }

    /// The underlying basin view.
    pub fn view(&self) -> BasinView<'a> {
        self.view
    }

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        self.view.dims()
    }

    /// Terrain elevation at tick start.
    pub fn bed(&self) -> &'a Grid<f64> {
        self.view.bed()
    }

    /// Water depth at tick start.
    pub fn water(&self) -> &'a Grid<f64> {
        self.view.water()
    }

    /// Horizontal velocity at tick start.
    pub fn vel_x(&self) -> &'a VelocityField {
        self.view.vel_x()
    }

    /// Vertical velocity at tick start.
    pub fn vel_y(&self) -> &'a VelocityField {
        self.view.vel_y()
    }

    /// Effective tick duration (`dt * eta`).
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// The tick being computed.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }
}
