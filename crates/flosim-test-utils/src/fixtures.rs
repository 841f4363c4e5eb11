//! Reusable layer test fixtures.
//!
//! - [`ConstLayer`]: contributes the same delta every tick, independent of `tau`.
//! - [`FailingLayer`]: fails deterministically after N calls.
//! - [`NanLayer`]: contributes a NaN water delta at one cell.
//! - [`MisshapenLayer`]: reports the basin's dimensions but returns a
//!   contribution of a different shape.

use flosim_core::{Dims, Grid, VelocityField};
use flosim_layer::{Contribution, ControlLayer, LayerContext, LayerError};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Adds a fixed contribution on every tick.
///
/// Useful for checking that contributions reach the right channel and
/// are summed across layers.
pub struct ConstLayer {
    pub name: String,
    pub dims: Dims,
    pub contribution: Contribution,
}

impl ConstLayer {
    /// Adds `value` to every cell's water each tick.
    pub fn water(name: impl Into<String>, width: usize, height: usize, value: f64) -> Self {
        Self {
            name: name.into(),
            dims: Dims::new(width, height),
            contribution: Contribution::water(Grid::filled(width, height, value)),
        }
    }

    /// Adds `value` to every cell's bed each tick.
    pub fn bed(name: impl Into<String>, width: usize, height: usize, value: f64) -> Self {
        Self {
            name: name.into(),
            dims: Dims::new(width, height),
            contribution: Contribution::bed(Grid::filled(width, height, value)),
        }
    }

    /// Adds `value` to every component of both velocity fields each tick.
    pub fn velocity(name: impl Into<String>, width: usize, height: usize, value: f64) -> Self {
        let mut v = VelocityField::new(width, height);
        v.fill(value);
        Self {
            name: name.into(),
            dims: Dims::new(width, height),
            contribution: Contribution::none().with_vel_x(v.clone()).with_vel_y(v),
        }
    }
}

impl ControlLayer for ConstLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn dims(&self) -> Dims {
        self.dims
    }

    fn tick(&self, _ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        Ok(self.contribution.clone())
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// On success it adds `1.0` to every cell's water so that a test can tell
/// whether a contribution leaked into the basin. Uses `AtomicUsize` for
/// the call counter so it satisfies `Send`.
pub struct FailingLayer {
    pub name: String,
    pub dims: Dims,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingLayer {
    /// Create a layer that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, width: usize, height: usize, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            dims: Dims::new(width, height),
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `tick()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
    }
}

impl ControlLayer for FailingLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn dims(&self) -> Dims {
        self.dims
    }

    fn tick(&self, _ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(LayerError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(Contribution::water(Grid::filled(
            self.dims.width,
            self.dims.height,
            1.0,
        )))
    }
}

/// Claims `dims` but contributes a water grid one column wider.
pub struct MisshapenLayer {
    pub dims: Dims,
}

impl MisshapenLayer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            dims: Dims::new(width, height),
        }
    }
}

impl ControlLayer for MisshapenLayer {
    fn name(&self) -> &str {
        "misshapen"
    }

    fn dims(&self) -> Dims {
        self.dims
    }

    fn tick(&self, _ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        Ok(Contribution::water(Grid::filled(
            self.dims.width + 1,
            self.dims.height,
            1.0,
        )))
    }
}

/// Contributes zero water everywhere except a NaN at one cell.
pub struct NanLayer {
    pub dims: Dims,
    pub x: usize,
    pub y: usize,
}

impl NanLayer {
    pub fn new(width: usize, height: usize, x: usize, y: usize) -> Self {
        Self {
            dims: Dims::new(width, height),
            x,
            y,
        }
    }
}

impl ControlLayer for NanLayer {
    fn name(&self) -> &str {
        "nan"
    }

    fn dims(&self) -> Dims {
        self.dims
    }

    fn tick(&self, _ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        let mut delta = Grid::with_dims(self.dims);
        delta.set(self.x, self.y, f64::NAN)?;
        Ok(Contribution::water(delta))
    }
}
