//! Gutters: capacity-limited per-cell drains.

use flosim_core::{Dims, Grid};
use flosim_layer::{clamp_drain, Contribution, ControlLayer, Drains, LayerContext, LayerError};

/// Removes up to `level * tau` of water from every cell each tick.
///
/// A gutter never takes more than the cell holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Gutter {
    level: Grid<f64>,
}

impl Gutter {
    /// A gutter layer with zero capacity everywhere.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            level: Grid::new(width, height),
        }
    }
}

impl Drains for Gutter {
    fn drain_level(&self) -> &Grid<f64> {
        &self.level
    }

    fn drain_level_mut(&mut self) -> &mut Grid<f64> {
        &mut self.level
    }
}

impl ControlLayer for Gutter {
    fn name(&self) -> &str {
        "gutter"
    }

    fn dims(&self) -> Dims {
        self.level.dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        let requested = self.level.scaled(ctx.tau());
        Ok(Contribution::water(clamp_drain(&requested, ctx.water())?))
    }
}
