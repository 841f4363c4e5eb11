//! Evaporation: a uniform, rate-scaled drain.

use flosim_core::{Dims, Grid};
use flosim_layer::{clamp_drain, Contribution, ControlLayer, Drains, LayerContext, LayerError};

/// Per-cell base loss every new evaporation layer starts with.
pub const DEFAULT_EVAPORATION_LEVEL: f64 = 0.01;

/// Removes up to `level * rate * tau` of water per cell each tick.
///
/// `level` starts at [`DEFAULT_EVAPORATION_LEVEL`] everywhere; `rate`
/// scales the whole layer. Per-cell levels can still be adjusted through
/// the [`Drains`] setters (e.g. to shade a cell).
#[derive(Clone, Debug, PartialEq)]
pub struct Evaporation {
    level: Grid<f64>,
    rate: f64,
}

impl Evaporation {
    /// An evaporation layer with the default base level and the given rate.
    pub fn new(width: usize, height: usize, rate: f64) -> Self {
        Self {
            level: Grid::filled(width, height, DEFAULT_EVAPORATION_LEVEL),
            rate,
        }
    }

    /// Global rate multiplier.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Change the global rate multiplier.
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

impl Drains for Evaporation {
    fn drain_level(&self) -> &Grid<f64> {
        &self.level
    }

    fn drain_level_mut(&mut self) -> &mut Grid<f64> {
        &mut self.level
    }
}

impl ControlLayer for Evaporation {
    fn name(&self) -> &str {
        "evaporation"
    }

    fn dims(&self) -> Dims {
        self.level.dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        let requested = self.level.scaled(self.rate * ctx.tau());
        Ok(Contribution::water(clamp_drain(&requested, ctx.water())?))
    }
}
