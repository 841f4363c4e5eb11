//! Rainfall: a direct per-cell water source.

use flosim_core::{Dims, Grid};
use flosim_layer::{Contribution, ControlLayer, Fills, LayerContext, LayerError};

/// Adds `level * tau` of water to every cell each tick.
///
/// # Examples
///
/// ```
/// use flosim_layer::Fills;
/// use flosim_layers::Rain;
///
/// let mut rain = Rain::new(5, 5);
/// rain.set_fill(2, 2, 1.0).unwrap();
/// assert_eq!(rain.fill_level().sum(), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Rain {
    level: Grid<f64>,
}

impl Rain {
    /// A rain layer with zero rate everywhere.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            level: Grid::new(width, height),
        }
    }

    /// A rain layer with the same rate everywhere.
    pub fn uniform(width: usize, height: usize, rate: f64) -> Self {
        Self {
            level: Grid::filled(width, height, rate),
        }
    }
}

impl Fills for Rain {
    fn fill_level(&self) -> &Grid<f64> {
        &self.level
    }

    fn fill_level_mut(&mut self) -> &mut Grid<f64> {
        &mut self.level
    }
}

impl ControlLayer for Rain {
    fn name(&self) -> &str {
        "rain"
    }

    fn dims(&self) -> Dims {
        self.level.dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        Ok(Contribution::water(self.level.scaled(ctx.tau())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flosim_core::{BasinView, TickId, VelocityField};

    fn tick_with(layer: &Rain, water: &Grid<f64>, tau: f64) -> Contribution {
        let d = water.dims();
        let bed = Grid::with_dims(d);
        let v = VelocityField::with_dims(d);
        let view = BasinView::checked(&bed, water, &v, &v).unwrap();
        layer.tick(&LayerContext::new(view, tau, TickId(1))).unwrap()
    }

    #[test]
    fn rain_adds_level_times_tau() {
        let mut rain = Rain::new(3, 3);
        rain.set_fill(1, 1, 2.0).unwrap();
        let out = tick_with(&rain, &Grid::new(3, 3), 0.5);
        let dw = out.water.unwrap();
        assert_eq!(dw.get(1, 1).unwrap(), 1.0);
        assert_eq!(dw.sum(), 1.0);
        assert!(out.bed.is_none());
        assert!(out.vel_x.is_none());
        assert!(out.vel_y.is_none());
    }

    #[test]
    fn remove_fill_stops_rain() {
        let mut rain = Rain::uniform(2, 2, 1.0);
        rain.remove_fill(0, 0).unwrap();
        let out = tick_with(&rain, &Grid::new(2, 2), 1.0);
        assert_eq!(out.water.unwrap().as_slice(), &[0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn zero_tau_adds_nothing() {
        let rain = Rain::uniform(2, 2, 5.0);
        let out = tick_with(&rain, &Grid::new(2, 2), 0.0);
        assert_eq!(out.water.unwrap().sum(), 0.0);
    }
}
