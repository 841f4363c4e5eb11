//! Bed editing: per-cell uplift or subsidence.

use flosim_core::{Dims, Grid, GridError};
use flosim_layer::{Contribution, ControlLayer, LayerContext, LayerError};

/// Changes bed elevation by `level * tau` per tick.
///
/// Positive levels raise the terrain, negative levels lower it. The layer
/// never touches water or velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationLayer {
    level: Grid<f64>,
}

impl ElevationLayer {
    /// An elevation layer with zero rate everywhere.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            level: Grid::new(width, height),
        }
    }

    /// An elevation layer whose per-cell rates are taken from `level`.
    pub fn from_grid(level: Grid<f64>) -> Self {
        Self { level }
    }

    /// Per-cell rate grid.
    pub fn level(&self) -> &Grid<f64> {
        &self.level
    }

    /// Set the rate at `(x, y)`.
    pub fn set_rate(&mut self, x: usize, y: usize, rate: f64) -> Result<(), GridError> {
        self.level.set(x, y, rate)
    }

    /// Reset the rate at `(x, y)` to zero.
    pub fn remove_rate(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.level.set(x, y, 0.0)
    }
}

impl ControlLayer for ElevationLayer {
    fn name(&self) -> &str {
        "elevation"
    }

    fn dims(&self) -> Dims {
        self.level.dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        Ok(Contribution::bed(self.level.scaled(ctx.tau())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flosim_core::{BasinView, TickId, VelocityField};

    #[test]
    fn contributes_to_bed_only() {
        let mut e = ElevationLayer::new(2, 2);
        e.set_rate(0, 1, -2.0).unwrap();
        let bed: Grid<f64> = Grid::new(2, 2);
        let water: Grid<f64> = Grid::new(2, 2);
        let v = VelocityField::new(2, 2);
        let view = BasinView::checked(&bed, &water, &v, &v).unwrap();
        let out = e.tick(&LayerContext::new(view, 0.25, TickId(1))).unwrap();
        assert!(out.water.is_none());
        assert_eq!(out.bed.unwrap().get(0, 1).unwrap(), -0.5);
    }

    #[test]
    fn from_grid_keeps_rates() {
        let g = Grid::from_fn(3, 3, |x, y| (x + y) as f64);
        let mut e = ElevationLayer::from_grid(g.clone());
        assert_eq!(e.level(), &g);
        e.remove_rate(2, 2).unwrap();
        assert_eq!(e.level().get(2, 2).unwrap(), 0.0);
        assert_eq!(e.dims(), Dims::new(3, 3));
    }
}
