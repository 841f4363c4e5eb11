//! Reservoirs: masked cells held toward a minimum depth.

use flosim_core::{Dims, Grid, GridError};
use flosim_layer::{Contribution, ControlLayer, LayerContext, LayerError};

/// Refills masked cells while they are shallower than a target depth.
///
/// Each tick, every masked cell with `water < height` receives
/// `height * tau`; all other cells receive nothing. The target can be
/// overshot within a single tick, after which the cell stops receiving
/// until it drops below the target again.
///
/// A reservoir is configured by a boolean mask rather than a fill rate, so
/// it does not implement [`Fills`](flosim_layer::Fills). Its fill setters
/// are [`set_mask`](Self::set_mask) and [`remove_mask`](Self::remove_mask);
/// through a basin, reach them with `reservoir_mut` rather than
/// `fills_mut`.
#[derive(Clone, Debug, PartialEq)]
pub struct Reservoir {
    mask: Grid<bool>,
    height: f64,
}

impl Reservoir {
    /// A reservoir layer with an empty mask and the given target depth.
    pub fn new(width: usize, height: usize, target: f64) -> Self {
        Self {
            mask: Grid::new(width, height),
            height: target,
        }
    }

    /// Target depth.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Change the target depth.
    pub fn set_height(&mut self, target: f64) {
        self.height = target;
    }

    /// The cell mask.
    pub fn mask(&self) -> &Grid<bool> {
        &self.mask
    }

    /// Include (`true`) or exclude (`false`) `(x, y)` from the reservoir.
    pub fn set_mask(&mut self, x: usize, y: usize, masked: bool) -> Result<(), GridError> {
        self.mask.set(x, y, masked)
    }

    /// Exclude `(x, y)` from the reservoir.
    pub fn remove_mask(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.mask.set(x, y, false)
    }
}

impl ControlLayer for Reservoir {
    fn name(&self) -> &str {
        "reservoir"
    }

    fn dims(&self) -> Dims {
        self.mask.dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        let inflow = self.height * ctx.tau();
        let target = self.height;
        let delta = self.mask.zip_map(ctx.water(), |masked, w| {
            if masked && w < target {
                inflow
            } else {
                0.0
            }
        })?;
        Ok(Contribution::water(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flosim_core::{BasinView, TickId, VelocityField};

    fn tick_with(layer: &Reservoir, water: &Grid<f64>, tau: f64) -> Grid<f64> {
        let d = water.dims();
        let bed = Grid::with_dims(d);
        let v = VelocityField::with_dims(d);
        let view = BasinView::checked(&bed, water, &v, &v).unwrap();
        layer
            .tick(&LayerContext::new(view, tau, TickId(1)))
            .unwrap()
            .water
            .unwrap()
    }

    #[test]
    fn fills_only_masked_shallow_cells() {
        let mut r = Reservoir::new(3, 1, 2.0);
        r.set_mask(0, 0, true).unwrap();
        r.set_mask(1, 0, true).unwrap();
        let water = Grid::from_vec(3, 1, vec![0.5, 2.0, 0.0]).unwrap();
        let dw = tick_with(&r, &water, 0.5);
        assert_eq!(dw.as_slice(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn mask_uses_column_row_order() {
        let mut r = Reservoir::new(4, 2, 1.0);
        r.set_mask(3, 1, true).unwrap();
        assert!(r.mask().get(3, 1).unwrap());
        assert!(r.set_mask(1, 3, true).is_err());
    }

    #[test]
    fn remove_mask_stops_inflow() {
        let mut r = Reservoir::new(1, 1, 1.0);
        r.set_mask(0, 0, true).unwrap();
        r.remove_mask(0, 0).unwrap();
        let dw = tick_with(&r, &Grid::new(1, 1), 1.0);
        assert_eq!(dw.as_slice(), &[0.0]);
    }

    #[test]
    fn set_height_moves_target() {
        let mut r = Reservoir::new(1, 1, 1.0);
        r.set_mask(0, 0, true).unwrap();
        let water = Grid::filled(1, 1, 1.5);
        assert_eq!(tick_with(&r, &water, 1.0).as_slice(), &[0.0]);
        r.set_height(3.0);
        assert_eq!(r.height(), 3.0);
        assert_eq!(tick_with(&r, &water, 1.0).as_slice(), &[3.0]);
    }
}
