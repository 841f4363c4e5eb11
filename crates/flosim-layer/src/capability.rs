//! The Fills and Drains capabilities shared by concrete layers.
//!
//! Both capabilities are thin setter traits over a layer's configuration
//! grid. The behavioural difference lives in [`clamp_drain`]: a draining
//! layer never asks for more water than a cell holds.

use flosim_core::{Grid, GridError};

/// A layer that adds water, configured per cell by a fill rate.
pub trait Fills {
    /// The per-cell fill rate grid.
    fn fill_level(&self) -> &Grid<f64>;

    /// Mutable access to the per-cell fill rate grid.
    fn fill_level_mut(&mut self) -> &mut Grid<f64>;

    /// Set the fill rate at `(x, y)`.
    fn set_fill(&mut self, x: usize, y: usize, value: f64) -> Result<(), GridError> {
        self.fill_level_mut().set(x, y, value)
    }

    /// Reset the fill rate at `(x, y)` to zero.
    fn remove_fill(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.fill_level_mut().set(x, y, 0.0)
    }
}

/// A layer that removes water, configured per cell by a drain rate.
pub trait Drains {
    /// The per-cell drain rate grid.
    fn drain_level(&self) -> &Grid<f64>;

    /// Mutable access to the per-cell drain rate grid.
    fn drain_level_mut(&mut self) -> &mut Grid<f64>;

    /// Set the drain rate at `(x, y)`.
    fn set_drain(&mut self, x: usize, y: usize, value: f64) -> Result<(), GridError> {
        self.drain_level_mut().set(x, y, value)
    }

    /// Reset the drain rate at `(x, y)` to zero.
    fn remove_drain(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.drain_level_mut().set(x, y, 0.0)
    }
}

/// Turn a requested removal into a water delta that cannot overdraw.
///
/// Per cell: `-requested` where `water > requested`, otherwise `-water`.
/// Applied alone, the result never drives water below zero.
///
/// # Examples
///
/// ```
/// use flosim_core::Grid;
/// use flosim_layer::clamp_drain;
///
/// let requested = Grid::from_vec(3, 1, vec![0.5, 2.0, 1.0]).unwrap();
/// let water = Grid::from_vec(3, 1, vec![1.0, 1.5, 1.0]).unwrap();
/// let delta = clamp_drain(&requested, &water).unwrap();
/// assert_eq!(delta.as_slice(), &[-0.5, -1.5, -1.0]);
/// ```
pub fn clamp_drain(requested: &Grid<f64>, water: &Grid<f64>) -> Result<Grid<f64>, GridError> {
    requested.zip_map(water, |r, w| if w > r { -r } else { -w })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Level(Grid<f64>);

    impl Fills for Level {
        fn fill_level(&self) -> &Grid<f64> {
            &self.0
        }

        fn fill_level_mut(&mut self) -> &mut Grid<f64> {
            &mut self.0
        }
    }

    impl Drains for Level {
        fn drain_level(&self) -> &Grid<f64> {
            &self.0
        }

        fn drain_level_mut(&mut self) -> &mut Grid<f64> {
            &mut self.0
        }
    }

    #[test]
    fn fill_setters_write_level() {
        let mut l = Level(Grid::new(3, 3));
        l.set_fill(1, 2, 4.0).unwrap();
        assert_eq!(l.fill_level().get(1, 2).unwrap(), 4.0);
        l.remove_fill(1, 2).unwrap();
        assert_eq!(l.fill_level().sum(), 0.0);
        assert!(l.set_fill(3, 0, 1.0).is_err());
    }

    #[test]
    fn drain_setters_write_level() {
        let mut l = Level(Grid::new(2, 2));
        l.set_drain(0, 1, 0.7).unwrap();
        assert_eq!(l.drain_level().get(0, 1).unwrap(), 0.7);
        l.remove_drain(0, 1).unwrap();
        assert_eq!(l.drain_level().sum(), 0.0);
        assert!(l.remove_drain(0, 2).is_err());
    }

    #[test]
    fn clamp_drain_caps_at_available_water() {
        let requested = Grid::from_vec(2, 1, vec![3.0, 0.0]).unwrap();
        let water = Grid::from_vec(2, 1, vec![1.0, 0.0]).unwrap();
        let d = clamp_drain(&requested, &water).unwrap();
        assert_eq!(d.as_slice(), &[-1.0, 0.0]);
    }

    #[test]
    fn clamp_drain_rejects_shape_mismatch() {
        let requested: Grid<f64> = Grid::new(2, 2);
        let water: Grid<f64> = Grid::new(2, 1);
        assert!(clamp_drain(&requested, &water).is_err());
    }

    proptest! {
        #[test]
        fn clamped_drain_never_overdraws(
            w in proptest::collection::vec(0.0f64..10.0, 9),
            r in proptest::collection::vec(0.0f64..10.0, 9),
        ) {
            let water = Grid::from_vec(3, 3, w).unwrap();
            let requested = Grid::from_vec(3, 3, r).unwrap();
            let mut after = water.clone();
            after.add_assign(&clamp_drain(&requested, &water).unwrap()).unwrap();
            prop_assert!(after.as_slice().iter().all(|&v| v >= 0.0));
        }
    }
}
