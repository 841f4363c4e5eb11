//! Directional velocity components along one axis.

use crate::error::GridError;
use crate::grid::{Dims, Grid};

/// Which half of a [`VelocityField`] a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Flow leaving toward the lower index (left on X, up on Y).
    Negative,
    /// Flow leaving toward the higher index (right on X, down on Y).
    Positive,
}

/// A pair of non-directional rate grids for one spatial axis.
///
/// Each cell carries an independent outflow rate toward each side. A value
/// of `1.0` with `tau = 1.0` moves the cell's entire stock in that
/// direction during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityField {
    /// Outflow rate toward the lower-index neighbour.
    pub negative: Grid<f64>,
    /// Outflow rate toward the higher-index neighbour.
    pub positive: Grid<f64>,
}

impl VelocityField {
    /// Zero velocity field of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            negative: Grid::new(width, height),
            positive: Grid::new(width, height),
        }
    }

    /// Zero velocity field with the given dimensions.
    pub fn with_dims(dims: Dims) -> Self {
        Self::new(dims.width, dims.height)
    }

    /// Dimensions shared by both component grids.
    pub fn dims(&self) -> Dims {
        self.negative.dims()
    }

    /// Borrow one component.
    pub fn component(&self, flow: Flow) -> &Grid<f64> {
        match flow {
            Flow::Negative => &self.negative,
            Flow::Positive => &self.positive,
        }
    }

    /// Mutably borrow one component.
    pub fn component_mut(&mut self, flow: Flow) -> &mut Grid<f64> {
        match flow {
            Flow::Negative => &mut self.negative,
            Flow::Positive => &mut self.positive,
        }
    }

    /// Element-wise `self += other` on both components.
    ///
    /// Shapes are checked before either component is touched.
    pub fn add_assign(&mut self, other: &VelocityField) -> Result<(), GridError> {
        self.dims().ensure_eq(other.dims())?;
        self.negative.add_assign(&other.negative)?;
        self.positive.add_assign(&other.positive)
    }

    /// Set both components to `value` everywhere.
    pub fn fill(&mut self, value: f64) {
        self.negative.fill(value);
        self.positive.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_independent() {
        let mut v = VelocityField::new(3, 3);
        v.component_mut(Flow::Positive).set(1, 1, 2.0).unwrap();
        assert_eq!(v.positive.get(1, 1).unwrap(), 2.0);
        assert_eq!(v.negative.get(1, 1).unwrap(), 0.0);
        assert_eq!(v.component(Flow::Positive).sum(), 2.0);
    }

    #[test]
    fn add_assign_checks_shape_first() {
        let mut a = VelocityField::new(2, 2);
        let b = VelocityField::new(3, 2);
        assert!(a.add_assign(&b).is_err());

        let mut c = VelocityField::new(2, 2);
        c.fill(1.0);
        a.add_assign(&c).unwrap();
        a.add_assign(&c).unwrap();
        assert_eq!(a.negative.sum(), 8.0);
        assert_eq!(a.positive.sum(), 8.0);
    }
}
