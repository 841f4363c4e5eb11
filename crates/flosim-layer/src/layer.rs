//! The [`ControlLayer`] trait and its [`Contribution`] output.
//!
//! Layers are stateless during a tick: `tick()` takes `&self` and a shared
//! [`LayerContext`], and reports what it wants changed instead of changing
//! anything itself.

use crate::context::LayerContext;
use crate::error::LayerError;
use flosim_core::{Dims, Flow, Grid, GridError, VelocityField};

/// Per-tick deltas requested by one layer.
///
/// A `None` channel contributes zero everywhere. The basin sums the
/// channels of every layer and applies the totals in one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contribution {
    /// Change in water depth.
    pub water: Option<Grid<f64>>,
    /// Change in bed elevation.
    pub bed: Option<Grid<f64>>,
    /// Change in horizontal velocity components.
    pub vel_x: Option<VelocityField>,
    /// Change in vertical velocity components.
    pub vel_y: Option<VelocityField>,
}

impl Contribution {
    /// A contribution that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// A water-only contribution.
    pub fn water(delta: Grid<f64>) -> Self {
        Self {
            water: Some(delta),
            ..Self::default()
        }
    }

    /// A bed-only contribution.
    pub fn bed(delta: Grid<f64>) -> Self {
        Self {
            bed: Some(delta),
            ..Self::default()
        }
    }

    /// Add a horizontal velocity delta.
    pub fn with_vel_x(mut self, delta: VelocityField) -> Self {
        self.vel_x = Some(delta);
        self
    }

    /// Add a vertical velocity delta.
    pub fn with_vel_y(mut self, delta: VelocityField) -> Self {
        self.vel_y = Some(delta);
        self
    }

    /// Whether every channel is `None`.
    pub fn is_empty(&self) -> bool {
        self.water.is_none() && self.bed.is_none() && self.vel_x.is_none() && self.vel_y.is_none()
    }

    /// Flat index of the first NaN or infinite cell, if any.
    ///
    /// Channels are scanned in the order water, bed, `vel_x`, `vel_y`
    /// (negative before positive).
    pub fn first_non_finite(&self) -> Option<usize> {
        [
            self.water.as_ref(),
            self.bed.as_ref(),
            vel(&self.vel_x, Flow::Negative),
            vel(&self.vel_x, Flow::Positive),
            vel(&self.vel_y, Flow::Negative),
            vel(&self.vel_y, Flow::Positive),
        ]
        .into_iter()
        .flatten()
        .find_map(|g| g.as_slice().iter().position(|v| !v.is_finite()))
    }

    /// Check that every present channel has dimensions `dims`.
    pub fn check_dims(&self, dims: Dims) -> Result<(), GridError> {
        if let Some(g) = &self.water {
            dims.ensure_eq(g.dims())?;
        }
        if let Some(g) = &self.bed {
            dims.ensure_eq(g.dims())?;
        }
        if let Some(v) = &self.vel_x {
            dims.ensure_eq(v.dims())?;
        }
        if let Some(v) = &self.vel_y {
            dims.ensure_eq(v.dims())?;
        }
        Ok(())
    }
}

fn vel(field: &Option<VelocityField>, flow: Flow) -> Option<&Grid<f64>> {
    field.as_ref().map(|v| v.component(flow))
}

/// A pluggable source or sink evaluated once per tick.
///
/// # Contract
///
/// - `tick()` MUST be a pure function of the context and the layer's own
///   configuration: same inputs produce identical outputs.
/// - Every grid in the returned [`Contribution`] MUST have the dimensions
///   reported by [`dims()`](ControlLayer::dims).
/// - Layers never observe each other's output within a tick.
///
/// # Object safety
///
/// This trait is object-safe; custom layers are stored as
/// `Box<dyn ControlLayer>`.
///
/// # Examples
///
/// A layer that raises the bed uniformly:
///
/// ```
/// use flosim_core::{Dims, Grid};
/// use flosim_layer::{Contribution, ControlLayer, LayerContext, LayerError};
///
/// struct Uplift {
///     dims: Dims,
///     rate: f64,
/// }
///
/// impl ControlLayer for Uplift {
///     fn name(&self) -> &str { "uplift" }
///
///     fn dims(&self) -> Dims { self.dims }
///
///     fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
///         let d = self.dims;
///         Ok(Contribution::bed(Grid::filled(d.width, d.height, self.rate * ctx.tau())))
///     }
/// }
///
/// let layer = Uplift { dims: Dims::new(4, 4), rate: 0.1 };
/// assert_eq!(layer.name(), "uplift");
/// ```
pub trait ControlLayer: Send + 'static {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// Dimensions of the layer's configuration grid.
    ///
    /// The basin rejects layers whose dimensions differ from its own.
    fn dims(&self) -> Dims;

    /// Compute this tick's contribution.
    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError>;
}

impl<L: ControlLayer + ?Sized> ControlLayer for Box<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dims(&self) -> Dims {
        (**self).dims()
    }

    fn tick(&self, ctx: &LayerContext<'_>) -> Result<Contribution, LayerError> {
        (**self).tick(ctx)
    }
}
