//! The basin: owned simulation state and the per-tick pipeline.
//!
//! [`Basin`] owns the bed, water and velocity grids plus an ordered,
//! append-only registry of [`Layer`]s. Each [`tick()`](Basin::tick) runs
//! a strict pipeline:
//!
//! 1. zero the delta accumulators;
//! 2. scale the duration, `tau = dt * eta`;
//! 3. evaluate every layer against a read-only view of the pre-tick state
//!    and sum the contributions;
//! 4. apply the summed deltas to bed, water and velocity;
//! 5. close the boundary (per [`BoundaryPolicy`]);
//! 6. advect;
//! 7. relax.
//!
//! Every layer sees the same pre-tick state, so registration order never
//! changes the outcome. Any failure in steps 1-3 returns before the first
//! write in step 4; the basin is then exactly as it was.
//!
//! # Ownership model
//!
//! `Basin` is [`Send`]: it can be moved to a worker thread. All mutation
//! goes through `&mut self`, and [`view()`](Basin::view) borrows from
//! `self`, so a renderer cannot hold a view across a tick.

use std::fmt;
use std::ops::Range;
use std::time::Instant;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use smallvec::SmallVec;

use flosim_core::{BasinView, Dims, Flow, Grid, GridError, LayerId, TickId, VelocityField};
use flosim_layer::{Contribution, ControlLayer, Drains, Fills, LayerContext, LayerError};
use flosim_layers::{ElevationLayer, Evaporation, Layer, Reservoir};

use crate::advection::advect;
use crate::boundary::{apply_boundary, crosses_edge, Axis};
use crate::config::{BasinConfig, BoundaryPolicy, ConfigError};
use crate::error::{BasinError, TickError};
use crate::hash;
use crate::metrics::TickMetrics;
use crate::relaxation::relax;

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Basin>();
    }
};

// ── TickResult ──────────────────────────────────────────────────

/// Result of a successful [`Basin::tick()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct TickResult {
    /// Id of the tick that just completed.
    pub tick_id: TickId,
    /// Timing and mass balance for this tick.
    pub metrics: TickMetrics,
}

// ── Accumulators ────────────────────────────────────────────────

/// Summed per-tick deltas from every layer.
#[derive(Clone, Debug)]
struct Accumulators {
    water: Grid<f64>,
    bed: Grid<f64>,
    vel_x: VelocityField,
    vel_y: VelocityField,
}

impl Accumulators {
    fn new(dims: Dims) -> Self {
        Self {
            water: Grid::with_dims(dims),
            bed: Grid::with_dims(dims),
            vel_x: VelocityField::with_dims(dims),
            vel_y: VelocityField::with_dims(dims),
        }
    }

    fn clear(&mut self) {
        self.water.fill(0.0);
        self.bed.fill(0.0);
        self.vel_x.fill(0.0);
        self.vel_y.fill(0.0);
    }

    /// Add one contribution. Every channel is shape-checked first, so a
    /// rejected contribution adds nothing.
    fn add(&mut self, c: &Contribution) -> Result<(), GridError> {
        c.check_dims(self.water.dims())?;
        if let Some(g) = &c.water {
            self.water.add_assign(g)?;
        }
        if let Some(g) = &c.bed {
            self.bed.add_assign(g)?;
        }
        if let Some(v) = &c.vel_x {
            self.vel_x.add_assign(v)?;
        }
        if let Some(v) = &c.vel_y {
            self.vel_y.add_assign(v)?;
        }
        Ok(())
    }
}

// ── Basin ───────────────────────────────────────────────────────

/// A rectangular drainage basin and the layers that force it.
///
/// # Example
///
/// ```
/// use flosim_engine::Basin;
/// use flosim_layers::{Gutter, Rain};
///
/// let mut basin = Basin::new(5, 5)?;
/// basin.set_elevation_cells(&[(0, 2), (1, 1), (2, 0)], 1.0)?;
///
/// let rain = basin.add_layer(Rain::new(5, 5))?;
/// basin.fills_mut(rain)?.set_fill(2, 2, 0.5)?;
/// basin.add_layer(Gutter::new(5, 5))?;
///
/// for _ in 0..10 {
///     basin.tick(1.0)?;
/// }
/// assert!(basin.water_at(2, 2)? > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Basin {
    config: BasinConfig,
    bed: Grid<f64>,
    water: Grid<f64>,
    vel_x: VelocityField,
    vel_y: VelocityField,
    layers: IndexMap<LayerId, Layer>,
    next_layer_id: u32,
    acc: Accumulators,
    tick_id: TickId,
    last_metrics: TickMetrics,
}

impl Basin {
    /// A flat, dry `width x height` basin with `eta = 0.5`.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::from_config(BasinConfig::new(width, height))
    }

    /// A flat, dry basin with a custom attenuation factor.
    pub fn with_eta(width: usize, height: usize, eta: f64) -> Result<Self, ConfigError> {
        Self::from_config(BasinConfig {
            eta,
            ..BasinConfig::new(width, height)
        })
    }

    /// Build a basin from a validated [`BasinConfig`].
    pub fn from_config(config: BasinConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dims = config.dims();
        Ok(Self {
            bed: Grid::with_dims(dims),
            water: Grid::with_dims(dims),
            vel_x: VelocityField::with_dims(dims),
            vel_y: VelocityField::with_dims(dims),
            layers: IndexMap::new(),
            next_layer_id: 0,
            acc: Accumulators::new(dims),
            tick_id: TickId::default(),
            last_metrics: TickMetrics::default(),
            config,
        })
    }

    // ── Configuration ───────────────────────────────────────────

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        self.bed.dims()
    }

    /// Attenuation factor.
    pub fn eta(&self) -> f64 {
        self.config.eta
    }

    /// The configuration this basin was built from.
    pub fn config(&self) -> &BasinConfig {
        &self.config
    }

    // ── Direct state setters ────────────────────────────────────

    /// Set the bed elevation at `(x, y)`.
    pub fn set_elevation(&mut self, x: usize, y: usize, value: f64) -> Result<(), BasinError> {
        self.bed.set(x, y, value)?;
        Ok(())
    }

    /// Set the bed elevation at every listed cell.
    ///
    /// All coordinates are checked before any is written.
    pub fn set_elevation_cells(
        &mut self,
        cells: &[(usize, usize)],
        value: f64,
    ) -> Result<(), BasinError> {
        let dims = self.dims();
        let indices = cells
            .iter()
            .map(|&(x, y)| dims.checked_index(x, y))
            .collect::<Result<SmallVec<[usize; 16]>, _>>()?;
        let bed = self.bed.as_mut_slice();
        for i in indices {
            bed[i] = value;
        }
        Ok(())
    }

    /// Replace the whole bed.
    pub fn set_bed(&mut self, bed: Grid<f64>) -> Result<(), BasinError> {
        self.dims().ensure_eq(bed.dims())?;
        self.bed = bed;
        Ok(())
    }

    /// Set the water depth at `(x, y)`. Depths must be finite and `>= 0`.
    pub fn set_water(&mut self, x: usize, y: usize, value: f64) -> Result<(), BasinError> {
        self.dims().checked_index(x, y)?;
        if !(value.is_finite() && value >= 0.0) {
            return Err(BasinError::InvalidDepth { x, y, value });
        }
        self.water.set(x, y, value)?;
        Ok(())
    }

    /// Replace the whole water grid. Every depth must be finite and `>= 0`.
    pub fn set_water_grid(&mut self, water: Grid<f64>) -> Result<(), BasinError> {
        self.dims().ensure_eq(water.dims())?;
        if let Some((x, y, value)) = water
            .cells()
            .find(|&(_, _, v)| !(v.is_finite() && v >= 0.0))
        {
            return Err(BasinError::InvalidDepth { x, y, value });
        }
        self.water = water;
        Ok(())
    }

    /// Set the leftward velocity at `(x, y)`.
    pub fn set_vel_l(&mut self, x: usize, y: usize, value: f64) -> Result<(), BasinError> {
        self.set_velocity(Axis::X, Flow::Negative, x, y, value)
    }

    /// Set the rightward velocity at `(x, y)`.
    pub fn set_vel_r(&mut self, x: usize, y: usize, value: f64) -> Result<(), BasinError> {
        self.set_velocity(Axis::X, Flow::Positive, x, y, value)
    }

    /// Set the upward velocity at `(x, y)`.
    pub fn set_vel_u(&mut self, x: usize, y: usize, value: f64) -> Result<(), BasinError> {
        self.set_velocity(Axis::Y, Flow::Negative, x, y, value)
    }

    /// Set the downward velocity at `(x, y)`.
    pub fn set_vel_d(&mut self, x: usize, y: usize, value: f64) -> Result<(), BasinError> {
        self.set_velocity(Axis::Y, Flow::Positive, x, y, value)
    }

    /// Under a closed boundary an outward component on the edge is stored
    /// as zero.
    fn set_velocity(
        &mut self,
        axis: Axis,
        flow: Flow,
        x: usize,
        y: usize,
        value: f64,
    ) -> Result<(), BasinError> {
        let dims = self.dims();
        dims.checked_index(x, y)?;
        let stored = if self.config.boundary == BoundaryPolicy::Closed
            && crosses_edge(axis, flow, x, y, dims)
        {
            debug!("velocity {axis:?}/{flow:?} at ({x}, {y}) points out of a closed basin; stored as 0");
            0.0
        } else {
            value
        };
        let field = match axis {
            Axis::X => &mut self.vel_x,
            Axis::Y => &mut self.vel_y,
        };
        field.component_mut(flow).set(x, y, stored)?;
        Ok(())
    }

    // ── Layer registry ──────────────────────────────────────────

    /// Register a layer and return its id.
    ///
    /// Layers are evaluated in registration order and are never removed;
    /// reconfigure one through its capability setters instead. Fails with
    /// [`BasinError::ShapeMismatch`] if the layer's grid differs from the
    /// basin's.
    pub fn add_layer(&mut self, layer: impl Into<Layer>) -> Result<LayerId, BasinError> {
        let layer = layer.into();
        let expected = self.dims();
        let found = layer.dims();
        if found != expected {
            return Err(BasinError::ShapeMismatch {
                layer: layer.name().to_string(),
                expected,
                found,
            });
        }
        let id = LayerId(self.next_layer_id);
        self.next_layer_id += 1;
        debug!("registered layer {id} '{}'", layer.name());
        self.layers.insert(id, layer);
        Ok(id)
    }

    /// Register a user-defined layer.
    pub fn add_custom_layer(
        &mut self,
        layer: impl ControlLayer,
    ) -> Result<LayerId, BasinError> {
        self.add_layer(Layer::Custom(Box::new(layer)))
    }

    /// Ids of every registered layer, in evaluation order.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.keys().copied()
    }

    /// Number of registered layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Borrow a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    /// Mutably borrow a layer by id.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    fn entry_mut(&mut self, id: LayerId) -> Result<&mut Layer, BasinError> {
        self.layers
            .get_mut(&id)
            .ok_or(BasinError::UnknownLayer(id))
    }

    /// Fill setters of a layer that has them (e.g. [`Rain`](flosim_layers::Rain)).
    pub fn fills_mut(&mut self, id: LayerId) -> Result<&mut dyn Fills, BasinError> {
        self.entry_mut(id)?
            .as_fills_mut()
            .ok_or(BasinError::MissingCapability {
                id,
                capability: "fills",
            })
    }

    /// Drain setters of a layer that has them (gutters, evaporation).
    pub fn drains_mut(&mut self, id: LayerId) -> Result<&mut dyn Drains, BasinError> {
        self.entry_mut(id)?
            .as_drains_mut()
            .ok_or(BasinError::MissingCapability {
                id,
                capability: "drains",
            })
    }

    /// A registered reservoir.
    pub fn reservoir_mut(&mut self, id: LayerId) -> Result<&mut Reservoir, BasinError> {
        self.entry_mut(id)?
            .as_reservoir_mut()
            .ok_or(BasinError::MissingCapability {
                id,
                capability: "reservoir",
            })
    }

    /// A registered evaporation layer.
    pub fn evaporation_mut(&mut self, id: LayerId) -> Result<&mut Evaporation, BasinError> {
        self.entry_mut(id)?
            .as_evaporation_mut()
            .ok_or(BasinError::MissingCapability {
                id,
                capability: "evaporation",
            })
    }

    /// A registered elevation layer.
    pub fn elevation_mut(&mut self, id: LayerId) -> Result<&mut ElevationLayer, BasinError> {
        self.entry_mut(id)?
            .as_elevation_mut()
            .ok_or(BasinError::MissingCapability {
                id,
                capability: "elevation",
            })
    }

    // ── Tick ────────────────────────────────────────────────────

    /// Advance the simulation by `dt`.
    ///
    /// # Errors
    ///
    /// - [`TickError::InvalidDt`] if `dt` is negative or not finite.
    /// - [`TickError::LayerFailed`] if a layer's `tick()` fails or its
    ///   contribution holds a NaN or infinite cell
    ///   ([`LayerError::NanDetected`]).
    /// - [`TickError::Accumulate`] if a layer returns a wrongly shaped
    ///   contribution.
    ///
    /// In all three cases the basin state and tick id are unchanged.
    pub fn tick(&mut self, dt: f64) -> Result<TickResult, TickError> {
        let tick_start = Instant::now();

        if !(dt.is_finite() && dt >= 0.0) {
            warn!("tick rejected: dt must be finite and non-negative, got {dt}");
            return Err(TickError::InvalidDt { dt });
        }

        let tau = dt * self.config.eta;
        let next_tick = self.tick_id.next();
        let water_before = self.water.sum();

        // 1. Zero accumulators.
        self.acc.clear();

        // 3. Evaluate layers against the pre-tick state.
        let mut layer_us = Vec::with_capacity(self.layers.len());
        {
            let view = BasinView::new(&self.bed, &self.water, &self.vel_x, &self.vel_y);
            let ctx = LayerContext::new(view, tau, next_tick);
            for (&id, layer) in &self.layers {
                let layer_start = Instant::now();
                let contribution = layer.tick(&ctx).map_err(|reason| {
                    warn!("tick {next_tick} rejected: layer {id} '{}' failed: {reason}", layer.name());
                    TickError::LayerFailed {
                        id,
                        name: layer.name().to_string(),
                        reason,
                    }
                })?;
                if let Some(cell_index) = contribution.first_non_finite() {
                    warn!("tick {next_tick} rejected: layer {id} '{}' returned a non-finite value at cell {cell_index}", layer.name());
                    return Err(TickError::LayerFailed {
                        id,
                        name: layer.name().to_string(),
                        reason: LayerError::NanDetected {
                            cell_index: Some(cell_index),
                        },
                    });
                }
                self.acc.add(&contribution).map_err(|source| {
                    warn!("tick {next_tick} rejected: layer {id} '{}' contribution: {source}", layer.name());
                    TickError::Accumulate {
                        id,
                        name: layer.name().to_string(),
                        source,
                    }
                })?;
                let us = layer_start.elapsed().as_micros() as u64;
                trace!("layer {id} '{}' evaluated in {us}us", layer.name());
                layer_us.push((layer.name().to_string(), us));
            }
        }

        // Each drain clamps against the pre-tick depth on its own, so
        // overlapping drains are floored together here.
        for (d, &w) in self
            .acc
            .water
            .as_mut_slice()
            .iter_mut()
            .zip(self.water.as_slice())
        {
            if *d < -w {
                *d = -w;
            }
        }

        // 4. Apply summed deltas.
        self.bed.add_assign(&self.acc.bed)?;
        self.water.add_assign(&self.acc.water)?;
        self.vel_x.add_assign(&self.acc.vel_x)?;
        self.vel_y.add_assign(&self.acc.vel_y)?;

        // 5. Boundary closure.
        apply_boundary(self.config.boundary, &mut self.vel_x, &mut self.vel_y);

        // 6. Advection.
        let advection_start = Instant::now();
        let delta = advect(&self.water, &self.vel_x, &self.vel_y, tau)?;
        self.water.add_assign(&delta)?;
        let advection_us = advection_start.elapsed().as_micros() as u64;

        // 7. Relaxation.
        let relaxation_start = Instant::now();
        self.water = relax(&self.bed, &self.water, tau, self.config.relaxation_passes)?;
        let relaxation_us = relaxation_start.elapsed().as_micros() as u64;

        self.tick_id = next_tick;
        let water_after = self.water.sum();
        if !water_after.is_finite() {
            warn!("tick {next_tick}: total water is {water_after}");
        }

        let total_us = tick_start.elapsed().as_micros() as u64;
        debug!(
            "tick {next_tick}: tau={tau} water {water_before:.6} -> {water_after:.6} in {total_us}us"
        );
        let metrics = TickMetrics {
            total_us,
            layer_us,
            advection_us,
            relaxation_us,
            water_before,
            water_after,
        };
        self.last_metrics = metrics.clone();

        Ok(TickResult {
            tick_id: next_tick,
            metrics,
        })
    }

    /// [`tick`](Self::tick) with `dt = 1.0`.
    pub fn tick_default(&mut self) -> Result<TickResult, TickError> {
        self.tick(1.0)
    }

    // ── Reads ───────────────────────────────────────────────────

    /// Water depth.
    pub fn water(&self) -> &Grid<f64> {
        &self.water
    }

    /// Water depth at `(x, y)`.
    pub fn water_at(&self, x: usize, y: usize) -> Result<f64, BasinError> {
        Ok(self.water.get(x, y)?)
    }

    /// Copy of the water depth over columns `xs` and rows `ys`.
    pub fn water_window(&self, xs: Range<usize>, ys: Range<usize>) -> Result<Grid<f64>, BasinError> {
        Ok(self.water.window(xs, ys)?)
    }

    /// Sum of all water depths.
    pub fn total_water(&self) -> f64 {
        self.water.sum()
    }

    /// Bed elevation.
    pub fn bed(&self) -> &Grid<f64> {
        &self.bed
    }

    /// Horizontal velocity.
    pub fn vel_x(&self) -> &VelocityField {
        &self.vel_x
    }

    /// Vertical velocity.
    pub fn vel_y(&self) -> &VelocityField {
        &self.vel_y
    }

    /// Borrowed read-only view for renderers.
    pub fn view(&self) -> BasinView<'_> {
        BasinView::new(&self.bed, &self.water, &self.vel_x, &self.vel_y)
    }

    /// Id of the last completed tick (0 before the first).
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// Metrics from the most recent successful tick.
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// FNV-1a hash of dimensions, bed, water and velocities.
    pub fn state_hash(&self) -> u64 {
        hash::state_hash(&self.view())
    }
}

impl fmt::Debug for Basin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basin")
            .field("dims", &self.dims())
            .field("eta", &self.config.eta)
            .field("boundary", &self.config.boundary)
            .field("tick_id", &self.tick_id)
            .field("layers", &self.layers.len())
            .finish()
    }
}
