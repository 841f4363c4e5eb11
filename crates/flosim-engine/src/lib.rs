//! Basin state and the per-tick pipeline for flosim.
//!
//! Provides the [`Basin`] that owns terrain, water and velocity grids,
//! evaluates registered layers, and runs upwind advection followed by
//! implicit relaxation every tick. The numeric kernels live in their own
//! modules and can be used without a basin.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advection;
pub mod basin;
pub mod boundary;
pub mod config;
pub mod error;
pub mod hash;
pub mod metrics;
pub mod relaxation;

pub use advection::advect;
pub use basin::{Basin, TickResult};
pub use boundary::{apply_boundary, close_boundary, Axis};
pub use config::{BasinConfig, BoundaryPolicy, ConfigError, DEFAULT_ETA, DEFAULT_RELAXATION_PASSES};
pub use error::{BasinError, TickError};
pub use hash::state_hash;
pub use metrics::TickMetrics;
pub use relaxation::relax;
