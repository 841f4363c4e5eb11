//! Flosim: shallow surface-water flow over a terrain grid.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! flosim sub-crates. For most users, adding `flosim` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use flosim::prelude::*;
//!
//! // A 32x32 basin over seeded noise terrain.
//! let mut basin = Basin::new(32, 32).unwrap();
//! let bed = NoiseTerrain::new(10.0, 42).unwrap().generate(32, 32).unwrap();
//! basin.set_bed(bed).unwrap();
//!
//! // Steady rain everywhere, a gutter along the bottom row.
//! basin.add_layer(Rain::uniform(32, 32, 0.1)).unwrap();
//! let gutter = basin.add_layer(Gutter::new(32, 32)).unwrap();
//! for x in 0..32 {
//!     basin.drains_mut(gutter).unwrap().set_drain(x, 31, 1.0).unwrap();
//! }
//!
//! for _ in 0..10 {
//!     basin.tick(1.0).unwrap();
//! }
//! assert_eq!(basin.tick_id(), TickId(10));
//! assert!(basin.total_water() > 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flosim-core` | Grids, velocity fields, views, IDs |
//! | [`layer`] | `flosim-layer` | Control layer trait, capabilities, context |
//! | [`layers`] | `flosim-layers` | Rain, gutter, evaporation, reservoir, elevation |
//! | [`engine`] | `flosim-engine` | The basin and its tick pipeline |
//! | [`terrain`] | `flosim-terrain` | Noise terrain and geographic lookup traits |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid storage, velocity fields, and IDs (`flosim-core`).
///
/// [`types::BasinView`] is the read-only snapshot renderers consume after
/// each tick.
pub use flosim_core as types;

/// Control layer trait and capabilities (`flosim-layer`).
///
/// The [`layer::ControlLayer`] trait is the main extension point for
/// user-defined sources and sinks.
pub use flosim_layer as layer;

/// Built-in control layers (`flosim-layers`).
pub use flosim_layers as layers;

/// The simulation engine (`flosim-engine`).
///
/// [`engine::Basin`] owns the grids and runs the per-tick update.
pub use flosim_engine as engine;

/// Terrain generation (`flosim-terrain`).
///
/// [`terrain::NoiseTerrain`] for procedural beds, [`terrain::GeoElevation`]
/// and [`terrain::GeoRoads`] for geographic data sources.
pub use flosim_terrain as terrain;

/// Common imports for typical flosim usage.
///
/// ```rust
/// use flosim::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use flosim_core::{BasinView, Dims, Flow, Grid, GridError, LayerId, TickId, VelocityField};

    // Layer trait and capabilities
    pub use flosim_layer::{Contribution, ControlLayer, Drains, Fills, LayerContext, LayerError};

    // Built-in layers
    pub use flosim_layers::{ElevationLayer, Evaporation, Gutter, Layer, Rain, Reservoir};

    // Engine
    pub use flosim_engine::{
        Basin, BasinConfig, BasinError, BoundaryPolicy, TickError, TickMetrics, TickResult,
    };

    // Terrain
    pub use flosim_terrain::{NoiseTerrain, TerrainError, TerrainSource};
}
