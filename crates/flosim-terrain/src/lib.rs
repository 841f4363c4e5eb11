//! Terrain sources for flosim basins.
//!
//! - [`NoiseTerrain`]: deterministic multi-octave value noise, no I/O.
//! - [`GeoElevation`] / [`GeoRoads`]: interfaces for geographic lookups
//!   over a [`BoundingBox`], with [`SampledElevation`] adapting a per-point
//!   lookup function.
//!
//! Every source returns a [`Grid<f64>`](flosim_core::Grid) ready for
//! `Basin::set_bed`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod noise;
pub mod source;

pub use error::TerrainError;
pub use noise::{NoiseTerrain, NoiseTerrainBuilder, DEFAULT_SCALE};
pub use source::{
    BoundingBox, GeoElevation, GeoRoads, SampledElevation, TerrainSource, DEFAULT_STEP_DEG,
};
