//! Concrete control layers for the flosim basin.
//!
//! | Layer | Capability | Water delta per tick |
//! |-------|------------|----------------------|
//! | [`Rain`] | [`Fills`](flosim_layer::Fills) | `level * tau` |
//! | [`Gutter`] | [`Drains`](flosim_layer::Drains) | `-min(level * tau, water)` |
//! | [`Evaporation`] | [`Drains`](flosim_layer::Drains) | `-min(level * rate * tau, water)` |
//! | [`Reservoir`] | boolean mask | `height * tau` where masked and shallower than `height` |
//! | [`ElevationLayer`] | bed editing | none; bed changes by `level * tau` |
//!
//! The [`Layer`] enum closes the set and adds a `Custom` escape hatch for
//! user-defined [`ControlLayer`](flosim_layer::ControlLayer)s.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod elevation;
pub mod evaporation;
pub mod gutter;
pub mod kind;
pub mod rain;
pub mod reservoir;

pub use elevation::ElevationLayer;
pub use evaporation::Evaporation;
pub use gutter::Gutter;
pub use kind::Layer;
pub use rain::Rain;
pub use reservoir::Reservoir;
