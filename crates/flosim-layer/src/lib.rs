//! Control layer trait and per-tick context for flosim.
//!
//! A control layer is a pluggable source or sink evaluated once per tick.
//! Layers receive a read-only [`LayerContext`] and return a
//! [`Contribution`]; the basin sums every contribution before touching its
//! own state, so registration order never changes the result.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capability;
pub mod context;
pub mod error;
pub mod layer;

pub use capability::{clamp_drain, Drains, Fills};
pub use context::LayerContext;
pub use error::LayerError;
pub use layer::{Contribution, ControlLayer};
