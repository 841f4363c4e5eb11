//! Core types for the flosim surface-water simulator.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! storage primitives shared by every other crate in the workspace:
//! dense [`Grid`]s, directional [`VelocityField`]s, the read-only
//! [`BasinView`] handed to layers and renderers, identifiers, and the
//! [`GridError`] type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;
pub mod neighbours;
pub mod velocity;
pub mod view;

pub use error::GridError;
pub use grid::{Dims, Grid};
pub use id::{LayerId, TickId};
pub use neighbours::{neighbour_flat, Direction};
pub use velocity::{Flow, VelocityField};
pub use view::BasinView;
