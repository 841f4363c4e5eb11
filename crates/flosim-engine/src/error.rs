//! Errors returned by basin operations and by [`Basin::tick`](crate::Basin::tick).

use std::error::Error;
use std::fmt;

use flosim_core::{Dims, GridError, LayerId};
use flosim_layer::LayerError;

// ── BasinError ─────────────────────────────────────────────────────

/// Errors from basin setters, layer registration, and layer lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum BasinError {
    /// A coordinate or grid shape was rejected.
    Grid(GridError),
    /// A layer's grid does not match the basin it is being added to.
    ShapeMismatch {
        /// Name of the rejected layer.
        layer: String,
        /// Basin dimensions.
        expected: Dims,
        /// Layer dimensions.
        found: Dims,
    },
    /// No layer is registered under this id.
    UnknownLayer(LayerId),
    /// The layer exists but lacks the requested capability.
    MissingCapability {
        /// The layer that was asked.
        id: LayerId,
        /// The capability that was requested (`"fills"`, `"drains"`, ...).
        capability: &'static str,
    },
    /// A water depth below zero (or not a number) was written.
    InvalidDepth {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// The rejected depth.
        value: f64,
    },
}

impl fmt::Display for BasinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::ShapeMismatch {
                layer,
                expected,
                found,
            } => write!(
                f,
                "layer '{layer}' is {found} but the basin is {expected}"
            ),
            Self::UnknownLayer(id) => write!(f, "no layer with id {id}"),
            Self::MissingCapability { id, capability } => {
                write!(f, "layer {id} does not support {capability}")
            }
            Self::InvalidDepth { x, y, value } => {
                write!(f, "invalid water depth {value} at ({x}, {y})")
            }
        }
    }
}

impl Error for BasinError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for BasinError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── TickError ──────────────────────────────────────────────────────

/// Error returned from [`Basin::tick`](crate::Basin::tick).
///
/// `InvalidDt`, `LayerFailed` and `Accumulate` are raised before any
/// basin state is written, so the basin is exactly as it was before the
/// call.
#[derive(Clone, Debug, PartialEq)]
pub enum TickError {
    /// `dt` was negative or not finite.
    InvalidDt {
        /// The rejected duration.
        dt: f64,
    },
    /// A layer's `tick()` returned an error, or its contribution held a
    /// non-finite cell.
    LayerFailed {
        /// Id of the failing layer.
        id: LayerId,
        /// Name of the failing layer.
        name: String,
        /// What the layer reported.
        reason: LayerError,
    },
    /// A layer returned a contribution of the wrong shape.
    Accumulate {
        /// Id of the offending layer.
        id: LayerId,
        /// Name of the offending layer.
        name: String,
        /// The shape error.
        source: GridError,
    },
    /// Grid arithmetic failed while applying the summed contributions.
    Grid(GridError),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { dt } => {
                write!(f, "dt must be finite and non-negative, got {dt}")
            }
            Self::LayerFailed { id, name, reason } => {
                write!(f, "layer '{name}' ({id}) failed: {reason}")
            }
            Self::Accumulate { id, name, source } => {
                write!(f, "layer '{name}' ({id}) contribution rejected: {source}")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for TickError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::LayerFailed { reason, .. } => Some(reason),
            Self::Accumulate { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            Self::InvalidDt { .. } => None,
        }
    }
}

impl From<GridError> for TickError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
