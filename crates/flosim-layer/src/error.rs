//! Errors returned by layer evaluation.

use flosim_core::GridError;
use std::error::Error;
use std::fmt;

/// Errors from a single layer's `tick()`.
///
/// Wrapped in `TickError::LayerFailed` by the basin, which guarantees the
/// basin state is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerError {
    /// The layer could not compute its contribution.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The layer produced a non-finite value.
    NanDetected {
        /// Flat index of the first offending cell, if known.
        cell_index: Option<usize>,
    },
    /// Grid arithmetic inside the layer failed.
    Grid(GridError),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::NanDetected { cell_index } => {
                write!(f, "non-finite value in layer output")?;
                if let Some(idx) = cell_index {
                    write!(f, " at cell {idx}")?;
                }
                Ok(())
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for LayerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for LayerError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
