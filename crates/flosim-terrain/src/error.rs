//! Errors returned by terrain sources.

use flosim_core::GridError;
use std::error::Error;
use std::fmt;

/// Errors from terrain generation or lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum TerrainError {
    /// Requested a grid with zero cells.
    EmptyGrid,
    /// A generator parameter is out of range.
    InvalidParameter {
        /// Which parameter and why.
        reason: String,
    },
    /// A geographic bounding box is degenerate or not finite.
    InvalidBoundingBox {
        /// What is wrong with it.
        reason: String,
    },
    /// A point lookup against an elevation service failed.
    Lookup {
        /// Latitude of the failed point.
        lat: f64,
        /// Longitude of the failed point.
        lon: f64,
        /// What the service reported.
        reason: String,
    },
    /// Grid construction failed.
    Grid(GridError),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "terrain must have at least one cell"),
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::InvalidBoundingBox { reason } => write!(f, "invalid bounding box: {reason}"),
            Self::Lookup { lat, lon, reason } => {
                write!(f, "elevation lookup at ({lat}, {lon}) failed: {reason}")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for TerrainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for TerrainError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
