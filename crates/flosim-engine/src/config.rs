//! Basin configuration, validation, and error types.
//!
//! [`BasinConfig`] is the builder-input for constructing a
//! [`Basin`](crate::Basin). [`validate()`](BasinConfig::validate) checks
//! structural invariants before any grid is allocated.

use std::error::Error;
use std::fmt;

use flosim_core::Dims;

/// Default attenuation factor applied to every tick duration.
pub const DEFAULT_ETA: f64 = 0.5;

/// Default number of Jacobi passes per relaxation.
pub const DEFAULT_RELAXATION_PASSES: u32 = 32;

// ── BoundaryPolicy ─────────────────────────────────────────────────

/// What happens to velocity components pointing out of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Outward components on the outer ring are forced to zero, both
    /// when written and at every tick. Advection cannot lose water.
    #[default]
    Closed,
    /// Outward components are kept; water advected past an edge is lost.
    Open,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`BasinConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Width or height is zero.
    EmptyGrid,
    /// `width * height` does not fit in `usize`.
    GridTooLarge {
        /// Requested columns.
        width: usize,
        /// Requested rows.
        height: usize,
    },
    /// `eta` is not in `(0, 1]`.
    InvalidEta {
        /// The rejected value.
        value: f64,
    },
    /// `relaxation_passes` is zero.
    InvalidRelaxationPasses,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "basin must have at least one cell"),
            Self::GridTooLarge { width, height } => {
                write!(f, "basin of {width}x{height} cells overflows usize")
            }
            Self::InvalidEta { value } => {
                write!(f, "eta must be in (0, 1], got {value}")
            }
            Self::InvalidRelaxationPasses => {
                write!(f, "relaxation_passes must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

// ── BasinConfig ────────────────────────────────────────────────────

/// Construction parameters for a [`Basin`](crate::Basin).
///
/// `Default` yields an empty 0x0 grid, which fails validation; set
/// `width` and `height` with struct-update syntax or use
/// [`new`](Self::new).
#[derive(Clone, Debug, PartialEq)]
pub struct BasinConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Attenuation factor; each tick advances by `tau = dt * eta`.
    pub eta: f64,
    /// Jacobi passes per relaxation. Default: 32.
    pub relaxation_passes: u32,
    /// Edge handling for velocities. Default: [`BoundaryPolicy::Closed`].
    pub boundary: BoundaryPolicy,
}

impl Default for BasinConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            eta: DEFAULT_ETA,
            relaxation_passes: DEFAULT_RELAXATION_PASSES,
            boundary: BoundaryPolicy::default(),
        }
    }
}

impl BasinConfig {
    /// A default configuration for a `width x height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        Dims::new(self.width, self.height)
    }

    /// Check structural invariants.
    ///
    /// 1. Both dimensions are non-zero and their product fits in `usize`.
    /// 2. `eta` is finite and in `(0, 1]`.
    /// 3. At least one relaxation pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dims().is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.eta.is_finite() && self.eta > 0.0 && self.eta <= 1.0) {
            return Err(ConfigError::InvalidEta { value: self.eta });
        }
        if self.relaxation_passes == 0 {
            return Err(ConfigError::InvalidRelaxationPasses);
        }
        Ok(())
    }
}
