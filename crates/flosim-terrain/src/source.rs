//! Terrain collaborators: grid generators and geographic lookups.
//!
//! A [`TerrainSource`] produces a bed grid for a requested size. A
//! [`GeoElevation`] produces one for a geographic [`BoundingBox`]; the
//! grid size then follows from the box and a sampling step. Network-backed
//! implementations live outside this crate. [`SampledElevation`] adapts a
//! per-point lookup function.

use flosim_core::{Dims, Grid};

use crate::error::TerrainError;

/// Default sampling step in degrees.
pub const DEFAULT_STEP_DEG: f64 = 0.1;

/// Produces a bed elevation grid of a requested size.
pub trait TerrainSource {
    /// Generate a `width x height` grid.
    fn generate(&self, width: usize, height: usize) -> Result<Grid<f64>, TerrainError>;
}

/// A latitude/longitude rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    top_left_lat: f64,
    top_left_lon: f64,
    bottom_right_lat: f64,
    bottom_right_lon: f64,
}

impl BoundingBox {
    /// A box from its top-left and bottom-right corners.
    ///
    /// Rejects non-finite coordinates and boxes with zero extent on
    /// either axis.
    pub fn new(
        top_left_lat: f64,
        top_left_lon: f64,
        bottom_right_lat: f64,
        bottom_right_lon: f64,
    ) -> Result<Self, TerrainError> {
        let corners = [top_left_lat, top_left_lon, bottom_right_lat, bottom_right_lon];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(TerrainError::InvalidBoundingBox {
                reason: "coordinates must be finite".to_string(),
            });
        }
        if top_left_lat == bottom_right_lat || top_left_lon == bottom_right_lon {
            return Err(TerrainError::InvalidBoundingBox {
                reason: "box has zero extent".to_string(),
            });
        }
        Ok(Self {
            top_left_lat,
            top_left_lon,
            bottom_right_lat,
            bottom_right_lon,
        })
    }

    /// Grid size when sampling every `step` degrees from the top-left
    /// corner: one row per latitude sample, one column per longitude
    /// sample. The far edge is excluded.
    pub fn grid_dims(&self, step: f64) -> Result<Dims, TerrainError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(TerrainError::InvalidParameter {
                reason: format!("step must be finite and > 0, got {step}"),
            });
        }
        let rows = samples(self.bottom_right_lat - self.top_left_lat, step);
        let cols = samples(self.bottom_right_lon - self.top_left_lon, step);
        Ok(Dims::new(cols, rows))
    }

    /// `(lat, lon)` of grid cell `(x, y)` when sampling every `step`
    /// degrees. Moves toward the bottom-right corner along both axes.
    pub fn point(&self, step: f64, x: usize, y: usize) -> (f64, f64) {
        let lat_dir = (self.bottom_right_lat - self.top_left_lat).signum();
        let lon_dir = (self.bottom_right_lon - self.top_left_lon).signum();
        (
            self.top_left_lat + lat_dir * step * y as f64,
            self.top_left_lon + lon_dir * step * x as f64,
        )
    }
}

/// Number of samples over `span` at spacing `step`, far edge excluded.
/// Spans within rounding of a whole number of steps count as whole.
fn samples(span: f64, step: f64) -> usize {
    let n = span.abs() / step;
    let whole = n.round();
    if (n - whole).abs() < 1e-9 {
        whole as usize
    } else {
        n.ceil() as usize
    }
}

/// Looks up real-world elevation over a bounding box.
pub trait GeoElevation {
    /// Elevation grid covering `bbox`, sized per [`BoundingBox::grid_dims`].
    fn elevation(&self, bbox: &BoundingBox) -> Result<Grid<f64>, TerrainError>;
}

/// Looks up which cells of a bounding box are covered by roads.
///
/// A road mask is a natural drain map: feed it to a gutter layer.
pub trait GeoRoads {
    /// Road mask covering `bbox`, sized per [`BoundingBox::grid_dims`].
    fn roads(&self, bbox: &BoundingBox) -> Result<Grid<bool>, TerrainError>;
}

/// A [`GeoElevation`] that queries a function once per sample point.
///
/// ```
/// use flosim_terrain::{BoundingBox, GeoElevation, SampledElevation};
///
/// let flat = SampledElevation::new(0.5, |_lat, _lon| Ok(12.0));
/// let bbox = BoundingBox::new(10.0, 20.0, 11.0, 22.0)?;
/// let grid = flat.elevation(&bbox)?;
/// assert_eq!((grid.width(), grid.height()), (4, 2));
/// # Ok::<(), flosim_terrain::TerrainError>(())
/// ```
pub struct SampledElevation<F> {
    step: f64,
    lookup: F,
}

impl<F> SampledElevation<F>
where
    F: Fn(f64, f64) -> Result<f64, TerrainError>,
{
    /// Sample `lookup(lat, lon)` every `step` degrees.
    pub fn new(step: f64, lookup: F) -> Self {
        Self { step, lookup }
    }
}

impl<F> GeoElevation for SampledElevation<F>
where
    F: Fn(f64, f64) -> Result<f64, TerrainError>,
{
    fn elevation(&self, bbox: &BoundingBox) -> Result<Grid<f64>, TerrainError> {
        let dims = bbox.grid_dims(self.step)?;
        if dims.is_empty() {
            return Err(TerrainError::EmptyGrid);
        }
        let mut values = Vec::with_capacity(dims.cell_count());
        for y in 0..dims.height {
            for x in 0..dims.width {
                let (lat, lon) = bbox.point(self.step, x, y);
                values.push((self.lookup)(lat, lon)?);
            }
        }
        Ok(Grid::from_vec(dims.width, dims.height, values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dims_counts_samples() {
        let b = BoundingBox::new(50.0, 10.0, 49.0, 10.5).unwrap();
        assert_eq!(b.grid_dims(0.1).unwrap(), Dims::new(5, 10));
        assert_eq!(b.grid_dims(0.3).unwrap(), Dims::new(2, 4));
    }

    #[test]
    fn grid_dims_tolerates_rounding() {
        let b = BoundingBox::new(0.4, 0.0, 0.7, 0.3).unwrap();
        assert_eq!(b.grid_dims(DEFAULT_STEP_DEG).unwrap(), Dims::new(3, 3));
    }

    #[test]
    fn degenerate_boxes_rejected() {
        assert!(BoundingBox::new(1.0, 1.0, 1.0, 2.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 1.0, 2.0, 2.0).is_err());
        let b = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(b.grid_dims(0.0).is_err());
    }

    #[test]
    fn points_walk_toward_bottom_right() {
        let b = BoundingBox::new(50.0, 10.0, 49.0, 11.0).unwrap();
        let (lat, lon) = b.point(0.5, 1, 1);
        assert_eq!((lat, lon), (49.5, 10.5));
    }

    #[test]
    fn sampled_elevation_is_row_major() {
        let b = BoundingBox::new(0.0, 0.0, 2.0, 3.0).unwrap();
        let src = SampledElevation::new(1.0, |lat, lon| Ok(lat * 10.0 + lon));
        let g = src.elevation(&b).unwrap();
        assert_eq!(g.dims(), Dims::new(3, 2));
        assert_eq!(g.get(2, 1).unwrap(), 12.0);
    }

    #[test]
    fn sampled_elevation_propagates_lookup_failure() {
        let b = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let src = SampledElevation::new(0.5, |lat, lon| {
            Err(TerrainError::Lookup {
                lat,
                lon,
                reason: "service unavailable".into(),
            })
        });
        assert!(matches!(
            src.elevation(&b),
            Err(TerrainError::Lookup { .. })
        ));
    }
}
