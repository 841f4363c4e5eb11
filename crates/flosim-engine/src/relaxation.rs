//! Implicit relaxation of the water surface.
//!
//! Each pass redistributes water toward lower free-surface neighbours and
//! blends the result with the pre-relaxation depth:
//!
//! ```text
//! N_next = (N_0 + tau * spread(N)) / (1 + tau)
//! ```
//!
//! `N_0` is held fixed across passes. Passes are Jacobi sweeps: every pass
//! reads only the previous pass's grid and writes a separate buffer.
//!
//! # Spread rule
//!
//! With surface `H = bed + N` and cells outside the grid treated as
//! infinitely high, a cell donates a quarter of its water toward every
//! neighbour whose surface is not above its own, and keeps a quarter for
//! every side it does not donate to. A cell therefore receives
//! `N[nb] / 4` from each neighbour that donates toward it. `spread`
//! conserves total water exactly up to rounding.

use flosim_core::{neighbour_flat, Direction, Dims, Grid, GridError};

/// One spread step: where the water in `water` would go given `bed`.
///
/// `surface` is scratch of length `dims.cell_count()`; `out` receives the
/// redistributed depths.
pub fn spread_into(
    dims: Dims,
    bed: &[f64],
    water: &[f64],
    surface: &mut [f64],
    out: &mut [f64],
) {
    for ((s, &b), &n) in surface.iter_mut().zip(bed).zip(water) {
        *s = b + n;
    }
    for (i, cell) in out.iter_mut().enumerate() {
        let (x, y) = dims.coords(i);
        let h = surface[i];
        let mut received = 0.0;
        let mut donations = 0u32;
        for dir in Direction::ALL {
            if let Some(j) = neighbour_flat(x, y, dims, dir) {
                if surface[j] <= h {
                    donations += 1;
                }
                if h <= surface[j] {
                    received += water[j] / 4.0;
                }
            }
        }
        *cell = received + f64::from(4 - donations) * water[i] / 4.0;
    }
}

/// Relax `water` over `bed` for `passes` Jacobi passes at scaled time `tau`.
///
/// Returns the relaxed depth grid. `tau == 0` returns `water` unchanged.
pub fn relax(
    bed: &Grid<f64>,
    water: &Grid<f64>,
    tau: f64,
    passes: u32,
) -> Result<Grid<f64>, GridError> {
    let dims = water.dims();
    dims.ensure_eq(bed.dims())?;

    let initial = water.as_slice();
    let mut current = water.clone();
    let mut next: Grid<f64> = Grid::with_dims(dims);
    let mut spread = vec![0.0; dims.cell_count()];
    let mut surface = vec![0.0; dims.cell_count()];
    let denom = 1.0 + tau;

    for _ in 0..passes {
        spread_into(
            dims,
            bed.as_slice(),
            current.as_slice(),
            &mut surface,
            &mut spread,
        );
        for ((n, &n0), &s) in next.as_mut_slice().iter_mut().zip(initial).zip(&spread) {
            *n = (n0 + tau * s) / denom;
        }
        std::mem::swap(&mut current, &mut next);
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spread(bed: &Grid<f64>, water: &Grid<f64>) -> Grid<f64> {
        let dims = water.dims();
        let mut s = vec![0.0; dims.cell_count()];
        let mut out = Grid::with_dims(dims);
        spread_into(dims, bed.as_slice(), water.as_slice(), &mut s, out.as_mut_slice());
        out
    }

    #[test]
    fn flat_uniform_field_is_fixed_point() {
        let bed: Grid<f64> = Grid::new(5, 5);
        let water = Grid::filled(5, 5, 1.0);
        let s = spread(&bed, &water);
        assert!(s.as_slice().iter().all(|&v| v == 1.0));
        let r = relax(&bed, &water, 0.5, 32).unwrap();
        assert!(r.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn peak_spreads_to_neighbours() {
        let bed: Grid<f64> = Grid::new(3, 3);
        let mut water: Grid<f64> = Grid::new(3, 3);
        water.set(1, 1, 4.0).unwrap();
        let s = spread(&bed, &water);
        assert_eq!(s.get(1, 1).unwrap(), 0.0);
        assert_eq!(s.get(0, 1).unwrap(), 1.0);
        assert_eq!(s.get(2, 1).unwrap(), 1.0);
        assert_eq!(s.get(1, 0).unwrap(), 1.0);
        assert_eq!(s.get(1, 2).unwrap(), 1.0);
        assert_eq!(s.get(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn water_does_not_climb_a_ridge() {
        let mut bed: Grid<f64> = Grid::new(2, 1);
        bed.set(1, 0, 10.0).unwrap();
        let mut water: Grid<f64> = Grid::new(2, 1);
        water.set(0, 0, 1.0).unwrap();
        let s = spread(&bed, &water);
        assert_eq!(s.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn edges_never_receive() {
        // Corner cell: two walls, so it keeps at least half.
        let bed: Grid<f64> = Grid::new(2, 2);
        let mut water: Grid<f64> = Grid::new(2, 2);
        water.set(0, 0, 4.0).unwrap();
        let s = spread(&bed, &water);
        assert_eq!(s.get(0, 0).unwrap(), 2.0);
        assert_eq!(s.get(1, 0).unwrap(), 1.0);
        assert_eq!(s.get(0, 1).unwrap(), 1.0);
        assert_eq!(s.get(1, 1).unwrap(), 0.0);
    }

    #[test]
    fn zero_tau_is_identity() {
        let bed = Grid::from_fn(4, 3, |x, y| (x * y) as f64);
        let water = Grid::from_fn(4, 3, |x, _| x as f64 * 0.5);
        let r = relax(&bed, &water, 0.0, 32).unwrap();
        assert_eq!(r, water);
    }

    #[test]
    fn rejects_mismatched_bed() {
        let bed: Grid<f64> = Grid::new(3, 3);
        let water: Grid<f64> = Grid::new(3, 2);
        assert!(relax(&bed, &water, 0.5, 1).is_err());
    }

    proptest! {
        #[test]
        fn relaxation_conserves_mass(
            bed in prop::collection::vec(0.0f64..5.0, 20),
            water in prop::collection::vec(0.0f64..3.0, 20),
            tau in 0.0f64..2.0,
        ) {
            let bed = Grid::from_vec(5, 4, bed).unwrap();
            let water = Grid::from_vec(5, 4, water).unwrap();
            let before = water.sum();
            let after = relax(&bed, &water, tau, 32).unwrap();
            prop_assert!((after.sum() - before).abs() < 1e-9 * (1.0 + before));
        }

        #[test]
        fn relaxation_keeps_depth_non_negative(
            bed in prop::collection::vec(-2.0f64..5.0, 16),
            water in prop::collection::vec(0.0f64..3.0, 16),
            tau in 0.0f64..2.0,
        ) {
            let bed = Grid::from_vec(4, 4, bed).unwrap();
            let water = Grid::from_vec(4, 4, water).unwrap();
            let after = relax(&bed, &water, tau, 32).unwrap();
            prop_assert!(after.as_slice().iter().all(|&v| v >= 0.0));
        }
    }
}
