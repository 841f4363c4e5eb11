//! Hashing of basin state for determinism checks.
//!
//! Uses FNV-1a over the exact bit patterns of every grid. Two basins hash
//! equal only if their dimensions and every `f64` are bit-identical. Not
//! cryptographically secure.

use flosim_core::{BasinView, Grid};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn fold_grid(mut hash: u64, tag: u64, grid: &Grid<f64>) -> u64 {
    hash = fnv1a_u64(hash, tag);
    for &v in grid.as_slice() {
        hash = fnv1a_u64(hash, v.to_bits());
    }
    hash
}

/// Hash the dimensions, bed, water and both velocity fields in `view`.
///
/// Grid order is fixed; a tag is folded in at each grid boundary so that
/// swapping two grids changes the hash.
pub fn state_hash(view: &BasinView<'_>) -> u64 {
    let dims = view.dims();
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, dims.width as u64);
    hash = fnv1a_u64(hash, dims.height as u64);
    hash = fold_grid(hash, 0, view.bed());
    hash = fold_grid(hash, 1, view.water());
    hash = fold_grid(hash, 2, &view.vel_x().negative);
    hash = fold_grid(hash, 3, &view.vel_x().positive);
    hash = fold_grid(hash, 4, &view.vel_y().negative);
    fold_grid(hash, 5, &view.vel_y().positive)
}
