//! Benchmark profiles for the flosim water simulator.
//!
//! Provides pre-built [`Basin`] profiles for benchmarking:
//!
//! - [`reference_basin`]: 100x100 grid (10K cells) with every built-in layer
//! - [`stress_basin`]: 316x316 grid (~100K cells) for stress testing

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use flosim_engine::Basin;
use flosim_layers::{Evaporation, Gutter, Rain, Reservoir};
use flosim_terrain::{NoiseTerrain, TerrainSource};

/// Build a reference benchmark basin: 100x100 grid (10K cells).
///
/// Noise terrain in `[0, 10)`, uniform rain, a gutter along the bottom
/// row, evaporation, and a reservoir in the top-left corner. A rightward
/// and downward jet runs through the centre column.
pub fn reference_basin(seed: u64) -> Result<Basin, Box<dyn Error>> {
    profile(100, seed)
}

/// Build a stress benchmark basin: 316x316 grid (~100K cells).
///
/// Same layers as [`reference_basin`] at 10x the cell count.
pub fn stress_basin(seed: u64) -> Result<Basin, Box<dyn Error>> {
    profile(316, seed)
}

fn profile(size: usize, seed: u64) -> Result<Basin, Box<dyn Error>> {
    let mut basin = Basin::new(size, size)?;
    let bed = NoiseTerrain::new(10.0, seed)?.generate(size, size)?;
    basin.set_bed(bed)?;

    basin.add_layer(Rain::uniform(size, size, 0.01))?;

    let gutter = basin.add_layer(Gutter::new(size, size))?;
    let drains = basin.drains_mut(gutter)?;
    for x in 0..size {
        drains.set_drain(x, size - 1, 0.5)?;
    }

    basin.add_layer(Evaporation::new(size, size, 1.0))?;

    let reservoir = basin.add_layer(Reservoir::new(size, size, 2.0))?;
    let r = basin.reservoir_mut(reservoir)?;
    for y in 0..size / 10 {
        for x in 0..size / 10 {
            r.set_mask(x, y, true)?;
        }
    }

    let mid = size / 2;
    for y in 1..size - 1 {
        basin.set_vel_r(mid, y, 0.2)?;
        basin.set_vel_d(mid, y, 0.2)?;
    }
    Ok(basin)
}
