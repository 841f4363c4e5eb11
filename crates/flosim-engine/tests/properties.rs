//! Property tests for the basin tick pipeline.

use flosim_core::Grid;
use flosim_engine::{Basin, BasinConfig, BoundaryPolicy};
use flosim_layer::Drains;
use flosim_layers::{ElevationLayer, Evaporation, Gutter, Rain, Reservoir};
use flosim_test_utils::{assert_grid_bits_eq, assert_grid_close, assert_non_negative, uniform_grid};
use proptest::prelude::*;

const W: usize = 4;
const H: usize = 4;
const N: usize = W * H;

fn grid(values: Vec<f64>) -> Grid<f64> {
    Grid::from_vec(W, H, values).unwrap()
}

/// A basin with the given bed and water and every velocity component set
/// from `vel` (four values per cell: left, right, up, down).
fn seeded_basin(bed: Vec<f64>, water: Vec<f64>, vel: &[f64]) -> Basin {
    let mut b = Basin::new(W, H).unwrap();
    b.set_bed(grid(bed)).unwrap();
    b.set_water_grid(grid(water)).unwrap();
    for y in 0..H {
        for x in 0..W {
            let i = 4 * (y * W + x);
            b.set_vel_l(x, y, vel[i]).unwrap();
            b.set_vel_r(x, y, vel[i + 1]).unwrap();
            b.set_vel_u(x, y, vel[i + 2]).unwrap();
            b.set_vel_d(x, y, vel[i + 3]).unwrap();
        }
    }
    b
}

fn depths() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..3.0, N)
}

fn beds() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-2.0f64..5.0, N)
}

// Four components of at most 0.2 and tau <= 1 move at most 80% of a cell.
fn velocities() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..0.2, 4 * N)
}

proptest! {
    #[test]
    fn drains_never_drive_water_negative(
        bed in beds(),
        water in depths(),
        vel in velocities(),
        gutter in prop::collection::vec(0.0f64..4.0, N),
        evaporation_rate in 0.0f64..50.0,
        dts in prop::collection::vec(0.0f64..2.0, 1..8),
    ) {
        let mut b = seeded_basin(bed, water, &vel);
        let g = b.add_layer(Gutter::new(W, H)).unwrap();
        *b.drains_mut(g).unwrap().drain_level_mut() = grid(gutter);
        b.add_layer(Evaporation::new(W, H, evaporation_rate)).unwrap();

        for dt in dts {
            b.tick(dt).unwrap();
            prop_assert!(b.water().as_slice().iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn zero_tick_changes_nothing(
        bed in beds(),
        water in depths(),
        vel in velocities(),
        rain in 0.0f64..3.0,
        uplift in -1.0f64..1.0,
    ) {
        let mut b = seeded_basin(bed, water, &vel);
        b.add_layer(Rain::uniform(W, H, rain)).unwrap();
        b.add_layer(Gutter::new(W, H)).unwrap();
        b.add_layer(Evaporation::new(W, H, 1.0)).unwrap();
        let r = b.add_layer(Reservoir::new(W, H, 1.0)).unwrap();
        b.reservoir_mut(r).unwrap().set_mask(1, 1, true).unwrap();
        b.add_layer(ElevationLayer::from_grid(uniform_grid(W, H, uplift))).unwrap();

        let bed = b.bed().clone();
        let water = b.water().clone();
        let vel_x = b.vel_x().clone();
        let vel_y = b.vel_y().clone();

        b.tick(0.0).unwrap();

        assert_grid_bits_eq(b.bed(), &bed);
        assert_grid_bits_eq(b.water(), &water);
        assert_grid_bits_eq(&b.vel_x().negative, &vel_x.negative);
        assert_grid_bits_eq(&b.vel_x().positive, &vel_x.positive);
        assert_grid_bits_eq(&b.vel_y().negative, &vel_y.negative);
        assert_grid_bits_eq(&b.vel_y().positive, &vel_y.positive);
    }

    #[test]
    fn identical_basins_stay_identical(
        bed in beds(),
        water in depths(),
        vel in velocities(),
        dts in prop::collection::vec(0.0f64..2.0, 1..8),
    ) {
        let build = || {
            let mut b = seeded_basin(bed.clone(), water.clone(), &vel);
            b.add_layer(Rain::uniform(W, H, 0.3)).unwrap();
            b.add_layer(Evaporation::new(W, H, 5.0)).unwrap();
            b
        };
        let mut a = build();
        let mut b = build();
        prop_assert_eq!(a.state_hash(), b.state_hash());
        for dt in dts {
            a.tick(dt).unwrap();
            b.tick(dt).unwrap();
            prop_assert_eq!(a.state_hash(), b.state_hash());
        }
    }

    #[test]
    fn diffusion_alone_conserves_mass(
        bed in beds(),
        water in depths(),
        dts in prop::collection::vec(0.0f64..2.0, 1..8),
    ) {
        let mut b = Basin::new(W, H).unwrap();
        b.set_bed(grid(bed)).unwrap();
        b.set_water_grid(grid(water)).unwrap();
        let before = b.total_water();
        for dt in dts {
            b.tick(dt).unwrap();
            let now = b.total_water();
            prop_assert!((now - before).abs() <= 1e-9 * (1.0 + before),
                "total drifted from {} to {}", before, now);
        }
    }

    #[test]
    fn closed_boundary_contains_advection(
        water in depths(),
        vel in velocities(),
        dts in prop::collection::vec(0.0f64..2.0, 1..8),
    ) {
        let mut b = seeded_basin(vec![0.0; N], water, &vel);
        let before = b.total_water();
        for dt in dts {
            b.tick(dt).unwrap();
        }
        prop_assert!((b.total_water() - before).abs() <= 1e-9 * (1.0 + before));
    }
}

#[test]
fn flat_field_stays_uniform() {
    let mut b = Basin::new(5, 5).unwrap();
    b.set_water_grid(uniform_grid(5, 5, 1.0)).unwrap();
    for _ in 0..25 {
        b.tick(0.5).unwrap();
    }
    assert_grid_close(b.water(), &uniform_grid(5, 5, 1.0), 1e-12);
}

#[test]
fn layer_order_does_not_change_outcome() {
    let build = |rain_first: bool| {
        let mut b = Basin::new(W, H).unwrap();
        b.set_water_grid(uniform_grid(W, H, 0.5)).unwrap();
        let mut gutter = Gutter::new(W, H);
        gutter.set_drain(3, 3, 0.7).unwrap();
        let rain = Rain::uniform(W, H, 0.2);
        if rain_first {
            b.add_layer(rain).unwrap();
            b.add_layer(gutter).unwrap();
        } else {
            b.add_layer(gutter).unwrap();
            b.add_layer(rain).unwrap();
        }
        b
    };
    let mut a = build(true);
    let mut b = build(false);
    for _ in 0..10 {
        a.tick(1.0).unwrap();
        b.tick(1.0).unwrap();
    }
    assert_eq!(a.state_hash(), b.state_hash());
}

#[test]
fn open_boundary_loses_water_at_edges() {
    let mut b = Basin::from_config(BasinConfig {
        boundary: BoundaryPolicy::Open,
        ..BasinConfig::new(3, 1)
    })
    .unwrap();
    b.set_water_grid(uniform_grid(3, 1, 1.0)).unwrap();
    b.set_vel_l(0, 0, 0.5).unwrap();
    b.tick(1.0).unwrap();
    assert!(b.total_water() < 3.0);
    assert_non_negative(b.water());
}
