//! End-to-end run of a small basin with a ridge, a jet, rain and a gutter.

use flosim_engine::{Basin, TickError};
use flosim_layers::{Gutter, Rain};
use flosim_test_utils::assert_non_negative;

const SIZE: usize = 5;

/// Returns the basin and the rain layer id. `with_gutter` adds a drain at
/// the far corner.
fn build(with_gutter: bool) -> (Basin, flosim_core::LayerId) {
    let mut b = Basin::with_eta(SIZE, SIZE, 0.5).unwrap();
    b.set_elevation_cells(&[(0, 2), (1, 1), (2, 0)], 10.0)
        .unwrap();
    b.set_vel_r(2, 2, 1.0).unwrap();
    b.set_vel_d(2, 2, 1.0).unwrap();

    let rain = b.add_layer(Rain::new(SIZE, SIZE)).unwrap();
    b.fills_mut(rain).unwrap().set_fill(2, 2, 1.0).unwrap();

    if with_gutter {
        let gutter = b.add_layer(Gutter::new(SIZE, SIZE)).unwrap();
        b.drains_mut(gutter).unwrap().set_drain(4, 4, 1.0).unwrap();
    }
    (b, rain)
}

fn near_centre(b: &Basin) -> f64 {
    b.water_window(1..4, 1..4).unwrap().sum()
}

#[test]
fn rain_and_gutter_over_fifty_ticks() -> Result<(), TickError> {
    let (mut b, _) = build(true);
    let start = near_centre(&b);
    for _ in 0..50 {
        b.tick(1.0)?;
        assert_non_negative(b.water());
    }
    assert!(near_centre(&b) > start + 1.0, "centre barely changed");
    assert_eq!(b.tick_id().0, 50);
    Ok(())
}

#[test]
fn gutter_slows_accumulation() {
    let (mut drained, _) = build(true);
    let (mut undrained, _) = build(false);
    for _ in 0..50 {
        drained.tick(1.0).unwrap();
        undrained.tick(1.0).unwrap();
    }
    assert!(drained.total_water() < undrained.total_water());
    assert!(drained.total_water() > 0.0);
}

#[test]
fn water_stays_off_the_ridge_side() {
    let (mut b, _) = build(true);
    for _ in 0..50 {
        b.tick(1.0).unwrap();
    }
    // (0, 0) is cut off from the centre by the ridge.
    assert_eq!(b.water_at(0, 0).unwrap(), 0.0);
}

#[test]
fn stopping_rain_never_adds_water() {
    let (mut b, rain) = build(true);
    for _ in 0..50 {
        b.tick(1.0).unwrap();
    }
    b.fills_mut(rain).unwrap().remove_fill(2, 2).unwrap();

    let mut previous = b.total_water();
    for _ in 0..50 {
        b.tick(1.0).unwrap();
        assert_non_negative(b.water());
        let now = b.total_water();
        assert!(now <= previous + 1e-9, "total grew from {previous} to {now}");
        previous = now;
    }
}

#[test]
fn metrics_track_mass_balance() {
    let (mut b, _) = build(false);
    let r = b.tick(1.0).unwrap();
    // Rain adds level * tau = 0.5; nothing else creates or destroys water.
    assert!((r.metrics.water_delta() - 0.5).abs() < 1e-12);
    assert_eq!(r.metrics.layer_us.len(), 1);
}
