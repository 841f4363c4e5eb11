//! The built-in layers driven through a real basin.

use flosim_core::Grid;
use flosim_engine::Basin;
use flosim_layer::ControlLayer;
use flosim_layers::{ElevationLayer, Evaporation, Gutter, Layer, Rain, Reservoir};
use flosim_test_utils::{assert_grid_close, assert_non_negative, uniform_grid, ConstLayer};

#[test]
fn reservoir_refills_masked_cell_to_target() {
    let mut b = Basin::with_eta(1, 1, 1.0).unwrap();
    let r = b.add_layer(Reservoir::new(1, 1, 0.5)).unwrap();
    b.reservoir_mut(r).unwrap().set_mask(0, 0, true).unwrap();

    b.tick(1.0).unwrap();
    assert_eq!(b.water_at(0, 0).unwrap(), 0.5);
    // At target: no further inflow.
    b.tick(1.0).unwrap();
    assert_eq!(b.water_at(0, 0).unwrap(), 0.5);
}

#[test]
fn reservoir_tops_up_after_drain() {
    let mut b = Basin::with_eta(1, 1, 1.0).unwrap();
    let r = b.add_layer(Reservoir::new(1, 1, 1.0)).unwrap();
    b.reservoir_mut(r).unwrap().set_mask(0, 0, true).unwrap();
    let g = b.add_layer(Gutter::new(1, 1)).unwrap();

    b.tick(1.0).unwrap();
    assert_eq!(b.water_at(0, 0).unwrap(), 1.0);

    b.drains_mut(g).unwrap().set_drain(0, 0, 0.25).unwrap();
    b.tick(1.0).unwrap();
    assert_eq!(b.water_at(0, 0).unwrap(), 0.75);
    // Below target again: reservoir adds 1.0 while the gutter takes 0.25.
    b.tick(1.0).unwrap();
    assert_eq!(b.water_at(0, 0).unwrap(), 1.5);
}

#[test]
fn evaporation_dries_a_puddle() {
    let mut b = Basin::new(3, 3).unwrap();
    b.set_water_grid(uniform_grid(3, 3, 0.05)).unwrap();
    let e = b.add_layer(Evaporation::new(3, 3, 2.0)).unwrap();

    b.tick(1.0).unwrap();
    // level 0.01 * rate 2 * tau 0.5 per cell.
    assert_grid_close(b.water(), &uniform_grid(3, 3, 0.04), 1e-12);

    b.evaporation_mut(e).unwrap().set_rate(100.0);
    b.tick(1.0).unwrap();
    assert_eq!(b.total_water(), 0.0);
    assert_non_negative(b.water());
}

#[test]
fn elevation_layer_raises_bed_and_water_follows() {
    let mut b = Basin::with_eta(3, 1, 1.0).unwrap();
    b.set_water_grid(Grid::from_vec(3, 1, vec![0.0, 1.0, 0.0]).unwrap())
        .unwrap();
    let uplift = b.add_layer(ElevationLayer::new(3, 1)).unwrap();
    b.elevation_mut(uplift).unwrap().set_rate(1, 0, 2.0).unwrap();

    b.tick(1.0).unwrap();
    assert_eq!(b.bed().as_slice(), &[0.0, 2.0, 0.0]);
    // The raised cell now sits above both neighbours and sheds water.
    assert!(b.water_at(1, 0).unwrap() < 1.0);
    assert!((b.total_water() - 1.0).abs() < 1e-12);
}

#[test]
fn rain_capability_reconfigured_through_basin() {
    let mut b = Basin::with_eta(2, 2, 1.0).unwrap();
    let rain = b.add_layer(Rain::new(2, 2)).unwrap();
    b.fills_mut(rain).unwrap().set_fill(0, 0, 4.0).unwrap();
    b.tick(1.0).unwrap();
    assert!((b.total_water() - 4.0).abs() < 1e-12);

    b.fills_mut(rain).unwrap().remove_fill(0, 0).unwrap();
    b.tick(1.0).unwrap();
    assert!((b.total_water() - 4.0).abs() < 1e-12);
}

#[test]
fn custom_layer_runs_alongside_builtins() {
    let mut b = Basin::with_eta(2, 2, 1.0).unwrap();
    let custom: Layer = Layer::Custom(Box::new(ConstLayer::water("spring", 2, 2, 0.5)));
    let id = b.add_layer(custom).unwrap();
    b.add_layer(Rain::uniform(2, 2, 0.5)).unwrap();
    b.tick(1.0).unwrap();
    assert_grid_close(b.water(), &uniform_grid(2, 2, 1.0), 1e-12);
    assert_eq!(b.layer(id).unwrap().name(), "spring");
    assert!(b.fills_mut(id).is_err());
}
