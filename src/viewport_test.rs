#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Defaults ---

#[test]
fn default_zoom_is_one_and_grid_on() {
    let vp = Viewport::default();
    assert_eq!(vp.zoom(), 1.0);
    assert!(vp.grid_enabled());
}

#[test]
fn default_canvas_size_is_base() {
    assert_eq!(Viewport::default().canvas_size_px(), (900, 600));
}

// --- Zoom steps ---

#[test]
fn zoom_in_steps_by_increment() {
    let mut vp = Viewport::default();
    vp.zoom_in();
    assert!(approx_eq(vp.zoom(), 1.13));
}

#[test]
fn zoom_out_steps_by_increment() {
    let mut vp = Viewport::default();
    vp.zoom_out();
    assert!(approx_eq(vp.zoom(), 0.87));
}

#[test]
fn zoom_in_clamps_at_ceiling() {
    let mut vp = Viewport::default();
    for _ in 0..20 {
        vp.zoom_in();
    }
    assert_eq!(vp.zoom(), 1.7);
    vp.zoom_in();
    assert_eq!(vp.zoom(), 1.7);
}

#[test]
fn zoom_out_clamps_at_floor() {
    let mut vp = Viewport::default();
    for _ in 0..20 {
        vp.zoom_out();
    }
    assert_eq!(vp.zoom(), 0.45);
    vp.zoom_out();
    assert_eq!(vp.zoom(), 0.45);
}

#[test]
fn zoom_stays_within_bounds_under_mixed_steps() {
    let mut vp = Viewport::default();
    for i in 0..50 {
        if i % 3 == 0 {
            vp.zoom_out();
        } else {
            vp.zoom_in();
        }
        assert!((0.45..=1.7).contains(&vp.zoom()));
    }
}

#[test]
fn reset_returns_to_one() {
    let mut vp = Viewport::default();
    vp.zoom_in();
    vp.zoom_in();
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn set_zoom_clamps() {
    let mut vp = Viewport::default();
    vp.set_zoom(5.0);
    assert_eq!(vp.zoom(), 1.7);
    vp.set_zoom(0.1);
    assert_eq!(vp.zoom(), 0.45);
    vp.set_zoom(1.25);
    assert_eq!(vp.zoom(), 1.25);
}

#[test]
fn set_zoom_ignores_nan() {
    let mut vp = Viewport::default();
    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), 1.0);
}

// --- Grid ---

#[test]
fn toggle_grid_flips() {
    let mut vp = Viewport::default();
    vp.toggle_grid();
    assert!(!vp.grid_enabled());
    vp.toggle_grid();
    assert!(vp.grid_enabled());
}

#[test]
fn grid_cell_scales_with_zoom() {
    let mut vp = Viewport::default();
    assert_eq!(vp.grid_cell(), 24.0);
    vp.set_zoom(0.5);
    assert_eq!(vp.grid_cell(), 12.0);
}

#[test]
fn snap_grid_reflects_state() {
    let mut vp = Viewport::default();
    vp.toggle_grid();
    vp.set_zoom(1.5);
    let g = vp.snap_grid();
    assert!(!g.enabled);
    assert_eq!(g.zoom, 1.5);
    assert_eq!(g.base, 24.0);
}

// --- Canvas size ---

#[test]
fn canvas_size_rounds_scaled_base() {
    let mut vp = Viewport::default();
    vp.zoom_in();
    // 900 * 1.13 = 1017, 600 * 1.13 = 678
    assert_eq!(vp.canvas_size_px(), (1017, 678));
    vp.set_zoom(0.45);
    // 405, 270
    assert_eq!(vp.canvas_size_px(), (405, 270));
}

#[test]
fn from_config_uses_config_bounds() {
    let cfg = EditorConfig { canvas_width: 400.0, canvas_height: 300.0, max_zoom: 2.0, ..EditorConfig::default() };
    let mut vp = Viewport::from_config(&cfg);
    assert_eq!(vp.canvas_size_px(), (400, 300));
    vp.set_zoom(3.0);
    assert_eq!(vp.zoom(), 2.0);
}

// --- Conversions ---

#[test]
fn screen_to_model_divides_by_zoom() {
    let mut vp = Viewport::default();
    vp.set_zoom(1.25);
    let p = vp.screen_to_model(Point::new(125.0, 250.0));
    assert!(approx_eq(p.x, 100.0));
    assert!(approx_eq(p.y, 200.0));
}

#[test]
fn screen_dist_to_model_divides_by_zoom() {
    let mut vp = Viewport::default();
    vp.set_zoom(0.5);
    assert_eq!(vp.screen_dist_to_model(6.0), 12.0);
}
