#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{CanvasSpec, PaperSize};

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn spec(w: f64, h: f64) -> CanvasSpec {
    CanvasSpec { size_name: PaperSize::Custom, width_mm: w, height_mm: h }
}

fn unit_workspace() -> Workspace {
    Workspace { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, mm_to_px: 1.0, canvas_rotation_deg: 0.0 }
}

const VIEWPORT_CENTER: Point = Point { x: 400.0, y: 300.0 };

// --- Point ---

#[test]
fn point_distance_is_euclidean() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_midpoint() {
    assert!(point_approx_eq(Point::new(0.0, 0.0).midpoint(Point::new(40.0, 30.0)), Point::new(20.0, 15.0)));
}

#[test]
fn point_angle_to_follows_screen_axes() {
    let c = Point::new(10.0, 10.0);
    assert!(approx_eq(c.angle_to_deg(Point::new(20.0, 10.0)), 0.0));
    assert!(approx_eq(c.angle_to_deg(Point::new(10.0, 20.0)), 90.0));
    assert!(approx_eq(c.angle_to_deg(Point::new(10.0, 0.0)), -90.0));
}

#[test]
fn point_rotated_quarter_turn() {
    let p = Point::new(1.0, 0.0).rotated_deg(90.0);
    assert!(point_approx_eq(p, Point::new(0.0, 1.0)));
}

#[test]
fn normalize_degrees_wraps_negative_and_large() {
    assert!(approx_eq(normalize_degrees_360(-90.0), 270.0));
    assert!(approx_eq(normalize_degrees_360(720.0), 0.0));
    assert!(approx_eq(normalize_degrees_360(405.0), 45.0));
}

// --- Workspace defaults ---

#[test]
fn workspace_default_is_identity_zoom() {
    let ws = Workspace::default();
    assert_eq!(ws.zoom, 1.0);
    assert_eq!(ws.pan_x, 0.0);
    assert_eq!(ws.pan_y, 0.0);
    assert_eq!(ws.canvas_rotation_deg, 0.0);
    assert!(approx_eq(ws.mm_to_px, 96.0 / 25.4));
}

#[test]
fn canvas_center_follows_zoomed_pan() {
    let ws = Workspace { pan_x: 10.0, pan_y: -5.0, zoom: 2.0, ..unit_workspace() };
    assert!(point_approx_eq(ws.canvas_center(VIEWPORT_CENTER), Point::new(420.0, 290.0)));
}

// --- screen_to_canvas_mm ---

#[test]
fn screen_center_maps_to_canvas_center() {
    let ws = unit_workspace();
    let mm = ws.screen_to_canvas_mm(VIEWPORT_CENTER, VIEWPORT_CENTER, Some(&spec(200.0, 100.0)));
    assert!(point_approx_eq(mm, Point::new(100.0, 50.0)));
}

#[test]
fn screen_top_left_maps_to_origin() {
    let ws = unit_workspace();
    let mm = ws.screen_to_canvas_mm(Point::new(300.0, 250.0), VIEWPORT_CENTER, Some(&spec(200.0, 100.0)));
    assert!(point_approx_eq(mm, Point::origin()));
}

#[test]
fn zoom_shrinks_mm_per_pixel() {
    let ws = Workspace { zoom: 2.0, ..unit_workspace() };
    let mm = ws.screen_to_canvas_mm(Point::new(500.0, 300.0), VIEWPORT_CENTER, Some(&spec(200.0, 100.0)));
    assert!(point_approx_eq(mm, Point::new(150.0, 50.0)));
}

#[test]
fn quarter_turn_rotation_is_undone() {
    let ws = Workspace { canvas_rotation_deg: 90.0, ..unit_workspace() };
    // The sheet's top-left corner appears top-right of center after a clockwise quarter turn.
    let mm = ws.screen_to_canvas_mm(Point::new(450.0, 200.0), VIEWPORT_CENTER, Some(&spec(200.0, 100.0)));
    assert!(point_approx_eq(mm, Point::origin()));
}

#[test]
fn missing_spec_returns_origin() {
    let ws = unit_workspace();
    let mm = ws.screen_to_canvas_mm(Point::new(123.0, 456.0), VIEWPORT_CENTER, None);
    assert_eq!(mm, Point::origin());
}

#[test]
fn degenerate_zoom_returns_origin() {
    let ws = Workspace { zoom: 0.0, ..unit_workspace() };
    let mm = ws.screen_to_canvas_mm(Point::new(123.0, 456.0), VIEWPORT_CENTER, Some(&spec(200.0, 100.0)));
    assert_eq!(mm, Point::origin());
}

#[test]
fn pan_shifts_mapping() {
    let ws = Workspace { pan_x: 50.0, ..unit_workspace() };
    let mm = ws.screen_to_canvas_mm(Point::new(450.0, 300.0), VIEWPORT_CENTER, Some(&spec(200.0, 100.0)));
    assert!(point_approx_eq(mm, Point::new(100.0, 50.0)));
}

// --- Round trips ---

#[test]
fn round_trip_over_rotation_zoom_grid() {
    let sheet = CanvasSpec::from_size(PaperSize::A4).unwrap();
    let points = [
        Point::new(0.0, 0.0),
        Point::new(105.0, 148.5),
        Point::new(210.0, 297.0),
        Point::new(-20.0, 333.3),
        Point::new(17.25, 3.5),
    ];
    for step in 0..24 {
        let rotation = f64::from(step) * 15.0;
        for zoom in [0.1, 0.5, 1.0, 2.75, 8.0] {
            let ws = Workspace { pan_x: 13.0, pan_y: -7.0, zoom, canvas_rotation_deg: rotation, ..Workspace::default() };
            for p in points {
                let screen = ws.canvas_mm_to_screen(p, VIEWPORT_CENTER, Some(&sheet));
                let back = ws.screen_to_canvas_mm(screen, VIEWPORT_CENTER, Some(&sheet));
                assert!(point_approx_eq(p, back), "rotation={rotation} zoom={zoom} p={p:?} back={back:?}");
            }
        }
    }
}

#[test]
fn round_trip_screen_first() {
    let sheet = spec(300.0, 200.0);
    let ws = Workspace { pan_x: -40.0, pan_y: 12.0, zoom: 1.5, canvas_rotation_deg: 270.0, ..Workspace::default() };
    let screen = Point::new(640.0, 90.0);
    let back = ws.canvas_mm_to_screen(ws.screen_to_canvas_mm(screen, VIEWPORT_CENTER, Some(&sheet)), VIEWPORT_CENTER, Some(&sheet));
    assert!(point_approx_eq(screen, back));
}

// --- Distances and panning ---

#[test]
fn screen_dist_to_mm_accounts_for_ratio_and_zoom() {
    let ws = Workspace { zoom: 2.0, mm_to_px: 4.0, ..unit_workspace() };
    assert!(approx_eq(ws.screen_dist_to_mm(16.0), 2.0));
}

#[test]
fn pan_by_screen_delta_divides_by_zoom() {
    let mut ws = Workspace { zoom: 2.0, ..unit_workspace() };
    ws.pan_by_screen_delta(20.0, -10.0);
    assert!(approx_eq(ws.pan_x, 10.0));
    assert!(approx_eq(ws.pan_y, -5.0));
}

#[test]
fn pan_keeps_sheet_under_pointer() {
    let sheet = spec(200.0, 100.0);
    let mut ws = Workspace { zoom: 3.0, ..unit_workspace() };
    let grab = Point::new(410.0, 310.0);
    let before = ws.screen_to_canvas_mm(grab, VIEWPORT_CENTER, Some(&sheet));
    ws.pan_by_screen_delta(25.0, 40.0);
    let after = ws.screen_to_canvas_mm(Point::new(435.0, 350.0), VIEWPORT_CENTER, Some(&sheet));
    assert!(point_approx_eq(before, after));
}
