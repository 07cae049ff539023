#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::AssetKind;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// 1 px per mm: on the 800x600 viewport an A4 sheet's top-left corner sits
/// at screen (295, 151.5).
fn unit_config() -> EngineConfig {
    EngineConfig { mm_to_px: 1.0, ..EngineConfig::default() }
}

fn script(json: &str) -> Script {
    parse_script(json).unwrap()
}

const SQUARE_ID: &str = "6f1c2a52-3b7e-4d55-9a0e-0c5f5b8f2c11";

#[test]
fn minimal_script_defaults_to_a4() {
    let s = script(r#"{ "events": [] }"#);
    assert!(s.assets.is_empty());
    assert_eq!(s.viewport.width, 1024.0);
    let canvas = resolve_canvas(&s, None).unwrap();
    assert_eq!(canvas.size_name, PaperSize::A4);
}

#[test]
fn paper_override_wins() {
    let s = script(r#"{ "paper": "A4", "canvas": { "sizeName": "Custom", "widthMm": 100, "heightMm": 50 } }"#);
    assert_eq!(resolve_canvas(&s, None).unwrap().width_mm, 100.0);
    assert_eq!(resolve_canvas(&s, Some("letter")).unwrap().size_name, PaperSize::Letter);
}

#[test]
fn unknown_paper_is_an_error() {
    let s = script(r#"{ "paper": "napkin" }"#);
    assert!(matches!(resolve_canvas(&s, None), Err(ReplayError::UnknownPaper(name)) if name == "napkin"));
    assert!(matches!(run(&s, None, unit_config()), Err(ReplayError::UnknownPaper(_))));
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(parse_script("{ nope"), Err(ReplayError::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_script(Path::new("/nonexistent/planboard/script.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}

#[test]
fn invalid_config_is_rejected() {
    let s = script("{}");
    let config = EngineConfig { min_zoom: 3.0, max_zoom: 2.0, ..unit_config() };
    assert!(matches!(run(&s, None, config), Err(ReplayError::Config(ConfigError::ZoomRange { .. }))));
}

#[test]
fn drag_script_moves_asset() {
    let json = format!(
        r#"{{
            "viewport": {{ "width": 800, "height": 600 }},
            "assets": [ {{ "id": "{SQUARE_ID}", "type": "square", "x": 100, "y": 100, "width": 50, "height": 50 }} ],
            "events": [
                {{ "type": "pointer-down", "x": 395, "y": 251.5 }},
                {{ "type": "pointer-move", "x": 415, "y": 261.5 }},
                {{ "type": "pointer-up", "x": 415, "y": 261.5 }}
            ]
        }}"#
    );
    let report = run(&script(&json), None, unit_config()).unwrap();

    assert_eq!(report.assets.len(), 1);
    assert!(approx_eq(report.assets[0].x, 120.0));
    assert!(approx_eq(report.assets[0].y, 110.0));
    assert_eq!(report.selected.map(|id| id.to_string()).as_deref(), Some(SQUARE_ID));
    assert_eq!(report.mode, "idle");
    assert_eq!(report.actions.iter().filter(|a| **a == Action::CapturePointer).count(), 1);
    assert_eq!(report.actions.iter().filter(|a| **a == Action::ReleasePointer).count(), 1);
}

#[test]
fn pen_script_creates_double_line() {
    let json = r#"{
        "viewport": { "width": 800, "height": 600 },
        "events": [
            { "type": "set-tool", "tool": "pen" },
            { "type": "pointer-down", "x": 295, "y": 151.5 },
            { "type": "pointer-up", "x": 295, "y": 151.5 },
            { "type": "pointer-down", "x": 335, "y": 181.5 },
            { "type": "pointer-up", "x": 335, "y": 181.5 }
        ]
    }"#;
    let report = run(&script(json), None, unit_config()).unwrap();

    assert_eq!(report.assets.len(), 1);
    let line = &report.assets[0];
    assert_eq!(line.kind, AssetKind::DoubleLine);
    assert!(approx_eq(line.height.unwrap(), 50.0));
    assert_eq!(report.selected, Some(line.id));
}

#[test]
fn unfinished_gesture_is_released_at_end() {
    let json = r#"{
        "viewport": { "width": 800, "height": 600 },
        "events": [ { "type": "pointer-down", "x": 10, "y": 10 } ]
    }"#;
    let report = run(&script(json), None, unit_config()).unwrap();
    assert_eq!(report.actions.last(), Some(&Action::ReleasePointer));
    assert_eq!(report.mode, "idle");
}

#[test]
fn wheel_and_drop_events() {
    let json = r#"{
        "viewport": { "width": 800, "height": 600 },
        "events": [
            { "type": "drop", "x": 345, "y": 211.5, "payload": "circle" },
            { "type": "wheel", "x": 0, "y": 0, "dy": -1, "modifiers": { "ctrl": true } },
            { "type": "rotate-canvas" }
        ]
    }"#;
    let report = run(&script(json), None, unit_config()).unwrap();
    assert_eq!(report.assets.len(), 1);
    assert!(approx_eq(report.assets[0].x, 50.0));
    assert!(approx_eq(report.assets[0].y, 60.0));
    assert!(approx_eq(report.workspace.zoom, 1.1));
    assert!(approx_eq(report.workspace.canvas_rotation_deg, 90.0));
}

#[test]
fn report_serializes_camel_case() {
    let report = run(&script("{}"), None, unit_config()).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["workspace"]["zoom"], 1.0);
    assert!(value["workspace"].get("canvasRotationDeg").is_some());
    assert_eq!(value["mode"], "idle");
}
