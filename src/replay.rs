//! Scripted event replay.
//!
//! A script mounts a canvas, seeds assets, and feeds a sequence of host
//! events (in screen CSS pixels) through an [`EngineCore`] backed by a
//! [`DocStore`]. The resulting report carries every emitted [`Action`] and
//! the final scene, which makes gestures reproducible outside a browser.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::camera::{Point, Workspace};
use crate::config::{ConfigError, EngineConfig};
use crate::doc::{Asset, AssetId, CanvasSpec, DocStore, PaperSize, SceneGateway};
use crate::engine::{Action, EngineCore};
use crate::input::{Button, Key, Modifiers, Tool, WheelDelta};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown paper size: {0}")]
    UnknownPaper(String),
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),
}

/// Viewport the events are expressed against.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_dpr")]
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1024.0, height: 768.0, dpr: default_dpr() }
    }
}

fn default_dpr() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Named sheet size; ignored when `canvas` is given.
    #[serde(default)]
    pub paper: Option<String>,
    /// Explicit sheet dimensions.
    #[serde(default)]
    pub canvas: Option<CanvasSpec>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(flatten)]
        delta: WheelDelta,
        #[serde(default)]
        modifiers: Modifiers,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    Drop {
        x: f64,
        y: f64,
        payload: String,
    },
    TextInput {
        text: String,
    },
    TextKey {
        key: String,
    },
    TextBlur,
    SetTool {
        tool: Tool,
    },
    RotateCanvas {
        #[serde(default = "default_clockwise")]
        clockwise: bool,
    },
    SetZoom {
        zoom: f64,
    },
}

fn default_clockwise() -> bool {
    true
}

/// Outcome of a replay run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub actions: Vec<Action>,
    pub assets: Vec<Asset>,
    pub selected: Option<AssetId>,
    pub workspace: Workspace,
    /// Interaction mode left live after the last event.
    pub mode: &'static str,
}

/// Read and parse a script file.
///
/// # Errors
///
/// [`ReplayError::Io`] when the file cannot be read, [`ReplayError::Json`]
/// when it is not a valid script.
pub fn load_script(path: &Path) -> Result<Script, ReplayError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
    parse_script(&raw)
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// [`ReplayError::Json`] when `raw` is not a valid script.
pub fn parse_script(raw: &str) -> Result<Script, ReplayError> {
    Ok(serde_json::from_str(raw)?)
}

/// Resolve the sheet: an explicit `paper_override` wins, then the script's
/// own `canvas`, then its `paper` name, then A4.
///
/// # Errors
///
/// [`ReplayError::UnknownPaper`] when the chosen name is not a standard size.
pub fn resolve_canvas(script: &Script, paper_override: Option<&str>) -> Result<CanvasSpec, ReplayError> {
    let name = match (paper_override, script.canvas) {
        (Some(name), _) => name,
        (None, Some(canvas)) => return Ok(canvas),
        (None, None) => script.paper.as_deref().unwrap_or("A4"),
    };
    PaperSize::from_name(name)
        .and_then(CanvasSpec::from_size)
        .ok_or_else(|| ReplayError::UnknownPaper(name.to_string()))
}

/// Run `script` through a fresh engine and collect the result.
///
/// # Errors
///
/// [`ReplayError::Config`] when `config` fails validation, or
/// [`ReplayError::UnknownPaper`] when the sheet cannot be resolved.
pub fn run(script: &Script, paper_override: Option<&str>, config: EngineConfig) -> Result<ReplayReport, ReplayError> {
    config.validate()?;
    let canvas = resolve_canvas(script, paper_override)?;

    let mut store = DocStore::with_canvas(canvas);
    store.load_snapshot(script.assets.clone());
    let mut core = EngineCore::with_config(store, config);
    core.set_viewport(script.viewport.width, script.viewport.height, script.viewport.dpr);

    info!(
        paper = ?canvas.size_name,
        assets = script.assets.len(),
        events = script.events.len(),
        "replay started"
    );

    let mut actions = Vec::new();
    for (index, event) in script.events.iter().enumerate() {
        let emitted = apply(&mut core, event);
        debug!(index, emitted = emitted.len(), mode = core.session.mode_name(), "event applied");
        actions.extend(emitted);
    }
    actions.extend(core.detach());

    info!(actions = actions.len(), assets = core.scene.len(), "replay finished");
    Ok(ReplayReport {
        actions,
        assets: core.scene.list_assets().to_vec(),
        selected: core.selection(),
        workspace: core.workspace,
        mode: core.session.mode_name(),
    })
}

fn apply(core: &mut EngineCore, event: &ScriptEvent) -> Vec<Action> {
    match event {
        ScriptEvent::PointerDown { x, y, button, modifiers } => core.on_pointer_down(Point::new(*x, *y), *button, *modifiers),
        ScriptEvent::PointerMove { x, y } => core.on_pointer_move(Point::new(*x, *y), Modifiers::default()),
        ScriptEvent::PointerUp { x, y, button } => core.on_pointer_up(Point::new(*x, *y), *button, Modifiers::default()),
        ScriptEvent::Wheel { x, y, delta, modifiers } => core.on_wheel(Point::new(*x, *y), *delta, *modifiers),
        ScriptEvent::DoubleClick { x, y } => core.on_double_click(Point::new(*x, *y)),
        ScriptEvent::Drop { x, y, payload } => core.on_drop(Point::new(*x, *y), payload),
        ScriptEvent::TextInput { text } => {
            core.on_text_input(text);
            Vec::new()
        }
        ScriptEvent::TextKey { key } => core.on_text_key(&Key(key.clone())),
        ScriptEvent::TextBlur => core.on_text_blur(),
        ScriptEvent::SetTool { tool } => core.set_tool(*tool),
        ScriptEvent::RotateCanvas { clockwise } => core.rotate_canvas(*clockwise),
        ScriptEvent::SetZoom { zoom } => core.set_zoom(*zoom),
    }
}
