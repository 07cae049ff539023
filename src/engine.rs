use serde::Serialize;
use tracing::{debug, warn};

use crate::camera::{Point, Workspace, normalize_degrees_360};
use crate::config::EngineConfig;
use crate::consts::{
    HANDLE_SIZE_MM, MAX_HEIGHT_MM, MAX_SCALE, MIN_HEIGHT_MM, MIN_SCALE, PEN_LINE_COLOR, PEN_LINE_GAP, PEN_LINE_WIDTH,
    PEN_STROKE_WIDTH,
};
use crate::doc::{Asset, AssetId, AssetKind, AssetPatch, DocStore, SceneGateway};
use crate::geometry::{self, Handle};
use crate::hit::{self, HitPart};
use crate::input::{Button, InteractionSession, Key, Modifiers, PointerCapture, Tool, UiState, WheelDelta};
use crate::text_edit::{TextEditOutcome, TextEditSession};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Action {
    ObjectCreated(Asset),
    ObjectUpdated { id: AssetId, fields: AssetPatch },
    SelectionChanged(Option<AssetId>),
    /// Open an inline editor over the asset, seeded with `text`.
    EditTextRequested { id: AssetId, text: String },
    /// Close the inline editor.
    EditTextClosed { id: AssetId },
    /// Register global pointer-move/up listeners for the gesture.
    CapturePointer,
    /// Deregister the global listeners.
    ReleasePointer,
    SetCursor(String),
    RenderNeeded,
}

/// Interaction engine: turns pointer events into scene mutations.
///
/// Owns the workspace transform and the single [`InteractionSession`]; the
/// scene itself lives behind the [`SceneGateway`].
pub struct EngineCore<S: SceneGateway = DocStore> {
    pub scene: S,
    pub workspace: Workspace,
    pub ui: UiState,
    pub session: InteractionSession,
    pub text_edit: Option<TextEditSession>,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    capture: PointerCapture,
    /// Pen session set aside while a middle-button pan runs.
    suspended_pen: Option<InteractionSession>,
}

impl Default for EngineCore<DocStore> {
    fn default() -> Self {
        Self::new(DocStore::new())
    }
}

impl<S: SceneGateway> EngineCore<S> {
    #[must_use]
    pub fn new(scene: S) -> Self {
        Self::with_config(scene, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(scene: S, config: EngineConfig) -> Self {
        let workspace = Workspace { mm_to_px: config.mm_to_px, ..Workspace::default() };
        Self {
            scene,
            workspace,
            ui: UiState::default(),
            session: InteractionSession::Idle,
            text_edit: None,
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            capture: PointerCapture::default(),
            suspended_pen: None,
        }
    }

    // --- Viewport / workspace ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5)
    }

    /// Convert a CSS-pixel position to backing-store (device) pixels.
    #[must_use]
    pub fn screen_to_device_px(&self, screen: Point) -> Point {
        Point::new(screen.x * self.dpr, screen.y * self.dpr)
    }

    /// Pointer position in canvas millimeters (origin when no canvas is mounted).
    #[must_use]
    pub fn screen_to_canvas_mm(&self, screen: Point) -> Point {
        self.workspace.screen_to_canvas_mm(screen, self.viewport_center(), self.scene.canvas_spec())
    }

    /// Canvas millimeters to screen position, as the renderer places them.
    #[must_use]
    pub fn canvas_mm_to_screen(&self, mm: Point) -> Point {
        self.workspace.canvas_mm_to_screen(mm, self.viewport_center(), self.scene.canvas_spec())
    }

    /// Set workspace zoom, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        let clamped = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        if (clamped - self.workspace.zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        self.workspace.zoom = clamped;
        debug!(zoom = clamped, "workspace zoom changed");
        vec![Action::RenderNeeded]
    }

    /// Turn the whole canvas a quarter turn.
    pub fn rotate_canvas(&mut self, clockwise: bool) -> Vec<Action> {
        let step = if clockwise { 90.0 } else { -90.0 };
        self.workspace.canvas_rotation_deg = normalize_degrees_360(self.workspace.canvas_rotation_deg + step);
        debug!(rotation = self.workspace.canvas_rotation_deg, "canvas rotated");
        vec![Action::RenderNeeded]
    }

    // --- Tool ---

    /// Set the active tool. Leaving the pen drops any pending first click.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let mut actions = self.finish_gesture();
        if self.ui.tool == Tool::Pen && tool != Tool::Pen {
            self.session = InteractionSession::Idle;
            self.suspended_pen = None;
        }
        self.ui.tool = tool;
        let cursor = if tool == Tool::Pen { "crosshair" } else { "default" };
        actions.push(Action::SetCursor(cursor.into()));
        actions
    }

    // --- Queries ---

    /// The currently selected asset, if any.
    #[must_use]
    pub fn selection(&self) -> Option<AssetId> {
        self.scene.selected_asset_id()
    }

    /// Look up an asset by id.
    #[must_use]
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.scene.get_asset(id)
    }

    /// Whether the host should currently hold global pointer listeners.
    #[must_use]
    pub fn pointer_captured(&self) -> bool {
        self.capture.is_held()
    }

    // --- Pointer events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        // A gesture still live here lost its pointer-up; resolve it first.
        let mut actions = self.finish_gesture();
        if self.text_edit.is_some() {
            actions.extend(self.on_text_blur());
        }

        match button {
            Button::Middle => {
                self.begin(InteractionSession::PanningCanvas { last_screen: screen_pt }, &mut actions);
                actions.push(Action::SetCursor("grabbing".into()));
                return actions;
            }
            Button::Secondary => return actions,
            Button::Primary => {}
        }

        if self.scene.canvas_spec().is_none() {
            debug!("pointer down ignored: no canvas mounted");
            return actions;
        }

        let p = self.screen_to_canvas_mm(screen_pt);
        if self.ui.tool == Tool::Pen {
            self.pen_click(p, &mut actions);
            return actions;
        }

        // Never smaller than the drawn handle square.
        let radius = self.workspace.screen_dist_to_mm(self.config.handle_hit_radius_px).max(HANDLE_SIZE_MM * 0.5);
        let hit = hit::hit_test(p, self.scene.list_assets(), self.scene.selected_asset_id(), radius);
        let Some(hit) = hit else {
            if self.scene.selected_asset_id().is_some() {
                self.scene.select_asset(None);
                actions.push(Action::SelectionChanged(None));
                actions.push(Action::RenderNeeded);
            }
            self.begin(InteractionSession::PanningCanvas { last_screen: screen_pt }, &mut actions);
            return actions;
        };

        let Some(asset) = self.scene.get_asset(&hit.asset_id) else {
            return actions;
        };
        let center = asset.center();
        let session = match hit.part {
            HitPart::Body => {
                let target = if modifiers.duplicate() {
                    let clone = self.duplicate(hit.asset_id);
                    if let Some(created) = clone.as_ref().and_then(|id| self.scene.get_asset(id)) {
                        actions.push(Action::ObjectCreated(created.clone()));
                    }
                    clone.unwrap_or(hit.asset_id)
                } else {
                    hit.asset_id
                };
                self.select(Some(target), &mut actions);
                InteractionSession::DraggingAsset { id: target }
            }
            HitPart::Handle(Handle::Corner(handle)) => InteractionSession::ScalingAsset {
                id: hit.asset_id,
                handle,
                initial_scale: asset.scale,
                initial_distance_mm: center.distance_to(p),
            },
            HitPart::Handle(Handle::Height(handle)) => InteractionSession::AdjustingHeight {
                id: hit.asset_id,
                handle,
                initial_height: geometry::height_or_default(asset),
                initial_distance_mm: (p.y - center.y).abs(),
            },
            HitPart::Handle(Handle::Rotate) => InteractionSession::RotatingAsset {
                id: hit.asset_id,
                initial_rotation_deg: asset.rotation,
                initial_pointer_angle_deg: center.angle_to_deg(p),
            },
        };
        self.begin(session, &mut actions);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.screen_to_canvas_mm(screen_pt);
        match self.session.clone() {
            InteractionSession::RotatingAsset { id, initial_rotation_deg, initial_pointer_angle_deg } => {
                let Some(center) = self.target_center(&id) else {
                    return Vec::new();
                };
                let angle = center.angle_to_deg(p);
                let rotation = initial_rotation_deg + (angle - initial_pointer_angle_deg);
                self.update(id, AssetPatch { rotation: Some(rotation), ..Default::default() })
            }
            InteractionSession::ScalingAsset { id, initial_scale, initial_distance_mm, .. } => {
                let Some(center) = self.target_center(&id) else {
                    return Vec::new();
                };
                let ratio = distance_ratio(center.distance_to(p), initial_distance_mm);
                let scale = (initial_scale * ratio).clamp(MIN_SCALE, MAX_SCALE);
                self.update(id, AssetPatch { scale: Some(scale), ..Default::default() })
            }
            InteractionSession::AdjustingHeight { id, initial_height, initial_distance_mm, .. } => {
                let Some(center) = self.target_center(&id) else {
                    return Vec::new();
                };
                let ratio = distance_ratio((p.y - center.y).abs(), initial_distance_mm);
                let height = (initial_height * ratio).clamp(MIN_HEIGHT_MM, MAX_HEIGHT_MM);
                self.update(id, AssetPatch { height: Some(height), ..Default::default() })
            }
            InteractionSession::DraggingAsset { id } => {
                if self.target_center(&id).is_none() {
                    return Vec::new();
                }
                self.update(id, AssetPatch::position(p.x, p.y))
            }
            InteractionSession::PanningCanvas { last_screen } => {
                self.workspace.pan_by_screen_delta(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.session = InteractionSession::PanningCanvas { last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InteractionSession::Idle | InteractionSession::PenDrawing { .. } => Vec::new(),
        }
    }

    /// Pointer released anywhere: every drag gesture resolves to idle.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.finish_gesture()
    }

    /// Scroll: pans the workspace, or zooms when Ctrl/Cmd is held.
    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.zoom() {
            if delta.dy.abs() < f64::EPSILON {
                return Vec::new();
            }
            let factor = if delta.dy < 0.0 { self.config.zoom_step } else { 1.0 / self.config.zoom_step };
            return self.set_zoom(self.workspace.zoom * factor);
        }
        self.workspace.pan_by_screen_delta(-delta.dx, -delta.dy);
        vec![Action::RenderNeeded]
    }

    /// Double-click opens the inline editor on a text asset.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.text_edit.is_some() || self.scene.canvas_spec().is_none() {
            return Vec::new();
        }
        let p = self.screen_to_canvas_mm(screen_pt);
        let Some(asset) = self.scene.list_assets().iter().rev().find(|a| geometry::contains_point(a, p)) else {
            return Vec::new();
        };
        if asset.kind != AssetKind::Text {
            return Vec::new();
        }
        let session = TextEditSession::begin(asset);
        let action = Action::EditTextRequested { id: session.id, text: session.draft.clone() };
        debug!(id = %session.id, "text edit started");
        self.text_edit = Some(session);
        vec![action]
    }

    /// Drop from the external palette: `payload` is an asset type tag.
    pub fn on_drop(&mut self, screen_pt: Point, payload: &str) -> Vec<Action> {
        let Some(kind) = AssetKind::from_tag(payload) else {
            warn!(payload, "drop ignored: unknown asset type");
            return Vec::new();
        };
        if self.scene.canvas_spec().is_none() {
            warn!(kind = kind.tag(), "drop ignored: no canvas mounted");
            return Vec::new();
        }
        let p = self.screen_to_canvas_mm(screen_pt);
        let id = self.scene.create_asset(kind, p.x, p.y);
        debug!(%id, kind = kind.tag(), x = p.x, y = p.y, "asset dropped");

        let mut actions = Vec::new();
        if let Some(created) = self.scene.get_asset(&id) {
            actions.push(Action::ObjectCreated(created.clone()));
        }
        self.select(Some(id), &mut actions);
        actions
    }

    // --- Inline text editing ---

    /// The host editor's contents changed.
    pub fn on_text_input(&mut self, text: &str) {
        if let Some(edit) = self.text_edit.as_mut() {
            edit.set_draft(text);
        }
    }

    /// A key was pressed inside the host editor.
    pub fn on_text_key(&mut self, key: &Key) -> Vec<Action> {
        let Some(edit) = self.text_edit.as_ref() else {
            return Vec::new();
        };
        let outcome = edit.on_key(key, self.config.escape_commits_text);
        self.resolve_text_edit(outcome)
    }

    /// The host editor lost focus.
    pub fn on_text_blur(&mut self) -> Vec<Action> {
        let Some(edit) = self.text_edit.as_ref() else {
            return Vec::new();
        };
        let outcome = edit.on_blur();
        self.resolve_text_edit(outcome)
    }

    /// Tear down: release any held capture and close the editor.
    pub fn detach(&mut self) -> Vec<Action> {
        let mut actions = self.finish_gesture();
        if self.text_edit.is_some() {
            actions.extend(self.on_text_blur());
        }
        actions
    }

    // --- Internals ---

    fn begin(&mut self, session: InteractionSession, actions: &mut Vec<Action>) {
        debug!(mode = session.mode_name(), target = ?session.target_id(), "gesture started");
        if matches!(self.session, InteractionSession::PenDrawing { .. }) {
            self.suspended_pen = Some(std::mem::take(&mut self.session));
        }
        self.session = session;
        if self.capture.acquire() {
            actions.push(Action::CapturePointer);
        }
    }

    /// The single path back to idle for drag gestures. A pending pen click
    /// survives, including one set aside by a middle-button pan.
    fn finish_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let prev = std::mem::take(&mut self.session);
        if prev.is_drag_gesture() {
            debug!(mode = prev.mode_name(), target = ?prev.target_id(), "gesture released");
            if let Some(pen) = self.suspended_pen.take() {
                self.session = pen;
            }
            if matches!(prev, InteractionSession::PanningCanvas { .. }) {
                let cursor = if self.ui.tool == Tool::Pen { "crosshair" } else { "default" };
                actions.push(Action::SetCursor(cursor.into()));
            }
        } else {
            self.session = prev;
        }
        if self.capture.release() {
            actions.push(Action::ReleasePointer);
        }
        actions
    }

    fn target_center(&self, id: &AssetId) -> Option<Point> {
        let center = self.scene.get_asset(id).map(Asset::center);
        if center.is_none() {
            debug!(%id, mode = self.session.mode_name(), "gesture target missing; move ignored");
        }
        center
    }

    fn update(&mut self, id: AssetId, patch: AssetPatch) -> Vec<Action> {
        if !self.scene.update_asset(&id, &patch) {
            return Vec::new();
        }
        vec![Action::ObjectUpdated { id, fields: patch }, Action::RenderNeeded]
    }

    fn select(&mut self, id: Option<AssetId>, actions: &mut Vec<Action>) {
        if self.scene.selected_asset_id() == id {
            return;
        }
        self.scene.select_asset(id);
        actions.push(Action::SelectionChanged(id));
        actions.push(Action::RenderNeeded);
    }

    /// Clone `source` offset by the duplicate offset; returns the clone's id.
    fn duplicate(&mut self, source: AssetId) -> Option<AssetId> {
        let mut clone = self.scene.get_asset(&source)?.clone();
        clone.id = uuid::Uuid::new_v4();
        clone.x += self.config.duplicate_offset_mm;
        clone.y += self.config.duplicate_offset_mm;
        let id = clone.id;
        self.scene.insert_asset(clone);
        debug!(%source, %id, "asset duplicated");
        Some(id)
    }

    fn pen_click(&mut self, p: Point, actions: &mut Vec<Action>) {
        let InteractionSession::PenDrawing { start_mm: Some(start) } = self.session else {
            debug!(x = p.x, y = p.y, "pen start point");
            self.session = InteractionSession::PenDrawing { start_mm: Some(p) };
            actions.push(Action::RenderNeeded);
            return;
        };

        let line = pen_line(start, p);
        let id = line.id;
        self.scene.insert_asset(line.clone());
        debug!(%id, length = line.height.unwrap_or_default(), "pen line created");
        actions.push(Action::ObjectCreated(line));
        self.select(Some(id), actions);
        self.session = InteractionSession::Idle;
        self.ui.tool = Tool::Select;
        actions.push(Action::SetCursor("default".into()));
    }

    fn resolve_text_edit(&mut self, outcome: TextEditOutcome) -> Vec<Action> {
        let Some(edit) = self.text_edit.take_if(|_| outcome != TextEditOutcome::Continue) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if let TextEditOutcome::Commit(text) = outcome {
            actions.extend(self.update(edit.id, AssetPatch { text: Some(text), ..Default::default() }));
        }
        debug!(id = %edit.id, "text edit closed");
        actions.push(Action::EditTextClosed { id: edit.id });
        actions
    }
}

/// `current / initial`, treating a zero-length start as a unit ratio.
fn distance_ratio(current: f64, initial: f64) -> f64 {
    if initial.abs() < f64::EPSILON {
        return 1.0;
    }
    current / initial
}

/// A double line running from `start` to `end`: centered on the midpoint,
/// `height` the run length, rotated so its long axis follows the stroke.
fn pen_line(start: Point, end: Point) -> Asset {
    let center = start.midpoint(end);
    let mut line = Asset::new(AssetKind::DoubleLine, center.x, center.y);
    line.height = Some(start.distance_to(end));
    line.width = Some(PEN_LINE_WIDTH);
    line.stroke_width = Some(PEN_STROKE_WIDTH);
    line.line_gap = Some(PEN_LINE_GAP);
    line.stroke_color = Some(PEN_LINE_COLOR.into());
    line.line_color = Some(PEN_LINE_COLOR.into());
    if start != end {
        line.rotation = start.angle_to_deg(end) - 90.0;
    }
    line
}
