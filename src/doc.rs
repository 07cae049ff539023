//! Document model: canvas sheet, placed assets, and the scene store.
//!
//! This module defines what is on the canvas (`Asset`, `AssetKind`), a
//! sparse-update type for incremental edits (`AssetPatch`), the physical sheet
//! (`CanvasSpec`, `PaperSize`), the `SceneGateway` boundary the interaction
//! engine talks to, and `DocStore`, the in-memory gateway used by the replay
//! tool and tests.
//!
//! List order is draw order: the last asset is topmost for both rendering and
//! hit-testing.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{MAX_SCALE, MIN_SCALE, PEN_LINE_COLOR, TEXT_PLACEHOLDER};

/// Unique identifier for a placed asset.
pub type AssetId = Uuid;

// =============================================================
// Canvas sheet
// =============================================================

/// Standard paper sizes a canvas can be set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    /// Free-form dimensions; carried explicitly by the `CanvasSpec`.
    Custom,
}

impl PaperSize {
    /// Portrait `(width, height)` in millimeters. `None` for [`PaperSize::Custom`].
    #[must_use]
    pub fn dimensions_mm(self) -> Option<(f64, f64)> {
        match self {
            Self::A0 => Some((841.0, 1189.0)),
            Self::A1 => Some((594.0, 841.0)),
            Self::A2 => Some((420.0, 594.0)),
            Self::A3 => Some((297.0, 420.0)),
            Self::A4 => Some((210.0, 297.0)),
            Self::A5 => Some((148.0, 210.0)),
            Self::Letter => Some((215.9, 279.4)),
            Self::Legal => Some((215.9, 355.6)),
            Self::Tabloid => Some((279.4, 431.8)),
            Self::Custom => None,
        }
    }

    /// Parse a size name case-insensitively (`"a4"`, `"Letter"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let size = match name.to_ascii_lowercase().as_str() {
            "a0" => Self::A0,
            "a1" => Self::A1,
            "a2" => Self::A2,
            "a3" => Self::A3,
            "a4" => Self::A4,
            "a5" => Self::A5,
            "letter" => Self::Letter,
            "legal" => Self::Legal,
            "tabloid" => Self::Tabloid,
            "custom" => Self::Custom,
            _ => return None,
        };
        Some(size)
    }
}

/// The physical sheet being composed. Read-only to the interaction engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSpec {
    pub size_name: PaperSize,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl CanvasSpec {
    /// Build a portrait spec for a standard size. `None` for [`PaperSize::Custom`].
    #[must_use]
    pub fn from_size(size: PaperSize) -> Option<Self> {
        let (width_mm, height_mm) = size.dimensions_mm()?;
        Some(Self { size_name: size, width_mm, height_mm })
    }

    /// Build a spec with explicit dimensions.
    #[must_use]
    pub fn custom(width_mm: f64, height_mm: f64) -> Self {
        Self { size_name: PaperSize::Custom, width_mm, height_mm }
    }
}

// =============================================================
// Assets
// =============================================================

/// The type tag of a placed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Square,
    Circle,
    /// Single straight stroke; `width` is its length.
    Line,
    /// Two parallel rails; `height` is the run length (pen tool output).
    DoubleLine,
    Text,
    Icon,
    CustomSvg,
}

impl AssetKind {
    /// The wire tag used in drag payloads and serialized scenes.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Line => "line",
            Self::DoubleLine => "double-line",
            Self::Text => "text",
            Self::Icon => "icon",
            Self::CustomSvg => "custom-svg",
        }
    }

    /// Parse a wire tag. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.trim() {
            "square" => Self::Square,
            "circle" => Self::Circle,
            "line" => Self::Line,
            "double-line" => Self::DoubleLine,
            "text" => Self::Text,
            "icon" => Self::Icon,
            "custom-svg" => Self::CustomSvg,
            _ => return None,
        };
        Some(kind)
    }
}

fn default_scale() -> f64 {
    1.0
}

/// One placed object on the canvas.
///
/// `x` / `y` is the center in canvas millimeters. Optional attributes fall
/// back to per-kind defaults (see [`crate::geometry`]) when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default = "Uuid::new_v4")]
    pub id: AssetId,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub x: f64,
    pub y: f64,
    /// Uniform size multiplier, kept within `[MIN_SCALE, MAX_SCALE]`.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Clockwise rotation in degrees around the center. Not renormalized.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl Asset {
    /// A bare asset with a fresh id and no optional attributes set.
    #[must_use]
    pub fn new(kind: AssetKind, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            scale: 1.0,
            rotation: 0.0,
            width: None,
            height: None,
            stroke_width: None,
            stroke_color: None,
            fill_color: None,
            background_color: None,
            line_gap: None,
            line_color: None,
            text: None,
            font_size: None,
            font_family: None,
            text_color: None,
        }
    }

    /// A new asset with the attribute defaults a palette drop applies.
    #[must_use]
    pub fn with_defaults(kind: AssetKind, x: f64, y: f64) -> Self {
        let mut asset = Self::new(kind, x, y);
        match kind {
            AssetKind::Square | AssetKind::Circle => {
                asset.width = Some(50.0);
                asset.height = Some(50.0);
                asset.stroke_width = Some(2.0);
                asset.stroke_color = Some("#000000".into());
                asset.fill_color = Some("transparent".into());
            }
            AssetKind::Line => {
                asset.width = Some(100.0);
                asset.stroke_width = Some(2.0);
                asset.stroke_color = Some("#000000".into());
            }
            AssetKind::DoubleLine => {
                asset.width = Some(2.0);
                asset.height = Some(100.0);
                asset.stroke_width = Some(2.0);
                asset.line_gap = Some(8.0);
                asset.stroke_color = Some(PEN_LINE_COLOR.into());
                asset.line_color = Some(PEN_LINE_COLOR.into());
            }
            AssetKind::Text => {
                asset.text = Some(TEXT_PLACEHOLDER.into());
                asset.font_size = Some(16.0);
                asset.font_family = Some("Arial".into());
                asset.text_color = Some("#000000".into());
            }
            AssetKind::Icon | AssetKind::CustomSvg => {
                asset.width = Some(24.0);
                asset.height = Some(24.0);
            }
        }
        asset
    }

    /// Center position as a point.
    #[must_use]
    pub fn center(&self) -> crate::camera::Point {
        crate::camera::Point::new(self.x, self.y)
    }

    /// Display text, falling back to the placeholder when unset.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or(TEXT_PLACEHOLDER)
    }
}

/// Sparse update for an asset. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl AssetPatch {
    /// Patch that moves an asset's center.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// Merge this patch into `asset`. Unspecified fields keep their value;
    /// scale is clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn apply_to(&self, asset: &mut Asset) {
        if let Some(x) = self.x {
            asset.x = x;
        }
        if let Some(y) = self.y {
            asset.y = y;
        }
        if let Some(scale) = self.scale {
            asset.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
        if let Some(rotation) = self.rotation {
            asset.rotation = rotation;
        }
        merge(&mut asset.width, self.width);
        merge(&mut asset.height, self.height);
        merge(&mut asset.stroke_width, self.stroke_width);
        merge(&mut asset.line_gap, self.line_gap);
        merge(&mut asset.font_size, self.font_size);
        merge_str(&mut asset.stroke_color, self.stroke_color.as_ref());
        merge_str(&mut asset.fill_color, self.fill_color.as_ref());
        merge_str(&mut asset.background_color, self.background_color.as_ref());
        merge_str(&mut asset.line_color, self.line_color.as_ref());
        merge_str(&mut asset.text, self.text.as_ref());
        merge_str(&mut asset.font_family, self.font_family.as_ref());
        merge_str(&mut asset.text_color, self.text_color.as_ref());
    }
}

fn merge(slot: &mut Option<f64>, value: Option<f64>) {
    if value.is_some() {
        *slot = value;
    }
}

fn merge_str(slot: &mut Option<String>, value: Option<&String>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}

// =============================================================
// Scene gateway
// =============================================================

/// The scene store operations the interaction engine requires.
///
/// Implementations own every asset; the engine only holds ids between events.
pub trait SceneGateway {
    /// All assets in draw order (last is topmost).
    fn list_assets(&self) -> &[Asset];

    /// Look up an asset by id.
    fn get_asset(&self, id: &AssetId) -> Option<&Asset>;

    /// Create an asset of `kind` centered at `(x, y)` with kind defaults applied.
    fn create_asset(&mut self, kind: AssetKind, x: f64, y: f64) -> AssetId;

    /// Insert a fully-specified record as-is (duplication, pen lines).
    fn insert_asset(&mut self, asset: Asset);

    /// Merge `patch` into the asset. Returns false (and changes nothing) if absent.
    fn update_asset(&mut self, id: &AssetId, patch: &AssetPatch) -> bool;

    /// Set or clear the selected asset.
    fn select_asset(&mut self, id: Option<AssetId>);

    /// The currently selected asset id.
    fn selected_asset_id(&self) -> Option<AssetId>;

    /// The mounted canvas sheet, if any.
    fn canvas_spec(&self) -> Option<&CanvasSpec>;
}

/// In-memory scene store.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    assets: Vec<Asset>,
    selected: Option<AssetId>,
    canvas: Option<CanvasSpec>,
}

impl DocStore {
    /// Create an empty store with no canvas mounted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with `spec` mounted.
    #[must_use]
    pub fn with_canvas(spec: CanvasSpec) -> Self {
        Self { canvas: Some(spec), ..Self::default() }
    }

    /// Mount or unmount the canvas sheet.
    pub fn set_canvas_spec(&mut self, spec: Option<CanvasSpec>) {
        self.canvas = spec;
    }

    /// Remove an asset by id, returning it if it was present. Clears the
    /// selection when the removed asset was selected.
    pub fn remove(&mut self, id: &AssetId) -> Option<Asset> {
        let idx = self.assets.iter().position(|a| a.id == *id)?;
        if self.selected == Some(*id) {
            self.selected = None;
        }
        Some(self.assets.remove(idx))
    }

    /// Replace all assets with a full snapshot. The selection is cleared.
    pub fn load_snapshot(&mut self, assets: Vec<Asset>) {
        self.assets = assets;
        self.selected = None;
    }

    /// Number of assets currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if the store contains no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl SceneGateway for DocStore {
    fn list_assets(&self) -> &[Asset] {
        &self.assets
    }

    fn get_asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == *id)
    }

    fn create_asset(&mut self, kind: AssetKind, x: f64, y: f64) -> AssetId {
        let asset = Asset::with_defaults(kind, x, y);
        let id = asset.id;
        self.assets.push(asset);
        id
    }

    fn insert_asset(&mut self, asset: Asset) {
        if let Some(existing) = self.assets.iter_mut().find(|a| a.id == asset.id) {
            *existing = asset;
        } else {
            self.assets.push(asset);
        }
    }

    fn update_asset(&mut self, id: &AssetId, patch: &AssetPatch) -> bool {
        let Some(asset) = self.assets.iter_mut().find(|a| a.id == *id) else {
            return false;
        };
        patch.apply_to(asset);
        true
    }

    fn select_asset(&mut self, id: Option<AssetId>) {
        self.selected = id;
    }

    fn selected_asset_id(&self) -> Option<AssetId> {
        self.selected
    }

    fn canvas_spec(&self) -> Option<&CanvasSpec> {
        self.canvas.as_ref()
    }
}
