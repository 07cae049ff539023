//! Input model: tools, modifier keys, mouse buttons, and the interaction session.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InteractionSession` is the single active manipulation mode, carrying
//! the snapshot captured at pointer-down that every subsequent move is
//! recomputed from. `PointerCapture` tracks whether the host currently holds
//! global move/up listeners for the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::AssetId;
use crate::geometry::{Corner, HeightEdge};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Two-click double-line pen.
    Pen,
}

/// Keyboard/mouse modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Alt/Option-drag duplicates the grabbed asset.
    #[must_use]
    pub fn duplicate(self) -> bool {
        self.alt
    }

    /// Ctrl or Cmd turns wheel scrolling into zoom.
    #[must_use]
    pub fn zoom(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Enter"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
}

/// The active manipulation mode and its gesture-start snapshot.
///
/// Exactly one variant is live at a time; transitions replace the whole value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionSession {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the workspace around the canvas.
    PanningCanvas {
        /// Screen position of the previous pointer event, for incremental deltas.
        last_screen: Point,
    },
    /// Moving an asset; its center snaps to the pointer.
    DraggingAsset {
        id: AssetId,
    },
    /// Uniformly scaling an asset from a corner handle.
    ScalingAsset {
        id: AssetId,
        handle: Corner,
        initial_scale: f64,
        /// Pointer distance (mm) from the asset center at pointer-down.
        initial_distance_mm: f64,
    },
    /// Freeform height resize from a top/bottom handle.
    AdjustingHeight {
        id: AssetId,
        handle: HeightEdge,
        initial_height: f64,
        /// Absolute vertical pointer distance (mm) from the center at pointer-down.
        initial_distance_mm: f64,
    },
    /// Rotating an asset around its center.
    RotatingAsset {
        id: AssetId,
        initial_rotation_deg: f64,
        /// `atan2` angle from center to pointer at pointer-down.
        initial_pointer_angle_deg: f64,
    },
    /// Pen tool between its first and second click.
    PenDrawing {
        start_mm: Option<Point>,
    },
}

impl InteractionSession {
    /// The asset the session manipulates, if any.
    #[must_use]
    pub fn target_id(&self) -> Option<AssetId> {
        match self {
            Self::DraggingAsset { id }
            | Self::ScalingAsset { id, .. }
            | Self::AdjustingHeight { id, .. }
            | Self::RotatingAsset { id, .. } => Some(*id),
            Self::Idle | Self::PanningCanvas { .. } | Self::PenDrawing { .. } => None,
        }
    }

    /// Whether this is a press-drag-release gesture (resolved by pointer-up).
    #[must_use]
    pub fn is_drag_gesture(&self) -> bool {
        !matches!(self, Self::Idle | Self::PenDrawing { .. })
    }

    /// Short mode name for logging.
    #[must_use]
    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PanningCanvas { .. } => "panning-canvas",
            Self::DraggingAsset { .. } => "dragging-asset",
            Self::ScalingAsset { .. } => "scaling-asset",
            Self::AdjustingHeight { .. } => "adjusting-height",
            Self::RotatingAsset { .. } => "rotating-asset",
            Self::PenDrawing { .. } => "pen-drawing",
        }
    }
}

/// Ownership of the host's global pointer-move/up listeners.
///
/// Acquired when a drag gesture starts and released exactly once when it
/// resolves; both calls report whether the host must act.
#[derive(Debug, Default)]
pub struct PointerCapture {
    held: bool,
}

impl PointerCapture {
    /// Take the capture. Returns `true` if it was not already held.
    pub fn acquire(&mut self) -> bool {
        !std::mem::replace(&mut self.held, true)
    }

    /// Drop the capture. Returns `true` if it was held.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.held, false)
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }
}
