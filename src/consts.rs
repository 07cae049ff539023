//! Shared numeric constants for the planboard crate.

// ── Scale / height clamps ───────────────────────────────────────

/// Smallest scale multiplier reachable by a corner-handle drag.
pub const MIN_SCALE: f64 = 0.1;

/// Largest scale multiplier reachable by a corner-handle drag.
pub const MAX_SCALE: f64 = 10.0;

/// Smallest height (mm) reachable by a height-handle drag.
pub const MIN_HEIGHT_MM: f64 = 10.0;

/// Largest height (mm) reachable by a height-handle drag.
pub const MAX_HEIGHT_MM: f64 = 500.0;

// ── Handles ─────────────────────────────────────────────────────

/// Outward offset of corner handles from the bounding box, in mm.
pub const CORNER_HANDLE_MARGIN_MM: f64 = 6.0;

/// Edge length of a rendered handle square, in mm.
pub const HANDLE_SIZE_MM: f64 = 8.0;

/// Standoff of the rotation handle above the top edge, in mm.
pub const ROTATE_HANDLE_STANDOFF_MM: f64 = 30.0;

// ── Text estimation ─────────────────────────────────────────────

/// Average glyph advance as a fraction of the font size.
pub const TEXT_CHAR_WIDTH_RATIO: f64 = 0.6;

/// Line height as a fraction of the font size.
pub const TEXT_LINE_HEIGHT_RATIO: f64 = 1.2;

/// Minimum estimated width of a text box, in mm.
pub const TEXT_MIN_WIDTH_MM: f64 = 50.0;

/// Placeholder shown (and measured) for a text asset with no text.
pub const TEXT_PLACEHOLDER: &str = "Enter text";

// ── Pen tool ────────────────────────────────────────────────────

/// Stroke color of pen-drawn double lines.
pub const PEN_LINE_COLOR: &str = "#2563eb";

/// Width of each rail of a pen-drawn double line.
pub const PEN_LINE_WIDTH: f64 = 2.0;

/// Stroke width of a pen-drawn double line.
pub const PEN_STROKE_WIDTH: f64 = 2.0;

/// Gap between the two rails of a pen-drawn double line.
pub const PEN_LINE_GAP: f64 = 8.0;
