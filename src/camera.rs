//! Workspace transform and screen ↔ canvas-millimeter conversion.
//!
//! The canvas is a fixed-size sheet displayed inside a pannable, zoomable,
//! quarter-turn rotatable workspace. Pointer events arrive in CSS pixels; all
//! asset geometry lives in canvas-space millimeters with the origin at the
//! sheet's top-left corner.
//!
//! Forward transform (canvas mm → screen), applied by the renderer:
//!
//! ```text
//! local  = mm * mm_to_px * zoom - zoomed_size / 2     (center-relative, axis aligned)
//! offset = rotate(local, canvas_rotation_deg)
//! screen = canvas_center + offset
//! ```
//!
//! [`Workspace::screen_to_canvas_mm`] is its exact inverse.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::Serialize;

use crate::doc::CanvasSpec;
use crate::units::{self, DEFAULT_MM_TO_PX};

/// A point in either screen (CSS px) or canvas (mm) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[must_use]
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) * 0.5, y: (self.y + other.y) * 0.5 }
    }

    /// Angle in degrees (`atan2`, screen orientation) from `self` to `other`.
    #[must_use]
    pub fn angle_to_deg(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }

    /// Rotate this vector about the origin by `deg` degrees (clockwise on screen).
    #[must_use]
    pub fn rotated_deg(self, deg: f64) -> Point {
        let (sin, cos) = deg.to_radians().sin_cos();
        Point { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos }
    }
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Pan/zoom/rotation state of the workspace around the canvas.
///
/// `pan_x` / `pan_y` (the canvas position) are in unzoomed CSS pixels: the
/// canvas center sits at `viewport_center + pan * zoom`.
/// `zoom` is screen pixels per canvas pixel (1.0 = no zoom).
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub mm_to_px: f64,
    pub canvas_rotation_deg: f64,
}

impl Default for Workspace {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, mm_to_px: DEFAULT_MM_TO_PX, canvas_rotation_deg: 0.0 }
    }
}

impl Workspace {
    /// Screen pixels per canvas millimeter at the current zoom.
    #[must_use]
    pub fn px_per_mm(&self) -> f64 {
        units::mm_to_px(1.0, self.mm_to_px) * self.zoom
    }

    /// Screen position of the canvas center for a viewport centered at `viewport_center`.
    #[must_use]
    pub fn canvas_center(&self, viewport_center: Point) -> Point {
        Point {
            x: viewport_center.x + self.pan_x * self.zoom,
            y: viewport_center.y + self.pan_y * self.zoom,
        }
    }

    /// Convert a screen-space pointer position to canvas-space millimeters.
    ///
    /// Returns the origin when no canvas spec is mounted or the transform is
    /// degenerate (non-positive zoom or ratio).
    #[must_use]
    pub fn screen_to_canvas_mm(&self, screen: Point, viewport_center: Point, spec: Option<&CanvasSpec>) -> Point {
        let Some(spec) = spec else {
            return Point::origin();
        };
        let px_per_mm = self.px_per_mm();
        if px_per_mm <= 0.0 || !px_per_mm.is_finite() {
            return Point::origin();
        }

        let center = self.canvas_center(viewport_center);
        let delta = Point::new(screen.x - center.x, screen.y - center.y);
        let unrotated = delta.rotated_deg(-self.canvas_rotation_deg);

        let zoomed_w = spec.width_mm * px_per_mm;
        let zoomed_h = spec.height_mm * px_per_mm;
        Point {
            x: units::px_to_mm(unrotated.x + zoomed_w * 0.5, px_per_mm),
            y: units::px_to_mm(unrotated.y + zoomed_h * 0.5, px_per_mm),
        }
    }

    /// Convert a canvas-space millimeter position to screen space.
    ///
    /// Inverse of [`Self::screen_to_canvas_mm`]; with no spec the canvas is
    /// treated as zero-sized and centered.
    #[must_use]
    pub fn canvas_mm_to_screen(&self, mm: Point, viewport_center: Point, spec: Option<&CanvasSpec>) -> Point {
        let px_per_mm = self.px_per_mm();
        let (zoomed_w, zoomed_h) = spec.map_or((0.0, 0.0), |s| (s.width_mm * px_per_mm, s.height_mm * px_per_mm));
        let local = Point::new(
            units::mm_to_px(mm.x, px_per_mm) - zoomed_w * 0.5,
            units::mm_to_px(mm.y, px_per_mm) - zoomed_h * 0.5,
        );
        let offset = local.rotated_deg(self.canvas_rotation_deg);
        let center = self.canvas_center(viewport_center);
        Point::new(center.x + offset.x, center.y + offset.y)
    }

    /// Convert a screen-space distance (pixels) to canvas millimeters.
    #[must_use]
    pub fn screen_dist_to_mm(&self, screen_dist: f64) -> f64 {
        units::px_to_mm(screen_dist, self.px_per_mm())
    }

    /// Shift the canvas by a raw screen-pixel delta.
    ///
    /// The pan offset is stored unzoomed, so the delta is divided by zoom to
    /// keep the sheet under the pointer.
    pub fn pan_by_screen_delta(&mut self, dx: f64, dy: f64) {
        if self.zoom <= 0.0 {
            return;
        }
        self.pan_x += dx / self.zoom;
        self.pan_y += dy / self.zoom;
    }
}
