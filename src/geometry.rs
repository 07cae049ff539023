//! Asset geometry: bounding extents and manipulation-handle placement.
//!
//! Every asset kind maps to exactly one [`GeometryProvider`]. Extents are in
//! canvas millimeters and already include the asset's `scale`. Handle offsets
//! are expressed in the asset's own unrotated frame relative to its center;
//! the renderer (and hit-testing) rotates them with the asset body, while the
//! scale/height/rotation gestures measure plain canvas-space distances from
//! the center.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::camera::Point;
use crate::consts::{
    CORNER_HANDLE_MARGIN_MM, HANDLE_SIZE_MM, ROTATE_HANDLE_STANDOFF_MM, TEXT_CHAR_WIDTH_RATIO, TEXT_LINE_HEIGHT_RATIO,
    TEXT_MIN_WIDTH_MM,
};
use crate::doc::{Asset, AssetKind};

/// Width and height of an asset's bounding box, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// One of the four corner (uniform scale) handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    fn signs(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }
}

/// One of the two freeform height handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightEdge {
    Top,
    Bottom,
}

/// A manipulation handle on the selected asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Corner(Corner),
    Height(HeightEdge),
    Rotate,
}

/// Per-kind geometry rules.
pub trait GeometryProvider: Sync {
    /// Scaled bounding box of `asset`.
    fn extent(&self, asset: &Asset) -> Extent;

    /// Unscaled height used when the asset has no `height` attribute.
    fn default_height(&self) -> f64;

    /// Outward offset of the corner handles from the bounding box.
    fn corner_margin(&self) -> f64 {
        CORNER_HANDLE_MARGIN_MM
    }

    /// Whether the kind exposes the top/bottom height handles.
    fn has_height_handles(&self) -> bool {
        false
    }

    /// Whether a point in the asset's local (center-relative, unrotated)
    /// frame lies on the body.
    fn contains_local(&self, asset: &Asset, local: Point) -> bool {
        let e = self.extent(asset);
        local.x.abs() <= e.width * 0.5 && local.y.abs() <= e.height * 0.5
    }

    /// Center-relative, unrotated offset of `handle`, or `None` when the kind
    /// has no such handle.
    fn handle_offset(&self, asset: &Asset, handle: Handle) -> Option<Point> {
        let e = self.extent(asset);
        let half_w = e.width * 0.5;
        let half_h = e.height * 0.5;
        match handle {
            Handle::Corner(corner) => {
                let (sx, sy) = corner.signs();
                let m = self.corner_margin();
                Some(Point::new(sx * (half_w + m), sy * (half_h + m)))
            }
            Handle::Height(edge) if self.has_height_handles() => match edge {
                HeightEdge::Top => Some(Point::new(0.0, -half_h)),
                HeightEdge::Bottom => Some(Point::new(0.0, half_h)),
            },
            Handle::Height(_) => None,
            Handle::Rotate => Some(Point::new(0.0, -(half_h + ROTATE_HANDLE_STANDOFF_MM))),
        }
    }
}

/// Squares and circles: explicit width/height, 50 mm default.
pub struct BoxGeometry {
    ellipse: bool,
}

impl GeometryProvider for BoxGeometry {
    fn extent(&self, asset: &Asset) -> Extent {
        Extent {
            width: asset.width.unwrap_or(50.0) * asset.scale,
            height: asset.height.unwrap_or(self.default_height()) * asset.scale,
        }
    }

    fn default_height(&self) -> f64 {
        50.0
    }

    fn contains_local(&self, asset: &Asset, local: Point) -> bool {
        let e = self.extent(asset);
        if !self.ellipse {
            return local.x.abs() <= e.width * 0.5 && local.y.abs() <= e.height * 0.5;
        }
        let rx = e.width * 0.5;
        let ry = e.height * 0.5;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        (local.x / rx).powi(2) + (local.y / ry).powi(2) <= 1.0
    }
}

/// Single straight stroke: `width` is its length, the stroke its thickness.
pub struct LineGeometry;

impl GeometryProvider for LineGeometry {
    fn extent(&self, asset: &Asset) -> Extent {
        Extent {
            width: asset.width.unwrap_or(100.0) * asset.scale,
            height: asset.stroke_width.unwrap_or(self.default_height()) * asset.scale,
        }
    }

    fn default_height(&self) -> f64 {
        2.0
    }
}

/// Two parallel vertical rails; `height` is the run length.
pub struct DoubleLineGeometry;

impl GeometryProvider for DoubleLineGeometry {
    fn extent(&self, asset: &Asset) -> Extent {
        Extent {
            width: (asset.width.unwrap_or(2.0) + asset.line_gap.unwrap_or(8.0)) * asset.scale,
            height: asset.height.unwrap_or(self.default_height()) * asset.scale,
        }
    }

    fn default_height(&self) -> f64 {
        100.0
    }

    fn has_height_handles(&self) -> bool {
        true
    }
}

/// Text labels, measured from an estimated glyph advance.
pub struct TextGeometry;

impl TextGeometry {
    fn effective_font_size(asset: &Asset) -> f64 {
        asset.font_size.unwrap_or(16.0) * asset.scale
    }
}

impl GeometryProvider for TextGeometry {
    // Scale is folded into the effective font size, not applied again.
    #[allow(clippy::cast_precision_loss)]
    fn extent(&self, asset: &Asset) -> Extent {
        let font = Self::effective_font_size(asset);
        let chars = asset.display_text().chars().count() as f64;
        Extent {
            width: (chars * font * TEXT_CHAR_WIDTH_RATIO).max(TEXT_MIN_WIDTH_MM),
            height: font * TEXT_LINE_HEIGHT_RATIO,
        }
    }

    fn default_height(&self) -> f64 {
        16.0 * TEXT_LINE_HEIGHT_RATIO
    }

    fn corner_margin(&self) -> f64 {
        HANDLE_SIZE_MM * 0.5
    }
}

/// Icons and custom SVGs: explicit width/height, 24 mm default.
pub struct BoundedGeometry;

impl GeometryProvider for BoundedGeometry {
    fn extent(&self, asset: &Asset) -> Extent {
        Extent {
            width: asset.width.unwrap_or(24.0) * asset.scale,
            height: asset.height.unwrap_or(self.default_height()) * asset.scale,
        }
    }

    fn default_height(&self) -> f64 {
        24.0
    }
}

static SQUARE: BoxGeometry = BoxGeometry { ellipse: false };
static CIRCLE: BoxGeometry = BoxGeometry { ellipse: true };
static LINE: LineGeometry = LineGeometry;
static DOUBLE_LINE: DoubleLineGeometry = DoubleLineGeometry;
static TEXT: TextGeometry = TextGeometry;
static BOUNDED: BoundedGeometry = BoundedGeometry;

/// The geometry provider for an asset kind.
#[must_use]
pub fn provider_for(kind: AssetKind) -> &'static dyn GeometryProvider {
    match kind {
        AssetKind::Square => &SQUARE,
        AssetKind::Circle => &CIRCLE,
        AssetKind::Line => &LINE,
        AssetKind::DoubleLine => &DOUBLE_LINE,
        AssetKind::Text => &TEXT,
        AssetKind::Icon | AssetKind::CustomSvg => &BOUNDED,
    }
}

/// Scaled bounding box of `asset`.
#[must_use]
pub fn bounding_extent(asset: &Asset) -> Extent {
    provider_for(asset.kind).extent(asset)
}

/// The asset's `height`, or its kind default when unset (unscaled).
#[must_use]
pub fn height_or_default(asset: &Asset) -> f64 {
    asset.height.unwrap_or_else(|| provider_for(asset.kind).default_height())
}

/// All handles the asset exposes, in hit-test priority order.
#[must_use]
pub fn handles(asset: &Asset) -> Vec<Handle> {
    let mut out = vec![Handle::Rotate];
    out.extend(Corner::ALL.iter().map(|&c| Handle::Corner(c)));
    if provider_for(asset.kind).has_height_handles() {
        out.push(Handle::Height(HeightEdge::Top));
        out.push(Handle::Height(HeightEdge::Bottom));
    }
    out
}

/// Center-relative, unrotated offset of `handle` on `asset`.
#[must_use]
pub fn handle_offset(asset: &Asset, handle: Handle) -> Option<Point> {
    provider_for(asset.kind).handle_offset(asset, handle)
}

/// Absolute canvas-space position of `handle`, ignoring the asset's rotation.
#[must_use]
pub fn handle_position(asset: &Asset, handle: Handle) -> Option<Point> {
    let offset = handle_offset(asset, handle)?;
    Some(Point::new(asset.x + offset.x, asset.y + offset.y))
}

/// Absolute canvas-space position of `handle` as rendered, rotated with the body.
#[must_use]
pub fn handle_position_rotated(asset: &Asset, handle: Handle) -> Option<Point> {
    let offset = handle_offset(asset, handle)?.rotated_deg(asset.rotation);
    Some(Point::new(asset.x + offset.x, asset.y + offset.y))
}

/// Whether canvas-space point `p` lies on the asset body (rotation-aware).
#[must_use]
pub fn contains_point(asset: &Asset, p: Point) -> bool {
    let local = Point::new(p.x - asset.x, p.y - asset.y).rotated_deg(-asset.rotation);
    provider_for(asset.kind).contains_local(asset, local)
}
