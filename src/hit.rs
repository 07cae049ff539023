#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{Asset, AssetId};
use crate::geometry::{self, Handle};

/// Which part of an asset was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub asset_id: AssetId,
    pub part: HitPart,
}

/// Test which asset (if any) is under canvas-space point `p`.
///
/// Handles are only live on the selected asset and are checked first, at
/// their rendered (rotated) positions within `handle_radius_mm`. Bodies are
/// then checked topmost-first (reverse list order).
#[must_use]
pub fn hit_test(p: Point, assets: &[Asset], selected: Option<AssetId>, handle_radius_mm: f64) -> Option<Hit> {
    if let Some(sel) = selected.and_then(|id| assets.iter().find(|a| a.id == id)) {
        if let Some(handle) = handle_at(p, sel, handle_radius_mm) {
            return Some(Hit { asset_id: sel.id, part: HitPart::Handle(handle) });
        }
    }

    assets
        .iter()
        .rev()
        .find(|a| geometry::contains_point(a, p))
        .map(|a| Hit { asset_id: a.id, part: HitPart::Body })
}

/// The closest handle of `asset` within `radius` of `p`.
fn handle_at(p: Point, asset: &Asset, radius: f64) -> Option<Handle> {
    geometry::handles(asset)
        .into_iter()
        .filter_map(|h| geometry::handle_position_rotated(asset, h).map(|pos| (h, pos.distance_to(p))))
        .filter(|(_, dist)| *dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}
