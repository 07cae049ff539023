//! Millimeter / pixel conversion.
//!
//! Canvas content is authored in millimeters. The renderer works in CSS
//! pixels at a fixed ratio (96 dpi), further multiplied by workspace zoom.

#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

/// CSS pixels per millimeter at 96 dpi (96 / 25.4).
pub const DEFAULT_MM_TO_PX: f64 = 96.0 / 25.4;

/// Convert millimeters to pixels at the given px-per-mm scale.
#[must_use]
pub fn mm_to_px(mm: f64, scale: f64) -> f64 {
    mm * scale
}

/// Convert pixels to millimeters at the given px-per-mm scale.
///
/// A non-positive scale yields 0 rather than an infinity.
#[must_use]
pub fn px_to_mm(px: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    px / scale
}
