//! Engine configuration parsed from defaults or environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::units::DEFAULT_MM_TO_PX;

pub const DEFAULT_DUPLICATE_OFFSET_MM: f64 = 5.0;
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;
pub const DEFAULT_HANDLE_HIT_RADIUS_PX: f64 = 8.0;

/// Error returned by [`EngineConfig::from_env`] and [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable is set but does not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
    /// A ratio, radius, or zoom bound is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// `min_zoom` is larger than `max_zoom`.
    #[error("min zoom {min} exceeds max zoom {max}")]
    ZoomRange { min: f64, max: f64 },
}

/// Tunables the interaction engine reads on every event.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// CSS pixels per canvas millimeter before zoom.
    pub mm_to_px: f64,
    /// Offset (both axes) applied to a duplicate-on-drag clone.
    pub duplicate_offset_mm: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplicative zoom factor per wheel notch.
    pub zoom_step: f64,
    /// Screen-space slop around handle centers.
    pub handle_hit_radius_px: f64,
    /// Escape during inline text editing commits the draft (`false` reverts).
    pub escape_commits_text: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mm_to_px: DEFAULT_MM_TO_PX,
            duplicate_offset_mm: DEFAULT_DUPLICATE_OFFSET_MM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            handle_hit_radius_px: DEFAULT_HANDLE_HIT_RADIUS_PX,
            escape_commits_text: true,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `PLANBOARD_MM_TO_PX`: default 96 dpi (≈3.78)
    /// - `PLANBOARD_DUPLICATE_OFFSET_MM`: default 5
    /// - `PLANBOARD_MIN_ZOOM` / `PLANBOARD_MAX_ZOOM`: default 0.1 / 5
    /// - `PLANBOARD_ZOOM_STEP`: default 1.1
    /// - `PLANBOARD_HANDLE_HIT_RADIUS_PX`: default 8
    /// - `PLANBOARD_ESCAPE_COMMITS_TEXT`: `true` (default) or `false`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or the resulting
    /// config fails [`Self::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup (environment, file, test map).
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cfg = Self {
            mm_to_px: parse_f64(&lookup, "PLANBOARD_MM_TO_PX", defaults.mm_to_px)?,
            duplicate_offset_mm: parse_f64(&lookup, "PLANBOARD_DUPLICATE_OFFSET_MM", defaults.duplicate_offset_mm)?,
            min_zoom: parse_f64(&lookup, "PLANBOARD_MIN_ZOOM", defaults.min_zoom)?,
            max_zoom: parse_f64(&lookup, "PLANBOARD_MAX_ZOOM", defaults.max_zoom)?,
            zoom_step: parse_f64(&lookup, "PLANBOARD_ZOOM_STEP", defaults.zoom_step)?,
            handle_hit_radius_px: parse_f64(&lookup, "PLANBOARD_HANDLE_HIT_RADIUS_PX", defaults.handle_hit_radius_px)?,
            escape_commits_text: parse_bool(&lookup, "PLANBOARD_ESCAPE_COMMITS_TEXT", defaults.escape_commits_text)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ratios and zoom bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] or [`ConfigError::ZoomRange`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("mm_to_px", self.mm_to_px),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("zoom_step", self.zoom_step),
            ("handle_hit_radius_px", self.handle_hit_radius_px),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidValue { var: key.to_string(), value: raw.clone() })
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue { var: key.to_string(), value: raw }),
    }
}
