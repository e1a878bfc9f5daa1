//! Tunables supplied when a zoom layout is constructed.
//!
//! The host usually receives these as a JSON object (for example from a
//! `data-zoom-config` attribute). Every key is optional:
//!
//! - `minZoom`: lower scale bound, default [`DEFAULT_MIN_ZOOM`]
//! - `maxZoom`: upper scale bound, default [`DEFAULT_MAX_ZOOM`]
//! - `touchSlop`: pan-activation threshold in CSS pixels, default [`DEFAULT_TOUCH_SLOP_PX`]
//! - `verticalClampMode`: `symmetric` (default), `clampToNonPositive` or `topAnchored`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_TOUCH_SLOP_PX};
use crate::error::ConfigError;

/// How the vertical translation is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalClampMode {
    /// Same symmetric bound as the horizontal axis.
    #[default]
    Symmetric,
    /// Symmetric bound, and the child may never be dragged below its resting
    /// position (no gap is revealed above the top edge).
    ClampToNonPositive,
    /// The child is laid out flush with the viewport's top edge and scales
    /// about its centre, so the symmetric window is shifted up by the
    /// unscaled centring gap.
    TopAnchored,
}

/// Scale limits, slop, and clamp policy for one zoom layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub touch_slop: f64,
    pub vertical_clamp_mode: VerticalClampMode,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            touch_slop: DEFAULT_TOUCH_SLOP_PX,
            vertical_clamp_mode: VerticalClampMode::Symmetric,
        }
    }
}

impl ZoomConfig {
    /// Parse and validate a config from a JSON object. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any validation
    /// error from [`ZoomConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the zoom range is positive and ordered and the slop is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_zoom_bound("minZoom", self.min_zoom)?;
        check_zoom_bound("maxZoom", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if !self.touch_slop.is_finite() || self.touch_slop < 0.0 {
            return Err(ConfigError::InvalidSlop(self.touch_slop));
        }
        Ok(())
    }

    /// Clamp a scale factor into `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_zoom).min(self.max_zoom)
    }
}

fn check_zoom_bound(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveZoom { field, value })
    }
}
