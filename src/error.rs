//! Error types for configuring the zoom engine.
//!
//! The gesture core itself never fails: every transition is total over its
//! input. Only building a [`crate::config::ZoomConfig`] from untrusted input
//! can be rejected.

/// Errors produced while parsing or validating a [`crate::config::ZoomConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The JSON payload could not be deserialized.
    #[error("config parse failed: {0}")]
    Parse(String),

    /// A zoom bound is zero, negative, or not a finite number.
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositiveZoom { field: &'static str, value: f64 },

    /// `minZoom` is larger than `maxZoom`.
    #[error("minZoom {min} exceeds maxZoom {max}")]
    InvertedZoomRange { min: f64, max: f64 },

    /// The touch slop is negative or not a finite number.
    #[error("touchSlop must be a finite non-negative number, got {0}")]
    InvalidSlop(f64),
}
