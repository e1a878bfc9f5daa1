//! Shared numeric constants for the zoom engine.

// ── Zoom ────────────────────────────────────────────────────────

/// Default lower bound for the child's scale factor.
pub const DEFAULT_MIN_ZOOM: f64 = 1.0;

/// Default upper bound for the child's scale factor.
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;

/// Smallest pinch ratio ever multiplied into the scale. Guards against a
/// zero or negative ratio collapsing or inverting the child.
pub const MIN_PINCH_RATIO: f64 = 1e-3;

// ── Touch ───────────────────────────────────────────────────────

/// Default pan-activation threshold in CSS pixels. Matches the usual
/// platform touch slop of roughly 8 density-independent units.
pub const DEFAULT_TOUCH_SLOP_PX: f64 = 8.0;
