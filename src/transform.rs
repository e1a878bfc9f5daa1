//! Transform state and the bounds math that keeps the child inside the viewport.
//!
//! Bounds are never cached: they are a pure function of the current scale and
//! the two extents, so a viewport resize between streams cannot leave a stale
//! limit behind.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::ops::{Add, Sub};

use crate::config::VerticalClampMode;

/// A point or offset in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a layout box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visual transform applied to the child.
///
/// `scale` is the zoom factor (1.0 = natural size), `translation` is the
/// offset of the child's centre from its resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translation: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self { scale: 1.0, translation: Point::default() }
    }
}

impl Transform {
    /// CSS `transform` value for this transform, assuming `transform-origin: center`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.translation.x, self.translation.y, self.scale)
    }
}

/// Largest allowed translation magnitude per axis.
///
/// `|viewport - child * scale| / 2`: the scaled child may be shifted until its
/// edge meets the viewport edge, or (when it is smaller than the viewport)
/// until it touches the side of the natural centring gap.
#[must_use]
pub fn max_offset(scale: f64, viewport: Extent, child: Extent) -> Point {
    Point {
        x: ((viewport.width - child.width * scale) / 2.0).abs(),
        y: ((viewport.height - child.height * scale) / 2.0).abs(),
    }
}

/// Clamp a candidate translation into the bounds for `scale`.
#[must_use]
pub fn clamp_translation(
    candidate: Point,
    scale: f64,
    viewport: Extent,
    child: Extent,
    mode: VerticalClampMode,
) -> Point {
    let max = max_offset(scale, viewport, child);
    let x = clamp_axis(candidate.x, -max.x, max.x);
    let y = match mode {
        VerticalClampMode::Symmetric => clamp_axis(candidate.y, -max.y, max.y),
        VerticalClampMode::ClampToNonPositive => clamp_axis(candidate.y, -max.y, max.y).min(0.0),
        VerticalClampMode::TopAnchored => {
            let init_gap = ((viewport.height - child.height) / 2.0).abs();
            clamp_axis(candidate.y, -max.y - init_gap, max.y - init_gap)
        }
    };
    Point { x, y }
}

fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
