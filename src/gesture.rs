//! Gesture model: the per-stream state machine and the anchors it carries.
//!
//! A *stream* runs from the first finger down to the last finger up (or a
//! platform cancel). `GestureState` is the active interpretation of that
//! stream. `StreamAnchor` and `ScaleAnchor` are per-stream scratch data that
//! the engine throws away when the stream ends.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::transform::Point;

/// What the current touch stream is doing to the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No pan or scale in progress. Moves under the slop stay here.
    #[default]
    Idle,
    /// A single pointer is dragging the child.
    Panning,
    /// Two pointers are pinching the child.
    Scaling,
}

impl GestureState {
    /// Whether transform updates are allowed in this state.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Which finger a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    /// The finger that started the stream.
    Primary,
    /// Any finger added after the first.
    Secondary,
}

/// One logical touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub id: PointerId,
}

impl PointerSample {
    #[must_use]
    pub fn primary(x: f64, y: f64) -> Self {
        Self { position: Point::new(x, y), id: PointerId::Primary }
    }

    #[must_use]
    pub fn secondary(x: f64, y: f64) -> Self {
        Self { position: Point::new(x, y), id: PointerId::Secondary }
    }
}

/// Where the current single-pointer segment began, and the translation at that moment.
///
/// Pan deltas are measured from `origin`, not accumulated sample to sample,
/// so rounding never drifts over a long drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamAnchor {
    /// Pointer position when the stream (or segment) began.
    pub origin: Point,
    /// Committed translation captured at `origin`.
    pub base_translation: Point,
}

impl StreamAnchor {
    /// Displacement of `point` from the anchor origin.
    #[must_use]
    pub fn delta(&self, point: Point) -> Point {
        point - self.origin
    }

    /// Candidate translation for a pointer at `point`, before clamping.
    #[must_use]
    pub fn candidate(&self, point: Point) -> Point {
        self.base_translation + self.delta(point)
    }
}

/// Direction of a pinch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchDirection {
    /// Fingers moving apart (`ratio > 1`).
    Spreading,
    /// Fingers moving together (`ratio < 1`).
    Pinching,
}

impl PinchDirection {
    /// Direction of `ratio`, or `None` for exactly 1.0 (no change).
    #[must_use]
    pub fn of(ratio: f64) -> Option<Self> {
        if ratio > 1.0 {
            Some(Self::Spreading)
        } else if ratio < 1.0 {
            Some(Self::Pinching)
        } else {
            None
        }
    }
}

/// Outcome of feeding one ratio through [`ScaleAnchor::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinchStep {
    /// Multiply the ratio into the scale.
    Apply,
    /// Direction flipped: treat this sample as a new baseline.
    Rebaseline,
    /// Ratio is exactly 1.0; nothing to do.
    Unchanged,
}

/// Remembers the direction of the last applied pinch sample.
///
/// When fingers reverse direction the first reversed sample is dropped,
/// which suppresses a one-frame jump when the detector re-measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaleAnchor {
    last: Option<PinchDirection>,
}

impl ScaleAnchor {
    /// Classify `ratio` against the recorded direction and update the record.
    pub fn observe(&mut self, ratio: f64) -> PinchStep {
        let Some(direction) = PinchDirection::of(ratio) else {
            return PinchStep::Unchanged;
        };
        match self.last {
            Some(previous) if previous != direction => {
                self.last = None;
                PinchStep::Rebaseline
            }
            _ => {
                self.last = Some(direction);
                PinchStep::Apply
            }
        }
    }

    /// Forget the recorded direction.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Direction of the last applied sample, if any.
    #[must_use]
    pub fn last(&self) -> Option<PinchDirection> {
        self.last
    }
}

/// Who consumes the rest of the current touch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// This viewport owns the stream; ancestors must not intercept it.
    Claimed,
    /// An ancestor may take the stream.
    Released,
}

impl Ownership {
    /// `true` when the viewport intercepts further events.
    #[must_use]
    pub fn is_claimed(self) -> bool {
        matches!(self, Self::Claimed)
    }
}
