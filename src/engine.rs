//! The gesture state machine.
//!
//! `ZoomCore` owns the transform and every piece of per-stream state. The host
//! drives it through one named method per touch-stream event and reads the
//! transform back to render. Nothing here touches the DOM, so the whole
//! machine is testable natively.
//!
//! ```text
//! Idle    -> Panning   (move beyond touch slop)
//! Idle    -> Scaling   (second pointer down)
//! Panning -> Scaling   (second pointer down)
//! Scaling -> Panning   (second pointer up)
//! Any     -> Idle      (stream end / cancel)
//! ```

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace};

use crate::config::ZoomConfig;
use crate::consts::MIN_PINCH_RATIO;
use crate::gesture::{GestureState, Ownership, PinchStep, PointerId, PointerSample, ScaleAnchor, StreamAnchor};
use crate::transform::{Extent, Point, Transform, clamp_translation, max_offset};

/// Pan/zoom state for one viewport and its single child.
#[derive(Debug, Clone)]
pub struct ZoomCore {
    config: ZoomConfig,
    transform: Transform,
    state: GestureState,
    anchor: Option<StreamAnchor>,
    scale_anchor: ScaleAnchor,
    viewport: Extent,
    child: Extent,
}

impl Default for ZoomCore {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomCore {
    /// Create an idle core with an identity transform (scale clamped into the configured range).
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            transform: Transform { scale: config.clamp_scale(1.0), translation: Point::default() },
            config,
            state: GestureState::Idle,
            anchor: None,
            scale_anchor: ScaleAnchor::default(),
            viewport: Extent::default(),
            child: Extent::default(),
        }
    }

    // --- Geometry / configuration ---

    /// Update the viewport extent and re-clamp the translation.
    pub fn set_viewport(&mut self, viewport: Extent) {
        self.viewport = viewport;
        self.reclamp();
    }

    /// Update the child's unscaled extent and re-clamp the translation.
    pub fn set_child_extent(&mut self, child: Extent) {
        self.child = child;
        self.reclamp();
    }

    /// Swap tunables. The current scale is pulled into the new range.
    pub fn set_config(&mut self, config: ZoomConfig) {
        self.config = config;
        self.transform.scale = config.clamp_scale(self.transform.scale);
        self.reclamp();
    }

    /// Back to the identity transform with no stream in progress.
    pub fn reset(&mut self) {
        self.transform = Transform { scale: self.config.clamp_scale(1.0), translation: Point::default() };
        self.anchor = None;
        self.scale_anchor.reset();
        self.transition(GestureState::Idle);
    }

    // --- Stream classifier ---

    /// Dispatch a pointer-down: the primary pointer starts a stream, any other adds a pinch finger.
    pub fn on_pointer_down(&mut self, sample: PointerSample) -> Ownership {
        match sample.id {
            PointerId::Primary => {
                self.on_stream_start(sample.position);
                Ownership::Released
            }
            PointerId::Secondary => self.on_second_pointer_down(),
        }
    }

    /// First finger down. Anchors the stream but claims nothing yet.
    pub fn on_stream_start(&mut self, point: Point) {
        self.scale_anchor.reset();
        self.transition(GestureState::Idle);
        let base_translation = self.transform.translation;
        self.anchor = point.is_finite().then_some(StreamAnchor { origin: point, base_translation });
    }

    /// Single-pointer move. Decides ownership and, while panning, moves the child.
    ///
    /// Under the slop the stream stays `Idle` and is released to ancestors.
    /// Past it the stream becomes `Panning` and stays claimed until it ends,
    /// even if the pointer drifts back inside the slop.
    pub fn on_stream_move(&mut self, point: Point) -> Ownership {
        let Some(anchor) = self.anchor else {
            return Ownership::Released;
        };
        if !point.is_finite() {
            return self.ownership();
        }
        match self.state {
            GestureState::Idle => {
                let delta = anchor.delta(point);
                let slop = self.config.touch_slop;
                if delta.x.abs() > slop || delta.y.abs() > slop {
                    self.transition(GestureState::Panning);
                    self.apply_pan(point);
                    Ownership::Claimed
                } else {
                    Ownership::Released
                }
            }
            GestureState::Panning => {
                self.apply_pan(point);
                Ownership::Claimed
            }
            GestureState::Scaling => Ownership::Claimed,
        }
    }

    /// A second finger landed. Pinches have no slop: always scale, always claim.
    pub fn on_second_pointer_down(&mut self) -> Ownership {
        self.scale_anchor.reset();
        self.transition(GestureState::Scaling);
        Ownership::Claimed
    }

    /// The second finger lifted. The remaining finger carries on as a pan from
    /// `remaining` with the current translation, so the child does not jump.
    pub fn on_second_pointer_up(&mut self, remaining: Point) -> Ownership {
        self.scale_anchor.reset();
        if self.state == GestureState::Scaling {
            self.transition(GestureState::Panning);
        }
        if remaining.is_finite() {
            self.anchor = Some(StreamAnchor { origin: remaining, base_translation: self.transform.translation });
        }
        Ownership::Claimed
    }

    /// Last finger up. Commits the translation as the next stream's baseline.
    pub fn on_stream_end(&mut self) {
        self.finish_stream();
        let Transform { scale, translation } = self.transform;
        debug!(scale, x = translation.x, y = translation.y, "stream ended");
    }

    /// The platform aborted the stream. Same effect as [`ZoomCore::on_stream_end`].
    pub fn on_stream_cancel(&mut self) {
        self.finish_stream();
        debug!("stream cancelled");
    }

    // --- Transform accumulator ---

    /// Move the child to follow `point`. No-op unless panning.
    pub fn apply_pan(&mut self, point: Point) {
        if self.state != GestureState::Panning || !point.is_finite() {
            return;
        }
        let Some(anchor) = self.anchor else {
            return;
        };
        self.transform.translation = self.clamp(anchor.candidate(point));
    }

    /// Multiply a pinch ratio into the scale. No-op unless scaling.
    ///
    /// The first sample after the fingers reverse direction is skipped and
    /// becomes the new baseline.
    pub fn apply_pinch(&mut self, ratio: f64) {
        if self.state != GestureState::Scaling || !ratio.is_finite() {
            return;
        }
        let ratio = ratio.max(MIN_PINCH_RATIO);
        match self.scale_anchor.observe(ratio) {
            PinchStep::Apply => {
                self.transform.scale = self.config.clamp_scale(self.transform.scale * ratio);
                self.reclamp();
            }
            PinchStep::Rebaseline => trace!(ratio, "pinch reversed; rebaselining"),
            PinchStep::Unchanged => {}
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    #[must_use]
    pub fn translation(&self) -> Point {
        self.transform.translation
    }

    #[must_use]
    pub fn config(&self) -> ZoomConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Extent {
        self.viewport
    }

    #[must_use]
    pub fn child_extent(&self) -> Extent {
        self.child
    }

    /// Current per-axis translation bound.
    #[must_use]
    pub fn max_offset(&self) -> Point {
        max_offset(self.transform.scale, self.viewport, self.child)
    }

    /// Whether a stream has started and not yet ended.
    #[must_use]
    pub fn is_stream_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Ownership implied by the current state alone.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        if self.state.is_active() { Ownership::Claimed } else { Ownership::Released }
    }

    // --- Internals ---

    fn finish_stream(&mut self) {
        self.transform.translation = self.clamp(self.transform.translation);
        self.anchor = None;
        self.scale_anchor.reset();
        self.transition(GestureState::Idle);
    }

    fn transition(&mut self, to: GestureState) {
        if self.state != to {
            debug!(from = ?self.state, to = ?to, scale = self.transform.scale, "gesture transition");
            self.state = to;
        }
    }

    fn reclamp(&mut self) {
        self.transform.translation = self.clamp(self.transform.translation);
    }

    fn clamp(&self, candidate: Point) -> Point {
        clamp_translation(candidate, self.transform.scale, self.viewport, self.child, self.config.vertical_clamp_mode)
    }
}
