//! Browser glue: DOM touch events in, CSS transform out.
//!
//! [`TouchRouter`] turns the browser's "current list of touches" model into
//! the named stream events [`ZoomCore`] expects. It holds no DOM handles so it
//! is tested natively. [`ZoomLayout`] owns the two elements and applies the
//! result; [`attach_zoom`] wires it to the viewport's touch listeners and
//! returns a [`ZoomHandle`] for JavaScript.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlElement, TouchEvent, TouchList};

use crate::config::ZoomConfig;
use crate::engine::ZoomCore;
use crate::gesture::{Ownership, PointerSample};
use crate::transform::{Extent, Point};

// =============================================================
// Touch routing
// =============================================================

/// Which DOM touch event is being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

impl TouchKind {
    pub const ALL: [TouchKind; 4] = [Self::Start, Self::Move, Self::End, Self::Cancel];

    /// DOM event type name.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Start => "touchstart",
            Self::Move => "touchmove",
            Self::End => "touchend",
            Self::Cancel => "touchcancel",
        }
    }
}

/// Maps touch-list snapshots onto stream events.
///
/// `touches` is always the list of fingers still down *after* the event, in
/// the order the browser reports them.
#[derive(Debug, Clone, Default)]
pub struct TouchRouter {
    active: usize,
    pinch_distance: Option<f64>,
}

impl TouchRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingers seen down after the last event.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Dispatch one event of `kind`.
    pub fn route(&mut self, core: &mut ZoomCore, kind: TouchKind, touches: &[Point]) -> Ownership {
        match kind {
            TouchKind::Start => self.touch_start(core, touches),
            TouchKind::Move => self.touch_move(core, touches),
            TouchKind::End => self.touch_end(core, touches, false),
            TouchKind::Cancel => self.touch_end(core, touches, true),
        }
    }

    /// A finger landed. The first starts the stream, the second starts a pinch.
    pub fn touch_start(&mut self, core: &mut ZoomCore, touches: &[Point]) -> Ownership {
        let mut ownership = core.ownership();
        if self.active == 0 {
            if let Some(&first) = touches.first() {
                ownership = core.on_pointer_down(PointerSample::primary(first.x, first.y));
            }
        }
        if self.active < 2 {
            if let [_, second, ..] = touches {
                ownership = core.on_pointer_down(PointerSample::secondary(second.x, second.y));
            }
        }
        self.settle(touches);
        ownership
    }

    /// Fingers moved. One finger pans; two or more feed the pinch ratio.
    pub fn touch_move(&mut self, core: &mut ZoomCore, touches: &[Point]) -> Ownership {
        match touches {
            [] => core.ownership(),
            [single] => core.on_stream_move(*single),
            [a, b, ..] => {
                let distance = a.distance(*b);
                if let Some(previous) = self.pinch_distance.filter(|d| *d > 0.0) {
                    core.apply_pinch(distance / previous);
                }
                self.pinch_distance = Some(distance);
                core.ownership()
            }
        }
    }

    /// A finger lifted (or the platform cancelled the stream).
    pub fn touch_end(&mut self, core: &mut ZoomCore, touches: &[Point], cancelled: bool) -> Ownership {
        let ownership = match touches {
            [] if cancelled => {
                core.on_stream_cancel();
                Ownership::Released
            }
            [] => {
                core.on_stream_end();
                Ownership::Released
            }
            [remaining] if self.active >= 2 => core.on_second_pointer_up(*remaining),
            _ => core.ownership(),
        };
        self.settle(touches);
        ownership
    }

    fn settle(&mut self, touches: &[Point]) {
        self.active = touches.len();
        self.pinch_distance = match touches {
            [a, b, ..] => Some(a.distance(*b)),
            _ => None,
        };
    }
}

// =============================================================
// DOM layout
// =============================================================

/// A viewport element and the single child it zooms.
pub struct ZoomLayout {
    viewport: HtmlElement,
    child: HtmlElement,
    core: ZoomCore,
    router: TouchRouter,
}

impl ZoomLayout {
    /// Bind to `viewport` and `child`, measure both, and render the identity transform.
    ///
    /// # Errors
    ///
    /// Fails if the child's inline style cannot be written.
    pub fn new(viewport: HtmlElement, child: HtmlElement, config: ZoomConfig) -> Result<Self, JsValue> {
        child.style().set_property("transform-origin", "center center")?;
        let mut layout = Self { viewport, child, core: ZoomCore::new(config), router: TouchRouter::new() };
        layout.sync_extents();
        layout.render()?;
        Ok(layout)
    }

    /// Re-measure the viewport and the child's untransformed layout box.
    pub fn sync_extents(&mut self) {
        self.core.set_viewport(Extent::new(
            f64::from(self.viewport.client_width()),
            f64::from(self.viewport.client_height()),
        ));
        self.core.set_child_extent(Extent::new(
            f64::from(self.child.offset_width()),
            f64::from(self.child.offset_height()),
        ));
    }

    /// Feed one DOM touch event through the router.
    ///
    /// A claimed stream stops the event here: `preventDefault` blocks native
    /// scrolling and `stopPropagation` keeps ancestor handlers out.
    pub fn handle(&mut self, kind: TouchKind, ev: &TouchEvent) -> Ownership {
        if kind == TouchKind::Start && self.router.active() == 0 {
            self.sync_extents();
        }
        let touches = touch_points(&ev.touches());
        let ownership = self.router.route(&mut self.core, kind, &touches);
        if ownership.is_claimed() {
            ev.prevent_default();
            ev.stop_propagation();
        }
        if let Err(e) = self.render() {
            warn!(error = ?e, "failed to apply zoom transform");
        }
        ownership
    }

    /// Write the current transform to the child's inline style.
    ///
    /// # Errors
    ///
    /// Fails if the style property cannot be set.
    pub fn render(&self) -> Result<(), JsValue> {
        self.child.style().set_property("transform", &self.core.transform().css())
    }

    #[must_use]
    pub fn core(&self) -> &ZoomCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ZoomCore {
        &mut self.core
    }
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

// =============================================================
// JavaScript surface
// =============================================================

type TouchListener = Closure<dyn FnMut(TouchEvent)>;

/// Live zoom layout attached to the DOM. Dropping it (or calling `free()`
/// from JavaScript) removes the touch listeners.
#[wasm_bindgen]
pub struct ZoomHandle {
    viewport: HtmlElement,
    layout: Rc<RefCell<ZoomLayout>>,
    listeners: Vec<(TouchKind, TouchListener)>,
}

/// Attach pinch-zoom and pan handling to `viewport`, transforming `child`.
///
/// `config_json` is a [`ZoomConfig`] JSON object; an empty string means defaults.
///
/// # Errors
///
/// Rejects an invalid config, or fails if listeners or styles cannot be installed.
#[wasm_bindgen(js_name = attachZoom)]
pub fn attach_zoom(viewport: HtmlElement, child: HtmlElement, config_json: &str) -> Result<ZoomHandle, JsValue> {
    let config = config_from_js(config_json)?;
    let layout = Rc::new(RefCell::new(ZoomLayout::new(viewport.clone(), child, config)?));

    // Non-passive so touchmove can call preventDefault once the stream is claimed.
    let options = AddEventListenerOptions::new();
    options.set_passive(false);

    let mut listeners = Vec::with_capacity(TouchKind::ALL.len());
    for kind in TouchKind::ALL {
        let cb = touch_listener(&layout, kind);
        viewport.add_event_listener_with_callback_and_add_event_listener_options(
            kind.event_name(),
            cb.as_ref().unchecked_ref::<js_sys::Function>(),
            &options,
        )?;
        listeners.push((kind, cb));
    }
    Ok(ZoomHandle { viewport, layout, listeners })
}

fn touch_listener(layout: &Rc<RefCell<ZoomLayout>>, kind: TouchKind) -> TouchListener {
    let layout = Rc::clone(layout);
    Closure::wrap(Box::new(move |ev: TouchEvent| {
        let Ok(mut layout) = layout.try_borrow_mut() else {
            warn!(event = kind.event_name(), "zoom layout busy; touch event dropped");
            return;
        };
        layout.handle(kind, &ev);
    }) as Box<dyn FnMut(TouchEvent)>)
}

fn config_from_js(raw: &str) -> Result<ZoomConfig, JsValue> {
    if raw.trim().is_empty() {
        return Ok(ZoomConfig::default());
    }
    ZoomConfig::from_json(raw).map_err(|e| {
        warn!(error = %e, "rejected zoom config");
        JsValue::from_str(&e.to_string())
    })
}

#[wasm_bindgen]
impl ZoomHandle {
    /// Current scale factor.
    pub fn scale(&self) -> f64 {
        self.layout.borrow().core().scale()
    }

    #[wasm_bindgen(js_name = translateX)]
    pub fn translate_x(&self) -> f64 {
        self.layout.borrow().core().translation().x
    }

    #[wasm_bindgen(js_name = translateY)]
    pub fn translate_y(&self) -> f64 {
        self.layout.borrow().core().translation().y
    }

    /// Return to the identity transform.
    ///
    /// # Errors
    ///
    /// Fails if called re-entrantly or the style cannot be written.
    pub fn reset(&self) -> Result<(), JsValue> {
        let mut layout = self.layout_mut()?;
        layout.core_mut().reset();
        layout.render()
    }

    /// Replace the tunables with a new JSON config.
    ///
    /// # Errors
    ///
    /// Rejects an invalid config.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config_json: &str) -> Result<(), JsValue> {
        let config = config_from_js(config_json)?;
        let mut layout = self.layout_mut()?;
        layout.core_mut().set_config(config);
        layout.render()
    }

    /// Re-measure after the host changed the viewport or child size.
    ///
    /// # Errors
    ///
    /// Fails if called re-entrantly or the style cannot be written.
    #[wasm_bindgen(js_name = syncLayout)]
    pub fn sync_layout(&self) -> Result<(), JsValue> {
        let mut layout = self.layout_mut()?;
        layout.sync_extents();
        layout.render()
    }
}

impl ZoomHandle {
    fn layout_mut(&self) -> Result<std::cell::RefMut<'_, ZoomLayout>, JsValue> {
        self.layout
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("zoom layout is busy handling an event"))
    }
}

impl Drop for ZoomHandle {
    fn drop(&mut self) {
        for (kind, cb) in self.listeners.drain(..) {
            if let Err(e) = self
                .viewport
                .remove_event_listener_with_callback(kind.event_name(), cb.as_ref().unchecked_ref::<js_sys::Function>())
            {
                warn!(event = kind.event_name(), error = ?e, "failed to remove touch listener");
            }
        }
    }
}
