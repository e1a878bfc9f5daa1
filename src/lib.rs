//! Pinch-to-zoom and pan for a single child inside a viewport.
//!
//! The crate compiles natively and to WebAssembly. The gesture state machine
//! and its clamping math are plain Rust with no browser dependency; the
//! [`host`] module is the thin layer that reads DOM touch events, decides
//! whether the viewport or an ancestor scroller owns each stream, and writes
//! the resulting CSS transform to the child.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `ZoomCore`: the gesture state machine and transform owner |
//! | [`gesture`] | Gesture states, stream/scale anchors, ownership decisions |
//! | [`transform`] | Points, extents, the transform, and bounds clamping |
//! | [`config`] | Tunables (zoom range, slop, vertical clamp policy) and JSON parsing |
//! | [`error`] | Configuration errors |
//! | [`host`] | Touch routing, DOM binding, and the JavaScript entry point |
//! | [`consts`] | Default numeric constants |

pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod host;
pub mod transform;
