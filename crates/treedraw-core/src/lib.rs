#![forbid(unsafe_code)]

//! Core: geometry and logging shared by the treedraw crates.
//!
//! # Role in treedraw
//! `treedraw-core` is the bottom layer. It owns the real-valued [`Point`] and
//! [`Rect`](geometry::Rect) types that the layout engine writes and the
//! drawing facade consumes, plus the logging shim both crates log through.
//!
//! # Primary responsibilities
//! - **Geometry**: points, rectangles, bounding boxes and padding.
//! - **Logging**: `tracing` macro re-exports behind the `tracing` feature,
//!   no-op stand-ins otherwise.
//!
//! [`Point`]: geometry::Point

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span};
