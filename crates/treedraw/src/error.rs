#![forbid(unsafe_code)]

//! Errors surfaced by the drawing facade.

use std::fmt;

use treedraw_core::geometry::Rect;
pub use treedraw_layout::{LayoutConfigError, LayoutError};

/// Failure while drawing a tree onto a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError<E> {
    /// Viewport is empty, negative or not finite, so nothing can be fitted into it.
    InvalidViewport(Rect),
    /// The canvas rejected a drawing call.
    Canvas(E),
}

impl<E: fmt::Display> fmt::Display for DrawError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport(r) => write!(
                f,
                "cannot fit tree into viewport {}x{} at ({}, {})",
                r.width, r.height, r.x, r.y
            ),
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
        }
    }
}

impl<E> std::error::Error for DrawError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            Self::InvalidViewport(_) => None,
        }
    }
}

impl<E> From<E> for DrawError<E> {
    fn from(err: E) -> Self {
        Self::Canvas(err)
    }
}
