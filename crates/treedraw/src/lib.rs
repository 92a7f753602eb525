#![forbid(unsafe_code)]

//! Treedraw public facade.
//!
//! Lays out binary trees so that no two nodes on a level come closer than a
//! fixed separation, and draws them onto any [`Canvas`] fitted to a viewport.
//! The layout machinery lives in [`layout`]; geometry in [`core`].

pub mod canvas;
pub mod drawing;
pub mod error;

pub use canvas::{Canvas, DrawCommand, DrawList, Fit};
pub use drawing::TreeDrawing;
pub use error::{DrawError, LayoutConfigError, LayoutError};

pub use treedraw_core::geometry::{Point, Rect};
pub use treedraw_layout::{
    BinaryNode, LayoutConfig, LayoutEngine, LayoutStats, MIN_SEPARATION, NODE_RADIUS, NodeId,
    TreeModel, VERTICAL_SPACING, bounds_for,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BinaryNode, Canvas, DrawError, DrawList, LayoutConfig, Point, Rect, TreeDrawing,
    };

    pub use crate::{core, layout};
}

pub use treedraw_core as core;
pub use treedraw_layout as layout;
