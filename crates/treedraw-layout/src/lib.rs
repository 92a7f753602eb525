#![forbid(unsafe_code)]

//! Binary tree layout: snapshot model, threaded-contour engine and bounds.
//!
//! ```
//! use treedraw_layout::{BinaryNode, LayoutEngine, TreeModel, bounds_for, NODE_RADIUS};
//!
//! struct Node(Option<Box<Node>>, Option<Box<Node>>);
//!
//! impl BinaryNode for Node {
//!     fn left(&self) -> Option<&Self> { self.0.as_deref() }
//!     fn right(&self) -> Option<&Self> { self.1.as_deref() }
//! }
//!
//! let tree = Node(Some(Box::new(Node(None, None))), Some(Box::new(Node(None, None))));
//! let mut model = TreeModel::from_binary(Some(&tree));
//! LayoutEngine::default().lay_out(&mut model);
//!
//! let xs: Vec<f64> = model.positions().map(|p| p.x).collect();
//! assert_eq!(xs, [0.0, -1.0, 1.0]);
//! assert_eq!(bounds_for(&model, NODE_RADIUS).width, 3.0);
//! ```

pub mod bounds;
pub mod config;
pub mod engine;
pub mod model;

pub use bounds::bounds_for;
pub use config::{
    ConfigField, LayoutConfig, LayoutConfigError, MIN_SEPARATION, NODE_RADIUS, VERTICAL_SPACING,
};
pub use engine::{
    Extremes, LayoutEngine, LayoutError, LayoutNode, LayoutResult, LayoutStats,
};
pub use model::{BinaryNode, Label, ModelNode, NodeId, Placement, TreeModel};
pub use treedraw_core::geometry::{Point, Rect};
