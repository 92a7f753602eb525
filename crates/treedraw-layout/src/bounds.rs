#![forbid(unsafe_code)]

//! Bounding rectangle of a placed tree.

use treedraw_core::geometry::Rect;

use crate::model::TreeModel;

/// Smallest rectangle containing every placed node center, grown by
/// `node_radius` on all four sides.
///
/// Nodes without a position are ignored. A tree with no placed nodes yields
/// the zero rectangle at the origin.
pub fn bounds_for(model: &TreeModel<'_>, node_radius: f64) -> Rect {
    Rect::bounding(model.positions())
        .map(|r| r.outset(node_radius))
        .unwrap_or_default()
}
