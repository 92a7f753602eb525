#![forbid(unsafe_code)]

//! Threaded-contour layout for binary trees.
//!
//! Every subtree is laid out centered on its own root at offset 0. Two sibling
//! subtrees are merged by walking the right contour of the left subtree and
//! the left contour of the right subtree together, level by level, keeping
//! the largest gap any level needs. When one contour runs out, the bottom of
//! the exhausted side is threaded onto the other subtree's contour, so later
//! merges higher up keep walking a complete silhouette without rescanning.
//!
//! # Invariants
//!
//! 1. Same-depth nodes end up at least `min_separation` apart.
//! 2. A parent sits at the midpoint of its two children, or directly above
//!    its only child.
//! 3. Each node's hull links are written once by its own layout step and at
//!    most once more per side by a thread, so the total merge work is linear
//!    in the node count.
//!
//! # Complexity
//!
//! A merge walks `min(height(left), height(right))` levels. Summed over the
//! tree this is bounded by the node count; [`LayoutStats::merge_steps`]
//! reports the exact figure.

use std::fmt;

use treedraw_core::geometry::Point;
use treedraw_core::{debug, debug_span, trace};

use crate::config::{LayoutConfig, LayoutConfigError};
use crate::model::{NodeId, TreeModel};

/// Layout bookkeeping for one node.
///
/// `left_hull`/`right_hull` point at the next node down the contour of the
/// subtree rooted here. They are only meaningful while the node lies on that
/// contour. They never own anything.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    left_child: Option<NodeId>,
    right_child: Option<NodeId>,
    left_hull: Option<NodeId>,
    right_hull: Option<NodeId>,
    left_hull_distance: f64,
    right_hull_distance: f64,
    offset: f64,
}

impl LayoutNode {
    fn fresh(left_child: Option<NodeId>, right_child: Option<NodeId>, min_separation: f64) -> Self {
        Self {
            left_child,
            right_child,
            left_hull: None,
            right_hull: None,
            left_hull_distance: -min_separation / 2.0,
            right_hull_distance: min_separation / 2.0,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn left_child(&self) -> Option<NodeId> {
        self.left_child
    }

    #[inline]
    pub fn right_child(&self) -> Option<NodeId> {
        self.right_child
    }

    /// Horizontal offset from the parent's center; 0 for the root.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Next node on the left contour and the signed distance to it.
    pub fn left_hull(&self) -> Option<(NodeId, f64)> {
        self.left_hull.map(|id| (id, self.left_hull_distance))
    }

    /// Next node on the right contour and the signed distance to it.
    pub fn right_hull(&self) -> Option<(NodeId, f64)> {
        self.right_hull.map(|id| (id, self.right_hull_distance))
    }
}

/// Leftmost and rightmost nodes on the deepest level of a subtree.
///
/// Offsets are relative to the subtree root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes {
    pub left: NodeId,
    pub left_offset: f64,
    pub right: NodeId,
    pub right_offset: f64,
    /// Levels below the subtree root; 0 for a leaf.
    pub depth: usize,
}

impl Extremes {
    fn leaf(id: NodeId) -> Self {
        Self {
            left: id,
            left_offset: 0.0,
            right: id,
            right_offset: 0.0,
            depth: 0,
        }
    }

    /// Width of the deepest level, center to center.
    pub fn bottom_width(&self) -> f64 {
        self.right_offset - self.left_offset
    }
}

/// Work counters for one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub nodes: usize,
    /// Number of levels; 0 for the empty tree.
    pub height: usize,
    /// Contour levels compared across all merges.
    pub merge_steps: usize,
    /// Hull links rewired onto a neighbouring subtree.
    pub threads: usize,
}

/// Relative layout of a whole tree, ready to be placed.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    nodes: Vec<LayoutNode>,
    extremes: Option<Extremes>,
    stats: LayoutStats,
}

impl LayoutResult {
    /// Root id, or `None` for the empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.extremes.map(|_| NodeId::ROOT)
    }

    /// Extremes of the whole tree. `None` for the empty tree.
    pub fn extremes(&self) -> Option<Extremes> {
        self.extremes
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.index())
    }
}

/// Placing a layout into a model it was not computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    ModelMismatch { expected: usize, found: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelMismatch { expected, found } => write!(
                f,
                "layout covers {expected} nodes but the model has {found}"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// State of one contour walker during a merge.
#[derive(Debug, Clone, Copy)]
struct Walker {
    node: NodeId,
    offset: f64,
}

/// The layout engine. Cheap to copy; holds only its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `model` and write absolute positions with the root at the origin.
    pub fn lay_out(&self, model: &mut TreeModel<'_>) -> LayoutStats {
        let layout = self.lay_out_tree(model);
        let placed = self.place_nodes_in(model, &layout, Point::ORIGIN);
        debug_assert!(placed.is_ok(), "layout computed from this model");
        layout.stats
    }

    /// Compute relative offsets for every node of `model`.
    ///
    /// Nodes are visited in reverse pre-order, so both children of a node are
    /// finished before the node itself.
    pub fn lay_out_tree(&self, model: &TreeModel<'_>) -> LayoutResult {
        let span = debug_span!("tree_layout.lay_out", nodes = model.len());
        let _guard = span.enter();

        let min_separation = self.config.min_separation;
        let mut nodes: Vec<LayoutNode> = model
            .nodes()
            .map(|(_, n)| LayoutNode::fresh(n.left(), n.right(), min_separation))
            .collect();
        let mut pending: Vec<Option<Extremes>> = vec![None; nodes.len()];
        let mut stats = LayoutStats {
            nodes: nodes.len(),
            ..LayoutStats::default()
        };

        for index in (0..nodes.len()).rev() {
            let id = NodeId::from_index(index);
            let left = nodes[index].left_child.map(|c| (c, take_extremes(&mut pending, c)));
            let right = nodes[index].right_child.map(|c| (c, take_extremes(&mut pending, c)));

            let extremes = match (left, right) {
                (None, None) => Extremes::leaf(id),
                (Some((child, sub)), None) | (None, Some((child, sub))) => {
                    let node = &mut nodes[index];
                    node.left_hull = Some(child);
                    node.right_hull = Some(child);
                    node.left_hull_distance = 0.0;
                    node.right_hull_distance = 0.0;
                    Extremes {
                        depth: sub.depth + 1,
                        ..sub
                    }
                }
                (Some(l), Some(r)) => self.merge(&mut nodes, id, l, r, &mut stats),
            };
            pending[index] = Some(extremes);
        }

        let extremes = pending.first().copied().flatten();
        stats.height = extremes.map_or(0, |e| e.depth + 1);
        debug!(
            nodes = stats.nodes,
            height = stats.height,
            merge_steps = stats.merge_steps,
            threads = stats.threads,
            "tree layout computed"
        );

        LayoutResult {
            nodes,
            extremes,
            stats,
        }
    }

    /// Join two laid-out sibling subtrees under `parent`.
    fn merge(
        &self,
        nodes: &mut [LayoutNode],
        parent: NodeId,
        (left_root, left): (NodeId, Extremes),
        (right_root, right): (NodeId, Extremes),
        stats: &mut LayoutStats,
    ) -> Extremes {
        let min_separation = self.config.min_separation;

        // Facing contours: right side of the left subtree, left side of the right one.
        let mut inner_left = Walker {
            node: left_root,
            offset: 0.0,
        };
        let mut inner_right = Walker {
            node: right_root,
            offset: 0.0,
        };
        let mut gap = min_separation;
        let (next_left, next_right) = loop {
            stats.merge_steps += 1;
            gap = gap.max(min_separation + inner_left.offset - inner_right.offset);

            let l = &nodes[inner_left.node.index()];
            let r = &nodes[inner_right.node.index()];
            match (l.right_hull(), r.left_hull()) {
                (Some((ln, ld)), Some((rn, rd))) => {
                    inner_left = Walker {
                        node: ln,
                        offset: inner_left.offset + ld,
                    };
                    inner_right = Walker {
                        node: rn,
                        offset: inner_right.offset + rd,
                    };
                }
                ends => break ends,
            }
        };

        let half = gap / 2.0;
        match (next_left, next_right) {
            // Left subtree is shallower: its bottom-left continues down the right subtree.
            (None, Some((rn, rd))) => {
                let target = half + inner_right.offset + rd;
                let bottom = &mut nodes[left.left.index()];
                debug_assert!(bottom.left_hull.is_none());
                bottom.left_hull = Some(rn);
                bottom.left_hull_distance = target - (left.left_offset - half);
                stats.threads += 1;
                trace!(
                    from = left.left.index(),
                    to = rn.index(),
                    "threaded left contour"
                );
            }
            // Right subtree is shallower: its bottom-right continues down the left subtree.
            (Some((ln, ld)), None) => {
                let target = -half + inner_left.offset + ld;
                let bottom = &mut nodes[right.right.index()];
                debug_assert!(bottom.right_hull.is_none());
                bottom.right_hull = Some(ln);
                bottom.right_hull_distance = target - (right.right_offset + half);
                stats.threads += 1;
                trace!(
                    from = right.right.index(),
                    to = ln.index(),
                    "threaded right contour"
                );
            }
            _ => {}
        }

        nodes[left_root.index()].offset = -half;
        nodes[right_root.index()].offset = half;
        let node = &mut nodes[parent.index()];
        node.left_hull = Some(left_root);
        node.left_hull_distance = -half;
        node.right_hull = Some(right_root);
        node.right_hull_distance = half;

        let (extreme_left, extreme_left_offset) = if right.depth > left.depth {
            (right.left, right.left_offset + half)
        } else {
            (left.left, left.left_offset - half)
        };
        let (extreme_right, extreme_right_offset) = if left.depth > right.depth {
            (left.right, left.right_offset - half)
        } else {
            (right.right, right.right_offset + half)
        };

        Extremes {
            left: extreme_left,
            left_offset: extreme_left_offset,
            right: extreme_right,
            right_offset: extreme_right_offset,
            depth: left.depth.max(right.depth) + 1,
        }
    }

    /// Convert the relative offsets in `layout` into absolute positions in
    /// `model`, with the root placed at `origin`.
    ///
    /// Pre-order ids make a single forward sweep a depth-first traversal:
    /// every parent is placed before its children.
    pub fn place_nodes_in(
        &self,
        model: &mut TreeModel<'_>,
        layout: &LayoutResult,
        origin: Point,
    ) -> Result<(), LayoutError> {
        if layout.len() != model.len() {
            return Err(LayoutError::ModelMismatch {
                expected: layout.len(),
                found: model.len(),
            });
        }

        let mut positions = vec![origin; layout.len()];
        for (index, node) in layout.nodes.iter().enumerate() {
            let here = positions[index];
            for child in [node.left_child, node.right_child].into_iter().flatten() {
                let offset = layout.nodes[child.index()].offset;
                positions[child.index()] = here.offset(offset, self.config.vertical_spacing);
            }
            model.set_position(NodeId::from_index(index), here);
        }
        Ok(())
    }
}

fn take_extremes(pending: &mut [Option<Extremes>], id: NodeId) -> Extremes {
    pending[id.index()]
        .take()
        .unwrap_or_else(|| Extremes::leaf(id))
}
