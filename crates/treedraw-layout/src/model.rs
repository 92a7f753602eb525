#![forbid(unsafe_code)]

//! Immutable binary tree snapshot consumed by the layout engine.
//!
//! A [`TreeModel`] is converted once from a caller's tree and never changes
//! shape afterwards; the engine only writes node positions back into it.
//!
//! # Invariants
//!
//! 1. Nodes live in an arena in pre-order: a parent's [`NodeId`] is always
//!    smaller than the ids of its children, and the root is id 0.
//! 2. Every node has at most one parent. Missing children are `None`.
//! 3. A node's label is computed at most once, on first request.
//!
//! # Failure Modes
//!
//! None. Any finite tree converts, the empty tree included. Conversion is
//! iterative, so degenerate chains only cost heap memory.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use treedraw_core::geometry::Point;

/// Index of a node inside a [`TreeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Id of the root of any non-empty model.
    pub const ROOT: Self = Self(0);

    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Access to the two children of a caller tree node.
///
/// Implement this for your own node type to use
/// [`TreeModel::from_binary`]. Types that cannot implement it can pass
/// accessor closures to [`TreeModel::convert`] instead.
pub trait BinaryNode {
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

/// A display string produced on first use.
///
/// The producing closure is assumed to be pure or idempotent. It runs at most
/// once per label; later calls return the cached text.
pub struct Label<'a> {
    source: Option<Box<dyn Fn() -> String + 'a>>,
    text: OnceCell<String>,
}

impl<'a> Label<'a> {
    /// A label that renders as the empty string.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            source: None,
            text: OnceCell::new(),
        }
    }

    /// A label computed by `source` when first requested.
    pub fn deferred(source: impl Fn() -> String + 'a) -> Self {
        Self {
            source: Some(Box::new(source)),
            text: OnceCell::new(),
        }
    }

    /// A label whose text is already known.
    pub fn ready(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: OnceCell::from(text.into()),
        }
    }

    /// The label text, computing it if needed.
    pub fn get(&self) -> &str {
        self.text
            .get_or_init(|| self.source.as_ref().map_or_else(String::new, |f| f()))
    }

    /// Whether the text has been produced yet.
    pub fn is_evaluated(&self) -> bool {
        self.text.get().is_some()
    }
}

impl Default for Label<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text.get() {
            Some(text) => f.debug_tuple("Label").field(text).finish(),
            None if self.source.is_some() => f.write_str("Label(<deferred>)"),
            None => f.write_str("Label(\"\")"),
        }
    }
}

/// One node of a [`TreeModel`].
#[derive(Debug)]
pub struct ModelNode<'a> {
    left: Option<NodeId>,
    right: Option<NodeId>,
    label: Label<'a>,
    position: Option<Point>,
}

impl<'a> ModelNode<'a> {
    fn new(label: Label<'a>) -> Self {
        Self {
            left: None,
            right: None,
            label,
            position: None,
        }
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Both children in left-to-right order, skipping missing ones.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.left.into_iter().chain(self.right)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub fn label(&self) -> &Label<'a> {
        &self.label
    }

    /// Absolute center, `None` until a layout has been placed.
    #[inline]
    pub fn position(&self) -> Option<Point> {
        self.position
    }
}

/// Serializable record of one placed node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: NodeId,
    pub depth: usize,
    pub position: Point,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Arena snapshot of a binary tree.
#[derive(Debug, Default)]
pub struct TreeModel<'a> {
    nodes: Vec<ModelNode<'a>>,
}

impl<'a> TreeModel<'a> {
    /// An empty model.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Convert a tree whose node type implements [`BinaryNode`]. Every label
    /// is empty.
    pub fn from_binary<T: BinaryNode>(root: Option<&'a T>) -> Self {
        Self::build(root, T::left, T::right, None)
    }

    /// Convert a [`BinaryNode`] tree, labelling each node with `labeler`.
    pub fn from_binary_labeled<T, F>(root: Option<&'a T>, labeler: F) -> Self
    where
        T: BinaryNode,
        F: Fn(&T) -> String + 'a,
    {
        Self::build(root, T::left, T::right, Some(Rc::new(labeler)))
    }

    /// Convert any tree given accessor functions for its children.
    ///
    /// Labels are deferred: `labeler` is called for a node only when its
    /// label is first requested.
    pub fn convert<T, L, R, F>(root: Option<&'a T>, left: L, right: R, labeler: F) -> Self
    where
        L: Fn(&'a T) -> Option<&'a T>,
        R: Fn(&'a T) -> Option<&'a T>,
        F: Fn(&T) -> String + 'a,
    {
        Self::build(root, left, right, Some(Rc::new(labeler)))
    }

    fn build<T, L, R>(
        root: Option<&'a T>,
        left: L,
        right: R,
        labeler: Option<Rc<dyn Fn(&T) -> String + 'a>>,
    ) -> Self
    where
        L: Fn(&'a T) -> Option<&'a T>,
        R: Fn(&'a T) -> Option<&'a T>,
    {
        let mut nodes: Vec<ModelNode<'a>> = Vec::new();
        let mut stack: Vec<(&'a T, Option<(NodeId, Side)>)> =
            root.map(|r| (r, None)).into_iter().collect();

        // Left is pushed last so it is popped first, which keeps ids in pre-order.
        while let Some((source, attach)) = stack.pop() {
            let id = NodeId(nodes.len());
            let label = match &labeler {
                Some(labeler) => {
                    let labeler = Rc::clone(labeler);
                    Label::deferred(move || (*labeler)(source))
                }
                None => Label::empty(),
            };
            nodes.push(ModelNode::new(label));

            match attach {
                Some((parent, Side::Left)) => nodes[parent.0].left = Some(id),
                Some((parent, Side::Right)) => nodes[parent.0].right = Some(id),
                None => {}
            }

            if let Some(child) = right(source) {
                stack.push((child, Some((id, Side::Right))));
            }
            if let Some(child) = left(source) {
                stack.push((child, Some((id, Side::Left))));
            }
        }

        Self { nodes }
    }

    /// Root id, or `None` for the empty tree.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId::ROOT)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&ModelNode<'a>> {
        self.nodes.get(id.0)
    }

    /// All nodes in pre-order with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ModelNode<'a>)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Every parent-child pair, parent first.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes()
            .flat_map(|(id, node)| node.children().map(move |child| (id, child)))
    }

    /// Depth of every node, indexed by [`NodeId::index`]. The root is depth 0.
    pub fn depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            for child in node.children() {
                depths[child.0] = depths[i] + 1;
            }
        }
        depths
    }

    /// Number of levels; 0 for the empty tree.
    pub fn height(&self) -> usize {
        self.depths().into_iter().max().map_or(0, |d| d + 1)
    }

    /// Positions of every placed node.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().filter_map(|n| n.position)
    }

    /// Snapshot of every placed node, in pre-order.
    pub fn placements(&self) -> Vec<Placement> {
        let depths = self.depths();
        self.nodes()
            .filter_map(|(id, node)| {
                node.position.map(|position| Placement {
                    id,
                    depth: depths[id.0],
                    position,
                })
            })
            .collect()
    }

    pub(crate) fn set_position(&mut self, id: NodeId, position: Point) {
        self.nodes[id.0].position = Some(position);
    }
}
