#![forbid(unsafe_code)]

//! A laid-out tree ready to be drawn.

use treedraw_core::geometry::{Point, Rect};
use treedraw_core::{debug, debug_span};
use treedraw_layout::{
    BinaryNode, LayoutConfig, LayoutConfigError, LayoutEngine, LayoutStats, NodeId, TreeModel,
    bounds_for,
};

use crate::canvas::{Canvas, Fit};
use crate::error::DrawError;

/// A binary tree snapshot, laid out once at construction.
///
/// The default value holds no tree and draws nothing.
///
/// ```
/// use treedraw::{BinaryNode, DrawList, Rect, TreeDrawing};
///
/// struct Node(&'static str, Option<Box<Node>>, Option<Box<Node>>);
///
/// impl BinaryNode for Node {
///     fn left(&self) -> Option<&Self> { self.1.as_deref() }
///     fn right(&self) -> Option<&Self> { self.2.as_deref() }
/// }
///
/// let tree = Node("+", Some(Box::new(Node("1", None, None))), Some(Box::new(Node("2", None, None))));
/// let drawing = TreeDrawing::with_labeler(Some(&tree), |n: &Node| n.0.to_string());
///
/// let mut list = DrawList::new();
/// drawing.draw(&mut list, Rect::from_size(300.0, 200.0)).unwrap();
/// assert_eq!(list.labels().collect::<Vec<_>>(), ["+", "1", "2"]);
/// ```
#[derive(Debug, Default)]
pub struct TreeDrawing<'a> {
    model: TreeModel<'a>,
    config: LayoutConfig,
    stats: LayoutStats,
    bounds: Rect,
}

impl<'a> TreeDrawing<'a> {
    /// Lay out `root` with the default spacing. Labels are empty.
    pub fn new<T: BinaryNode>(root: Option<&'a T>) -> Self {
        Self::lay_out(TreeModel::from_binary(root), LayoutEngine::default())
    }

    /// Lay out `root` with the default spacing, labelling nodes with
    /// `labeler` on demand.
    pub fn with_labeler<T, F>(root: Option<&'a T>, labeler: F) -> Self
    where
        T: BinaryNode,
        F: Fn(&T) -> String + 'a,
    {
        Self::lay_out(
            TreeModel::from_binary_labeled(root, labeler),
            LayoutEngine::default(),
        )
    }

    /// Lay out `root` with custom spacing.
    pub fn with_config<T: BinaryNode>(
        root: Option<&'a T>,
        config: LayoutConfig,
    ) -> Result<Self, LayoutConfigError> {
        Self::from_model(TreeModel::from_binary(root), config)
    }

    /// Lay out an already converted model.
    pub fn from_model(model: TreeModel<'a>, config: LayoutConfig) -> Result<Self, LayoutConfigError> {
        Ok(Self::lay_out(model, LayoutEngine::new(config)?))
    }

    fn lay_out(mut model: TreeModel<'a>, engine: LayoutEngine) -> Self {
        let stats = engine.lay_out(&mut model);
        let config = *engine.config();
        let bounds = bounds_for(&model, config.node_radius);
        Self {
            model,
            config,
            stats,
            bounds,
        }
    }

    pub fn model(&self) -> &TreeModel<'a> {
        &self.model
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    /// Layout-space rectangle enclosing every node circle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Layout-space center of `id`.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.model.node(id).and_then(|n| n.position())
    }

    /// Label of `id`, computing it on first access.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.model.node(id).map(|n| n.label().get())
    }

    /// Transform that maps this tree's bounds into `viewport`.
    pub fn fit(&self, viewport: Rect) -> Option<Fit> {
        Fit::new(self.bounds, viewport)
    }

    /// Draw the tree into `viewport` on `canvas`.
    ///
    /// The bounds are scaled uniformly to fit the viewport and centered in
    /// it. All edges are drawn first, then every node circle, then the
    /// non-empty labels, each held to the width of its circle. An empty tree
    /// draws nothing and accepts any viewport.
    pub fn draw<C: Canvas>(
        &self,
        canvas: &mut C,
        viewport: Rect,
    ) -> Result<(), DrawError<C::Error>> {
        if self.model.is_empty() {
            return Ok(());
        }
        let fit = self.fit(viewport).ok_or(DrawError::InvalidViewport(viewport))?;
        let span = debug_span!("tree_drawing.draw", nodes = self.model.len(), scale = fit.scale);
        let _guard = span.enter();

        let at = |id: NodeId| self.position(id).map(|p| fit.apply(p));

        let mut lines = 0usize;
        for (parent, child) in self.model.edges() {
            if let (Some(from), Some(to)) = (at(parent), at(child)) {
                canvas.draw_line(from, to)?;
                lines += 1;
            }
        }

        let radius = fit.apply_len(self.config.node_radius);
        let centers: Vec<(NodeId, Point)> = self
            .model
            .nodes()
            .filter_map(|(id, _)| at(id).map(|p| (id, p)))
            .collect();
        for &(_, center) in &centers {
            canvas.draw_circle(center, radius)?;
        }

        let max_width = 2.0 * radius;
        let mut labels = 0usize;
        for &(id, center) in &centers {
            let text = self.label(id).unwrap_or_default();
            if !text.is_empty() {
                canvas.draw_label(center, text, max_width)?;
                labels += 1;
            }
        }

        debug!(
            lines,
            circles = centers.len(),
            labels,
            radius,
            "tree drawn"
        );
        Ok(())
    }
}
