//! Tree shapes and layout checks shared by the integration tests.

#![allow(dead_code)]

use treedraw_layout::{BinaryNode, LayoutConfig, TreeModel};

#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub left: Option<Box<Tree>>,
    pub right: Option<Box<Tree>>,
}

impl Tree {
    pub fn leaf() -> Self {
        Self::default()
    }

    pub fn node(left: Option<Tree>, right: Option<Tree>) -> Self {
        Self {
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }
}

// Dropping a long chain of boxes recursively would overflow the test stack.
impl Drop for Tree {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Tree>> =
            self.left.take().into_iter().chain(self.right.take()).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl BinaryNode for Tree {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Complete tree with `height` levels; `height` must be at least 1.
pub fn perfect(height: usize) -> Tree {
    let mut level: Vec<Tree> = (0..(1usize << height.saturating_sub(1)))
        .map(|_| Tree::leaf())
        .collect();
    for _ in 1..height {
        let mut next = Vec::with_capacity(level.len() / 2);
        let mut it = level.into_iter();
        while let (Some(l), Some(r)) = (it.next(), it.next()) {
            next.push(Tree::node(Some(l), Some(r)));
        }
        level = next;
    }
    level.pop().unwrap_or_default()
}

/// Chain of `len` nodes that only ever has left children.
pub fn left_chain(len: usize) -> Tree {
    let mut tree = Tree::leaf();
    for _ in 1..len {
        tree = Tree::node(Some(tree), None);
    }
    tree
}

/// Chain of `len` nodes alternating between left and right children.
pub fn zig_zag(len: usize) -> Tree {
    let mut tree = Tree::leaf();
    for i in 1..len {
        tree = if i % 2 == 0 {
            Tree::node(Some(tree), None)
        } else {
            Tree::node(None, Some(tree))
        };
    }
    tree
}

/// Zig-zag spine where every spine node also carries a leaf on the side the
/// spine does not continue. Every merge threads the leaf onto the spine.
pub fn zig_zag_with_leaves(spine: usize) -> Tree {
    let mut tree = Tree::leaf();
    for i in 1..spine {
        tree = if i % 2 == 0 {
            Tree::node(Some(tree), Some(Tree::leaf()))
        } else {
            Tree::node(Some(Tree::leaf()), Some(tree))
        };
    }
    tree
}

/// Check the geometric guarantees of a placed model, returning the first
/// violation found.
pub fn check_layout(model: &TreeModel<'_>, config: &LayoutConfig) -> Result<(), String> {
    let depths = model.depths();
    let eps = 1e-9;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (id, node) in model.nodes() {
        let p = node.position().ok_or_else(|| format!("{id:?} has no position"))?;
        if !p.is_finite() {
            return Err(format!("{id:?} placed at non-finite {p:?}"));
        }
        let depth = depths[id.index()];
        let expected_y = depth as f64 * config.vertical_spacing;
        if (p.y - expected_y).abs() > eps * (1.0 + expected_y) {
            return Err(format!("{id:?} at depth {depth} has y {} not {expected_y}", p.y));
        }
        if rows.len() <= depth {
            rows.resize_with(depth + 1, Vec::new);
        }
        rows[depth].push(p.x);

        let child_x = |c| model.node(c).and_then(|n| n.position()).map(|q| q.x);
        let expected_x = match (node.left().and_then(child_x), node.right().and_then(child_x)) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        };
        if let Some(x) = expected_x {
            if (p.x - x).abs() > eps * (1.0 + x.abs()) {
                return Err(format!("{id:?} at x {} is not centered over its children ({x})", p.x));
            }
        }
    }

    // Pre-order visits each level left to right.
    for (depth, row) in rows.iter().enumerate() {
        for pair in row.windows(2) {
            let gap = pair[1] - pair[0];
            if gap < config.min_separation - eps {
                return Err(format!("gap {gap} at depth {depth} is below the minimum or out of order"));
            }
        }
    }
    Ok(())
}
