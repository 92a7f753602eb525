//! Layouts of specific tree shapes, including deep trees that would
//! exhaust the stack under a recursive implementation.

mod common;

use common::{Tree, check_layout, left_chain, perfect, zig_zag, zig_zag_with_leaves};
use treedraw_layout::{
    LayoutEngine, MIN_SEPARATION, NODE_RADIUS, NodeId, Placement, Point, Rect, TreeModel,
    VERTICAL_SPACING, bounds_for,
};

const DEEP: usize = 10_000;

fn lay_out(tree: &Tree) -> TreeModel<'_> {
    let mut model = TreeModel::from_binary(Some(tree));
    LayoutEngine::default().lay_out(&mut model);
    model
}

fn rows(model: &TreeModel<'_>) -> Vec<Vec<f64>> {
    let depths = model.depths();
    let mut rows: Vec<Vec<f64>> = vec![Vec::new(); model.height()];
    for (id, node) in model.nodes() {
        rows[depths[id.index()]].push(node.position().unwrap().x);
    }
    rows
}

#[test]
fn empty_tree_places_nothing() {
    let mut model = TreeModel::empty();
    let stats = LayoutEngine::default().lay_out(&mut model);
    assert_eq!(stats.nodes, 0);
    assert_eq!(stats.height, 0);
    assert!(model.placements().is_empty());
    assert_eq!(bounds_for(&model, NODE_RADIUS), Rect::default());
}

#[test]
fn perfect_trees_have_symmetric_evenly_spaced_rows() {
    for height in 1..=8 {
        let tree = perfect(height);
        let model = lay_out(&tree);
        assert_eq!(model.len(), (1 << height) - 1);
        check_layout(&model, &Default::default()).unwrap();

        for (depth, row) in rows(&model).iter().enumerate() {
            assert_eq!(row.len(), 1 << depth);
            // Row is mirrored about the root.
            for (a, b) in row.iter().zip(row.iter().rev()) {
                assert_eq!(*a, -*b, "height {height} depth {depth}");
            }
            // Spacing on a row doubles for every level above the bottom.
            let step = MIN_SEPARATION * f64::from(1u32 << (height - 1 - depth));
            for pair in row.windows(2) {
                assert_eq!(pair[1] - pair[0], step, "height {height} depth {depth}");
            }
        }
    }
}

#[test]
fn perfect_tree_bounds() {
    let tree = perfect(3);
    let model = lay_out(&tree);
    // Bottom row spans four leaves two units apart.
    let expected = Rect::new(
        -3.0 - NODE_RADIUS,
        -NODE_RADIUS,
        6.0 + 2.0 * NODE_RADIUS,
        2.0 * VERTICAL_SPACING + 2.0 * NODE_RADIUS,
    );
    assert_eq!(bounds_for(&model, NODE_RADIUS), expected);
}

#[test]
fn deep_left_chain_is_a_vertical_line() {
    let tree = left_chain(DEEP);
    let mut model = TreeModel::from_binary(Some(&tree));
    let stats = LayoutEngine::default().lay_out(&mut model);

    assert_eq!(stats.nodes, DEEP);
    assert_eq!(stats.height, DEEP);
    assert_eq!(stats.merge_steps, 0);
    assert!(model.positions().all(|p| p.x == 0.0));
    let root = model.node(NodeId::ROOT).unwrap();
    assert_eq!(root.position(), Some(Point::ORIGIN));
    check_layout(&model, &Default::default()).unwrap();
}

#[test]
fn deep_zig_zag_stays_centered_under_root() {
    let tree = zig_zag(DEEP);
    let mut model = TreeModel::from_binary(Some(&tree));
    let stats = LayoutEngine::default().lay_out(&mut model);

    assert_eq!(stats.height, DEEP);
    assert_eq!(stats.threads, 0);
    assert!(model.positions().all(|p| p.x == 0.0));
    check_layout(&model, &Default::default()).unwrap();
}

#[test]
fn deep_zig_zag_with_leaves_threads_every_merge() {
    let tree = zig_zag_with_leaves(DEEP);
    let mut model = TreeModel::from_binary(Some(&tree));
    let stats = LayoutEngine::default().lay_out(&mut model);

    assert_eq!(stats.nodes, 2 * DEEP - 1);
    assert_eq!(stats.height, DEEP);
    // Every merge but the bottom one pairs a leaf with a deeper spine.
    assert_eq!(stats.threads, DEEP - 2);
    assert!(stats.merge_steps <= stats.nodes);
    check_layout(&model, &Default::default()).unwrap();
}

#[test]
fn twin_deep_subtrees_merge_in_linear_work() {
    let tree = Tree::node(
        Some(zig_zag_with_leaves(DEEP / 2)),
        Some(zig_zag_with_leaves(DEEP / 2)),
    );
    let mut model = TreeModel::from_binary(Some(&tree));
    let stats = LayoutEngine::default().lay_out(&mut model);

    assert_eq!(stats.nodes, tree.count());
    // The root merge alone walks the full depth through threaded links.
    assert!(stats.merge_steps >= DEEP / 2);
    assert!(stats.merge_steps <= stats.nodes - stats.height);
    check_layout(&model, &Default::default()).unwrap();
}

#[test]
fn placements_snapshot_as_json() {
    //     0
    //    / \
    //   1   3
    //  /
    // 2
    let tree = Tree::node(Some(Tree::node(Some(Tree::leaf()), None)), Some(Tree::leaf()));
    let model = lay_out(&tree);
    let placements = model.placements();

    let json = serde_json::to_value(&placements).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "id": 0, "depth": 0, "position": { "x": 0.0, "y": 0.0 } },
            { "id": 1, "depth": 1, "position": { "x": -1.0, "y": 1.5 } },
            { "id": 2, "depth": 2, "position": { "x": -1.0, "y": 3.0 } },
            { "id": 3, "depth": 1, "position": { "x": 1.0, "y": 1.5 } },
        ])
    );

    let back: Vec<Placement> = serde_json::from_value(json).unwrap();
    assert_eq!(back, placements);
}

#[test]
fn labels_are_produced_lazily_through_convert() {
    struct Named {
        name: &'static str,
        kids: Vec<Named>,
    }

    let tree = Named {
        name: "root",
        kids: vec![Named { name: "a", kids: vec![] }, Named { name: "b", kids: vec![] }],
    };
    let calls = std::cell::Cell::new(0);
    let mut model = TreeModel::convert(
        Some(&tree),
        |n| n.kids.first(),
        |n| n.kids.get(1),
        |n| {
            calls.set(calls.get() + 1);
            n.name.to_uppercase()
        },
    );
    LayoutEngine::default().lay_out(&mut model);
    assert_eq!(calls.get(), 0);

    let labels: Vec<&str> = model.nodes().map(|(_, n)| n.label().get()).collect();
    assert_eq!(labels, ["ROOT", "A", "B"]);
    assert_eq!(calls.get(), 3);

    // Cached after the first read.
    let _ = model.node(NodeId::ROOT).unwrap().label().get();
    assert_eq!(calls.get(), 3);
}
