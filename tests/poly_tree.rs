// PolyTree integration tests.
//
// Invariants exercised:
// - Symmetry: `parent(c) == Some(p)` iff `children(p)` holds c exactly once.
// - Counts: `count(n)` is one plus the counts of n's children.
// - Errors: misuse surfaces as a TreeError and leaves the tree unchanged.
use handle_collections::{NodeId, PolyTree, Searchable, TreeError};

fn build() -> (PolyTree<u32>, Vec<NodeId>) {
    let mut tree = PolyTree::new();
    let ids: Vec<NodeId> = (1..=8).map(|v| tree.add_node(v)).collect();
    for &c in &ids[1..5] {
        tree.add_child(ids[0], c).unwrap();
    }
    (tree, ids)
}

// Test: five-node fan-out, then growing nodes 3 and 4.
// Verifies: subtree counts and BFS hits by value.
#[test]
fn fan_out_then_grow() {
    let (mut tree, ids) = build();
    let root = tree.node(ids[0]).unwrap();
    assert_eq!(root.count(), 5);
    let four = root.bfs(&4).unwrap();
    assert_eq!(*four.value(), 4);
    assert_eq!(four.id(), ids[3]);

    tree.add_child(ids[3], ids[5]).unwrap();
    tree.add_child(ids[3], ids[6]).unwrap();
    tree.add_child(ids[2], ids[7]).unwrap();
    tree.check_invariants();

    assert_eq!(tree.count(ids[0]), Ok(8));
    assert_eq!(tree.count(ids[2]), Ok(2));
    assert_eq!(tree.count(ids[3]), Ok(3));
    let values: Vec<u32> = tree
        .node(ids[0])
        .unwrap()
        .children()
        .iter()
        .map(|c| *c.value())
        .collect();
    assert_eq!(values, vec![2, 3, 4, 5]);
}

// Test: BFS and DFS visit order differ on the grown tree.
// Verifies: BFS reaches the shallow 5 before the deep 6, DFS the reverse.
#[test]
fn bfs_and_dfs_order() {
    let (mut tree, ids) = build();
    tree.add_child(ids[3], ids[5]).unwrap();
    let root = tree.node(ids[0]).unwrap();
    let mut bfs_seen = Vec::new();
    root.bfs_by(|n| {
        bfs_seen.push(*n.value());
        false
    });
    assert_eq!(bfs_seen, vec![1, 2, 3, 4, 5, 6]);
    let mut dfs_seen = Vec::new();
    root.dfs_by(|n| {
        dfs_seen.push(*n.value());
        false
    });
    assert_eq!(dfs_seen, vec![1, 2, 3, 4, 6, 5]);
}

// Test: reparenting moves a node between lists.
#[test]
fn reparent_moves_between_parents() {
    let (mut tree, ids) = build();
    tree.set_parent(ids[4], Some(ids[1])).unwrap();
    assert_eq!(tree.children(ids[0]).unwrap(), vec![ids[1], ids[2], ids[3]]);
    assert_eq!(tree.children(ids[1]).unwrap(), vec![ids[4]]);
    assert_eq!(tree.parent(ids[4]), Ok(Some(ids[1])));
    // Same parent again is a no-op.
    tree.set_parent(ids[4], Some(ids[1])).unwrap();
    assert_eq!(tree.children(ids[1]).unwrap(), vec![ids[4]]);
    tree.check_invariants();
}

// Test: caller errors.
// Verifies: each misuse maps to its variant and nothing changes.
#[test]
fn misuse_reports_errors() {
    let (mut tree, ids) = build();
    assert_eq!(tree.remove_child(ids[1], ids[2]), Err(TreeError::NotAChild));
    assert_eq!(tree.set_parent(ids[0], Some(ids[1])), Err(TreeError::WouldCycle));
    assert_eq!(tree.set_parent(ids[0], Some(ids[0])), Err(TreeError::WouldCycle));
    assert_eq!(tree.count(ids[0]), Ok(5));

    let root = tree.node(ids[0]).unwrap();
    assert_eq!(root.dfs_with(None, None), Err(TreeError::MissingSearchCriterion));
    assert_eq!(root.bfs_with(None, None), Err(TreeError::MissingSearchCriterion));
    assert_eq!(root.dfs_with(Some(&3), None).unwrap().map(|n| n.id()), Some(ids[2]));

    assert_eq!(tree.remove_subtree(ids[3]), Ok(1));
    assert_eq!(tree.value(ids[3]), Err(TreeError::StaleNode));
    assert_eq!(tree.add_child(ids[0], ids[3]), Err(TreeError::StaleNode));
    assert_eq!(tree.count(ids[0]), Ok(4));
    tree.check_invariants();
}

// Test: removing a child detaches it into its own root.
#[test]
fn remove_child_makes_a_root() {
    let (mut tree, ids) = build();
    tree.remove_child(ids[0], ids[1]).unwrap();
    assert_eq!(tree.parent(ids[1]), Ok(None));
    assert_eq!(tree.count(ids[0]), Ok(4));
    assert!(tree.roots().any(|r| r == ids[1]));
    tree.check_invariants();
}

// Test: ids carried over from a different tree.
// Verifies: every lookup and edit reports StaleNode and nothing changes.
#[test]
fn ids_from_another_tree_are_stale() {
    let mut other = PolyTree::new();
    let foreign = other.add_node(100);
    let (mut tree, ids) = build();
    assert_eq!(tree.value(foreign), Err(TreeError::StaleNode));
    assert_eq!(tree.add_child(ids[0], foreign), Err(TreeError::StaleNode));
    assert_eq!(tree.remove_subtree(foreign), Err(TreeError::StaleNode));
    assert_eq!(tree.count(ids[0]), Ok(5));
    assert_eq!(other.value(foreign), Ok(&100));
}
