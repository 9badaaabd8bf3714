#![cfg(test)]

// Property tests for PolyTree reparenting against an index-based model.

use crate::error::TreeError;
use crate::poly_tree::{NodeId, PolyTree};
use crate::searchable::Searchable;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    SetParent(usize, Option<usize>),
    RemoveChild(usize, usize),
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (2usize..=10).prop_flat_map(|n| {
        let idx = 0..n;
        let op = prop_oneof![
            4 => (idx.clone(), proptest::option::of(idx.clone()))
                .prop_map(|(c, p)| Op::SetParent(c, p)),
            1 => (idx.clone(), idx).prop_map(|(p, c)| Op::RemoveChild(p, c)),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (n, ops))
    })
}

struct Model {
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl Model {
    fn is_ancestor_or_self(&self, anc: usize, mut node: usize) -> bool {
        loop {
            if node == anc {
                return true;
            }
            match self.parent[node] {
                Some(p) => node = p,
                None => return false,
            }
        }
    }

    fn reparent(&mut self, c: usize, p: Option<usize>) {
        if self.parent[c] == p {
            return;
        }
        if let Some(old) = self.parent[c] {
            self.children[old].retain(|&x| x != c);
        }
        self.parent[c] = p;
        if let Some(p) = p {
            self.children[p].push(c);
        }
    }

    fn subtree_size(&self, n: usize) -> usize {
        1 + self.children[n]
            .iter()
            .map(|&c| self.subtree_size(c))
            .sum::<usize>()
    }
}

// Property: after every reparent or removal, parent/child links agree with
// the model in both directions and in child order, cycles are refused, and
// subtree counts add up to the arena size across roots.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_reparent_keeps_links_symmetric((n, ops) in arb_scenario()) {
        let mut sut: PolyTree<usize> = PolyTree::new();
        let ids: Vec<NodeId> = (0..n).map(|v| sut.add_node(v)).collect();
        let mut model = Model { parent: vec![None; n], children: vec![Vec::new(); n] };

        for op in ops {
            match op {
                Op::SetParent(c, p) => {
                    let cycle = p.is_some_and(|p| model.is_ancestor_or_self(c, p))
                        && model.parent[c] != p;
                    let res = sut.set_parent(ids[c], p.map(|p| ids[p]));
                    if cycle {
                        prop_assert_eq!(res, Err(TreeError::WouldCycle));
                    } else {
                        prop_assert_eq!(res, Ok(ids[c]));
                        model.reparent(c, p);
                    }
                }
                Op::RemoveChild(p, c) => {
                    let res = sut.remove_child(ids[p], ids[c]);
                    if model.parent[c] == Some(p) {
                        prop_assert_eq!(res, Ok(()));
                        model.reparent(c, None);
                    } else {
                        prop_assert_eq!(res, Err(TreeError::NotAChild));
                    }
                }
            }

            sut.check_invariants();
            for i in 0..n {
                let kids: Vec<NodeId> = model.children[i].iter().map(|&k| ids[k]).collect();
                prop_assert_eq!(sut.children(ids[i]).unwrap(), kids);
                prop_assert_eq!(sut.parent(ids[i]).unwrap(), model.parent[i].map(|p| ids[p]));
                prop_assert_eq!(sut.count(ids[i]).unwrap(), model.subtree_size(i));
            }
            let total: usize = sut.roots().map(|r| sut.count(r).unwrap()).sum();
            prop_assert_eq!(total, n);
        }
    }
}

// Property: in a tree with unique values, BFS and DFS from the root find
// exactly the node holding a value when it is in the root's subtree.
proptest! {
    #[test]
    fn prop_search_finds_identical_node((n, ops) in arb_scenario(), probe in 0usize..12) {
        let mut sut: PolyTree<usize> = PolyTree::new();
        let ids: Vec<NodeId> = (0..n).map(|v| sut.add_node(v)).collect();
        for op in ops {
            if let Op::SetParent(c, p) = op {
                let _ = sut.set_parent(ids[c], p.map(|p| ids[p]));
            }
        }
        let under_root = |mut id: NodeId| loop {
            if id == ids[0] {
                return true;
            }
            match sut.parent(id).unwrap() {
                Some(p) => id = p,
                None => return false,
            }
        };
        let root = sut.node(ids[0]).unwrap();
        let expected = (probe < n).then(|| ids[probe]).filter(|&id| under_root(id));
        prop_assert_eq!(root.bfs(&probe).map(|x| x.id()), expected);
        prop_assert_eq!(root.dfs(&probe).map(|x| x.id()), expected);
    }
}
