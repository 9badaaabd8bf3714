// BinarySearchTree property tests.
//
// Property 1: multiset equivalence under random inserts and deletes.
//  - Model: BTreeMap<value, multiplicity>.
//  - Invariant: in_order() equals the model expanded in sorted order;
//               len() equals the total multiplicity; the ordering rule
//               holds after every step.
//  - Operations: insert, delete (present or absent), find, contains.
//
// Property 2: traversals are permutations of one another.
//  - pre/post/level order all visit every node exactly once.
use handle_collections::BinarySearchTree;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8),
    Delete(u8),
    Find(u8),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    // Small value range forces duplicates and repeated deletes.
    let v = 0u8..24;
    let op = prop_oneof![
        5 => v.clone().prop_map(Op::Insert),
        3 => v.clone().prop_map(Op::Delete),
        1 => v.prop_map(Op::Find),
    ];
    proptest::collection::vec(op, 1..120)
}

fn expand(model: &BTreeMap<u8, usize>) -> Vec<u8> {
    model
        .iter()
        .flat_map(|(&v, &n)| std::iter::repeat(v).take(n))
        .collect()
}

// Property 1: multiset equivalence against BTreeMap.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_bst_matches_multiset(ops in arb_ops()) {
        let mut sut: BinarySearchTree<u8> = BinarySearchTree::new();
        let mut model: BTreeMap<u8, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    sut.insert(v);
                    *model.entry(v).or_default() += 1;
                }
                Op::Delete(v) => {
                    let present = model.get(&v).copied().unwrap_or(0) > 0;
                    prop_assert_eq!(sut.delete(&v), present.then_some(v));
                    if present {
                        let n = model.get_mut(&v).unwrap();
                        *n -= 1;
                        if *n == 0 {
                            model.remove(&v);
                        }
                    }
                }
                Op::Find(v) => {
                    let hit = sut.find(&v).map(|n| *n.value());
                    prop_assert_eq!(hit, model.contains_key(&v).then_some(v));
                    prop_assert_eq!(sut.contains(&v), model.contains_key(&v));
                }
            }

            sut.check_invariants();
            prop_assert!(sut.is_valid());
            let got: Vec<u8> = sut.in_order().copied().collect();
            prop_assert_eq!(got, expand(&model));
            prop_assert_eq!(sut.len(), model.values().sum::<usize>());
            prop_assert_eq!(sut.min(), model.keys().next());
            prop_assert_eq!(sut.max(), model.keys().next_back());
        }
    }
}

// Property 2: every traversal visits the same multiset of values.
proptest! {
    #[test]
    fn prop_traversals_agree(values in proptest::collection::vec(any::<u16>(), 0..64)) {
        let tree: BinarySearchTree<u16> = values.iter().copied().collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();

        let mut pre: Vec<u16> = tree.pre_order().copied().collect();
        let mut post: Vec<u16> = tree.post_order().into_iter().copied().collect();
        let mut level: Vec<u16> = tree.level_order().into_iter().copied().collect();
        prop_assert_eq!(level.first(), values.first());
        pre.sort_unstable();
        post.sort_unstable();
        level.sort_unstable();
        prop_assert_eq!(&pre, &sorted);
        prop_assert_eq!(&post, &sorted);
        prop_assert_eq!(&level, &sorted);
        prop_assert_eq!(tree.height().is_none(), values.is_empty());
    }
}
