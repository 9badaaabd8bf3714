#![cfg(test)]

// Property tests for DoublyLinkedList against a Vec model that remembers
// which handle owns each position.

use crate::linked_list::{DoublyLinkedList, NodeHandle};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Append(u8),
    Prepend(u8),
    RemoveValue(u8),
    // Index into the model; taken modulo its length.
    RemoveHandle(usize),
    MoveToBack(usize),
    Nth(usize),
    Contains(u8),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let v = 0u8..8;
    let op = prop_oneof![
        4 => v.clone().prop_map(Op::Append),
        3 => v.clone().prop_map(Op::Prepend),
        2 => v.clone().prop_map(Op::RemoveValue),
        2 => any::<usize>().prop_map(Op::RemoveHandle),
        1 => any::<usize>().prop_map(Op::MoveToBack),
        1 => (0usize..12).prop_map(Op::Nth),
        1 => v.prop_map(Op::Contains),
    ];
    proptest::collection::vec(op, 1..100)
}

// Property: for any sequence of edits the list yields exactly the model's
// values in order, handles stay bound to their values, stale handles never
// resolve, and link symmetry holds after every step.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_vec_model(ops in arb_ops()) {
        let mut sut: DoublyLinkedList<u8> = DoublyLinkedList::new();
        let mut model: Vec<(NodeHandle, u8)> = Vec::new();
        let mut stale: Vec<NodeHandle> = Vec::new();

        for op in ops {
            match op {
                Op::Append(v) => {
                    let h = sut.append(v);
                    model.push((h, v));
                }
                Op::Prepend(v) => {
                    let h = sut.prepend(v);
                    model.insert(0, (h, v));
                }
                Op::RemoveValue(v) => {
                    let pos = model.iter().position(|&(_, mv)| mv == v);
                    let before: Vec<u8> = sut.iter().copied().collect();
                    prop_assert_eq!(sut.remove(&v), pos.map(|_| v));
                    match pos {
                        Some(p) => stale.push(model.remove(p).0),
                        None => {
                            let after: Vec<u8> = sut.iter().copied().collect();
                            prop_assert_eq!(before, after, "missing value must not alter the list");
                        }
                    }
                }
                Op::RemoveHandle(i) => {
                    if !model.is_empty() {
                        let (h, v) = model.remove(i % model.len());
                        prop_assert_eq!(sut.remove_node(h), Some(v));
                        stale.push(h);
                    }
                }
                Op::MoveToBack(i) => {
                    if !model.is_empty() {
                        let entry = model.remove(i % model.len());
                        prop_assert!(sut.move_to_back(entry.0));
                        model.push(entry);
                    }
                }
                Op::Nth(i) => {
                    prop_assert_eq!(sut.nth(i), model.get(i).map(|(_, v)| v));
                }
                Op::Contains(v) => {
                    prop_assert_eq!(sut.contains(&v), model.iter().any(|&(_, mv)| mv == v));
                }
            }

            sut.check_invariants();
            let got: Vec<(NodeHandle, u8)> = sut.nodes().map(|(h, v)| (h, *v)).collect();
            prop_assert_eq!(&got, &model);
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.first(), model.first().map(|(_, v)| v));
            prop_assert_eq!(sut.last(), model.last().map(|(_, v)| v));
            for &h in &stale {
                prop_assert!(sut.get(h).is_none());
                prop_assert!(!sut.move_to_back(h));
            }
        }
    }
}
