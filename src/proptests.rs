// =====================================================================
// File: proptests.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 24, 2025
//
// Description:
//   Property tests over generated catalogs:
//
//   - Sorting yields an ordered permutation of the store
//   - Both prefix searches return exactly the matching records
//   - A1 trees keep key order and put the heaviest key at the root
//   - The record queue behaves like a `VecDeque`
// =====================================================================
use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, VecDeque};

use crate::key::{SEARCH_PREFIX_LEN, fold_compare, prefix};
use crate::sort::is_sorted;

/// Author-keyed record for every name; pages hold the input position.
fn store_of(names: &[String]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, a)| Record::from_text(Codec::Cp866, a, "", "", 0, i as i16))
        .collect()
}

fn author_ctx() -> KeyContext {
    KeyContext::default().with_family(KeyFamily::Author)
}

fn name_strategy() -> impl Strategy<Value = String> + Clone {
    // Never starts with a space; trailing spaces are trimmed as padding
    "[А-Яа-яЁёA-Za-z0-9-][А-Яа-яЁёA-Za-z0-9 -]{0,7}"
}

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name_strategy(), 0..=200)
}

#[derive(Debug, Clone)]
enum QueueOp {
    Enqueue(usize),
    Dequeue,
    Clear,
}

fn queue_ops_strategy() -> impl Strategy<Value = Vec<QueueOp>> {
    let op = prop_oneof![
        6 => (0usize..16).prop_map(QueueOp::Enqueue),
        3 => Just(QueueOp::Dequeue),
        1 => Just(QueueOp::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_sort_is_an_ordered_permutation(names in names_strategy()) {
        let store = store_of(&names);
        let ctx = author_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);

        prop_assert!(is_sorted(&refs, &ctx));

        let mut positions: Vec<i16> = refs.iter().map(|r| r.pages).collect();
        positions.sort_unstable();
        let expected: Vec<i16> = (0..store.len() as i16).collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn prop_boundary_search_returns_exactly_the_matching_run(
        names in prop::collection::vec(name_strategy(), 1..=200),
        pick in any::<prop::sample::Index>(),
        stray in name_strategy(),
        use_stray in any::<bool>(),
    ) {
        let store = store_of(&names);
        let ctx = author_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);

        let target = if use_stray { stray } else { pick.get(&names).clone() };
        let wanted = prefix(&target, SEARCH_PREFIX_LEN);
        let expected: Vec<i16> = refs
            .iter()
            .filter(|r| {
                let key = prefix(&ctx.key_text(r), SEARCH_PREFIX_LEN);
                fold_compare(&key, &wanted) == std::cmp::Ordering::Equal
            })
            .map(|r| r.pages)
            .collect();

        let found: Vec<i16> = boundary_search(&refs, &target, &ctx).iter().map(|r| r.pages).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_collation_search_returns_exactly_the_matching_run(
        names in prop::collection::vec(name_strategy(), 1..=200),
        pick in any::<prop::sample::Index>(),
        stray in name_strategy(),
        use_stray in any::<bool>(),
    ) {
        let store = store_of(&names);
        let ctx = author_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);

        let target = if use_stray { stray } else { pick.get(&names).clone() };
        let wanted = prefix(&target, SEARCH_PREFIX_LEN);
        let expected: Vec<i16> = refs
            .iter()
            .filter(|r| ctx.collate(&prefix(&ctx.key_text(r), SEARCH_PREFIX_LEN), &wanted).is_eq())
            .map(|r| r.pages)
            .collect();

        let found: Vec<i16> = binary_search_queue(&refs, &target, &ctx).iter().map(|r| r.pages).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_a1_tree_is_key_ordered_with_heaviest_root(
        names in prop::collection::vec("[АБВГД]{1,2}", 1..=120),
    ) {
        let store = store_of(&names);
        let ctx = author_ctx();
        let queue: RecordQueue = store.iter().collect();
        let tree = build_a1(&queue, &ctx).unwrap();

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for name in &names {
            *counts.entry(name.clone()).or_default() += 1;
        }
        let mut distinct: Vec<String> = counts.keys().cloned().collect();
        distinct.sort_by(|a, b| ctx.collate(a, b));

        let in_order: Vec<String> = tree.in_order().iter().map(|n| n.key.to_string()).collect();
        prop_assert_eq!(&in_order, &distinct);
        prop_assert_eq!(tree.total_records, names.len());

        let heaviest = counts.values().copied().max().unwrap_or(0);
        let first_heaviest = distinct.iter().find(|k| counts[*k] == heaviest).cloned();
        let root = tree.root().unwrap();
        prop_assert_eq!(root.weight, heaviest);
        prop_assert_eq!(Some(root.key.to_string()), first_heaviest);
    }

    #[test]
    fn prop_queue_matches_a_deque(ops in queue_ops_strategy()) {
        let store = store_of(&(0..16).map(|i| format!("A{i}")).collect::<Vec<_>>());
        let mut queue = RecordQueue::new();
        let mut model: VecDeque<i16> = VecDeque::new();

        for op in ops {
            match op {
                QueueOp::Enqueue(i) => {
                    queue.enqueue(&store[i]);
                    model.push_back(store[i].pages);
                }
                QueueOp::Dequeue => {
                    prop_assert_eq!(queue.dequeue().map(|r| r.pages), model.pop_front());
                }
                QueueOp::Clear => {
                    queue.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.front().map(|r| r.pages), model.front().copied());
        }

        let drained: Vec<i16> = queue.iter().map(|r| r.pages).collect();
        prop_assert_eq!(drained, Vec::from(model));
    }
}
