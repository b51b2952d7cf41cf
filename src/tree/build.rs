// =====================================================================
// File: tree/build.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 21, 2025
//
// Description:
//   Algorithm A1: builds the weighted search tree from a queue.
//
//   1. Group the queue's records by key; weight = group size.
//   2. Sort the distinct keys ascending.
//   3. For a key range, the heaviest key becomes the subtree root (first
//      one wins a tie), then the same for the keys to its left and right.
//   4. Link the nodes children-first into the finished tree.
//
//   The result is a valid BST over the keys with frequent keys pulled
//   toward the root. O(n^2) in the number of distinct keys; this is the
//   greedy approximation, not the dynamic-programming optimum.
// =====================================================================

use std::collections::HashMap;

use tracing::{debug, info};

use super::{TreeNode, WeightedTree};
use crate::key::{Key, KeyContext};
use crate::queue::RecordQueue;
use crate::record::Record;

/// All records sharing one key, in queue order.
#[derive(Debug)]
struct KeyGroup<'a> {
    key: Key,
    records: Vec<&'a Record>,
}


/// Builds an A1 tree from the records in `queue`, keyed by `ctx.family`.
///
/// # Returns
/// `None` for an empty queue, otherwise the tree. The queue is left as is.
///
/// # Example
/// ```
/// use bookindex::{Codec, KeyContext, KeyFamily, Record, RecordQueue};
/// use bookindex::tree::build_a1;
///
/// let store: Vec<Record> = ["Б", "А", "Б"]
///     .iter()
///     .map(|a| Record::from_text(Codec::Cp866, a, "", "", 0, 0))
///     .collect();
/// let queue: RecordQueue = store.iter().collect();
/// let tree = build_a1(&queue, &KeyContext::default()).unwrap();
///
/// assert_eq!(tree.total_keys, 2);
/// assert_eq!(tree.total_records, 3);
/// assert_eq!(tree.root().unwrap().key.to_string(), "Б");
/// ```
pub fn build_a1<'a>(queue: &RecordQueue<'a>, ctx: &KeyContext) -> Option<WeightedTree<'a>> {
    if queue.is_empty() {
        debug!("queue is empty, no tree built");
        return None;
    }

    let mut groups = group_by_key(queue, ctx);
    groups.sort_by(|a, b| ctx.order(&a.key, &b.key));

    let total_keys = groups.len();
    let weights: Vec<u32> = groups.iter().map(|g| g.records.len() as u32).collect();
    let root = build_ranges(&weights, groups);

    info!(
        family = %ctx.family,
        keys = total_keys,
        records = queue.len(),
        "A1 tree built"
    );

    Some(WeightedTree {
        root,
        total_keys,
        total_records: queue.len(),
        ctx: *ctx,
    })
}


fn group_by_key<'a>(queue: &RecordQueue<'a>, ctx: &KeyContext) -> Vec<KeyGroup<'a>> {
    let mut groups: Vec<KeyGroup<'a>> = Vec::new();
    let mut slot_of: HashMap<Key, usize> = HashMap::new();

    for rec in queue {
        let key = ctx.key(rec);
        match slot_of.get(&key) {
            Some(&slot) => groups[slot].records.push(rec),
            None => {
                slot_of.insert(key.clone(), groups.len());
                groups.push(KeyGroup { key, records: vec![rec] });
            }
        }
    }
    groups
}


/// Index of the heaviest key in `start..end`; the lowest index wins ties.
pub(crate) fn max_weight_index(weights: &[u32], start: usize, end: usize) -> usize {
    let mut best = start;
    for i in start + 1..end {
        if weights[i] > weights[best] {
            best = i;
        }
    }
    best
}


/// Builds the tree over every key range, heaviest key at each root.
///
/// Ranges are split with an explicit work list, recording each index's
/// children. Nodes are then linked in reverse split order, which always
/// finishes both children before their parent.
fn build_ranges<'a>(weights: &[u32], groups: Vec<KeyGroup<'a>>) -> Option<Box<TreeNode<'a>>> {
    if groups.is_empty() {
        return None;
    }

    let root = max_weight_index(weights, 0, groups.len());
    let mut children: Vec<(Option<usize>, Option<usize>)> = vec![(None, None); groups.len()];
    let mut split_order = Vec::with_capacity(groups.len());
    let mut ranges = vec![(0, groups.len(), root)];

    while let Some((start, end, idx)) = ranges.pop() {
        split_order.push(idx);
        if start < idx {
            let left = max_weight_index(weights, start, idx);
            children[idx].0 = Some(left);
            ranges.push((start, idx, left));
        }
        if idx + 1 < end {
            let right = max_weight_index(weights, idx + 1, end);
            children[idx].1 = Some(right);
            ranges.push((idx + 1, end, right));
        }
    }

    let mut nodes: Vec<Option<Box<TreeNode<'a>>>> = groups
        .into_iter()
        .map(|g| Some(Box::new(TreeNode::new(g.key, g.records))))
        .collect();

    for &idx in split_order.iter().rev() {
        let (left, right) = children[idx];
        let left = left.and_then(|l| nodes[l].take());
        let right = right.and_then(|r| nodes[r].take());
        if let Some(node) = nodes[idx].as_mut() {
            node.left = left;
            node.right = right;
        }
    }
    nodes[root].take()
}
