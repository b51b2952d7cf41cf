// =====================================================================
// File: tree/node.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 21, 2025
//
// Description:
//   Node of the weighted search tree. Each node holds:
//
//   - `key`     : the distinct key this node stands for.
//   - `weight`  : how often the key was seen, bumped on every hit.
//   - `records` : every record reference that carries the key (never empty).
//   - `left` / `right` : owned subtrees with smaller / larger keys.
//
// Notes:
//   * Nodes own their children through `Box`, never the records.
//   * Tree-wide operations (build, lookup, teardown) live in `tree.rs`
//     and `build.rs`; this file only has per-subtree helpers.
//   * Traversals keep their pending nodes in a `Vec`, not on the call
//     stack: equal weights build a chain as deep as the key count.
// =====================================================================

use crate::key::Key;
use crate::record::Record;

/// Order in which [`TreeNode::walk`] visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Left, node, right: ascending key order.
    InOrder,
    /// Node, left, right.
    PreOrder,
    /// Left, right, node.
    PostOrder,
}

#[derive(Debug)]
pub struct TreeNode<'a> {
    pub key: Key,
    pub weight: u32,
    pub records: Vec<&'a Record>,
    pub left: Option<Box<TreeNode<'a>>>,
    pub right: Option<Box<TreeNode<'a>>>,
}


impl<'a> TreeNode<'a> {
    /// Creates a childless node whose weight is the number of records.
    ///
    /// # Example
    /// ```
    /// use bookindex::{Codec, Key, Record};
    /// use bookindex::tree::TreeNode;
    /// let rec = Record::from_text(Codec::Cp866, "Иванов", "", "", 0, 0);
    /// let node = TreeNode::new(Key::Text("Иванов".into()), vec![&rec, &rec]);
    /// assert_eq!(node.weight, 2);
    /// assert!(node.is_leaf());
    /// ```
    pub fn new(key: Key, records: Vec<&'a Record>) -> Self {
        Self {
            key,
            weight: records.len() as u32,
            records,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Appends the nodes of this subtree to `out` in the given order.
    pub fn walk<'t>(&'t self, order: Traversal, out: &mut Vec<&'t TreeNode<'a>>) {
        out.extend(self.walk_levels(order, 1).into_iter().map(|(node, _)| node));
    }

    /// Nodes of this subtree in the given order, each with its level.
    /// `level` is this node's level (root = 1).
    pub fn walk_levels<'t>(&'t self, order: Traversal, level: usize) -> Vec<(&'t TreeNode<'a>, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![Step::Expand(self, level)];

        while let Some(step) = stack.pop() {
            let (node, level) = match step {
                Step::Emit(node, level) => {
                    out.push((node, level));
                    continue;
                }
                Step::Expand(node, level) => (node, level),
            };

            // Pushed in reverse, the stack pops left before right
            let left = node.left.as_deref().map(|l| Step::Expand(l, level + 1));
            let right = node.right.as_deref().map(|r| Step::Expand(r, level + 1));
            match order {
                Traversal::PreOrder => {
                    stack.extend(right);
                    stack.extend(left);
                    stack.push(Step::Emit(node, level));
                }
                Traversal::InOrder => {
                    stack.extend(right);
                    stack.push(Step::Emit(node, level));
                    stack.extend(left);
                }
                Traversal::PostOrder => {
                    stack.push(Step::Emit(node, level));
                    stack.extend(right);
                    stack.extend(left);
                }
            }
        }
        out
    }

    /// Appends every record of this subtree to `out` in ascending key order.
    pub fn collect_records(&self, out: &mut Vec<&'a Record>) {
        for (node, _) in self.walk_levels(Traversal::InOrder, 1) {
            out.extend(node.records.iter().copied());
        }
    }

    /// Adds `weight * level` and `weight` of every node in the subtree to
    /// the running totals. `level` is this node's level (root = 1).
    pub fn accumulate_weights(&self, level: u64, weighted: &mut u64, total: &mut u64) {
        for (node, depth) in self.walk_levels(Traversal::PreOrder, 1) {
            let weight = u64::from(node.weight);
            *weighted += weight * (level + depth as u64 - 1);
            *total += weight;
        }
    }
}


/// Pending work of [`TreeNode::walk_levels`].
enum Step<'t, 'a> {
    /// Push the node and its children in traversal order.
    Expand(&'t TreeNode<'a>, usize),
    /// Output the node.
    Emit(&'t TreeNode<'a>, usize),
}
