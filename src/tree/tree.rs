// =====================================================================
// File: tree/tree.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 21, 2025
//
// Description:
//   The weighted search tree (`WeightedTree`) produced by algorithm A1
//   (see `build.rs`) and the operations on it:
//
//   - `find` / `find_text` : BST descent; a hit bumps the node's weight.
//   - `find_pages`         : numeric lookup for page-count trees.
//   - traversals           : in-, pre-, post-order, and all records in
//                            key order.
//   - `weighted_height`    : average search depth under the weights.
//   - `clear`              : post-order teardown, also run on drop.
//
// Notes:
//   * Weight bumps never restructure the tree.
//   * Nothing here recurses: equal weights make a chain as deep as the
//     key count, so every walk keeps its pending nodes in a `Vec`.
//   * A cleared tree behaves like an empty one; every query on it
//     returns an empty result.
// =====================================================================

use std::cmp::Ordering;
use std::fmt::Write as _;

use tracing::debug;

use super::{Traversal, TreeNode};
use crate::error::Result;
use crate::key::{self, Key, KeyContext, KeyFamily};
use crate::record::Record;

/// Weighted search tree over borrowed records.
#[derive(Debug)]
pub struct WeightedTree<'a> {
    pub(crate) root: Option<Box<TreeNode<'a>>>,
    /// Distinct keys the tree was built from.
    pub total_keys: usize,
    /// Records in the queue the tree was built from.
    pub total_records: usize,
    pub(crate) ctx: KeyContext,
}

/// Outcome of a keyed lookup.
#[derive(Debug)]
pub struct Lookup<'t, 'a> {
    /// The matching node, already reinforced.
    pub node: Option<&'t TreeNode<'a>>,
    /// Key comparisons spent, including the final miss.
    pub comparisons: usize,
    /// Level of the matching node (root = 1), 0 on a miss.
    pub level: usize,
}

/// Outcome of a page-count lookup.
#[derive(Debug, Default)]
pub struct PagesLookup<'a> {
    pub records: Vec<&'a Record>,
    pub comparisons: usize,
}

/// Publication years listed per node in [`NodeStats`].
pub const LISTED_YEARS: usize = 2;

/// One row of [`WeightedTree::node_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStats {
    pub key: String,
    pub weight: u32,
    pub level: usize,
    pub weighted_level: u64,
    pub records: usize,
    /// Years of the node's first [`LISTED_YEARS`] records.
    pub years: Vec<i16>,
    /// The node has more records than `years` lists.
    pub more_years: bool,
}


impl NodeStats {
    /// Years as a comma separated list, `...` marking the unlisted rest.
    ///
    /// # Example
    /// ```
    /// use bookindex::tree::NodeStats;
    /// let row = NodeStats {
    ///     key: "Иванов".into(),
    ///     weight: 3,
    ///     level: 1,
    ///     weighted_level: 3,
    ///     records: 3,
    ///     years: vec![1999, 2004],
    ///     more_years: true,
    /// };
    /// assert_eq!(row.years_label(), "1999, 2004, ...");
    /// ```
    pub fn years_label(&self) -> String {
        let mut parts: Vec<String> = self.years.iter().map(i16::to_string).collect();
        if self.more_years {
            parts.push("...".to_string());
        }
        parts.join(", ")
    }
}


impl<'a> WeightedTree<'a> {
    pub fn root(&self) -> Option<&TreeNode<'a>> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key family the tree was built with.
    pub fn family(&self) -> KeyFamily {
        self.ctx.family
    }

    /// Looks up `key` and bumps the matching node's weight by one.
    ///
    /// Each visited node costs one equality comparison plus one direction
    /// comparison if it is not the match; running off the tree costs one.
    ///
    /// # Example
    /// ```
    /// use bookindex::{Codec, Key, KeyContext, Record, RecordQueue};
    /// use bookindex::tree::build_a1;
    ///
    /// let store = vec![Record::from_text(Codec::Cp866, "Петров", "", "", 0, 0)];
    /// let queue: RecordQueue = store.iter().collect();
    /// let mut tree = build_a1(&queue, &KeyContext::default()).unwrap();
    ///
    /// let hit = tree.find(&Key::Text("Петров".into()));
    /// assert_eq!(hit.node.map(|n| n.weight), Some(2));
    /// assert_eq!(hit.level, 1);
    /// ```
    pub fn find(&mut self, key: &Key) -> Lookup<'_, 'a> {
        let ctx = self.ctx;
        let mut comparisons = 0;
        let mut level = 1;
        let mut cursor = self.root.as_deref_mut();

        while let Some(node) = cursor {
            comparisons += 1;
            let ord = ctx.order(key, &node.key);
            if ord == Ordering::Equal {
                node.weight += 1;
                debug!(key = %key, weight = node.weight, level, comparisons, "tree hit");
                return Lookup {
                    node: Some(&*node),
                    comparisons,
                    level,
                };
            }

            comparisons += 1;
            cursor = if ord == Ordering::Less {
                node.left.as_deref_mut()
            } else {
                node.right.as_deref_mut()
            };
            level += 1;
        }

        comparisons += 1;
        debug!(key = %key, comparisons, "tree miss");
        Lookup {
            node: None,
            comparisons,
            level: 0,
        }
    }

    /// Text-keyed lookup: trims the text and maps `_` to spaces first, so
    /// "Архипов_В_К" finds the key "Архипов В К".
    pub fn find_text(&mut self, text: &str) -> Lookup<'_, 'a> {
        let key = Key::Text(key::normalize_lookup(text));
        self.find(&key)
    }

    /// Page-count lookup.
    ///
    /// Parses `text` as a page count and descends by integer order. On a
    /// hit the node's weight is bumped and its records collected, then the
    /// search carries on into both children of the hit. Keys are unique,
    /// so that never finds a second node; it only adds comparisons.
    ///
    /// # Errors
    /// [`crate::Error::MalformedNumericKey`] if `text` is not an `i16`.
    pub fn find_pages(&mut self, text: &str) -> Result<PagesLookup<'a>> {
        let target = key::parse_pages(text)?;
        let ctx = self.ctx;
        let mut found = PagesLookup::default();

        search_pages(self.root.as_deref_mut(), &target, &ctx, &mut found);
        debug!(
            pages = %target,
            hits = found.records.len(),
            comparisons = found.comparisons,
            "page-count lookup"
        );
        Ok(found)
    }

    /// Nodes in the given traversal order. Empty for an empty tree.
    pub fn traverse(&self, order: Traversal) -> Vec<&TreeNode<'a>> {
        let mut out = Vec::with_capacity(self.total_keys);
        if let Some(root) = &self.root {
            root.walk(order, &mut out);
        }
        out
    }

    pub fn in_order(&self) -> Vec<&TreeNode<'a>> {
        self.traverse(Traversal::InOrder)
    }

    pub fn pre_order(&self) -> Vec<&TreeNode<'a>> {
        self.traverse(Traversal::PreOrder)
    }

    pub fn post_order(&self) -> Vec<&TreeNode<'a>> {
        self.traverse(Traversal::PostOrder)
    }

    /// Every record in the tree, grouped by key in ascending key order.
    pub fn in_order_records(&self) -> Vec<&'a Record> {
        let mut out = Vec::with_capacity(self.total_records);
        if let Some(root) = &self.root {
            root.collect_records(&mut out);
        }
        out
    }

    /// Weighted average node level: sum(weight * level) / sum(weight),
    /// root level 1. Computed fresh on every call; 0.0 for an empty tree.
    pub fn weighted_height(&self) -> f64 {
        let (mut weighted, mut total) = (0u64, 0u64);
        if let Some(root) = &self.root {
            root.accumulate_weights(1, &mut weighted, &mut total);
        }
        if total == 0 {
            0.0
        } else {
            weighted as f64 / total as f64
        }
    }

    /// In-order rows of key, weight, level, weight * level, record count
    /// and the first publication years.
    pub fn node_stats(&self) -> Vec<NodeStats> {
        let Some(root) = &self.root else {
            return Vec::new();
        };

        root.walk_levels(Traversal::InOrder, 1)
            .into_iter()
            .map(|(node, level)| NodeStats {
                key: node.key.to_string(),
                weight: node.weight,
                level,
                weighted_level: u64::from(node.weight) * level as u64,
                records: node.records.len(),
                years: node.records.iter().take(LISTED_YEARS).map(|r| r.year).collect(),
                more_years: node.records.len() > LISTED_YEARS,
            })
            .collect()
    }

    /// Indented outline, one node per line: `key [w:.., n:.., L:..]`.
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        // (node, level, indent, last child of its parent)
        let mut stack: Vec<(&TreeNode<'a>, usize, String, bool)> =
            self.root.as_deref().map(|root| (root, 1, String::new(), true)).into_iter().collect();

        while let Some((node, level, indent, last)) = stack.pop() {
            let branch = match (level, last) {
                (1, _) => "",
                (_, true) => "`-- ",
                (_, false) => "|-- ",
            };
            let _ = writeln!(
                out,
                "{indent}{branch}{} [w:{}, n:{}, L:{}]",
                node.key,
                node.weight,
                node.records.len(),
                level
            );

            let child_indent = match (level, last) {
                (1, _) => indent,
                (_, true) => format!("{indent}    "),
                (_, false) => format!("{indent}|   "),
            };
            // Right first, so the left subtree prints first
            if let Some(right) = node.right.as_deref() {
                stack.push((right, level + 1, child_indent.clone(), true));
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, level + 1, child_indent, node.right.is_none()));
            }
        }
        out
    }

    /// Releases every node in post order and returns how many were freed.
    /// Records are never touched. Calling it again frees nothing.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Vec<Box<TreeNode<'a>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            if node.is_leaf() {
                released += 1;
                continue;
            }
            // Revisit the parent after both subtrees are gone
            let left = node.left.take();
            let right = node.right.take();
            stack.push(node);
            stack.extend(right);
            stack.extend(left);
        }

        self.total_keys = 0;
        self.total_records = 0;
        released
    }
}


impl Drop for WeightedTree<'_> {
    fn drop(&mut self) {
        // The default drop recurses once per level
        self.clear();
    }
}


/// Depth-first page-count search from `root`. A hit also searches both of
/// its subtrees; every visited node costs one comparison, plus one more
/// on a miss, and every empty subtree reached costs one.
fn search_pages<'a>(
    root: Option<&mut TreeNode<'a>>,
    target: &Key,
    ctx: &KeyContext,
    found: &mut PagesLookup<'a>,
) {
    let mut stack = vec![root];

    while let Some(next) = stack.pop() {
        found.comparisons += 1;
        let Some(node) = next else {
            continue;
        };

        let order = ctx.order(target, &node.key);
        let TreeNode {
            weight,
            records,
            left,
            right,
            ..
        } = node;
        match order {
            Ordering::Equal => {
                *weight += 1;
                found.records.extend(records.iter().copied());
                // Keys are unique, so this only costs comparisons
                stack.push(right.as_deref_mut());
                stack.push(left.as_deref_mut());
            }
            Ordering::Less => {
                found.comparisons += 1;
                stack.push(left.as_deref_mut());
            }
            Ordering::Greater => {
                found.comparisons += 1;
                stack.push(right.as_deref_mut());
            }
        }
    }
}
