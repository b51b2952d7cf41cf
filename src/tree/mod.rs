// =====================================================================
// File: tree/mod.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 21, 2025
//
//! The `tree` module holds the weighted search tree built from a search
//! result queue with algorithm A1.
//!
//! Structure:
//! - `node.rs`  : [`TreeNode`] and per-subtree helpers (traversal, sums).
//! - `build.rs` : [`build_a1`], grouping a queue by key and rooting every
//!                key range at its heaviest key.
//! - `tree.rs`  : [`WeightedTree`] with lookups, traversals, statistics
//!                and teardown.
//! - `tests.rs` : Unit tests for the tree (compiled only in test mode).
// =====================================================================

pub mod build;
pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use self::build::build_a1;
pub use self::node::{Traversal, TreeNode};
pub use self::tree::{Lookup, NodeStats, PagesLookup, WeightedTree};
