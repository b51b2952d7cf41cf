// =====================================================================
// File: session.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 22, 2025
//
// Description:
// Defines the `Session` struct, the running context every catalog
// command works against.
//
// Responsibilities:
// - Borrow the loaded record store and keep a sorted reference array.
// - Hold the current search result queue (replaced by every search).
// - Hold the current weighted tree (replaced by every build).
// - Route tree lookups to the text or page-count variant.
//
// One session per REPL run; nothing here is global.
// =====================================================================

use tracing::{debug, info};

use crate::error::Result;
use crate::key::{KeyContext, KeyFamily};
use crate::queue::RecordQueue;
use crate::record::Record;
use crate::search::{binary_search_queue, boundary_search};
use crate::sort::sort_records;
use crate::tree::{Lookup, PagesLookup, WeightedTree, build_a1};

/// Outcome of [`Session::find`], by the family of the current tree.
#[derive(Debug)]
pub enum Found<'t, 'a> {
    Text(Lookup<'t, 'a>),
    Pages(PagesLookup<'a>),
}


impl Found<'_, '_> {
    pub fn comparisons(&self) -> usize {
        match self {
            Found::Text(hit) => hit.comparisons,
            Found::Pages(hit) => hit.comparisons,
        }
    }

    /// Number of records the lookup matched.
    pub fn record_count(&self) -> usize {
        match self {
            Found::Text(hit) => hit.node.map_or(0, |n| n.records.len()),
            Found::Pages(hit) => hit.records.len(),
        }
    }
}


/// A catalog session over a borrowed record store.
pub struct Session<'a> {
    /// Codec, collation and sort/search key family.
    pub ctx: KeyContext,

    /// Record references in key order.
    pub sorted: Vec<&'a Record>,

    /// Result of the last search.
    pub queue: RecordQueue<'a>,

    /// Tree built from the last queue, if any.
    pub tree: Option<WeightedTree<'a>>,
}


impl<'a> Session<'a> {
    /// Creates a session and sorts references to `records` under `ctx`.
    ///
    /// # Example
    /// ```
    /// use bookindex::{Codec, KeyContext, Record, Session};
    ///
    /// let store: Vec<Record> = ["Б", "А"]
    ///     .iter()
    ///     .map(|a| Record::from_text(Codec::Cp866, a, "", "", 0, 0))
    ///     .collect();
    /// let session = Session::new(&store, KeyContext::default());
    /// assert_eq!(session.ctx.key_text(session.sorted[0]), "А");
    /// ```
    pub fn new(records: &'a [Record], ctx: KeyContext) -> Self {
        let mut sorted: Vec<&'a Record> = records.iter().collect();
        sort_records(&mut sorted, &ctx);
        info!(records = sorted.len(), family = %ctx.family, "session ready");

        Self {
            ctx,
            sorted,
            queue: RecordQueue::new(),
            tree: None,
        }
    }

    /// Boundary search on the first three characters of `prefix`.
    /// Replaces the current queue.
    pub fn search(&mut self, prefix: &str) -> &RecordQueue<'a> {
        self.queue = boundary_search(&self.sorted, prefix, &self.ctx);
        &self.queue
    }

    /// Same as [`Session::search`] with collation comparisons.
    pub fn search_exact(&mut self, prefix: &str) -> &RecordQueue<'a> {
        self.queue = binary_search_queue(&self.sorted, prefix, &self.ctx);
        &self.queue
    }

    /// Builds an A1 tree from the current queue keyed by `family` and makes
    /// it the current tree. An empty queue leaves no tree.
    pub fn build_tree(&mut self, family: KeyFamily) -> Option<&WeightedTree<'a>> {
        let ctx = self.ctx.with_family(family);
        self.tree = build_a1(&self.queue, &ctx);
        self.tree.as_ref()
    }

    /// Looks `text` up in the current tree.
    ///
    /// # Returns
    /// `Ok(None)` when there is no tree, otherwise the text or page-count
    /// outcome depending on the family the tree was built with.
    ///
    /// # Errors
    /// [`crate::Error::MalformedNumericKey`] for a page-count tree and a
    /// non-numeric `text`.
    pub fn find(&mut self, text: &str) -> Result<Option<Found<'_, 'a>>> {
        let Some(tree) = self.tree.as_mut() else {
            debug!("lookup without a tree");
            return Ok(None);
        };

        let found = match tree.family() {
            KeyFamily::Pages => Found::Pages(tree.find_pages(text)?),
            KeyFamily::Surname | KeyFamily::Author => Found::Text(tree.find_text(text)),
        };
        Ok(Some(found))
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Tears the current tree down, returning the number of nodes freed.
    pub fn clear_tree(&mut self) -> usize {
        self.tree.take().map_or(0, |mut tree| tree.clear())
    }
}


// =====================================================================
// Unit Tests for Session
// =====================================================================
