//! # bookindex
//! Sorting, prefix search and weighted search trees over a fixed-width
//! book catalog.
//!
//! ## Features
//! - 64-byte records with CP866 text fields, loaded into an owned store
//! - Hoare quicksort of record references under a Russian collation
//! - Prefix binary search that gathers every matching record into a queue
//! - Weighted search tree (algorithm A1) built from key frequencies in a
//!   queue, with weight reinforcement on lookup
//! - Command loop with case-insensitive commands
//!
//! ## Usage
//! This crate is primarily consumed by the binary in `main.rs`,
//! which provides the REPL interface. All reusable logic and
//! unit tests live here so the project can be tested with `cargo test`.
// =====================================================================
// File: lib.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 22, 2025
//
//   This module implements the command loop that accepts the
//   following commands:
//
//     `COUNT`              -> Number of loaded records
//     `LIST [n]`           -> First n (default 20) records in sorted order
//     `SEARCH <prefix>`    -> Boundary search on the first 3 characters;
//                             replaces the queue and prints the match count
//     `EXACT <prefix>`     -> Same search with collation comparisons
//     `QUEUE`              -> Lists the records in the current queue
//     `TREE [family]`      -> Builds the A1 tree from the queue
//                             (surname | author | pages)
//     `FIND <key...>`      -> Tree lookup; a hit bumps the node's weight
//     `TRAVERSE`           -> In-, pre- and post-order key listings
//     `STATS`              -> Per-node table and weighted height
//     `SHOW`               -> Outline of the tree
//     `CLEAR`              -> Drops the queue and the tree
//     `EXIT` / `QUIT`      -> Terminate the program
// =====================================================================
pub mod codec;
pub use codec::{Codec, Collation};

pub mod config;
pub use config::Config;

pub mod error;
pub use error::{Error, Result};

pub mod key;
pub use key::{Key, KeyContext, KeyFamily};

pub mod queue;
pub use queue::RecordQueue;

pub mod record;
pub use record::Record;

pub mod search;
pub use search::{binary_search_queue, boundary_search};

pub mod session;
pub use session::{Found, Session};

pub mod sort;
pub use sort::sort_records;

pub mod storage;
pub use storage::{DATA_FILE, append_record, load_or_empty, load_records};

pub mod tree;
pub use tree::{WeightedTree, build_a1};

#[cfg(test)]
mod proptests;

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, error};

/// Records printed by `LIST` without an argument.
const DEFAULT_LIST_LEN: usize = 20;

/// Result of handling a single user command.
///
/// - `Continue` means the REPL should keep running.
/// - `Exit` means the REPL should break out and terminate.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Exit,
}


/// Read–Evaluate–Print Loop (REPL) over standard input and output.
///
/// # Arguments
/// * `session` - The active [`Session`] holding the sorted records, the
///   current queue and the current tree.
/// * `default_tree` - Key family `TREE` uses when none is given.
///
/// # Example
/// ```no_run
/// use bookindex::{KeyContext, KeyFamily, Session, load_or_empty, repl_loop};
///
/// let store = load_or_empty("testBase1.dat");
/// let mut session = Session::new(&store, KeyContext::default());
/// repl_loop(&mut session, KeyFamily::Author); // <- waits for user input interactively
/// ```
pub fn repl_loop(session: &mut Session<'_>, default_tree: KeyFamily) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let proper_syntax = "Syntax Usage: COUNT, LIST [n], SEARCH <prefix>, EXACT <prefix>, QUEUE, \
                         TREE [surname|author|pages], FIND <key>, TRAVERSE, STATS, SHOW, CLEAR, EXIT";

    for input_line in stdin.lock().lines() {
        let full_command = match input_line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        };
        let (cmd, args) = parse_command(&full_command);

        match handle_command(&cmd, &args, proper_syntax, default_tree, session, &mut out) {
            Ok(CommandResult::Exit) => break,
            Ok(CommandResult::Continue) => (),
            Err(e) => {
                error!(error = %e, "failed to write output");
                break;
            }
        }
    }
}


/// Parses a raw input line into a command and its arguments.
///
/// The first token is treated as the command (normalized to uppercase),
/// and the remaining tokens are collected as arguments. Leading and
/// trailing whitespace is ignored.
fn parse_command(line: &str) -> (String, Vec<String>) {
    let mut command_segments = line.split_whitespace();
    let cmd = command_segments.next().unwrap_or("").to_uppercase();
    let args: Vec<String> = command_segments.map(|s| s.to_string()).collect();

    (cmd, args)
}


/// Handles a single user command and returns whether the REPL should continue or exit.
///
/// Unknown commands print an error and the syntax line. Responses go to
/// `out`; the only failure is a failed write.
fn handle_command(
    cmd: &str,
    args: &[String],
    proper_syntax: &str,
    default_tree: KeyFamily,
    session: &mut Session<'_>,
    out: &mut impl Write,
) -> io::Result<CommandResult> {
    debug!(cmd, args = args.len(), "command");
    let codec = session.ctx.codec;

    match cmd {
        // COUNT
        "COUNT" => {
            writeln!(out, "{}", session.sorted.len())?;
        }

        // LIST [n]
        "LIST" => {
            let limit = match args.first().map(|n| n.parse::<usize>()) {
                None => DEFAULT_LIST_LEN,
                Some(Ok(n)) => n,
                Some(Err(_)) => {
                    writeln!(out, "ERR: LIST takes a record count")?;
                    return Ok(CommandResult::Continue);
                }
            };
            for (idx, rec) in session.sorted.iter().take(limit).enumerate() {
                writeln!(out, "{:>5} {}", idx + 1, rec.display_line(codec))?;
            }
        }

        // SEARCH <prefix> / EXACT <prefix>
        "SEARCH" | "EXACT" => {
            if args.is_empty() {
                writeln!(out, "ERR: {cmd} requires a prefix")?;
            } else {
                let prefix = args.join(" ");
                let found = if cmd == "SEARCH" {
                    session.search(&prefix).len()
                } else {
                    session.search_exact(&prefix).len()
                };
                writeln!(out, "{found} records match")?;
            }
        }

        "QUEUE" => {
            if session.queue.is_empty() {
                writeln!(out, "queue is empty")?;
            }
            for (idx, rec) in session.queue.iter().enumerate() {
                writeln!(out, "{:>5} {}", idx + 1, rec.display_line(codec))?;
            }
        }

        // TREE [surname|author|pages]
        "TREE" => {
            let family = match args.first() {
                None => default_tree,
                Some(name) => match KeyFamily::from_str(name) {
                    Ok(family) => family,
                    Err(_) => {
                        writeln!(out, "ERR: unknown key family '{name}'")?;
                        return Ok(CommandResult::Continue);
                    }
                },
            };
            match session.build_tree(family) {
                Some(tree) => writeln!(
                    out,
                    "tree by {family}: {} keys, {} records",
                    tree.total_keys, tree.total_records
                )?,
                None => writeln!(out, "ERR: queue is empty, run SEARCH first")?,
            }
        }

        // FIND <key...>
        "FIND" => {
            if args.is_empty() {
                writeln!(out, "ERR: FIND requires a key")?;
                return Ok(CommandResult::Continue);
            }
            let text = args.join(" ");
            match session.find(&text) {
                Ok(None) => writeln!(out, "ERR: no tree, run TREE first")?,
                Ok(Some(Found::Text(hit))) => match hit.node {
                    Some(node) => {
                        writeln!(
                            out,
                            "found {} records at level {} (weight {}, {} comparisons)",
                            node.records.len(),
                            hit.level,
                            node.weight,
                            hit.comparisons
                        )?;
                        for rec in &node.records {
                            writeln!(out, "      {}", rec.display_line(codec))?;
                        }
                    }
                    None => writeln!(out, "not found ({} comparisons)", hit.comparisons)?,
                },
                Ok(Some(Found::Pages(hit))) => {
                    if hit.records.is_empty() {
                        writeln!(out, "not found ({} comparisons)", hit.comparisons)?;
                    } else {
                        writeln!(
                            out,
                            "found {} records ({} comparisons)",
                            hit.records.len(),
                            hit.comparisons
                        )?;
                        for rec in &hit.records {
                            writeln!(out, "      {}", rec.display_line(codec))?;
                        }
                    }
                }
                Err(e) => writeln!(out, "ERR: {e}")?,
            }
        }

        "TRAVERSE" => match &session.tree {
            Some(tree) => {
                writeln!(out, "in-order:   {}", join_keys(&tree.in_order()))?;
                writeln!(out, "pre-order:  {}", join_keys(&tree.pre_order()))?;
                writeln!(out, "post-order: {}", join_keys(&tree.post_order()))?;
            }
            None => writeln!(out, "ERR: no tree, run TREE first")?,
        },

        "STATS" => match &session.tree {
            Some(tree) => {
                writeln!(
                    out,
                    "{:<32} {:>6} {:>5} {:>8} {:>7}  {}",
                    "key", "weight", "level", "w*level", "records", "years"
                )?;
                for row in tree.node_stats() {
                    writeln!(
                        out,
                        "{:<32} {:>6} {:>5} {:>8} {:>7}  {}",
                        row.key,
                        row.weight,
                        row.level,
                        row.weighted_level,
                        row.records,
                        row.years_label()
                    )?;
                }
                writeln!(out, "weighted height: {:.3}", tree.weighted_height())?;
            }
            None => writeln!(out, "ERR: no tree, run TREE first")?,
        },

        "SHOW" => match &session.tree {
            Some(tree) => write!(out, "{}", tree.render_outline())?,
            None => writeln!(out, "ERR: no tree, run TREE first")?,
        },

        "CLEAR" => {
            let released = session.clear_tree();
            session.clear_queue();
            writeln!(out, "cleared queue and {released} tree nodes")?;
        }

        // Exit command
        "EXIT" | "QUIT" => {
            writeln!(out, "Exiting...")?;
            return Ok(CommandResult::Exit);
        }

        // Empty input
        "" => {
            writeln!(out, "Enter a command.")?;
        }

        // Everything else will be noted and returned as an error
        _ => {
            writeln!(out, "ERROR: command '{cmd}' not handled")?;
            writeln!(out, "{proper_syntax}")?;
        }
    }
    Ok(CommandResult::Continue)
}


/// Comma separated keys of `nodes`.
fn join_keys(nodes: &[&tree::TreeNode<'_>]) -> String {
    nodes.iter().map(|n| n.key.to_string()).collect::<Vec<_>>().join(", ")
}


// =================================================================
// lib.rs Unit tests
// =================================================================
