// =====================================================================
// File: config.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 22, 2025
//
//! Command-line and environment configuration for the catalog binary.
// =====================================================================

use std::path::PathBuf;

use clap::Parser;

use crate::codec::{Codec, Collation};
use crate::key::{KeyContext, KeyFamily};
use crate::storage::DATA_FILE;

/// Catalog index configuration.
#[derive(Parser, Debug, Clone)]
#[command(name = "bookindex", about = "Sort, search and index a fixed-width book catalog")]
pub struct Config {
    // === Input ===
    /// Record file of 64-byte catalog entries
    #[arg(long, env = "BOOKINDEX_DATA_FILE", default_value = DATA_FILE)]
    pub data_file: PathBuf,

    /// Codepage of the record text fields
    #[arg(long, env = "BOOKINDEX_CODEC", default_value = "cp866", value_enum)]
    pub codec: Codec,

    // === Ordering ===
    /// Collation for sorting and tree keys
    #[arg(long, env = "BOOKINDEX_COLLATION", default_value = "russian", value_enum)]
    pub collation: Collation,

    /// Key family the records are sorted and searched by
    #[arg(long, env = "BOOKINDEX_SORT_KEY", default_value = "surname", value_enum)]
    pub sort_key: KeyFamily,

    /// Key family used by TREE when none is given
    #[arg(long, env = "BOOKINDEX_TREE_KEY", default_value = "author", value_enum)]
    pub tree_key: KeyFamily,
}


impl Config {
    /// Context the session sorts and searches with.
    pub fn key_context(&self) -> KeyContext {
        KeyContext::new(self.sort_key, self.codec, self.collation)
    }
}
