// =====================================================================
// File: error.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 18, 2025
//
//! Error type shared by the loader and the tree lookups.
//!
//! Empty inputs and misses are not errors here: they come back as empty
//! queues, absent trees, or `None`. Only data that breaks the record model
//! (or I/O underneath the loader) surfaces as an [`Error`].
// =====================================================================

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or appending the record file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A page-count lookup was given text that is not a 16-bit integer.
    #[error("malformed numeric key: '{0}'")]
    MalformedNumericKey(String),
}
