// ============================================================
// File: storage.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 22, 2025
//
// Description:
//   Reads and appends fixed-width catalog records.
//
//   The record file is a flat sequence of 64-byte images (see
//   `record.rs`) with no header. Records are read front to back
//   into an owned `Vec<Record>`; every other component only
//   borrows from it.
//
// Notes:
//   - A trailing partial record is dropped with a warning.
//   - A missing file is an error for `load_records` and an
//     empty store for `load_or_empty`.
// ============================================================
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::{RECORD_SIZE, Record};

/// Default record file name.
pub const DATA_FILE: &str = "testBase1.dat";


/// Reads every complete record from `path`.
///
/// # Errors
/// [`crate::Error::Io`] if the file cannot be opened or read.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut raw = [0u8; RECORD_SIZE];

    loop {
        let filled = read_full(&mut reader, &mut raw)?;
        if filled == RECORD_SIZE {
            records.push(Record::from_bytes(&raw));
            continue;
        }
        if filled > 0 {
            warn!(
                path = %path.display(),
                bytes = filled,
                "ignoring trailing partial record"
            );
        }
        break;
    }

    info!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}


/// Like [`load_records`], but an unreadable file yields an empty store.
pub fn load_or_empty(path: impl AsRef<Path>) -> Vec<Record> {
    let path = path.as_ref();
    match load_records(path) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read records, starting empty");
            Vec::new()
        }
    }
}


/// Appends one record image to `path`, creating the file if needed.
pub fn append_record(path: impl AsRef<Path>, record: &Record) -> Result<()> {
    let path = path.as_ref();
    let mut data_file = OpenOptions::new().create(true).append(true).open(path)?;

    data_file.write_all(&record.to_bytes())?;
    data_file.flush()?;
    debug!(path = %path.display(), "record appended");
    Ok(())
}


/// Fills `buf` as far as the reader allows; returns the bytes read.
/// Fewer than `buf.len()` only at end of file.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
