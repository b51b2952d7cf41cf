// =====================================================================
// File: record.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 18, 2025
//
// Description:
//   Fixed-layout bibliographic record as stored in the catalog file.
//   Every record occupies exactly `RECORD_SIZE` bytes:
//
//     author     12 bytes  CP866 text, space padded
//     title      32 bytes  CP866 text, "name_initials_surname" or spaced
//     publisher  16 bytes  CP866 text, space padded
//     year        2 bytes  little-endian i16
//     pages       2 bytes  little-endian i16
//
// Notes:
//   * Records are owned by the loaded store (`Vec<Record>`). Sorting,
//     searching and the tree only ever hold `&Record`.
// =====================================================================

use crate::codec::Codec;

pub const AUTHOR_LEN: usize = 12;
pub const TITLE_LEN: usize = 32;
pub const PUBLISHER_LEN: usize = 16;

/// Size of one record on disk, no delimiters between records.
pub const RECORD_SIZE: usize = AUTHOR_LEN + TITLE_LEN + PUBLISHER_LEN + 2 + 2;

const TITLE_OFFSET: usize = AUTHOR_LEN;
const PUBLISHER_OFFSET: usize = TITLE_OFFSET + TITLE_LEN;
const YEAR_OFFSET: usize = PUBLISHER_OFFSET + PUBLISHER_LEN;
const PAGES_OFFSET: usize = YEAR_OFFSET + 2;

/// One catalog entry. Text fields keep their raw codepage bytes.
#[derive(Debug, PartialEq, Eq)]
pub struct Record {
    pub author: [u8; AUTHOR_LEN],
    pub title: [u8; TITLE_LEN],
    pub publisher: [u8; PUBLISHER_LEN],
    pub year: i16,
    pub pages: i16,
}


impl Record {
    /// Parses a record from its on-disk image.
    ///
    /// # Example
    /// ```
    /// use bookindex::record::{Record, RECORD_SIZE};
    /// let mut raw = [b' '; RECORD_SIZE];
    /// raw[60..62].copy_from_slice(&1999i16.to_le_bytes());
    /// raw[62..64].copy_from_slice(&320i16.to_le_bytes());
    /// let rec = Record::from_bytes(&raw);
    /// assert_eq!(rec.year, 1999);
    /// assert_eq!(rec.pages, 320);
    /// ```
    pub fn from_bytes(raw: &[u8; RECORD_SIZE]) -> Self {
        let mut author = [0u8; AUTHOR_LEN];
        let mut title = [0u8; TITLE_LEN];
        let mut publisher = [0u8; PUBLISHER_LEN];

        author.copy_from_slice(&raw[..TITLE_OFFSET]);
        title.copy_from_slice(&raw[TITLE_OFFSET..PUBLISHER_OFFSET]);
        publisher.copy_from_slice(&raw[PUBLISHER_OFFSET..YEAR_OFFSET]);

        Self {
            author,
            title,
            publisher,
            year: i16::from_le_bytes([raw[YEAR_OFFSET], raw[YEAR_OFFSET + 1]]),
            pages: i16::from_le_bytes([raw[PAGES_OFFSET], raw[PAGES_OFFSET + 1]]),
        }
    }

    /// Serializes the record back into its on-disk image.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut raw = [0u8; RECORD_SIZE];
        raw[..TITLE_OFFSET].copy_from_slice(&self.author);
        raw[TITLE_OFFSET..PUBLISHER_OFFSET].copy_from_slice(&self.title);
        raw[PUBLISHER_OFFSET..YEAR_OFFSET].copy_from_slice(&self.publisher);
        raw[YEAR_OFFSET..PAGES_OFFSET].copy_from_slice(&self.year.to_le_bytes());
        raw[PAGES_OFFSET..].copy_from_slice(&self.pages.to_le_bytes());
        raw
    }

    /// Builds a record from readable text, encoding each field with `codec`
    /// and space padding (or truncating) it to its fixed width.
    ///
    /// # Example
    /// ```
    /// use bookindex::{Codec, Record};
    /// let rec = Record::from_text(Codec::Cp866, "Иванов И И", "Роман_И_Иванов", "Мир", 2001, 250);
    /// assert_eq!(Codec::Cp866.decode(&rec.author), "Иванов И И");
    /// ```
    pub fn from_text(
        codec: Codec,
        author: &str,
        title: &str,
        publisher: &str,
        year: i16,
        pages: i16,
    ) -> Self {
        Self {
            author: fixed_field(codec, author),
            title: fixed_field(codec, title),
            publisher: fixed_field(codec, publisher),
            year,
            pages,
        }
    }

    /// One-line listing: decoded fields in fixed columns, then year and pages.
    pub fn display_line(&self, codec: Codec) -> String {
        format!(
            "{:<12} {:<32} {:<16} {:>5} {:>5}",
            codec.decode(&self.author),
            codec.decode(&self.title),
            codec.decode(&self.publisher),
            self.year,
            self.pages
        )
    }
}


/// Encodes `text` into a space padded field of width `N`.
fn fixed_field<const N: usize>(codec: Codec, text: &str) -> [u8; N] {
    let mut field = [b' '; N];
    let encoded = codec.encode(text);
    let len = encoded.len().min(N);
    field[..len].copy_from_slice(&encoded[..len]);
    field
}
