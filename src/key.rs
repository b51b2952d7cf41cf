// =====================================================================
// File: key.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 19, 2025
//
// Description:
//   Keys are never stored on a record. They are derived on demand from
//   one of three key families:
//
//   - `Surname` : the part of the title after its second delimiter
//                 ("Роман_И_Иванов" -> "Иванов").
//   - `Author`  : the author field, padding and control chars removed.
//   - `Pages`   : the page count.
//
//   `KeyContext` bundles the family with the codec and collation so the
//   sorter, the searches and the tree all order keys the same way.
//
// Notes:
//   * Sorting and prefix search order keys by their text form.
//   * The tree orders page keys numerically (see `KeyContext::order`).
// =====================================================================

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::codec::{self, Codec, Collation};
use crate::error::{Error, Result};
use crate::record::Record;

/// Fixed prefix length used by the indexed searches.
pub const SEARCH_PREFIX_LEN: usize = 3;

/// Strategy for deriving a key from a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum KeyFamily {
    Surname,
    #[default]
    Author,
    Pages,
}


impl KeyFamily {
    pub fn label(self) -> &'static str {
        match self {
            KeyFamily::Surname => "surname",
            KeyFamily::Author => "author",
            KeyFamily::Pages => "pages",
        }
    }
}


impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


impl FromStr for KeyFamily {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <KeyFamily as ValueEnum>::from_str(s, true)
    }
}


/// A derived key. Text keys come from the surname/author families.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Text(String),
    Pages(i16),
}


impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => f.write_str(s),
            Key::Pages(n) => write!(f, "{n}"),
        }
    }
}


/// Everything needed to derive and order keys consistently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub family: KeyFamily,
    pub codec: Codec,
    pub collation: Collation,
}


impl KeyContext {
    pub fn new(family: KeyFamily, codec: Codec, collation: Collation) -> Self {
        Self { family, codec, collation }
    }

    /// Same codec and collation, different key family.
    pub fn with_family(self, family: KeyFamily) -> Self {
        Self { family, ..self }
    }

    /// Derives the key of `rec` under this context's family.
    pub fn key(&self, rec: &Record) -> Key {
        match self.family {
            KeyFamily::Surname => Key::Text(extract_surname(rec, self.codec)),
            KeyFamily::Author => Key::Text(extract_author(rec, self.codec)),
            KeyFamily::Pages => Key::Pages(rec.pages),
        }
    }

    /// Text form of the key of `rec`.
    pub fn key_text(&self, rec: &Record) -> String {
        match self.key(rec) {
            Key::Text(s) => s,
            Key::Pages(n) => n.to_string(),
        }
    }

    /// Locale comparator over key text.
    pub fn collate(&self, a: &str, b: &str) -> Ordering {
        self.collation.compare(a, b)
    }

    /// Case-insensitive level of [`KeyContext::collate`].
    pub fn collate_primary(&self, a: &str, b: &str) -> Ordering {
        self.collation.compare_primary(a, b)
    }

    /// Tree ordering: text keys by collation, page keys numerically.
    /// Mixed keys cannot come out of a single family; text sorts first.
    pub fn order(&self, a: &Key, b: &Key) -> Ordering {
        match (a, b) {
            (Key::Text(x), Key::Text(y)) => self.collation.compare(x, y),
            (Key::Pages(x), Key::Pages(y)) => x.cmp(y),
            (Key::Text(_), Key::Pages(_)) => Ordering::Less,
            (Key::Pages(_), Key::Text(_)) => Ordering::Greater,
        }
    }
}


/// Surname segment of the title.
///
/// Splits on the first two `_`; if there is no second `_`, on the first two
/// spaces. Without two delimiters the whole trimmed title is the key.
///
/// # Example
/// ```
/// use bookindex::{Codec, Record};
/// use bookindex::key::extract_surname;
/// let rec = Record::from_text(Codec::Cp866, "", "Повесть_А_Смирнов", "", 0, 0);
/// assert_eq!(extract_surname(&rec, Codec::Cp866), "Смирнов");
/// let spaced = Record::from_text(Codec::Cp866, "", "Повесть А Смирнов", "", 0, 0);
/// assert_eq!(extract_surname(&spaced, Codec::Cp866), "Смирнов");
/// ```
pub fn extract_surname(rec: &Record, codec: Codec) -> String {
    let title = trim_raw(&rec.title);

    let second_delim = nth_delimiter(title, b'_').or_else(|| nth_delimiter(title, b' '));
    match second_delim {
        Some(pos) => {
            let rest = &title[pos + 1..];
            let start = rest.iter().position(|&b| b != b' ').unwrap_or(rest.len());
            codec.decode(&rest[start..])
        }
        None => codec.decode(title),
    }
}


/// Author field, decoded, with padding and control characters removed.
pub fn extract_author(rec: &Record, codec: Codec) -> String {
    let text = codec.decode(&rec.author);
    let cleaned: String = text.chars().filter(|c| !matches!(c, '\0' | '\r' | '\n' | '\t')).collect();
    codec::trim_pad(&cleaned).to_string()
}


/// Position of the second occurrence of `delim`.
fn nth_delimiter(raw: &[u8], delim: u8) -> Option<usize> {
    let first = raw.iter().position(|&b| b == delim)?;
    raw[first + 1..]
        .iter()
        .position(|&b| b == delim)
        .map(|off| first + 1 + off)
}


/// Drops trailing spaces and NULs from a raw field.
fn trim_raw(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |pos| pos + 1);
    &raw[..end]
}


/// First `n` characters of `key`, space padded on the right.
///
/// # Example
/// ```
/// use bookindex::key::prefix;
/// assert_eq!(prefix("Иванов", 3), "Ива");
/// assert_eq!(prefix("Ли", 3), "Ли ");
/// assert_eq!(prefix("", 3), "   ");
/// ```
pub fn prefix(key: &str, n: usize) -> String {
    let mut out: String = key.chars().take(n).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', n - len));
    out
}


/// Legacy case-fold comparator: at most the first `SEARCH_PREFIX_LEN`
/// folded characters, a shorter operand is less. Folded characters rank
/// as in the Russian collation, so `ё` sits between `е` and `ж`.
pub fn fold_compare(a: &str, b: &str) -> Ordering {
    let left = a.chars().take(SEARCH_PREFIX_LEN).map(codec::fold_rank);
    let right = b.chars().take(SEARCH_PREFIX_LEN).map(codec::fold_rank);
    left.cmp(right)
}


/// Normalizes lookup text for the text-keyed tree lookup: trims whitespace,
/// maps `_` to the key's word separator, drops NULs.
pub fn normalize_lookup(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|&c| c != '\0')
        .map(|c| if c == '_' { ' ' } else { c })
        .collect()
}


/// Parses lookup text for the page-keyed tree lookup.
pub fn parse_pages(text: &str) -> Result<Key> {
    let trimmed = text.trim();
    trimmed
        .parse::<i16>()
        .map(Key::Pages)
        .map_err(|_| Error::MalformedNumericKey(trimmed.to_string()))
}
