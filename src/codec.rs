// =====================================================================
// File: codec.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 18, 2025
//
//! Text handling for the catalog's legacy byte fields.
//!
//! - [`Codec`] turns fixed-width CP866 (DOS Cyrillic) fields into text and
//!   back. `Codec::Raw` is the fallback when the codepage is not wanted.
//! - [`Collation`] is the general purpose string ordering: a Russian
//!   alphabet collation, or plain byte order as the fallback.
//! - [`fold`] / [`fold_rank`] implement the legacy case fold used by the
//!   prefix search. Ranks are the Russian collation's primary weights, so a
//!   folded prefix orders the same way as the sorted keys it is matched
//!   against.
// =====================================================================

use std::cmp::Ordering;

use clap::ValueEnum;

/// CP866 bytes 0xB0..=0xFF. Bytes 0x80..=0xAF and 0xE0..=0xEF are letters
/// and are computed directly in `decode_byte`.
const CP866_HIGH: [char; 80] = [
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
    'Ё', 'ё', 'Є', 'є', 'Ї', 'ї', 'Ў', 'ў', '°', '∙', '·', '√', '№', '¤', '■', '\u{a0}',
];

/// Byte-to-text conversion for the record's fixed-width fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Codec {
    /// DOS Cyrillic codepage, the format the catalog file is written in.
    #[default]
    Cp866,
    /// No codepage: bytes are read as (lossy) UTF-8.
    Raw,
}


impl Codec {
    /// Decodes a field and trims the trailing pad (spaces and NULs).
    ///
    /// # Example
    /// ```
    /// use bookindex::Codec;
    /// let raw = [0x88, 0xA2, 0xA0, 0xAD, 0xAE, 0xA2, b' ', b' ', 0];
    /// assert_eq!(Codec::Cp866.decode(&raw), "Иванов");
    /// assert_eq!(Codec::Raw.decode(b"abc  "), "abc");
    /// ```
    pub fn decode(self, raw: &[u8]) -> String {
        let text: String = match self {
            Codec::Cp866 => raw.iter().map(|&b| decode_byte(b)).collect(),
            Codec::Raw => String::from_utf8_lossy(raw).into_owned(),
        };
        trim_pad(&text).to_string()
    }

    /// Encodes text into field bytes. Characters CP866 cannot hold become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Codec::Cp866 => text.chars().map(|c| encode_char(c).unwrap_or(b'?')).collect(),
            Codec::Raw => text.as_bytes().to_vec(),
        }
    }
}


/// Removes trailing spaces and NULs left over from fixed-width padding.
pub fn trim_pad(text: &str) -> &str {
    text.trim_end_matches([' ', '\0'])
}


fn decode_byte(b: u8) -> char {
    match b {
        0x00..=0x7F => b as char,
        // А..Я а..п
        0x80..=0xAF => char::from_u32(0x0410 + u32::from(b - 0x80)).unwrap_or('?'),
        _ => CP866_HIGH[usize::from(b - 0xB0)],
    }
}


fn encode_char(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x00..=0x7F => Some(code as u8),
        0x0410..=0x043F => Some(0x80 + (code - 0x0410) as u8),
        0x0440..=0x044F => Some(0xE0 + (code - 0x0440) as u8),
        _ => CP866_HIGH
            .iter()
            .position(|&h| h == c)
            .map(|idx| 0xB0 + idx as u8),
    }
}


/// Legacy case fold: ASCII and Cyrillic letters (including `ё`, `є`, `ї`
/// and `ў`) to upper case.
pub fn fold(c: char) -> char {
    match c {
        'a'..='z' => c.to_ascii_uppercase(),
        'а'..='я' => char::from_u32(c as u32 - 0x20).unwrap_or(c),
        'ё' => 'Ё',
        'є' => 'Є',
        'ї' => 'Ї',
        'ў' => 'Ў',
        _ => c,
    }
}


/// Rank of a folded character: its primary weight under
/// [`Collation::Russian`]. `Ё` ranks between `Е` and `Ж`, punctuation
/// before digits, Latin before Cyrillic.
///
/// # Example
/// ```
/// use bookindex::codec::fold_rank;
/// assert_eq!(fold_rank('ё'), fold_rank('Ё'));
/// assert!(fold_rank('Е') < fold_rank('Ё') && fold_rank('Ё') < fold_rank('Ж'));
/// ```
pub fn fold_rank(c: char) -> u64 {
    primary_weight(fold(c))
}


/// General purpose ordering of decoded text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Collation {
    /// Russian alphabetical order, case-insensitive first, `ё` after `е`.
    #[default]
    Russian,
    /// Raw UTF-8 byte order.
    Bytewise,
}


impl Collation {
    /// Compares two strings.
    ///
    /// `Russian` compares letters alphabetically ignoring case, then breaks
    /// ties lowercase-first, then by bytes, so `Equal` only for identical text.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    /// use bookindex::Collation;
    /// assert_eq!(Collation::Russian.compare("ёж", "ель"), Ordering::Greater);
    /// assert_eq!(Collation::Russian.compare("ёж", "жук"), Ordering::Less);
    /// assert_eq!(Collation::Russian.compare("петров", "Сидоров"), Ordering::Less);
    /// assert_eq!(Collation::Bytewise.compare("петров", "Сидоров"), Ordering::Greater);
    /// ```
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Bytewise => a.as_bytes().cmp(b.as_bytes()),
            Collation::Russian => {
                self.compare_primary(a, b)
                    .then_with(|| {
                        a.chars()
                            .map(char::is_uppercase)
                            .cmp(b.chars().map(char::is_uppercase))
                    })
                    .then_with(|| a.as_bytes().cmp(b.as_bytes()))
            }
        }
    }

    /// Primary level only: `Russian` ignores case (and nothing else),
    /// `Bytewise` has no weaker level and compares bytes.
    ///
    /// Whenever `compare(a, b)` is `Less`, `compare_primary(a, b)` is
    /// `Less` or `Equal`, so equal-primary keys sit in one run of a
    /// sorted array.
    pub fn compare_primary(self, a: &str, b: &str) -> Ordering {
        match self {
            Collation::Bytewise => a.as_bytes().cmp(b.as_bytes()),
            Collation::Russian => a.chars().map(primary_weight).cmp(b.chars().map(primary_weight)),
        }
    }
}


/// Primary collation weight: character class in the high half, position
/// within the class in the low half.
fn primary_weight(c: char) -> u64 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let (class, pos): (u64, u32) = match lower {
        '0'..='9' => (1, lower as u32),
        'a'..='z' => (2, lower as u32),
        'а'..='е' => (3, (lower as u32 - 'а' as u32) * 2),
        'ё' => (3, ('е' as u32 - 'а' as u32) * 2 + 1),
        'ж'..='я' => (3, (lower as u32 - 'а' as u32) * 2 + 2),
        _ if !lower.is_alphanumeric() => (0, lower as u32),
        _ => (4, lower as u32),
    };
    (class << 32) | u64::from(pos)
}
