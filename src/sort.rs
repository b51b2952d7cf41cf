// =====================================================================
// File: sort.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 19, 2025
//
// Description:
//   Hoare-partition quicksort over record references, ordered by the
//   key text under the context's collation. Records never move; only the
//   references in the slice are swapped.
//
// Notes:
//   * Pivot is the key of the middle element, captured before any swap.
//   * Recursion goes into the smaller half, the larger half is handled by
//     the loop, so stack depth stays O(log n).
//   * Not stable. Equal keys may end up on either side of the pivot.
// =====================================================================

use std::cmp::Ordering;

use tracing::debug;

use crate::key::KeyContext;
use crate::record::Record;

/// Sorts the whole slice of references by key.
///
/// # Example
/// ```
/// use bookindex::{Codec, KeyContext, KeyFamily, Record};
/// use bookindex::sort::sort_records;
///
/// let store = vec![
///     Record::from_text(Codec::Cp866, "", "Т_И_Сидоров", "", 0, 0),
///     Record::from_text(Codec::Cp866, "", "Т_И_Иванов", "", 0, 0),
/// ];
/// let ctx = KeyContext::default().with_family(KeyFamily::Surname);
/// let mut refs: Vec<&Record> = store.iter().collect();
/// sort_records(&mut refs, &ctx);
/// assert_eq!(ctx.key_text(refs[0]), "Иванов");
/// ```
pub fn sort_records(refs: &mut [&Record], ctx: &KeyContext) {
    if refs.len() < 2 {
        return;
    }
    quicksort(refs, 0, refs.len() - 1, ctx);
    debug!(records = refs.len(), family = %ctx.family, "quicksort finished");
}


/// Sorts `refs[left..=right]` in place.
pub fn quicksort(refs: &mut [&Record], mut left: usize, mut right: usize, ctx: &KeyContext) {
    while left < right {
        let split = partition(refs, left, right, ctx);

        // Smaller side recursively, larger side on the next loop turn
        if split - left < right - split {
            quicksort(refs, left, split, ctx);
            left = split + 1;
        } else {
            quicksort(refs, split + 1, right, ctx);
            right = split;
        }
    }
}


/// Hoare partition of `refs[left..=right]`, `left < right`.
///
/// Returns `j` such that every key in `left..=j` is <= every key in
/// `j+1..=right`. With a lower-middle pivot `j` is always below `right`,
/// so both halves shrink.
fn partition(refs: &mut [&Record], left: usize, right: usize, ctx: &KeyContext) -> usize {
    let mid = left + (right - left) / 2;
    let pivot = ctx.key_text(refs[mid]);

    let mut i = left;
    let mut j = right;

    loop {
        while ctx.collate(&ctx.key_text(refs[i]), &pivot) == Ordering::Less {
            i += 1;
        }
        while ctx.collate(&ctx.key_text(refs[j]), &pivot) == Ordering::Greater {
            j -= 1;
        }

        if i >= j {
            return j;
        }

        refs.swap(i, j);
        i += 1;
        j -= 1;
    }
}


/// `true` when every adjacent pair is in key order.
pub fn is_sorted(refs: &[&Record], ctx: &KeyContext) -> bool {
    refs.windows(2).all(|pair| {
        ctx.collate(&ctx.key_text(pair[0]), &ctx.key_text(pair[1])) != Ordering::Greater
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, Collation};
    use crate::key::KeyFamily;

    fn by_surname(surnames: &[&str]) -> Vec<Record> {
        surnames
            .iter()
            .map(|s| Record::from_text(Codec::Cp866, "", &format!("Книга_А_{s}"), "", 2000, 10))
            .collect()
    }

    fn surname_ctx() -> KeyContext {
        KeyContext::new(KeyFamily::Surname, Codec::Cp866, Collation::Russian)
    }

    #[test]
    fn sorts_surnames_alphabetically() {
        let store = by_surname(&["Сидоров", "Иванов", "Петров", "Андреев", "Яковлев", "Ёлкин", "Жуков"]);
        let ctx = surname_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);

        let keys: Vec<String> = refs.iter().map(|r| ctx.key_text(r)).collect();
        assert_eq!(keys, ["Андреев", "Ёлкин", "Жуков", "Иванов", "Петров", "Сидоров", "Яковлев"]);
    }

    #[test]
    fn keeps_every_reference_exactly_once() {
        let store = by_surname(&["Б", "А", "Б", "В", "А", "Б", "А"]);
        let ctx = surname_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);

        assert!(is_sorted(&refs, &ctx));
        for rec in &store {
            let hits = refs.iter().filter(|r| std::ptr::eq(**r, rec)).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn empty_and_single_inputs_are_noops() {
        let ctx = surname_ctx();
        let mut empty: Vec<&Record> = Vec::new();
        sort_records(&mut empty, &ctx);
        assert!(empty.is_empty());

        let store = by_surname(&["Один"]);
        let mut one: Vec<&Record> = store.iter().collect();
        sort_records(&mut one, &ctx);
        assert!(std::ptr::eq(one[0], &store[0]));
    }

    #[test]
    fn sorts_a_sub_range_only() {
        let store = by_surname(&["Я", "В", "Б", "А", "Ю"]);
        let ctx = surname_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        quicksort(&mut refs, 1, 3, &ctx);

        let keys: Vec<String> = refs.iter().map(|r| ctx.key_text(r)).collect();
        assert_eq!(keys, ["Я", "А", "Б", "В", "Ю"]);
    }

    #[test]
    fn already_sorted_and_reversed_inputs() {
        let names: Vec<String> = (0..200).map(|i| format!("K{i:04}")).collect();
        let ctx = KeyContext::new(KeyFamily::Surname, Codec::Raw, Collation::Bytewise);

        let ascending = by_surname(&names.iter().map(String::as_str).collect::<Vec<_>>());
        let mut refs: Vec<&Record> = ascending.iter().collect();
        sort_records(&mut refs, &ctx);
        assert!(is_sorted(&refs, &ctx));

        let mut refs: Vec<&Record> = ascending.iter().rev().collect();
        sort_records(&mut refs, &ctx);
        assert!(is_sorted(&refs, &ctx));
    }

    #[test]
    fn all_equal_keys_terminate() {
        let store = by_surname(&["Иванов"; 50]);
        let ctx = surname_ctx();
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);
        assert_eq!(refs.len(), 50);
        assert!(is_sorted(&refs, &ctx));
    }

    #[test]
    fn page_family_sorts_by_decimal_text() {
        let store: Vec<Record> = [300, 20, 1000]
            .iter()
            .map(|&p| Record::from_text(Codec::Cp866, "", "", "", 0, p))
            .collect();
        let ctx = surname_ctx().with_family(KeyFamily::Pages);
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx);

        let keys: Vec<String> = refs.iter().map(|r| ctx.key_text(r)).collect();
        assert_eq!(keys, ["1000", "20", "300"]);
    }
}
