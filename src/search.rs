// =====================================================================
// File: search.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Catalog Index Project
// Date: Nov. 20, 2025
//
// Description:
//   Indexed binary searches over the key-sorted reference array. Both
//   return a `RecordQueue` holding the full run of records whose first
//   three key characters match the target.
//
//   - `boundary_search`     : lower bound with the legacy case fold,
//                             then expands the run to both sides.
//   - `binary_search_queue` : one comparison per iteration at the
//                             collation's case-insensitive level, then
//                             keeps the run entries that collate equal
//                             with case.
//
// Notes:
//   * Target is cut to 3 characters and space padded, so "Ли" only
//     matches keys that are exactly "Ли" (padded), not "Лиханов".
//   * The fold ranks characters like the collation, so folded matches
//     are contiguous in the sorted array; the scan stops at the first
//     mismatch. O(log n + m).
// =====================================================================

use std::cmp::Ordering;

use tracing::debug;

use crate::codec::Collation;
use crate::key::{self, KeyContext, SEARCH_PREFIX_LEN};
use crate::queue::RecordQueue;
use crate::record::Record;

/// Three-character key prefix of a record.
fn key_prefix(rec: &Record, ctx: &KeyContext) -> String {
    key::prefix(&ctx.key_text(rec), SEARCH_PREFIX_LEN)
}


/// Search target: cut to `SEARCH_PREFIX_LEN` and padded. `None` if blank.
fn search_target(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    Some(key::prefix(text, SEARCH_PREFIX_LEN))
}


/// Leftmost index whose prefix is not less than `target` under `cmp`,
/// plus the number of probes it took.
fn lower_bound<F>(refs: &[&Record], ctx: &KeyContext, target: &str, cmp: F) -> (usize, usize)
where
    F: Fn(&str, &str) -> Ordering,
{
    let mut lo = 0;
    let mut hi = refs.len();
    let mut probes = 0;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        probes += 1;
        if cmp(key_prefix(refs[mid], ctx).as_str(), target) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    (lo, probes)
}


/// Collects the run around `at` whose prefixes compare equal under `cmp`,
/// keeping those accepted by `keep`, in array order.
fn collect_run<'a, F, K>(
    refs: &[&'a Record],
    ctx: &KeyContext,
    target: &str,
    at: usize,
    cmp: F,
    keep: K,
) -> RecordQueue<'a>
where
    F: Fn(&str, &str) -> Ordering,
    K: Fn(&str) -> bool,
{
    let mut queue = RecordQueue::new();
    let in_run = |rec: &Record| cmp(key_prefix(rec, ctx).as_str(), target) == Ordering::Equal;

    if at >= refs.len() || !in_run(refs[at]) {
        return queue;
    }

    // Walk back to the true start of the run
    let mut start = at;
    while start > 0 && in_run(refs[start - 1]) {
        start -= 1;
    }

    for &rec in &refs[start..] {
        let key = key_prefix(rec, ctx);
        if cmp(key.as_str(), target) != Ordering::Equal {
            break;
        }
        if keep(key.as_str()) {
            queue.enqueue(rec);
        }
    }
    queue
}


/// Boundary search with prefix expansion, using the legacy case fold.
///
/// # Arguments
/// * `refs`   - References sorted by [`crate::sort::sort_records`] under `ctx`.
/// * `target` - Search text; only its first three characters are used.
/// * `ctx`    - Key context the array was sorted with.
///
/// # Returns
/// A queue with every record whose folded 3-character key prefix equals
/// the target, in array order. Empty on no match, empty array, or blank
/// target.
///
/// # Example
/// ```
/// use bookindex::{Codec, KeyContext, KeyFamily, Record};
/// use bookindex::search::boundary_search;
/// use bookindex::sort::sort_records;
///
/// let store: Vec<Record> = ["Иванов", "Петров", "Иваненко", "Сидоров"]
///     .iter()
///     .map(|s| Record::from_text(Codec::Cp866, "", &format!("Т_И_{s}"), "", 0, 0))
///     .collect();
/// let ctx = KeyContext::default().with_family(KeyFamily::Surname);
/// let mut refs: Vec<&Record> = store.iter().collect();
/// sort_records(&mut refs, &ctx);
///
/// let hits = boundary_search(&refs, "ива", &ctx);
/// assert_eq!(hits.len(), 2);
/// ```
pub fn boundary_search<'a>(refs: &[&'a Record], target: &str, ctx: &KeyContext) -> RecordQueue<'a> {
    let Some(target) = search_target(target) else {
        return RecordQueue::new();
    };

    // Bytewise order has no case-insensitive level to fold against
    let fold = |a: &str, b: &str| match ctx.collation {
        Collation::Russian => key::fold_compare(a, b),
        Collation::Bytewise => ctx.collate_primary(a, b),
    };
    let (at, probes) = lower_bound(refs, ctx, &target, fold);
    let queue = collect_run(refs, ctx, &target, at, fold, |_| true);
    debug!(target = %target, probes, matches = queue.len(), "boundary search");
    queue
}


/// Single-comparison-per-iteration search with the locale collation.
///
/// Same contract as [`boundary_search`] but without the case fold: a
/// match means the 3-character prefixes collate as equal, case included.
/// The lower bound and the run use the collation's primary level, which
/// is monotone over the sorted array even when case varies inside a run.
pub fn binary_search_queue<'a>(refs: &[&'a Record], target: &str, ctx: &KeyContext) -> RecordQueue<'a> {
    let Some(target) = search_target(target) else {
        return RecordQueue::new();
    };

    let primary = |a: &str, b: &str| ctx.collate_primary(a, b);
    let (at, probes) = lower_bound(refs, ctx, &target, primary);
    let exact = |key: &str| ctx.collate(key, &target) == Ordering::Equal;
    let queue = collect_run(refs, ctx, &target, at, primary, exact);
    debug!(target = %target, probes, matches = queue.len(), "collation search");
    queue
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::key::KeyFamily;
    use crate::sort::sort_records;

    fn catalog(surnames: &[&str]) -> Vec<Record> {
        surnames
            .iter()
            .enumerate()
            .map(|(i, s)| Record::from_text(Codec::Cp866, "", &format!("Т_А_{s}"), "", 2000, i as i16))
            .collect()
    }

    fn ctx() -> KeyContext {
        KeyContext::new(KeyFamily::Surname, Codec::Cp866, Collation::Russian)
    }

    fn sorted(store: &[Record]) -> Vec<&Record> {
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &ctx());
        refs
    }

    fn surnames(queue: &RecordQueue<'_>) -> Vec<String> {
        queue.iter().map(|r| ctx().key_text(r)).collect()
    }

    const NAMES: [&str; 9] = [
        "Сидоров", "Иванов", "Петров", "Иваненко", "Ивлев", "Андреев", "Иваницкий", "Ли", "Лиханов",
    ];

    #[test]
    fn finds_the_whole_prefix_run() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        let hits = boundary_search(&refs, "Ива", &ctx());
        assert_eq!(surnames(&hits), ["Иваненко", "Иваницкий", "Иванов"]);
    }

    #[test]
    fn run_is_in_array_order_and_contiguous() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        let hits = boundary_search(&refs, "ива", &ctx());

        let first = refs.iter().position(|r| std::ptr::eq(*r, hits.front().unwrap())).unwrap();
        for (offset, rec) in hits.iter().enumerate() {
            assert!(std::ptr::eq(refs[first + offset], rec));
        }
    }

    #[test]
    fn target_is_case_folded() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        assert_eq!(boundary_search(&refs, "пЕт", &ctx()).len(), 1);
        assert_eq!(boundary_search(&refs, "СИД", &ctx()).len(), 1);
    }

    #[test]
    fn longer_target_uses_first_three_characters() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        assert_eq!(boundary_search(&refs, "Иваницкий", &ctx()).len(), 3);
    }

    #[test]
    fn short_target_matches_short_keys_only() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        assert_eq!(surnames(&boundary_search(&refs, "Ли", &ctx())), ["Ли"]);
        assert_eq!(surnames(&boundary_search(&refs, "Лих", &ctx())), ["Лиханов"]);
    }

    #[test]
    fn no_match_gives_empty_queue() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        assert!(boundary_search(&refs, "Яко", &ctx()).is_empty());
        assert!(boundary_search(&refs, "Ааа", &ctx()).is_empty());
        assert!(boundary_search(&refs, "Ивм", &ctx()).is_empty());
    }

    #[test]
    fn empty_inputs_give_empty_queue() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        assert!(boundary_search(&refs, "", &ctx()).is_empty());
        assert!(boundary_search(&refs, "   ", &ctx()).is_empty());
        assert!(boundary_search(&[], "Ива", &ctx()).is_empty());
        assert!(binary_search_queue(&refs, "", &ctx()).is_empty());
        assert!(binary_search_queue(&[], "Ива", &ctx()).is_empty());
    }

    #[test]
    fn run_at_both_ends_of_the_array() {
        let store = catalog(&["Абов", "Абрамов", "Борисов", "Юдин", "Юрьев"]);
        let refs = sorted(&store);
        assert_eq!(boundary_search(&refs, "Аб", &ctx()).len(), 0);
        assert_eq!(boundary_search(&refs, "Або", &ctx()).len(), 1);
        assert_eq!(boundary_search(&refs, "Юри", &ctx()).len(), 0);
        assert_eq!(surnames(&boundary_search(&refs, "Юрь", &ctx())), ["Юрьев"]);
    }

    #[test]
    fn duplicate_keys_all_come_back() {
        let store = catalog(&["Петров", "Петров", "Иванов", "Петров", "Сидоров"]);
        let refs = sorted(&store);
        let hits = boundary_search(&refs, "Пет", &ctx());
        assert_eq!(hits.len(), 3);
        let mut pages: Vec<i16> = hits.iter().map(|r| r.pages).collect();
        pages.sort();
        assert_eq!(pages, [0, 1, 3]);
    }

    #[test]
    fn collation_variant_finds_the_same_run_for_matching_case() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        let folded = boundary_search(&refs, "Ива", &ctx());
        let collated = binary_search_queue(&refs, "Ива", &ctx());
        assert_eq!(surnames(&folded), surnames(&collated));
    }

    #[test]
    fn collation_variant_does_not_fold_case() {
        let store = catalog(&NAMES);
        let refs = sorted(&store);
        assert!(binary_search_queue(&refs, "ива", &ctx()).is_empty());
        assert_eq!(boundary_search(&refs, "ива", &ctx()).len(), 3);
    }

    #[test]
    fn yo_initial_keys_are_found_in_either_case() {
        let store = catalog(&["Андреев", "Ёлкин", "Жуков", "Иванов"]);
        let refs = sorted(&store);
        assert_eq!(surnames(&boundary_search(&refs, "Ёлк", &ctx())), ["Ёлкин"]);
        assert_eq!(surnames(&boundary_search(&refs, "ёлк", &ctx())), ["Ёлкин"]);
        assert_eq!(surnames(&binary_search_queue(&refs, "Ёлк", &ctx())), ["Ёлкин"]);
    }

    #[test]
    fn yo_inside_the_prefix_keeps_its_own_run() {
        let store = catalog(&["Лжецов", "Лёвин", "Леонов", "Лешко", "Лёвкин", "Майков"]);
        let refs = sorted(&store);
        assert_eq!(surnames(&boundary_search(&refs, "лёв", &ctx())), ["Лёвин", "Лёвкин"]);
        assert_eq!(surnames(&boundary_search(&refs, "Лео", &ctx())), ["Леонов"]);
        assert_eq!(surnames(&boundary_search(&refs, "ЛЖЕ", &ctx())), ["Лжецов"]);
        assert!(boundary_search(&refs, "Лев", &ctx()).is_empty());
    }

    #[test]
    fn collation_variant_sees_the_whole_run_despite_mixed_case() {
        let store = catalog(&["Ивак", "иван", "Иваш"]);
        let refs = sorted(&store);
        assert_eq!(surnames(&binary_search_queue(&refs, "Ива", &ctx())), ["Ивак", "Иваш"]);
        assert_eq!(surnames(&binary_search_queue(&refs, "ива", &ctx())), ["иван"]);
        assert_eq!(boundary_search(&refs, "Ива", &ctx()).len(), 3);
    }

    #[test]
    fn bytewise_context_searches_by_bytes() {
        let bytewise = KeyContext::new(KeyFamily::Surname, Codec::Cp866, Collation::Bytewise);
        let store = catalog(&["Иванов", "иванов", "Петров"]);
        let mut refs: Vec<&Record> = store.iter().collect();
        sort_records(&mut refs, &bytewise);
        assert_eq!(boundary_search(&refs, "Ива", &bytewise).len(), 1);
        assert_eq!(binary_search_queue(&refs, "ива", &bytewise).len(), 1);
    }
}
