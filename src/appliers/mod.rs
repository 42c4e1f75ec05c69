//! Merge appliers.
//!
//! Each applier inserts a reference to a new item into one family of host
//! tables. Every insertion is idempotent: running an applier twice over the
//! same state leaves the state as it was after the first run. Appliers
//! return how many insertions they made, so a repeated run returns zero.
//!
//! A missing target (trader, hideout area, template) is logged and skipped;
//! the remaining targets are still processed.

pub mod generator_fuel;
pub mod mastery;
pub mod mod_slot;
pub mod poster_loot;
pub mod preset;
pub mod slots;
pub mod static_loot;
pub mod trader;

use crate::db::{FilterSet, Slot};

/// Outcome of a single idempotent insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added,
    AlreadyPresent,
}

impl Insertion {
    pub fn is_added(self) -> bool {
        self == Insertion::Added
    }
}

/// Set-union `id` into `filter`.
pub fn union_into(filter: &mut FilterSet, id: &str) -> Insertion {
    if filter.insert(id.to_string()) {
        Insertion::Added
    } else {
        Insertion::AlreadyPresent
    }
}

/// Append `item` unless an element with the same key is already present.
pub fn append_unique_by<T, K, F>(list: &mut Vec<T>, item: T, key: F) -> Insertion
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let wanted = key(&item);
    if list.iter().any(|existing| key(existing) == wanted) {
        Insertion::AlreadyPresent
    } else {
        list.push(item);
        Insertion::Added
    }
}

/// The longest catalog prefix `slot_name` starts with, ignoring case.
pub fn matching_prefix<'c>(slot_name: &str, catalog: &[&'c str]) -> Option<&'c str> {
    let lower = slot_name.to_lowercase();
    catalog
        .iter()
        .filter(|prefix| lower.starts_with(&prefix.to_lowercase()))
        .max_by_key(|prefix| prefix.len())
        .copied()
}

/// Union `id` into every filter of `slot`, creating missing filter sets.
///
/// Logs each insertion under `tag`; `owner` names the template for the log.
pub fn union_into_slot(slot: &mut Slot, id: &str, tag: &str, owner: &str) -> usize {
    let mut added = 0;
    for filter in slot.props.filters.iter_mut() {
        let set = filter.filter.get_or_insert_with(FilterSet::new);
        match union_into(set, id) {
            Insertion::Added => {
                tracing::info!("[{}] Added {} to slot '{}' in {}", tag, id, slot.name, owner);
                added += 1;
            }
            Insertion::AlreadyPresent => {
                tracing::debug!("[{}] {} already in slot '{}'", tag, id, slot.name);
            }
        }
    }
    added
}
