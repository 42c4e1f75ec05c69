//! Whole assort schemes: files mapping a trader alias or id to a partial
//! assort (items, barter schemes, loyalty levels) merged into that trader.

use std::path::Path;

use indexmap::IndexMap;

use crate::alias::AliasCatalog;
use crate::appliers::append_unique_by;
use crate::db::{Database, TraderAssort};
use crate::loader;

/// Merge every scheme file directly inside `dir`.
///
/// Returns the number of assort items added.
pub fn load_assort_schemes(db: &mut Database, aliases: &AliasCatalog, dir: &Path) -> usize {
    if !dir.is_dir() {
        tracing::warn!("Assort scheme directory not found: {}", dir.display());
        return 0;
    }

    let mut added = 0;
    for (path, file) in loader::load_all::<IndexMap<String, TraderAssort>>(dir, false) {
        tracing::debug!("Merging assort schemes from {}", path.display());
        for (trader_key, assort) in file {
            let trader_id = match aliases.traders.resolve(&trader_key) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Unknown trader key '{}': {}", trader_key, e);
                    continue;
                }
            };
            let Some(trader) = db.get_trader_mut(&trader_id) else {
                tracing::warn!("Trader {} not found in database", trader_id);
                continue;
            };

            added += merge_assort(&mut trader.assort, assort);
        }
    }

    tracing::info!("Merged {} assort scheme items", added);
    added
}

/// Merge `custom` into `assort`: new items appended, barter schemes and
/// loyalty levels replaced per key.
pub fn merge_assort(assort: &mut TraderAssort, custom: TraderAssort) -> usize {
    let mut added = 0;
    for item in custom.items {
        if append_unique_by(&mut assort.items, item, |i| i.id.clone()).is_added() {
            added += 1;
        }
    }
    assort.barter_scheme.extend(custom.barter_scheme);
    assort.loyal_level_items.extend(custom.loyal_level_items);
    added
}
