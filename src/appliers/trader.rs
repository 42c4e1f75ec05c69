//! Trader assortment offers for a new item.

use indexmap::IndexMap;

use super::{append_unique_by, Insertion};
use crate::alias::AliasCatalog;
use crate::db::{BarterScheme, Database, Item, Upd, ASSORT_ROOT};
use crate::record::{BarterRequirement, TraderScheme};

/// Resolve the barter requirements of one scheme.
///
/// Blank templates are dropped silently; unresolvable ones with a warning.
pub fn resolve_barters(aliases: &AliasCatalog, barters: &[BarterRequirement]) -> Vec<BarterScheme> {
    barters
        .iter()
        .filter(|b| !b.tpl.trim().is_empty())
        .filter_map(|b| match aliases.item_templates.resolve(&b.tpl) {
            Ok(tpl) => Some(BarterScheme {
                count: b.count,
                tpl,
                level: b.level,
                only_functional: b.only_functional,
                side: b.side.clone(),
                spt_quest_locked: b.spt_quest_locked,
            }),
            Err(e) => {
                tracing::warn!("[Traders] Skipping barter requirement: {}", e);
                None
            }
        })
        .collect()
}

/// Add one assort offer per scheme to each listed trader.
///
/// Every offer is an item parented under the virtual `hideout` root, keyed
/// by the scheme key. A scheme whose requirements all fail to resolve still
/// creates the offer item and loyalty gate, just without a barter list.
pub fn add_to_traders(
    db: &mut Database,
    aliases: &AliasCatalog,
    new_id: &str,
    traders: &IndexMap<String, IndexMap<String, TraderScheme>>,
) -> usize {
    if traders.is_empty() {
        tracing::warn!("[Traders] No trader entries for item {}", new_id);
        return 0;
    }

    let mut added = 0;
    for (trader_key, schemes) in traders {
        let trader_id = match aliases.traders.resolve(trader_key) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("[Traders] Unknown trader key '{}': {}", trader_key, e);
                continue;
            }
        };
        let Some(trader) = db.get_trader_mut(&trader_id) else {
            tracing::warn!("[Traders] Trader {} not found for item {}", trader_id, new_id);
            continue;
        };

        for (scheme_key, scheme) in schemes {
            let settings = &scheme.barter_settings;
            let item = Item {
                id: scheme_key.clone(),
                tpl: new_id.to_string(),
                parent_id: Some(ASSORT_ROOT.to_string()),
                slot_id: Some(ASSORT_ROOT.to_string()),
                upd: Some(Upd {
                    stack_objects_count: Some(settings.stack_objects_count),
                    unlimited_count: Some(settings.unlimited_count),
                }),
            };

            let assort = &mut trader.assort;
            match append_unique_by(&mut assort.items, item, |i| i.id.clone()) {
                Insertion::Added => {
                    tracing::info!(
                        "[Traders] Added {} to {} as offer {}",
                        new_id,
                        trader.base.nickname,
                        scheme_key
                    );
                    added += 1;
                }
                Insertion::AlreadyPresent => {
                    tracing::debug!("[Traders] Offer {} already present", scheme_key);
                }
            }

            let barters = resolve_barters(aliases, &scheme.barters);
            let options = trader.assort.barter_scheme.entry(scheme_key.clone()).or_default();
            if !barters.is_empty() && !options.contains(&barters) {
                options.push(barters);
            }

            trader
                .assort
                .loyal_level_items
                .insert(scheme_key.clone(), settings.loyal_level);
        }
    }
    added
}
