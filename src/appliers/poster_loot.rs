//! Poster loot: new posters spawn on the flyer spawn points of every map.

use crate::db::{
    ComposedKey, Database, LooseLoot, LooseLootItemDistribution, LootItem, Registration,
    Spawnpoint, Upd,
};
use crate::ids::generate_id;

/// Spawn point templates whose id starts with this (ignoring case) hold posters.
pub const FLYER_PREFIX: &str = "flyer";

fn is_flyer(spawnpoint: &Spawnpoint) -> bool {
    spawnpoint
        .template
        .id
        .get(..FLYER_PREFIX.len())
        .map(|head| head.eq_ignore_ascii_case(FLYER_PREFIX))
        .unwrap_or(false)
}

/// Add `new_id` to every flyer spawn point of `loose_loot` that does not hold
/// it yet. Returns the number of spawn points changed.
pub fn add_poster_to_loose_loot(
    loose_loot: &mut LooseLoot,
    new_id: &str,
    probability: f64,
    map: &str,
) -> usize {
    let mut added = 0;
    for spawnpoint in loose_loot.spawnpoints.iter_mut().filter(|sp| is_flyer(sp)) {
        if spawnpoint.template.items.iter().any(|item| item.tpl == new_id) {
            tracing::debug!(
                "[PosterLoot] {} already at {} on {}",
                new_id,
                spawnpoint.template.id,
                map
            );
            continue;
        }

        let key = generate_id();
        spawnpoint.template.items.push(LootItem {
            id: key.clone(),
            tpl: new_id.to_string(),
            composed_key: Some(key.clone()),
            upd: Some(Upd {
                stack_objects_count: Some(1),
                unlimited_count: None,
            }),
        });
        spawnpoint.item_distribution.push(LooseLootItemDistribution {
            composed_key: ComposedKey { key: key.clone() },
            relative_probability: probability,
        });

        tracing::debug!(
            "[PosterLoot] {} + {} id={} key={}",
            map,
            spawnpoint.location_id,
            spawnpoint.template.id,
            key
        );
        added += 1;
    }
    added
}

/// Register a loose-loot transformer on every location that adds the poster.
///
/// Returns the spawn points changed on loaded maps plus one per transformer
/// queued on a pending map. Each map gets at most one transformer per poster,
/// so a repeated call returns zero.
pub fn add_poster_to_maps(db: &mut Database, new_id: &str, probability: f64) -> usize {
    let mut registered = 0;
    for (map, location) in db.locations.entries.iter_mut() {
        let Some(loose_loot) = location.loose_loot.as_mut() else {
            continue;
        };

        let map_name = map.clone();
        let poster_id = new_id.to_string();
        let registration = loose_loot.add_transformer_once(new_id, move |loot| {
            let added = add_poster_to_loose_loot(loot, &poster_id, probability, &map_name);
            if added > 0 {
                tracing::info!(
                    "[PosterLoot] Added {} to {} spawn points on {}",
                    poster_id,
                    added,
                    map_name
                );
            }
            added
        });
        if registration == Registration::AlreadyRegistered {
            tracing::debug!("[PosterLoot] {} already scheduled for {}", new_id, map);
        }
        registered += registration.count();
    }
    registered
}
