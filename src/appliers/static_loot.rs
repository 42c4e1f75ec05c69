//! Static loot containers.
//!
//! Static loot is produced lazily by the host, so the applier registers a
//! transformer on every location instead of editing the tables directly.

use super::{append_unique_by, Insertion};
use crate::alias::AliasCatalog;
use crate::db::{Database, ItemDistribution, ItemDistributionHolder, Registration};
use crate::record::StaticLootContainer;

/// Append a weighted entry for `new_id` unless the container already has one.
pub fn add_distribution<H>(holder: &mut H, new_id: &str, probability: f64) -> Insertion
where
    H: ItemDistributionHolder + ?Sized,
{
    append_unique_by(
        holder.item_distribution_mut(),
        ItemDistribution {
            tpl: new_id.to_string(),
            relative_probability: probability,
        },
        |d| d.tpl.clone(),
    )
}

/// Schedule `new_id` into each declared container on every location.
///
/// Returns the number of insertions made into loaded tables plus the number
/// of transformers queued on pending ones; a repeated call returns zero. A
/// container that a location does not have is reported with a warning when
/// that location's loot is produced.
pub fn add_to_static_loot(
    db: &mut Database,
    aliases: &AliasCatalog,
    new_id: &str,
    containers: &[StaticLootContainer],
) -> usize {
    if db.locations.entries.is_empty() {
        tracing::warn!("[StaticLoot] Locations table is empty");
        return 0;
    }

    let mut registered = 0;
    for container in containers {
        if container.container_name.trim().is_empty() {
            continue;
        }
        let container_id = match aliases.item_templates.resolve(&container.container_name) {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("[StaticLoot] Could not resolve container: {}", e);
                continue;
            }
        };

        for (location_id, location) in db.locations.entries.iter_mut() {
            let Some(static_loot) = location.static_loot.as_mut() else {
                continue;
            };

            let key = format!("{}:{}", container_id, new_id);
            let location_name = location_id.clone();
            let container_id = container_id.clone();
            let container_name = container.container_name.clone();
            let item_id = new_id.to_string();
            let probability = container.probability;

            let registration = static_loot.add_transformer_once(key, move |table| {
                let Some(details) = table.get_mut(&container_id) else {
                    tracing::warn!(
                        "[StaticLoot] Loot container '{}' not found in {}",
                        container_name,
                        location_name
                    );
                    return 0;
                };
                match add_distribution(details, &item_id, probability) {
                    Insertion::Added => {
                        tracing::info!(
                            "[StaticLoot] Added {} to container {} in {}",
                            item_id,
                            container_id,
                            location_name
                        );
                        1
                    }
                    Insertion::AlreadyPresent => {
                        tracing::debug!(
                            "[StaticLoot] {} already in container {} in {}",
                            item_id,
                            container_id,
                            location_name
                        );
                        0
                    }
                }
            });
            if registration == Registration::AlreadyRegistered {
                tracing::debug!(
                    "[StaticLoot] {} already scheduled for {} in {}",
                    new_id,
                    container.container_name,
                    location_id
                );
            }
            registered += registration.count();
        }
    }
    registered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item_tpl;
    use crate::db::fixtures::host_database;
    use crate::db::StaticLootDetails;

    const NEW_ID: &str = "aaaaaaaaaaaaaaaaaaaa0001";

    fn container(name: &str) -> StaticLootContainer {
        StaticLootContainer {
            container_name: name.to_string(),
            probability: 25.0,
        }
    }

    fn distribution_count(db: &mut Database, location: &str, container: &str) -> usize {
        db.locations.entries[location]
            .static_loot
            .as_mut()
            .unwrap()
            .value()
            .get(container)
            .map(|details| details.item_distribution.iter().filter(|d| d.tpl == NEW_ID).count())
            .unwrap_or(0)
    }

    #[test]
    fn test_add_distribution_is_idempotent() {
        let mut details = StaticLootDetails::default();

        assert_eq!(add_distribution(&mut details, NEW_ID, 5.0), Insertion::Added);
        assert_eq!(add_distribution(&mut details, NEW_ID, 5.0), Insertion::AlreadyPresent);
        assert_eq!(details.item_distribution().len(), 1);
    }

    #[test]
    fn test_lazy_and_loaded_locations() {
        let mut db = host_database();
        let aliases = AliasCatalog::builtin();

        // bigmap queues one transformer; factory4_day has no jacket
        let registered = add_to_static_loot(&mut db, &aliases, NEW_ID, &[container("jacket")]);
        assert_eq!(registered, 1);

        // bigmap is still pending; the transformer waits for the loader
        assert!(!db.locations.entries["bigmap"].static_loot.as_ref().unwrap().is_loaded());
        assert_eq!(distribution_count(&mut db, "bigmap", item_tpl::LOOTCONTAINER_JACKET), 1);
        assert_eq!(distribution_count(&mut db, "factory4_day", item_tpl::LOOTCONTAINER_JACKET), 0);
    }

    #[test]
    fn test_repeated_registration_does_not_duplicate() {
        let mut db = host_database();
        let aliases = AliasCatalog::builtin();
        let containers = [container("LOOTCONTAINER_WEAPON_BOX")];

        let first = add_to_static_loot(&mut db, &aliases, NEW_ID, &containers);
        let second = add_to_static_loot(&mut db, &aliases, NEW_ID, &containers);

        assert!(first > 0);
        assert_eq!(second, 0);
        assert_eq!(distribution_count(&mut db, "factory4_day", item_tpl::LOOTCONTAINER_WEAPON_BOX), 1);
    }

    #[test]
    fn test_unresolvable_container_registers_nothing() {
        let mut db = host_database();
        let aliases = AliasCatalog::builtin();

        assert_eq!(add_to_static_loot(&mut db, &aliases, NEW_ID, &[container("nowhere")]), 0);
    }

    #[test]
    fn test_rerun_on_pending_location_queues_nothing() {
        let mut db = host_database();
        let aliases = AliasCatalog::builtin();
        let containers = [container("jacket")];

        let counts: Vec<usize> = (0..3)
            .map(|_| add_to_static_loot(&mut db, &aliases, NEW_ID, &containers))
            .collect();

        assert_eq!(counts, vec![1, 0, 0]);
        let bigmap = db.locations.entries["bigmap"].static_loot.as_ref().unwrap();
        assert_eq!(bigmap.pending_transformers(), 1);
        assert_eq!(distribution_count(&mut db, "bigmap", item_tpl::LOOTCONTAINER_JACKET), 1);
    }
}
