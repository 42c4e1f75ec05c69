//! Mod slots: wherever a weapon or mod slot already accepts the template a
//! new item was cloned from, it starts accepting the new item too.
//!
//! Runs in the deferred phase, after every item of the batch exists.

use super::{union_into, Insertion};
use crate::db::Database;

/// Add `new_id` next to `source_tpl` in the first filter of every slot named
/// in `target_slots` (case-insensitive), across all templates.
pub fn add_to_mod_slots(
    db: &mut Database,
    source_tpl: &str,
    new_id: &str,
    target_slots: &[String],
) -> usize {
    let targets: Vec<String> = target_slots.iter().map(|s| s.to_lowercase()).collect();
    if targets.is_empty() {
        return 0;
    }

    let mut added = 0;
    for (template_id, template) in db.templates.items.iter_mut() {
        for slot in template.props.slots.iter_mut() {
            if !targets.contains(&slot.name.to_lowercase()) {
                continue;
            }
            let slot_name = slot.name.clone();
            let Some(filter) = slot.first_filter_mut() else {
                continue;
            };
            if !filter.contains(source_tpl) {
                continue;
            }
            match union_into(filter, new_id) {
                Insertion::Added => {
                    tracing::debug!(
                        "[ModSlots] Added {} to slot '{}' of {}",
                        new_id,
                        slot_name,
                        template_id
                    );
                    added += 1;
                }
                Insertion::AlreadyPresent => tracing::debug!(
                    "[ModSlots] {} already in slot '{}' of {}",
                    new_id,
                    slot_name,
                    template_id
                ),
            }
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::item_tpl;
    use crate::db::fixtures::{host_database, slot_filter};
    use crate::logging::capture::capture_logs;

    #[test]
    fn test_only_slots_accepting_source_are_patched() {
        let mut db = host_database();
        let new_id = "aaaaaaaaaaaaaaaaaaaa0001";

        let added = add_to_mod_slots(
            &mut db,
            item_tpl::MAGAZINE_556X45_STANAG_30RND,
            new_id,
            &["MOD_MAGAZINE".to_string()],
        );

        assert_eq!(added, 1);
        let m4 = slot_filter(&db, item_tpl::ASSAULTRIFLE_COLT_M4A1_556X45_ASSAULT_RIFLE, "mod_magazine").unwrap();
        let ak = slot_filter(&db, item_tpl::ASSAULTRIFLE_KALASHNIKOV_AK74N_545X39_ASSAULT_RIFLE, "mod_magazine").unwrap();
        assert!(m4.contains(new_id));
        assert!(!ak.contains(new_id));
    }

    #[test]
    fn test_rerun_is_noop() {
        let mut db = host_database();
        let targets = vec!["mod_magazine".to_string()];
        let source = item_tpl::MAGAZINE_556X45_STANAG_30RND;

        add_to_mod_slots(&mut db, source, "aaaaaaaaaaaaaaaaaaaa0001", &targets);
        assert_eq!(add_to_mod_slots(&mut db, source, "aaaaaaaaaaaaaaaaaaaa0001", &targets), 0);

        let m4 = slot_filter(&db, item_tpl::ASSAULTRIFLE_COLT_M4A1_556X45_ASSAULT_RIFLE, "mod_magazine").unwrap();
        assert_eq!(m4.len(), 2);
    }

    #[test]
    fn test_already_present_is_logged() {
        let mut db = host_database();
        let targets = vec!["mod_magazine".to_string()];
        let source = item_tpl::MAGAZINE_556X45_STANAG_30RND;
        add_to_mod_slots(&mut db, source, "aaaaaaaaaaaaaaaaaaaa0001", &targets);

        let logs = capture_logs(|| {
            add_to_mod_slots(&mut db, source, "aaaaaaaaaaaaaaaaaaaa0001", &targets);
        });

        assert!(logs.contains("DEBUG"));
        assert!(logs.contains("aaaaaaaaaaaaaaaaaaaa0001 already in slot 'mod_magazine'"));
    }
}
