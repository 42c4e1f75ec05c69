//! Slot-filter appliers for fixed host templates: pockets, the PMC
//! inventory, the hall of fame stashes and hideout customization.

use indexmap::IndexSet;

use super::{matching_prefix, union_into, union_into_slot, Insertion};
use crate::catalog::item_tpl;
use crate::db::Database;

/// Pocket templates whose special slots accept extra items.
pub const POCKET_TEMPLATES: &[&str] = &[item_tpl::POCKETS_1X4, item_tpl::POCKETS_1X4_TUE];

/// Hall of fame stash templates, one per area level.
pub const HALL_OF_FAME_TEMPLATES: &[&str] = &[
    item_tpl::HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_1,
    item_tpl::HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_2,
    item_tpl::HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_3,
];

/// Hall of fame slot families. `all` in a record selects every family.
pub const HALL_OF_FAME_SLOT_TYPES: &[&str] = &["dogtag", "smallTrophies", "bigTrophies"];

/// Slot names of the PMC inventory template.
pub const INVENTORY_SLOT_NAMES: &[&str] = &[
    "FirstPrimaryWeapon",
    "SecondPrimaryWeapon",
    "Holster",
    "Scabbard",
    "FaceCover",
    "Headwear",
    "Earpiece",
    "Eyewear",
    "ArmorVest",
    "TacticalVest",
    "Backpack",
    "SecuredContainer",
    "Pockets",
    "ArmBand",
    "Dogtag",
    "Compass",
];

pub const POSTER_SLOT_IDS: &[&str] = &[
    "Poster_Security_1",
    "Poster_Security_2",
    "Poster_Security_3",
    "Poster_Generator_1",
    "Poster_Generator_2",
    "Poster_ScavCase_1",
    "Poster_ScavCase_2",
    "Poster_Stash_1",
    "Poster_WaterCloset_1",
    "Poster_ShootingRange_1",
    "Poster_ShootingRange_2",
    "Poster_Workbench_1",
    "Poster_IntelligenceCenter_1",
    "Poster_Kitchen_1",
    "Poster_MedStation_1",
    "Poster_AirFilteringUnit_1",
    "Poster_RestSpace_1",
    "Poster_RestSpace_2",
    "Poster_RestSpace_3",
    "Poster_RestSpace_4",
    "Poster_Heating_1",
    "Poster_Heating_2",
    "Poster_Heating_3",
    "Poster_Gym_1",
    "Poster_Gym_2",
    "Poster_Gym_3",
    "Poster_Gym_4",
    "Poster_Gym_5",
    "Poster_Gym_6",
];

pub const STATUETTE_SLOT_IDS: &[&str] = &[
    "Statuette_Gym_1",
    "Statuette_PlaceOfFame_1",
    "Statuette_PlaceOfFame_2",
    "Statuette_PlaceOfFame_3",
    "Statuette_Heating_1",
    "Statuette_Heating_2",
    "Statuette_Library_1",
    "Statuette_Library_2",
    "Statuette_RestSpace_1",
    "Statuette_RestSpace_2",
    "Statuette_MedStation_1",
    "Statuette_MedStation_2",
    "Statuette_Kitchen_1",
    "Statuette_Kitchen_2",
    "Statuette_BoozeGenerator_1",
    "Statuette_Workbench_1",
    "Statuette_IntelligenceCenter_1",
    "Statuette_ShootingRange_1",
];

/// Union `new_id` into every slot of `template_id` whose name matches a
/// `catalog` prefix accepted by `allowed`.
fn add_to_prefixed_slots<F>(
    db: &mut Database,
    template_id: &str,
    new_id: &str,
    catalog: &[&str],
    allowed: F,
    tag: &str,
) -> usize
where
    F: Fn(&str) -> bool,
{
    let Some(template) = db.get_item_mut(template_id) else {
        tracing::warn!("[{}] Template {} not found, skipping", tag, template_id);
        return 0;
    };

    let owner = template.name.clone();
    let mut added = 0;
    for slot in template.props.slots.iter_mut() {
        let Some(prefix) = matching_prefix(&slot.name, catalog) else {
            continue;
        };
        if allowed(prefix) {
            added += union_into_slot(slot, new_id, tag, &owner);
        }
    }
    added
}

/// Add `new_id` to the PMC inventory slots named in `slot_names`.
///
/// Names are compared case-insensitively against the inventory slot catalog.
pub fn add_to_inventory_slots(db: &mut Database, new_id: &str, slot_names: &[String]) -> usize {
    let allowed: IndexSet<String> = slot_names.iter().map(|s| s.to_lowercase()).collect();
    add_to_prefixed_slots(
        db,
        item_tpl::INVENTORY_DEFAULT,
        new_id,
        INVENTORY_SLOT_NAMES,
        |prefix| allowed.contains(&prefix.to_lowercase()),
        "InventorySlots",
    )
}

/// Add `new_id` to the first filter of every special slot of both pocket
/// templates.
pub fn add_to_special_slots(db: &mut Database, new_id: &str) -> usize {
    let mut added = 0;
    for pockets_id in POCKET_TEMPLATES {
        let Some(pockets) = db.get_item_mut(pockets_id) else {
            tracing::warn!("[SpecialSlots] Could not find pockets template with id {}", pockets_id);
            continue;
        };
        if pockets.props.slots.is_empty() {
            tracing::warn!("[SpecialSlots] Pockets template {} has no slots", pockets_id);
            continue;
        }

        for slot in pockets.props.slots.iter_mut() {
            let slot_name = slot.name.clone();
            let Some(filter) = slot.first_filter_mut() else {
                continue;
            };
            match union_into(filter, new_id) {
                Insertion::Added => {
                    tracing::info!("[SpecialSlots] Added {} to {} in {}", new_id, slot_name, pockets_id);
                    added += 1;
                }
                Insertion::AlreadyPresent => {
                    tracing::debug!("[SpecialSlots] {} already in {}", new_id, slot_name);
                }
            }
        }
    }
    added
}

/// Expand declared hall of fame slot families, dropping unknown ones.
pub fn hall_of_fame_types(declared: &[String]) -> IndexSet<&'static str> {
    let mut types = IndexSet::new();
    for slot in declared {
        if slot.eq_ignore_ascii_case("all") {
            types.extend(HALL_OF_FAME_SLOT_TYPES.iter().copied());
            continue;
        }
        match HALL_OF_FAME_SLOT_TYPES
            .iter()
            .find(|t| t.eq_ignore_ascii_case(slot))
        {
            Some(t) => {
                types.insert(*t);
            }
            None => tracing::warn!("[HallOfFame] Unknown slot type '{}'", slot),
        }
    }
    types
}

/// Add `new_id` to the hall of fame slots of the declared families, on
/// every stash level.
pub fn add_to_hall_of_fame(db: &mut Database, new_id: &str, declared: &[String]) -> usize {
    let types = hall_of_fame_types(declared);
    if types.is_empty() {
        tracing::warn!("[HallOfFame] No valid slot types for {}", new_id);
        return 0;
    }

    HALL_OF_FAME_TEMPLATES
        .iter()
        .map(|hall_id| {
            add_to_prefixed_slots(
                db,
                hall_id,
                new_id,
                HALL_OF_FAME_SLOT_TYPES,
                |prefix| types.contains(prefix),
                "HallOfFame",
            )
        })
        .sum()
}

/// Add `new_id` to every poster slot of the hideout customization template.
pub fn add_to_poster_slots(db: &mut Database, new_id: &str) -> usize {
    add_to_prefixed_slots(
        db,
        item_tpl::HIDEOUTAREACONTAINER_CUSTOMIZATION,
        new_id,
        POSTER_SLOT_IDS,
        |_| true,
        "Poster",
    )
}

/// Add `new_id` to every statuette slot of the hideout customization template.
pub fn add_to_statuette_slots(db: &mut Database, new_id: &str) -> usize {
    add_to_prefixed_slots(
        db,
        item_tpl::HIDEOUTAREACONTAINER_CUSTOMIZATION,
        new_id,
        STATUETTE_SLOT_IDS,
        |_| true,
        "Statuette",
    )
}
