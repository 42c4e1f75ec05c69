//! Applying the same record twice leaves the database as one application did

use graft::appliers::union_into;
use graft::catalog::{item_tpl, trader};
use graft::db::fixtures::{host_database, slot_filter};
use graft::db::{Database, FilterSet, TemplateCloner};
use graft::dispatch::{dispatch, Effect};
use graft::materialize::{materialize, resolve_record};
use graft::{AliasCatalog, ItemConfig};

const NEW_ID: &str = "aaaaaaaaaaaaaaaaaaaa0001";

fn everything_record() -> ItemConfig {
    let json = format!(
        r#"{{
            "itemTplToClone": "case",
            "parentId": "SIMPLE_CONTAINER",
            "handbookParentId": "STORAGE_CONTAINERS",
            "addToTraders": true,
            "traders": {{
                "prapor": {{
                    "bbbbbbbbbbbbbbbbbbbb0001": {{
                        "barterSettings": {{"loyalLevel": 3}},
                        "barters": [{{"count": 5, "_tpl": "{roubles}"}}]
                    }}
                }}
            }},
            "addWeaponPreset": true,
            "weaponPresets": [{{
                "_id": "cccccccccccccccccccc0001",
                "_name": "case preset",
                "_parent": "cccccccccccccccccccc0002",
                "_items": [
                    {{"_id": "cccccccccccccccccccc0002", "_tpl": "{id}"}}
                ]
            }}],
            "masteries": true,
            "masterySections": [{{"Name": "M4", "Templates": [], "Level2": 750, "Level3": 1500}}],
            "addToInventorySlots": ["Backpack", "ArmBand"],
            "addToHallOfFame": true,
            "hallOfFameSlots": ["all"],
            "addToSpecialSlots": true,
            "addToStaticLootContainers": true,
            "staticLootContainers": [{{"containerName": "{jacket}", "probability": 5}}],
            "addToGeneratorAsFuel": true,
            "generatorFuelSlotStages": ["1", "2", "3"],
            "addToHideoutPosterSlots": true,
            "addPosterToMaps": true,
            "posterSpawnProbability": 3,
            "addToStatuetteSlots": true
        }}"#,
        roubles = item_tpl::MONEY_ROUBLES,
        id = NEW_ID,
        jacket = item_tpl::LOOTCONTAINER_JACKET,
    );
    serde_json::from_str(&json).unwrap()
}

fn prepared() -> (Database, AliasCatalog, graft::MaterializedEntity, ItemConfig) {
    let mut db = host_database();
    let aliases = AliasCatalog::builtin();
    let record = everything_record();
    let details = resolve_record(&aliases, NEW_ID, &record).unwrap();
    let entity = materialize(&mut db, &TemplateCloner, &details).unwrap();
    (db, aliases, entity, record)
}

fn count_in_loot(db: &mut Database) -> (usize, usize) {
    let mut static_hits = 0;
    let mut poster_hits = 0;
    for location in db.locations.entries.values_mut() {
        if let Some(table) = location.static_loot.as_mut() {
            static_hits += table
                .value()
                .values()
                .flat_map(|details| details.item_distribution.iter())
                .filter(|d| d.tpl == NEW_ID)
                .count();
        }
        if let Some(loot) = location.loose_loot.as_mut() {
            poster_hits += loot
                .value()
                .spawnpoints
                .iter()
                .flat_map(|sp| sp.template.items.iter())
                .filter(|item| item.tpl == NEW_ID)
                .count();
        }
    }
    (static_hits, poster_hits)
}

fn pending_per_location(db: &Database) -> Vec<(usize, usize)> {
    db.locations
        .entries
        .values()
        .map(|location| {
            (
                location.static_loot.as_ref().map_or(0, |t| t.pending_transformers()),
                location.loose_loot.as_ref().map_or(0, |t| t.pending_transformers()),
            )
        })
        .collect()
}

fn loose_loot_shape(db: &mut Database) -> Vec<(usize, usize)> {
    db.locations
        .entries
        .values_mut()
        .filter_map(|location| location.loose_loot.as_mut())
        .flat_map(|loot| {
            loot.value()
                .spawnpoints
                .iter()
                .map(|sp| (sp.template.items.len(), sp.item_distribution.len()))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_dispatch_twice_equals_dispatch_once() {
    let (mut once, aliases, entity, record) = prepared();
    dispatch(&mut once, &aliases, &entity, &record);

    let (mut db, _, _, _) = prepared();
    let first = dispatch(&mut db, &aliases, &entity, &record);
    let second = dispatch(&mut db, &aliases, &entity, &record);

    assert_eq!(db.templates, once.templates);
    assert_eq!(db.traders, once.traders);
    assert_eq!(db.hideout, once.hideout);
    assert_eq!(db.globals, once.globals);
    assert_eq!(pending_per_location(&db), pending_per_location(&once));

    assert!(first.applied.iter().all(|(_, count)| *count > 0));
    for (effect, count) in &second.applied {
        assert_eq!(*count, 0, "{} inserted again", effect);
    }

    let pairs = db
        .locations
        .entries
        .values_mut()
        .zip(once.locations.entries.values_mut());
    for (location, reference) in pairs {
        let static_loot = location.static_loot.as_mut().map(|t| t.value().clone());
        let expected = reference.static_loot.as_mut().map(|t| t.value().clone());
        assert_eq!(static_loot, expected);
    }
    // poster keys are random, so loose loot is compared by shape
    assert_eq!(loose_loot_shape(&mut db), loose_loot_shape(&mut once));

    // one jacket on bigmap; flyer_1, flyer_2 and Flyer_Poster
    assert_eq!(count_in_loot(&mut db), (1, 3));
}

#[test]
fn test_rerun_after_host_loads_locations() {
    let (mut db, aliases, entity, record) = prepared();
    dispatch(&mut db, &aliases, &entity, &record);
    assert_eq!(count_in_loot(&mut db), (1, 3));

    let again = dispatch(&mut db, &aliases, &entity, &record);

    assert!(again.applied.iter().all(|(_, count)| *count == 0));
    assert_eq!(count_in_loot(&mut db), (1, 3));
}

#[test]
fn test_every_effect_reaches_its_table() {
    let (mut db, aliases, entity, record) = prepared();

    dispatch(&mut db, &aliases, &entity, &record);

    let offers = &db.traders[trader::PRAPOR].assort;
    assert_eq!(offers.loyal_level_items["bbbbbbbbbbbbbbbbbbbb0001"], 3);
    assert_eq!(offers.barter_scheme["bbbbbbbbbbbbbbbbbbbb0001"].len(), 1);
    assert!(db.globals.item_presets.contains_key("cccccccccccccccccccc0001"));
    assert!(db
        .find_mastering_mut("M4")
        .unwrap()
        .templates
        .contains(&NEW_ID.to_string()));
    assert!(slot_filter(&db, item_tpl::INVENTORY_DEFAULT, "Backpack")
        .unwrap()
        .contains(NEW_ID));
    assert!(!slot_filter(&db, item_tpl::INVENTORY_DEFAULT, "Holster")
        .unwrap()
        .contains(NEW_ID));
}

#[test]
fn test_filter_union_keeps_size() {
    let mut filter = FilterSet::new();

    union_into(&mut filter, NEW_ID);
    union_into(&mut filter, NEW_ID);

    assert_eq!(filter.len(), 1);
}
