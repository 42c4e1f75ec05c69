//! End-to-end tests: mod directories applied to the fixture database

use std::fs;
use std::path::Path;

use graft::catalog::{base_class, item_tpl, trader};
use graft::db::fixtures::{host_database, slot_filter};
use graft::{AliasCatalog, Overlay};
use tempfile::TempDir;

const MAGAZINE_A: &str = "aaaaaaaaaaaaaaaaaaaa0001";
const MAGAZINE_B: &str = "aaaaaaaaaaaaaaaaaaaa0002";
const RIFLE: &str = "bbbbbbbbbbbbbbbbbbbb0001";
const M4A1: &str = item_tpl::ASSAULTRIFLE_COLT_M4A1_556X45_ASSAULT_RIFLE;
const STANAG: &str = item_tpl::MAGAZINE_556X45_STANAG_30RND;

fn magazine_record(id: &str) -> String {
    format!(
        r#"{{"{}": {{
            "itemTplToClone": "MAGAZINE_556X45_STANAG_30RND",
            "parentId": "MAGAZINE",
            "handbookParentId": "MAGAZINES",
            "locales": {{"en": {{"name": "Mag {}", "shortName": "M", "description": "d"}}}},
            "addToModSlots": true,
            "modSlot": ["mod_magazine"]
        }}}}"#,
        id, id
    )
}

fn rifle_record(id: &str) -> String {
    format!(
        r#"{{"{}": {{
            "itemTplToClone": "{}",
            "parentId": "ASSAULT_RIFLE",
            "handbookParentId": "ASSAULT_RIFLES"
        }}}}"#,
        id, M4A1
    )
}

fn write_items(mod_root: &Path, files: &[(&str, String)]) {
    let items = mod_root.join("db/CustomItems");
    fs::create_dir_all(&items).unwrap();
    for (name, contents) in files {
        fs::write(items.join(name), contents).unwrap();
    }
}

fn run_items(files: &[(&str, String)]) -> graft::Database {
    let temp = TempDir::new().unwrap();
    write_items(temp.path(), files);

    let mut db = host_database();
    let aliases = AliasCatalog::builtin();
    let report = Overlay::new(&aliases).run(&mut db, &[temp.path()]);
    assert_eq!(report.loaded.len(), 1);
    db
}

#[test]
fn test_deferred_mod_slot_reaches_item_created_later() {
    let db = run_items(&[
        ("1_magazine.json", magazine_record(MAGAZINE_A)),
        ("2_rifle.json", rifle_record(RIFLE)),
    ]);

    let rifle_slot = slot_filter(&db, RIFLE, "mod_magazine").unwrap();
    assert!(rifle_slot.contains(MAGAZINE_A));
    assert!(slot_filter(&db, M4A1, "mod_magazine").unwrap().contains(MAGAZINE_A));
}

#[test]
fn test_deferred_mod_slot_reaches_item_created_earlier() {
    let db = run_items(&[
        ("1_rifle.json", rifle_record(RIFLE)),
        ("2_magazine.json", magazine_record(MAGAZINE_A)),
    ]);

    let rifle_slot = slot_filter(&db, RIFLE, "mod_magazine").unwrap();
    assert!(rifle_slot.contains(MAGAZINE_A));
}

#[test]
fn test_two_files_share_one_mod_slot_target() {
    let db = run_items(&[
        ("a.json", magazine_record(MAGAZINE_A)),
        ("b.json", magazine_record(MAGAZINE_B)),
    ]);

    let filter = slot_filter(&db, M4A1, "mod_magazine").unwrap();
    let ids: Vec<&str> = filter.iter().map(String::as_str).collect();
    assert_eq!(ids, vec![STANAG, MAGAZINE_A, MAGAZINE_B]);
}

#[test]
fn test_hall_of_fame_dogtag_only() {
    let record = format!(
        r#"{{"{}": {{
            "itemTplToClone": "case",
            "parentId": "SIMPLE_CONTAINER",
            "handbookParentId": "STORAGE_CONTAINERS",
            "addToHallOfFame": true,
            "hallOfFameSlots": ["dogtag"]
        }}}}"#,
        MAGAZINE_A
    );
    let db = run_items(&[("case.json", record)]);

    for hall in graft::appliers::slots::HALL_OF_FAME_TEMPLATES {
        assert!(slot_filter(&db, hall, "dogtag0").unwrap().contains(MAGAZINE_A));
        assert!(slot_filter(&db, hall, "dogtag1").unwrap().contains(MAGAZINE_A));
        assert!(!slot_filter(&db, hall, "smallTrophies0").unwrap().contains(MAGAZINE_A));
        assert!(!slot_filter(&db, hall, "bigTrophies0").unwrap().contains(MAGAZINE_A));
    }
    assert_eq!(db.get_item(MAGAZINE_A).unwrap().parent, base_class::SIMPLE_CONTAINER);
}

#[test]
fn test_missing_static_loot_container_inserts_nothing() {
    let record = format!(
        r#"{{"{}": {{
            "itemTplToClone": "case",
            "parentId": "SIMPLE_CONTAINER",
            "handbookParentId": "STORAGE_CONTAINERS",
            "addToStaticLootContainers": true,
            "staticLootContainers": [{{"containerName": "weaponcase", "probability": 10}}]
        }}}}"#,
        MAGAZINE_A
    );
    let mut db = run_items(&[("case.json", record)]);

    for location in db.locations.entries.values_mut() {
        let table = location.static_loot.as_mut().unwrap().value();
        assert!(!table.contains_key(item_tpl::CONTAINER_WEAPON_CASE));
        assert!(table
            .values()
            .all(|details| details.item_distribution.iter().all(|d| d.tpl != MAGAZINE_A)));
    }
}

#[test]
fn test_unresolvable_record_has_no_effects() {
    let record = format!(
        r#"{{"{}": {{
            "itemTplToClone": "case",
            "parentId": "NOT_A_BASE_CLASS",
            "handbookParentId": "STORAGE_CONTAINERS",
            "addToSpecialSlots": true
        }}}}"#,
        MAGAZINE_A
    );
    let db = run_items(&[("bad.json", record)]);

    assert!(db.get_item(MAGAZINE_A).is_none());
    assert!(!slot_filter(&db, item_tpl::POCKETS_1X4, "SpecialSlot1")
        .unwrap()
        .contains(MAGAZINE_A));
}

#[test]
fn test_full_mod_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(
        root.join("graft.yaml"),
        "directories:\n  items: items\ntraders:\n  Artem: cccccccccccccccccccccccc\n",
    )
    .unwrap();

    let offer = format!(
        r#"{{"{}": {{
            "itemTplToClone": "case",
            "parentId": "SIMPLE_CONTAINER",
            "handbookParentId": "STORAGE_CONTAINERS",
            "fleaPriceRoubles": 200000,
            "addToTraders": true,
            "traders": {{
                "mechanic": {{
                    "dddddddddddddddddddd0001": {{
                        "barterSettings": {{"loyalLevel": 2}},
                        "barters": [{{"count": 30000, "_tpl": "{}"}}]
                    }}
                }}
            }},
            "addToSpecialSlots": true
        }}}}"#,
        MAGAZINE_A,
        item_tpl::MONEY_ROUBLES
    );
    fs::create_dir_all(root.join("items")).unwrap();
    fs::write(root.join("items/offer.jsonc"), format!("// trader offer\n{}", offer)).unwrap();

    fs::create_dir_all(root.join("db/CustomHideoutRecipes")).unwrap();
    fs::write(
        root.join("db/CustomHideoutRecipes/recipe.json"),
        format!(r#"{{"_id": "eeeeeeeeeeeeeeeeeeee0001", "endProduct": "{}"}}"#, MAGAZINE_A),
    )
    .unwrap();

    fs::create_dir_all(root.join("db/locales")).unwrap();
    fs::write(root.join("db/locales/en.json"), r#"{"greeting": "hello"}"#).unwrap();

    let mod_roots = [root];
    let aliases = graft::engine::catalog_for_mods(&mod_roots).unwrap();
    assert_eq!(
        aliases.traders.resolve("artem").unwrap(),
        "cccccccccccccccccccccccc"
    );

    let mut db = host_database();
    let report = Overlay::new(&aliases).run(&mut db, &mod_roots);

    assert_eq!(report.loaded.len(), 1);
    assert_eq!(db.templates.prices[MAGAZINE_A], 200_000);

    let mechanic = &db.traders[trader::MECHANIC];
    assert_eq!(mechanic.assort.items.len(), 1);
    assert_eq!(mechanic.assort.loyal_level_items["dddddddddddddddddddd0001"], 2);

    assert!(db
        .hideout
        .production
        .recipes
        .iter()
        .any(|r| r.id == "eeeeeeeeeeeeeeeeeeee0001"));

    let ru = db.locales.global.get_mut("ru").unwrap().value();
    assert_eq!(ru["greeting"], "hello");
}
