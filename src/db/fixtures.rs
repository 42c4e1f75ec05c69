//! A small but realistic host database for tests.
//!
//! Compiled for unit tests and behind the `test-fixtures` feature for
//! integration tests.

use indexmap::IndexMap;
use serde_json::json;

use super::lazy::LazyLoad;
use super::tables::*;
use crate::catalog::{base_class, handbook_category, hideout_area, item_tpl, trader};

/// AK-74 magazine, only used as a filter entry.
pub const AK_MAGAZINE: &str = "55d480c04bdc2d1d4e8b456a";
/// Stock secure container, only used as a filter entry.
pub const SECURE_CONTAINER: &str = "544a11ac4bdc2d470e8b456a";

/// Build a template with `(slot name, filter)` slots.
pub fn template(id: &str, parent: &str, slots: &[(&str, &[&str])]) -> TemplateItem {
    TemplateItem {
        id: id.to_string(),
        name: format!("tpl_{}", id),
        parent: parent.to_string(),
        item_type: "Item".to_string(),
        props: ItemProps {
            slots: slots
                .iter()
                .enumerate()
                .map(|(index, (name, filter))| Slot {
                    name: name.to_string(),
                    id: format!("{}{:04}", &id[..20], index),
                    parent: id.to_string(),
                    props: SlotProps {
                        filters: vec![SlotFilter {
                            filter: Some(filter.iter().map(|s| s.to_string()).collect()),
                            excluded_filter: None,
                        }],
                    },
                    required: false,
                })
                .collect(),
            extra: json!({"Width": 1, "Height": 1})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        },
    }
}

/// Filter set of `slot` on template `tpl`.
pub fn slot_filter<'a>(db: &'a Database, tpl: &str, slot: &str) -> Option<&'a FilterSet> {
    db.get_item(tpl)?
        .props
        .slots
        .iter()
        .find(|s| s.name == slot)?
        .first_filter()
}

fn additional_slots(id: &str, filter: &[&str]) -> Bonus {
    Bonus {
        id: id.to_string(),
        bonus_type: BONUS_ADDITIONAL_SLOTS.to_string(),
        filter: Some(filter.iter().map(|s| s.to_string()).collect()),
    }
}

fn distribution(tpl: &str, weight: f64) -> ItemDistribution {
    ItemDistribution {
        tpl: tpl.to_string(),
        relative_probability: weight,
    }
}

fn spawnpoint(location_id: &str, template_id: &str) -> Spawnpoint {
    Spawnpoint {
        location_id: location_id.to_string(),
        probability: 0.2,
        template: SpawnpointTemplate {
            id: template_id.to_string(),
            position: Some(XYZ { x: 1.0, y: 2.0, z: 3.0 }),
            ..Default::default()
        },
        item_distribution: Vec::new(),
    }
}

fn static_loot(container: &str, existing: &str) -> StaticLootTable {
    let mut table = StaticLootTable::new();
    table.insert(
        container.to_string(),
        StaticLootDetails {
            item_count_distribution: vec![ItemCountDistribution {
                count: 1,
                relative_probability: 1.0,
            }],
            item_distribution: vec![distribution(existing, 10.0)],
        },
    );
    table
}

fn trader_entry(id: &str, nickname: &str) -> Trader {
    Trader {
        base: TraderBase {
            id: id.to_string(),
            nickname: nickname.to_string(),
        },
        ..Default::default()
    }
}

fn templates() -> Templates {
    let special: &[(&str, &[&str])] = &[
        ("SpecialSlot1", &[base_class::INFO]),
        ("SpecialSlot2", &[base_class::INFO]),
        ("SpecialSlot3", &[base_class::INFO]),
    ];
    let hall: &[(&str, &[&str])] = &[
        ("dogtag0", &[item_tpl::BARTER_DOGTAG_BEAR]),
        ("dogtag1", &[item_tpl::BARTER_DOGTAG_USEC]),
        ("smallTrophies0", &[base_class::BARTER_ITEM]),
        ("bigTrophies0", &[base_class::BARTER_ITEM]),
    ];

    let items = vec![
        template(item_tpl::POCKETS_1X4, base_class::ITEM, special),
        template(item_tpl::POCKETS_1X4_TUE, base_class::ITEM, special),
        template(
            item_tpl::INVENTORY_DEFAULT,
            base_class::ITEM,
            &[
                ("FirstPrimaryWeapon", &[base_class::WEAPON]),
                ("Holster", &[base_class::WEAPON]),
                ("Backpack", &[base_class::ITEM]),
                ("SecuredContainer", &[SECURE_CONTAINER]),
                ("ArmBand", &[base_class::ITEM]),
            ],
        ),
        template(item_tpl::HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_1, base_class::ITEM, hall),
        template(item_tpl::HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_2, base_class::ITEM, hall),
        template(item_tpl::HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_3, base_class::ITEM, hall),
        template(
            item_tpl::HIDEOUTAREACONTAINER_CUSTOMIZATION,
            base_class::ITEM,
            &[
                ("Poster_Security_1", &[]),
                ("Poster_Gym_1", &[]),
                ("Statuette_Gym_1", &[]),
                ("Statuette_Library_1", &[]),
                ("Mannequin_1", &[]),
            ],
        ),
        template(
            item_tpl::ASSAULTRIFLE_COLT_M4A1_556X45_ASSAULT_RIFLE,
            base_class::ASSAULT_RIFLE,
            &[("mod_magazine", &[item_tpl::MAGAZINE_556X45_STANAG_30RND])],
        ),
        template(
            item_tpl::ASSAULTRIFLE_KALASHNIKOV_AK74N_545X39_ASSAULT_RIFLE,
            base_class::ASSAULT_RIFLE,
            &[("mod_magazine", &[AK_MAGAZINE])],
        ),
        template(item_tpl::MAGAZINE_556X45_STANAG_30RND, base_class::MAGAZINE, &[]),
        template(item_tpl::CONTAINER_ITEM_CASE, base_class::SIMPLE_CONTAINER, &[]),
        template(item_tpl::MONEY_ROUBLES, base_class::MONEY, &[]),
        template(item_tpl::BARTER_METAL_FUEL_TANK, base_class::FUEL, &[]),
        template(item_tpl::LOOTCONTAINER_JACKET, base_class::MOB_CONTAINER, &[]),
        template(item_tpl::LOOTCONTAINER_WEAPON_BOX, base_class::MOB_CONTAINER, &[]),
    ];

    let mut prices = IndexMap::new();
    prices.insert(item_tpl::MONEY_ROUBLES.to_string(), 1);
    prices.insert(item_tpl::CONTAINER_ITEM_CASE.to_string(), 180_000);

    Templates {
        items: items.into_iter().map(|item| (item.id.clone(), item)).collect(),
        handbook: Handbook {
            items: vec![HandbookItem {
                id: item_tpl::CONTAINER_ITEM_CASE.to_string(),
                parent_id: handbook_category::STORAGE_CONTAINERS.to_string(),
                price: 150_000,
            }],
        },
        prices,
        quests: IndexMap::new(),
    }
}

fn hideout() -> Hideout {
    let mut stages = IndexMap::new();
    stages.insert("0".to_string(), Stage::default());
    for level in 1..=3 {
        stages.insert(
            level.to_string(),
            Stage {
                bonuses: vec![
                    additional_slots(
                        &format!("64f5b9e5a5ac2a1e7c0b000{}", level),
                        &[item_tpl::BARTER_METAL_FUEL_TANK],
                    ),
                    Bonus {
                        id: format!("64f5b9e5a5ac2a1e7c0b001{}", level),
                        bonus_type: "EnergyRegeneration".to_string(),
                        filter: None,
                    },
                ],
            },
        );
    }

    Hideout {
        areas: vec![HideoutArea {
            id: hideout_area::GENERATOR.to_string(),
            area_type: 4,
            stages,
        }],
        production: HideoutProductionTable {
            recipes: vec![HideoutProduction {
                id: "5d5589c1f934db045e6c5492".to_string(),
                end_product: item_tpl::BARTER_METAL_FUEL_TANK.to_string(),
                extra: serde_json::Map::new(),
            }],
        },
    }
}

fn locations() -> Locations {
    let mut entries = IndexMap::new();

    let bigmap_loose = LooseLoot {
        spawnpoints: vec![
            spawnpoint("bigmap_flyer_1", "flyer_1"),
            spawnpoint("bigmap_flyer_2", "flyer_2"),
            spawnpoint("bigmap_loot_x", "loot_x"),
        ],
        ..Default::default()
    };
    entries.insert(
        "bigmap".to_string(),
        Location {
            static_loot: Some(LazyLoad::new(|| {
                static_loot(item_tpl::LOOTCONTAINER_JACKET, item_tpl::MONEY_ROUBLES)
            })),
            loose_loot: Some(LazyLoad::new(move || bigmap_loose)),
        },
    );

    entries.insert(
        "factory4_day".to_string(),
        Location {
            static_loot: Some(LazyLoad::loaded(static_loot(
                item_tpl::LOOTCONTAINER_WEAPON_BOX,
                item_tpl::MAGAZINE_556X45_STANAG_30RND,
            ))),
            loose_loot: Some(LazyLoad::loaded(LooseLoot {
                spawnpoints: vec![spawnpoint("factory_poster", "Flyer_Poster")],
                ..Default::default()
            })),
        },
    );

    Locations { entries }
}

fn locales() -> Locales {
    let mut en = IndexMap::new();
    en.insert(format!("{} Name", item_tpl::MONEY_ROUBLES), "Roubles".to_string());

    let mut global = IndexMap::new();
    global.insert("en".to_string(), LazyLoad::loaded(en));
    global.insert(
        "ru".to_string(),
        LazyLoad::new(|| {
            let mut ru = IndexMap::new();
            ru.insert(format!("{} Name", item_tpl::MONEY_ROUBLES), "Рубли".to_string());
            ru
        }),
    );

    Locales { global }
}

/// Assemble the fixture database.
pub fn host_database() -> Database {
    let mut traders = IndexMap::new();
    traders.insert(trader::PRAPOR.to_string(), trader_entry(trader::PRAPOR, "Prapor"));
    traders.insert(
        trader::MECHANIC.to_string(),
        trader_entry(trader::MECHANIC, "Mechanic"),
    );

    Database {
        templates: templates(),
        traders,
        hideout: hideout(),
        globals: Globals {
            config: GlobalsConfig {
                mastering: vec![Mastering {
                    name: "M4".to_string(),
                    templates: vec![
                        item_tpl::ASSAULTRIFLE_COLT_M4A1_556X45_ASSAULT_RIFLE.to_string(),
                    ],
                    level2: 750,
                    level3: 1500,
                }],
            },
            item_presets: IndexMap::new(),
        },
        locations: locations(),
        locales: locales(),
        quest_config: QuestConfig::default(),
        image_routes: IndexMap::new(),
    }
}
