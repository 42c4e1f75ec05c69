//! Custom loose-loot spawnpoints.
//!
//! Two optional files per mod, both mapping a location name to spawnpoints:
//! `customSpawnpointsForced` appends forced spawnpoints the location does not
//! know yet, and `customSpawnpoints` merges into (or adds) regular ones. The
//! merge waits for the location's loose loot to load.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::db::{Database, GroupPosition, LooseLoot, Spawnpoint, XYZ};
use crate::loader;

pub const FORCED_SPAWNPOINTS_FILE: &str = "customSpawnpointsForced";
pub const SPAWNPOINTS_FILE: &str = "customSpawnpoints";

/// Two positions closer than this on every axis are the same position.
const POSITION_EPSILON: f64 = 0.0001;

/// Location name → spawnpoints.
pub type SpawnpointFile = IndexMap<String, Vec<Spawnpoint>>;

/// Transformers registered per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LootSpawnReport {
    pub forced_locations: usize,
    pub general_locations: usize,
}

/// `<dir>/<base>.jsonc` when present, else `<dir>/<base>.json`.
fn config_file(dir: &Path, base: &str) -> Option<PathBuf> {
    ["jsonc", "json"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", base, ext)))
        .find(|path| path.is_file())
}

fn read_spawnpoint_file(dir: &Path, base: &str) -> Option<SpawnpointFile> {
    let path = config_file(dir, base)?;
    match loader::read_json_file::<SpawnpointFile>(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

/// Register the loose-loot merges of `dir` on every named location.
pub fn load_loot_spawns(db: &mut Database, dir: &Path) -> LootSpawnReport {
    let mut report = LootSpawnReport::default();
    if !dir.is_dir() {
        tracing::warn!("Loot spawn directory not found: {}", dir.display());
        return report;
    }

    if let Some(file) = read_spawnpoint_file(dir, FORCED_SPAWNPOINTS_FILE) {
        report.forced_locations = register(db, file, merge_forced);
    }
    if let Some(file) = read_spawnpoint_file(dir, SPAWNPOINTS_FILE) {
        report.general_locations = register(db, file, merge_spawnpoints);
    }

    tracing::info!(
        "Registered loot spawns for {} forced and {} general locations",
        report.forced_locations,
        report.general_locations
    );
    report
}

fn register(
    db: &mut Database,
    file: SpawnpointFile,
    merge: fn(&mut LooseLoot, &[Spawnpoint]) -> usize,
) -> usize {
    let mut registered = 0;
    for (location_name, spawns) in file {
        let Some(key) = db.locations.mapped_key(&location_name) else {
            tracing::warn!("Unknown location '{}' in loot spawns", location_name);
            continue;
        };
        let Some(loose_loot) = db
            .locations
            .entries
            .get_mut(&key)
            .and_then(|location| location.loose_loot.as_mut())
        else {
            tracing::warn!("Location '{}' has no loose loot", key);
            continue;
        };

        loose_loot.add_transformer(move |loot| {
            let changed = merge(loot, &spawns);
            tracing::debug!("Merged {} spawnpoints into {}", changed, key);
        });
        registered += 1;
    }
    registered
}

/// Append forced spawnpoints whose `location_id` is not present yet.
pub fn merge_forced(loot: &mut LooseLoot, spawns: &[Spawnpoint]) -> usize {
    let mut added = 0;
    for spawn in spawns {
        let known = loot
            .spawnpoints_forced
            .iter()
            .any(|existing| existing.location_id == spawn.location_id);
        if !known {
            loot.spawnpoints_forced.push(spawn.clone());
            added += 1;
        }
    }
    added
}

/// Merge spawnpoints into existing ones by `location_id`, adding the rest.
///
/// Returns the number of spawnpoints merged or added.
pub fn merge_spawnpoints(loot: &mut LooseLoot, spawns: &[Spawnpoint]) -> usize {
    let mut changed = 0;
    for spawn in spawns {
        match loot
            .spawnpoints
            .iter()
            .position(|existing| existing.location_id == spawn.location_id)
        {
            Some(index) => merge_spawnpoint(&mut loot.spawnpoints[index], spawn),
            None => loot.spawnpoints.push(spawn.clone()),
        }
        changed += 1;
    }
    changed
}

fn merge_spawnpoint(existing: &mut Spawnpoint, custom: &Spawnpoint) {
    existing.probability = custom.probability;

    let template = &mut existing.template;
    template.is_container = custom.template.is_container;
    template.use_gravity = custom.template.use_gravity;
    template.random_rotation = custom.template.random_rotation;

    for item in &custom.template.items {
        if !template.items.iter().any(|i| i.id == item.id) {
            template.items.push(item.clone());
        }
    }

    for group in &custom.template.group_positions {
        if !template
            .group_positions
            .iter()
            .any(|g| same_group_position(g, group))
        {
            template.group_positions.push(group.clone());
        }
    }

    for distribution in &custom.item_distribution {
        if !existing
            .item_distribution
            .iter()
            .any(|d| d.composed_key.key == distribution.composed_key.key)
        {
            existing.item_distribution.push(distribution.clone());
        }
    }
}

fn same_position(a: Option<&XYZ>, b: Option<&XYZ>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            (a.x - b.x).abs() < POSITION_EPSILON
                && (a.y - b.y).abs() < POSITION_EPSILON
                && (a.z - b.z).abs() < POSITION_EPSILON
        }
        (None, None) => true,
        _ => false,
    }
}

fn same_group_position(a: &GroupPosition, b: &GroupPosition) -> bool {
    same_position(a.position.as_ref(), b.position.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::host_database;
    use crate::db::{ComposedKey, LooseLootItemDistribution, LootItem, SpawnpointTemplate};
    use std::fs;
    use tempfile::TempDir;

    fn custom_spawn(location_id: &str, item_id: &str) -> Spawnpoint {
        Spawnpoint {
            location_id: location_id.to_string(),
            probability: 0.9,
            template: SpawnpointTemplate {
                id: location_id.to_string(),
                use_gravity: true,
                group_positions: vec![GroupPosition {
                    name: "g".to_string(),
                    weight: 1.0,
                    position: Some(XYZ { x: 1.0, y: 2.0, z: 3.00001 }),
                    rotation: None,
                }],
                items: vec![LootItem {
                    id: item_id.to_string(),
                    tpl: "5447a9cd4bdc2dbd208b4567".to_string(),
                    composed_key: None,
                    upd: None,
                }],
                ..Default::default()
            },
            item_distribution: vec![LooseLootItemDistribution {
                composed_key: ComposedKey { key: item_id.to_string() },
                relative_probability: 1.0,
            }],
        }
    }

    #[test]
    fn test_merge_into_existing_spawnpoint() {
        let mut loot = LooseLoot::default();
        merge_spawnpoints(&mut loot, &[custom_spawn("sp", "item_1")]);

        let mut nudged = custom_spawn("sp", "item_2");
        if let Some(position) = nudged.template.group_positions[0].position.as_mut() {
            position.z += 0.00005;
        }
        let changed = merge_spawnpoints(&mut loot, &[custom_spawn("sp", "item_1"), nudged]);

        assert_eq!(changed, 2);
        assert_eq!(loot.spawnpoints.len(), 1);
        let merged = &loot.spawnpoints[0];
        assert_eq!(merged.probability, 0.9);
        assert!(merged.template.use_gravity);
        assert_eq!(merged.template.items.len(), 2);
        assert_eq!(merged.item_distribution.len(), 2);
        // positions within epsilon collapse into one group
        assert_eq!(merged.template.group_positions.len(), 1);

        let mut distant = custom_spawn("sp", "item_3");
        if let Some(position) = distant.template.group_positions[0].position.as_mut() {
            position.z += 0.001;
        }
        merge_spawnpoints(&mut loot, &[distant]);
        assert_eq!(loot.spawnpoints[0].template.group_positions.len(), 2);
    }

    #[test]
    fn test_forced_spawnpoints_are_not_duplicated() {
        let mut loot = LooseLoot::default();

        assert_eq!(merge_forced(&mut loot, &[custom_spawn("forced", "a")]), 1);
        assert_eq!(merge_forced(&mut loot, &[custom_spawn("forced", "b")]), 0);
        assert_eq!(loot.spawnpoints_forced.len(), 1);
    }

    #[test]
    fn test_load_loot_spawns_waits_for_location_load() {
        let temp = TempDir::new().unwrap();
        let spawn = serde_json::to_string(&custom_spawn("bigmap_custom", "custom_item")).unwrap();
        fs::write(
            temp.path().join("customSpawnpoints.json"),
            format!(r#"{{"BigMap": [{}], "nowhere": [{}]}}"#, spawn, spawn),
        )
        .unwrap();
        fs::write(
            temp.path().join("customSpawnpointsForced.jsonc"),
            format!("// forced\n{{\"factory4_day\": [{}]}}", spawn),
        )
        .unwrap();

        let mut db = host_database();
        let report = load_loot_spawns(&mut db, temp.path());

        assert_eq!(
            report,
            LootSpawnReport {
                forced_locations: 1,
                general_locations: 1,
            }
        );

        let bigmap = db.locations.entries.get_mut("bigmap").unwrap();
        let loose = bigmap.loose_loot.as_mut().unwrap();
        assert!(!loose.is_loaded());
        assert_eq!(loose.pending_transformers(), 1);
        assert_eq!(loose.value().spawnpoints.len(), 4);

        let factory = db.locations.entries.get_mut("factory4_day").unwrap();
        let forced = &factory.loose_loot.as_mut().unwrap().value().spawnpoints_forced;
        assert_eq!(forced.len(), 1);
    }
}
