//! Custom quests.
//!
//! Layout under the quest root:
//!
//! ```text
//! QuestSideData.json          faction-exclusive quest ids
//! <trader alias or id>/
//!     *.json(c)               quests: id → quest, or one quest named by file
//!     questAssort/*.json(c)   quest id → assort id → item id
//!     locales/<lang>.json(c)  quest text
//!     images/*.png|jpg|...    quest icons
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use super::locales::{load_locale_files, overlay_locales};
use crate::alias::AliasCatalog;
use crate::db::{Database, QuestConfig};
use crate::loader;

pub const QUEST_SIDE_FILE: &str = "QuestSideData.json";
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Counts of what one quest root contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestReport {
    pub quests: usize,
    pub quest_assorts: usize,
    pub locale_files: usize,
    pub images: usize,
}

/// Load every trader directory under `dir`.
pub fn load_quests(db: &mut Database, aliases: &AliasCatalog, dir: &Path) -> QuestReport {
    let mut report = QuestReport::default();
    if !dir.is_dir() {
        tracing::warn!("Quest base directory not found: {}", dir.display());
        return report;
    }

    import_quest_side_config(db, &dir.join(QUEST_SIDE_FILE));

    for trader_dir in sub_directories(dir) {
        let Some(trader_key) = trader_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let trader_id = match aliases.traders.resolve(trader_key) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Unknown trader key '{}': {}", trader_key, e);
                continue;
            }
        };

        report.quests += import_quest_files(db, &trader_id, &trader_dir);
        report.quest_assorts += import_quest_assort(db, &trader_id, &trader_dir.join("questAssort"));
        report.locale_files += import_quest_locales(db, &trader_id, &trader_dir.join("locales"));
        report.images += import_images(db, &trader_id, &trader_dir.join("images"));
    }

    report
}

fn sub_directories(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();
    dirs
}

/// Union the faction-exclusive quest sets of `path` into the host config.
pub fn import_quest_side_config(db: &mut Database, path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    match loader::read_json_file::<QuestConfig>(path) {
        Ok(config) => {
            db.quest_config.usec_only_quests.extend(config.usec_only_quests);
            db.quest_config.bear_only_quests.extend(config.bear_only_quests);
            tracing::info!("Loaded {}", QUEST_SIDE_FILE);
            true
        }
        Err(e) => {
            tracing::error!("Error loading {}: {}", QUEST_SIDE_FILE, e);
            false
        }
    }
}

/// Quests of one file: a single quest (has `_id`) keyed by the file stem, or
/// a map of quests.
fn quests_in_file(path: &Path, value: JsonValue) -> Vec<(String, JsonValue)> {
    match value {
        JsonValue::Object(map) if map.contains_key("_id") => {
            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            vec![(key, JsonValue::Object(map))]
        }
        JsonValue::Object(map) => map.into_iter().collect(),
        _ => {
            tracing::error!("Quest file {} is not a JSON object, skipping", path.display());
            Vec::new()
        }
    }
}

fn import_quest_files(db: &mut Database, trader_id: &str, dir: &Path) -> usize {
    let files = loader::load_all::<JsonValue>(dir, false);
    if files.is_empty() {
        tracing::warn!("{}: No quest files found", trader_id);
        return 0;
    }

    let mut count = 0;
    for (path, value) in files {
        for (key, quest) in quests_in_file(&path, value) {
            db.templates.quests.insert(key, quest);
            count += 1;
        }
    }
    tracing::info!("{}: Loaded {} quests", trader_id, count);
    count
}

fn import_quest_assort(db: &mut Database, trader_id: &str, dir: &Path) -> usize {
    let files = loader::load_all::<IndexMap<String, IndexMap<String, String>>>(dir, false);
    if files.is_empty() {
        tracing::warn!("{}: No quest assort files found", trader_id);
        return 0;
    }
    let Some(trader) = db.get_trader_mut(trader_id) else {
        tracing::warn!("Trader {} not found in database", trader_id);
        return 0;
    };

    let mut count = 0;
    for (_, file) in files {
        for (quest_id, assorts) in file {
            let entry = trader.quest_assort.entry(quest_id).or_default();
            for (assort_id, item_id) in assorts {
                entry.insert(assort_id, item_id);
                count += 1;
            }
        }
    }
    tracing::info!("{}: Loaded {} quest assort items", trader_id, count);
    count
}

fn import_quest_locales(db: &mut Database, trader_id: &str, dir: &Path) -> usize {
    if !dir.is_dir() {
        tracing::warn!("{}: No locales directory found", trader_id);
        return 0;
    }

    let custom = load_locale_files(dir);
    let fallback = custom.get("en").or_else(|| custom.values().next());
    if fallback.is_none() {
        tracing::warn!("{}: No locale files found or loaded", trader_id);
        return 0;
    }

    overlay_locales(db, &custom, fallback);
    tracing::info!("{}: Loaded {} locale files", trader_id, custom.len());
    custom.len()
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn import_images(db: &mut Database, trader_id: &str, dir: &Path) -> usize {
    if !dir.is_dir() {
        return 0;
    }

    let mut count = 0;
    for entry in walkdir::WalkDir::new(dir).max_depth(1).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if !path.is_file() || !is_image(path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        db.add_image_route(format!("/files/quest/icon/{}", stem), path);
        count += 1;
    }
    tracing::info!("{}: Loaded {} images", trader_id, count);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::trader;
    use crate::db::fixtures::host_database;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn quest_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            QUEST_SIDE_FILE,
            r#"{"usecOnlyQuests": ["eeeeeeeeeeeeeeeeeeee0001"], "bearOnlyQuests": []}"#,
        );
        write(
            root,
            "Prapor/quests.json",
            r#"{"eeeeeeeeeeeeeeeeeeee0001": {"_id": "eeeeeeeeeeeeeeeeeeee0001", "QuestName": "A"},
                "eeeeeeeeeeeeeeeeeeee0002": {"_id": "eeeeeeeeeeeeeeeeeeee0002", "QuestName": "B"}}"#,
        );
        write(
            root,
            "Prapor/single_quest.jsonc",
            "// one quest\n{\"_id\": \"eeeeeeeeeeeeeeeeeeee0003\", \"QuestName\": \"C\"}",
        );
        write(
            root,
            "Prapor/questAssort/assort.json",
            r#"{"success": {"ffffffffffffffffffff0001": "eeeeeeeeeeeeeeeeeeee0001"}}"#,
        );
        write(root, "Prapor/locales/de.json", r#"{"quest_text": "Text"}"#);
        write(root, "Prapor/images/icon_a.png", "png");
        write(root, "Prapor/images/readme.txt", "skip");
        write(root, "Nobody/quests.json", r#"{"x": {}}"#);
        temp
    }

    #[test]
    fn test_load_quests_imports_every_part() {
        let temp = quest_root();
        let mut db = host_database();
        let aliases = AliasCatalog::builtin();

        let report = load_quests(&mut db, &aliases, temp.path());

        assert_eq!(
            report,
            QuestReport {
                quests: 3,
                quest_assorts: 1,
                locale_files: 1,
                images: 1,
            }
        );
        assert!(db.templates.quests.contains_key("single_quest"));
        assert!(db.quest_config.usec_only_quests.contains("eeeeeeeeeeeeeeeeeeee0001"));
        assert_eq!(
            db.traders[trader::PRAPOR].quest_assort["success"]["ffffffffffffffffffff0001"],
            "eeeeeeeeeeeeeeeeeeee0001"
        );
        assert!(db.image_routes.contains_key("/files/quest/icon/icon_a"));

        // no en file: the first locale file is the fallback for every language
        let en = db.locales.global.get_mut("en").unwrap().value();
        assert_eq!(en["quest_text"], "Text");
    }

    #[test]
    fn test_missing_root_is_empty_report() {
        let temp = TempDir::new().unwrap();
        let mut db = host_database();

        let report = load_quests(&mut db, &AliasCatalog::builtin(), &temp.path().join("none"));

        assert_eq!(report, QuestReport::default());
    }
}
