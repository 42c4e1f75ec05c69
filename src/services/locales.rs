//! Locale overlays.
//!
//! Custom locale files are named by language code (`en.json`, `ru.jsonc`).
//! Entries are added to the host's global locales without ever replacing an
//! existing key. A host language without its own file receives the fallback.

use std::path::Path;

use indexmap::IndexMap;

use crate::db::Database;
use crate::loader;

/// Language code → key → text.
pub type LocaleFiles = IndexMap<String, IndexMap<String, String>>;

/// Read every locale file directly inside `dir`, keyed by file stem.
pub fn load_locale_files(dir: &Path) -> LocaleFiles {
    loader::load_all::<IndexMap<String, String>>(dir, false)
        .into_iter()
        .filter_map(|(path, entries)| {
            let code = path.file_stem()?.to_str()?.to_string();
            Some((code, entries))
        })
        .collect()
}

/// Add `custom` entries to every host language.
///
/// Returns the number of host languages that received entries.
pub fn overlay_locales(
    db: &mut Database,
    custom: &LocaleFiles,
    fallback: Option<&IndexMap<String, String>>,
) -> usize {
    let mut touched = 0;
    for (code, table) in db.locales.global.iter_mut() {
        let Some(entries) = custom.get(code).or(fallback) else {
            continue;
        };
        if entries.is_empty() {
            continue;
        }

        let entries = entries.clone();
        table.add_transformer(move |values| {
            for (key, text) in &entries {
                values.entry(key.clone()).or_insert_with(|| text.clone());
            }
        });
        touched += 1;
    }
    touched
}

/// Overlay the locale directory of a mod, falling back to `en`.
pub fn load_locales(db: &mut Database, dir: &Path) -> usize {
    if !dir.is_dir() {
        tracing::warn!("Locale directory not found: {}", dir.display());
        return 0;
    }

    let custom = load_locale_files(dir);
    overlay_locales(db, &custom, custom.get("en"));
    tracing::info!("Merged {} locale files", custom.len());
    custom.len()
}
