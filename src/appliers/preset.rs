//! Weapon presets.

use crate::db::{Database, Item, Preset};
use crate::record::PresetConfig;

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

/// Build the host preset for one definition.
pub fn build_preset(config: &PresetConfig) -> Preset {
    Preset {
        id: config.id.clone(),
        preset_type: "Preset".to_string(),
        change_weapon_name: config.change_weapon_name,
        name: config.name.clone(),
        parent: config.parent.clone(),
        items: config
            .items
            .iter()
            .map(|item| Item {
                id: item.id.clone(),
                tpl: item.tpl.clone(),
                parent_id: non_blank(&item.parent_id),
                slot_id: non_blank(&item.slot_id),
                upd: None,
            })
            .collect(),
        encyclopedia: non_blank(&config.encyclopedia),
    }
}

/// Register every preset in `presets` under its own id.
///
/// Presets without items are skipped. An identical preset already present is
/// left alone; a different one with the same id is replaced.
pub fn add_weapon_presets(db: &mut Database, new_id: &str, presets: &[PresetConfig]) -> usize {
    let mut added = 0;
    for config in presets {
        if config.items.is_empty() {
            tracing::warn!("[Presets] Preset {} for {} has no items, skipping", config.id, new_id);
            continue;
        }

        let preset = build_preset(config);
        if db.globals.item_presets.get(&preset.id) == Some(&preset) {
            tracing::debug!("[Presets] Preset {} already present", preset.id);
            continue;
        }

        tracing::info!("[Presets] Added preset {} for {}", preset.id, new_id);
        db.globals.item_presets.insert(preset.id.clone(), preset);
        added += 1;
    }
    added
}
