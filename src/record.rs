//! Author-supplied item configuration records.
//!
//! One [`ItemConfig`] describes one new item: where it is cloned from, how it
//! is priced and named, and which existing tables it should be merged into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::db::{Mastering, NewItemFromCloneDetails};
use crate::ids::is_valid_id;

/// Error type for record validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("required field '{0}' is missing or blank")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid item id")]
    InvalidId(String),

    #[error("single-record file has no 'id' field")]
    MissingId,
}

/// Configuration for one new item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    /// Only used by single-record files; map files key records by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub item_tpl_to_clone: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub handbook_parent_id: String,
    #[serde(default)]
    pub flea_price_roubles: Option<i64>,
    #[serde(default)]
    pub handbook_price_roubles: Option<i64>,
    #[serde(default)]
    pub locales: IndexMap<String, IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_properties: Option<Map<String, JsonValue>>,

    #[serde(default)]
    pub add_to_traders: bool,
    /// Trader alias or id → assort id → offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traders: Option<IndexMap<String, IndexMap<String, TraderScheme>>>,

    #[serde(default)]
    pub add_weapon_preset: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_presets: Option<Vec<PresetConfig>>,

    #[serde(default)]
    pub masteries: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_sections: Option<Vec<Mastering>>,

    #[serde(default)]
    pub add_to_mod_slots: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_slot: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_to_inventory_slots: Option<Vec<String>>,

    #[serde(default)]
    pub add_to_hall_of_fame: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall_of_fame_slots: Option<Vec<String>>,

    #[serde(default)]
    pub add_to_special_slots: bool,

    #[serde(default)]
    pub add_to_static_loot_containers: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_loot_containers: Option<Vec<StaticLootContainer>>,

    #[serde(default)]
    pub add_to_generator_as_fuel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_fuel_slot_stages: Option<Vec<String>>,

    #[serde(default)]
    pub add_to_hideout_poster_slots: bool,

    #[serde(default)]
    pub add_poster_to_maps: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_spawn_probability: Option<f64>,

    #[serde(default)]
    pub add_to_statuette_slots: bool,
}

/// One trader offer for the new item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderScheme {
    #[serde(default)]
    pub barter_settings: BarterSettings,
    #[serde(default)]
    pub barters: Vec<BarterRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarterSettings {
    #[serde(default = "default_loyal_level")]
    pub loyal_level: i32,
    #[serde(default)]
    pub unlimited_count: bool,
    #[serde(default = "default_stack_count")]
    pub stack_objects_count: i64,
}

fn default_loyal_level() -> i32 {
    1
}

fn default_stack_count() -> i64 {
    99999
}

impl Default for BarterSettings {
    fn default() -> Self {
        Self {
            loyal_level: default_loyal_level(),
            unlimited_count: false,
            stack_objects_count: default_stack_count(),
        }
    }
}

/// One required item of a barter; `tpl` may be an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarterRequirement {
    pub count: f64,
    #[serde(rename = "_tpl", default)]
    pub tpl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_functional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spt_quest_locked: Option<bool>,
}

/// Weapon preset definition, in the host's preset spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetConfig {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_changeWeaponName", default)]
    pub change_weapon_name: bool,
    #[serde(rename = "_encyclopedia", default)]
    pub encyclopedia: Option<String>,
    #[serde(rename = "_items", default)]
    pub items: Vec<PresetItemConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetItemConfig {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: String,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default)]
    pub slot_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticLootContainer {
    /// Container alias or template id.
    pub container_name: String,
    pub probability: f64,
}

impl ItemConfig {
    /// Check the fields every record needs before anything is resolved.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.item_tpl_to_clone.trim().is_empty() {
            return Err(RecordError::MissingField("itemTplToClone"));
        }
        if self.parent_id.trim().is_empty() {
            return Err(RecordError::MissingField("parentId"));
        }
        if self.handbook_parent_id.trim().is_empty() {
            return Err(RecordError::MissingField("handbookParentId"));
        }
        Ok(())
    }

    /// Clone request for this record once its references are resolved.
    pub fn clone_details(
        &self,
        new_id: &str,
        template_id: String,
        parent_id: String,
        handbook_parent_id: String,
    ) -> NewItemFromCloneDetails {
        NewItemFromCloneDetails {
            item_tpl_to_clone: template_id,
            parent_id,
            new_id: new_id.to_string(),
            flea_price_roubles: self.flea_price_roubles,
            handbook_parent_id,
            handbook_price_roubles: self.handbook_price_roubles,
            locales: self.locales.clone(),
            override_properties: self.override_properties.clone(),
        }
    }
}

/// Reject ids that are not canonical.
pub fn validate_new_id(id: &str) -> Result<(), RecordError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(RecordError::InvalidId(id.to_string()))
    }
}
