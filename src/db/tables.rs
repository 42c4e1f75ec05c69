//! Typed host tables.
//!
//! Field names follow the host's JSON schema so fixtures and dumps can be
//! written with the host's own spelling.

use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::lazy::LazyLoad;

/// Set of template ids allowed in a slot or bonus.
pub type FilterSet = IndexSet<String>;

/// Virtual root every trader assort item hangs under.
pub const ASSORT_ROOT: &str = "hideout";

// ---------------------------------------------------------------------------
// Item templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_type", default = "default_item_type")]
    pub item_type: String,
    #[serde(rename = "_props", default)]
    pub props: ItemProps,
}

fn default_item_type() -> String {
    "Item".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemProps {
    #[serde(rename = "Slots", default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<Slot>,

    /// Every other property, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "_name")]
    pub name: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_props", default)]
    pub props: SlotProps,
    #[serde(rename = "_required", default)]
    pub required: bool,
}

impl Slot {
    /// The first filter of the slot, when it has a filter set at all.
    pub fn first_filter_mut(&mut self) -> Option<&mut FilterSet> {
        self.props
            .filters
            .first_mut()
            .and_then(|f| f.filter.as_mut())
    }

    pub fn first_filter(&self) -> Option<&FilterSet> {
        self.props.filters.first().and_then(|f| f.filter.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotProps {
    #[serde(default)]
    pub filters: Vec<SlotFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotFilter {
    #[serde(rename = "Filter", default)]
    pub filter: Option<FilterSet>,
    #[serde(rename = "ExcludedFilter", default, skip_serializing_if = "Option::is_none")]
    pub excluded_filter: Option<FilterSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Handbook {
    #[serde(rename = "Items", default)]
    pub items: Vec<HandbookItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandbookItem {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "ParentId")]
    pub parent_id: String,
    #[serde(rename = "Price")]
    pub price: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub items: IndexMap<String, TemplateItem>,
    #[serde(default)]
    pub handbook: Handbook,
    #[serde(default)]
    pub prices: IndexMap<String, i64>,
    #[serde(default)]
    pub quests: IndexMap<String, JsonValue>,
}

// ---------------------------------------------------------------------------
// Inventory items and traders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: String,
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "slotId", default, skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<Upd>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Upd {
    #[serde(rename = "StackObjectsCount", default, skip_serializing_if = "Option::is_none")]
    pub stack_objects_count: Option<i64>,
    #[serde(rename = "UnlimitedCount", default, skip_serializing_if = "Option::is_none")]
    pub unlimited_count: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarterScheme {
    pub count: f64,
    #[serde(rename = "_tpl")]
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderAssort {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(rename = "barter_scheme", default)]
    pub barter_scheme: IndexMap<String, Vec<Vec<BarterScheme>>>,
    #[serde(rename = "loyal_level_items", default)]
    pub loyal_level_items: IndexMap<String, i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderBase {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    pub base: TraderBase,
    #[serde(default)]
    pub assort: TraderAssort,
    #[serde(rename = "questassort", default)]
    pub quest_assort: IndexMap<String, IndexMap<String, String>>,
}

// ---------------------------------------------------------------------------
// Hideout
// ---------------------------------------------------------------------------

/// Bonus type whose filter lists the items an area slot accepts.
pub const BONUS_ADDITIONAL_SLOTS: &str = "AdditionalSlots";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bonus {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub bonus_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideoutArea {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub area_type: i32,
    #[serde(default)]
    pub stages: IndexMap<String, Stage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HideoutProduction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "endProduct", default)]
    pub end_product: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HideoutProductionTable {
    #[serde(default)]
    pub recipes: Vec<HideoutProduction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hideout {
    #[serde(default)]
    pub areas: Vec<HideoutArea>,
    #[serde(default)]
    pub production: HideoutProductionTable,
}

// ---------------------------------------------------------------------------
// Globals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mastering {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Templates", default)]
    pub templates: Vec<String>,
    #[serde(rename = "Level2", default)]
    pub level2: i32,
    #[serde(rename = "Level3", default)]
    pub level3: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub preset_type: String,
    #[serde(rename = "_changeWeaponName", default)]
    pub change_weapon_name: bool,
    #[serde(rename = "_name")]
    pub name: String,
    #[serde(rename = "_parent")]
    pub parent: String,
    #[serde(rename = "_items")]
    pub items: Vec<Item>,
    #[serde(rename = "_encyclopedia", default, skip_serializing_if = "Option::is_none")]
    pub encyclopedia: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalsConfig {
    #[serde(rename = "Mastering", default)]
    pub mastering: Vec<Mastering>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    #[serde(default)]
    pub config: GlobalsConfig,
    #[serde(rename = "ItemPresets", default)]
    pub item_presets: IndexMap<String, Preset>,
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDistribution {
    pub tpl: String,
    pub relative_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCountDistribution {
    pub count: i32,
    pub relative_probability: f64,
}

/// Typed access to the weighted item list of a loot container.
pub trait ItemDistributionHolder {
    fn item_distribution(&self) -> &[ItemDistribution];
    fn item_distribution_mut(&mut self) -> &mut Vec<ItemDistribution>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticLootDetails {
    #[serde(rename = "itemcountDistribution", default)]
    pub item_count_distribution: Vec<ItemCountDistribution>,
    #[serde(rename = "itemDistribution", default)]
    pub item_distribution: Vec<ItemDistribution>,
}

impl ItemDistributionHolder for StaticLootDetails {
    fn item_distribution(&self) -> &[ItemDistribution] {
        &self.item_distribution
    }

    fn item_distribution_mut(&mut self) -> &mut Vec<ItemDistribution> {
        &mut self.item_distribution
    }
}

/// Container template id → loot details.
pub type StaticLootTable = IndexMap<String, StaticLootDetails>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct XYZ {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPosition {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Weight", default)]
    pub weight: f64,
    #[serde(rename = "Position", default)]
    pub position: Option<XYZ>,
    #[serde(rename = "Rotation", default)]
    pub rotation: Option<XYZ>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_tpl")]
    pub tpl: String,
    #[serde(rename = "composedKey", default, skip_serializing_if = "Option::is_none")]
    pub composed_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upd: Option<Upd>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnpointTemplate {
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "IsContainer", default)]
    pub is_container: bool,
    #[serde(rename = "useGravity", default)]
    pub use_gravity: bool,
    #[serde(rename = "randomRotation", default)]
    pub random_rotation: bool,
    #[serde(rename = "Position", default)]
    pub position: Option<XYZ>,
    #[serde(rename = "Root", default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(rename = "GroupPositions", default)]
    pub group_positions: Vec<GroupPosition>,
    #[serde(rename = "Items", default)]
    pub items: Vec<LootItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedKey {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LooseLootItemDistribution {
    pub composed_key: ComposedKey,
    pub relative_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spawnpoint {
    pub location_id: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub template: SpawnpointTemplate,
    #[serde(default)]
    pub item_distribution: Vec<LooseLootItemDistribution>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnpointCount {
    pub mean: f64,
    pub std: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LooseLoot {
    #[serde(default)]
    pub spawnpoint_count: SpawnpointCount,
    #[serde(default)]
    pub spawnpoints_forced: Vec<Spawnpoint>,
    #[serde(default)]
    pub spawnpoints: Vec<Spawnpoint>,
}

#[derive(Debug, Default)]
pub struct Location {
    pub static_loot: Option<LazyLoad<StaticLootTable>>,
    pub loose_loot: Option<LazyLoad<LooseLoot>>,
}

/// Locations keyed by their internal name.
#[derive(Debug, Default)]
pub struct Locations {
    pub entries: IndexMap<String, Location>,
}

impl Locations {
    /// Map a user-facing location name to the stored key, ignoring case.
    pub fn mapped_key(&self, name: &str) -> Option<String> {
        self.entries
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Locales and quests
// ---------------------------------------------------------------------------

/// Language code → key → text, each language loaded on demand.
#[derive(Debug, Default)]
pub struct Locales {
    pub global: IndexMap<String, LazyLoad<IndexMap<String, String>>>,
}

/// Faction-exclusive quest ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestConfig {
    #[serde(default)]
    pub usec_only_quests: IndexSet<String>,
    #[serde(default)]
    pub bear_only_quests: IndexSet<String>,
}

/// The host's in-memory tables.
#[derive(Debug, Default)]
pub struct Database {
    pub templates: Templates,
    pub traders: IndexMap<String, Trader>,
    pub hideout: Hideout,
    pub globals: Globals,
    pub locations: Locations,
    pub locales: Locales,
    pub quest_config: QuestConfig,
    /// Route → local file served by the host's image router.
    pub image_routes: IndexMap<String, PathBuf>,
}

impl Database {
    pub fn get_item(&self, id: &str) -> Option<&TemplateItem> {
        self.templates.items.get(id)
    }

    pub fn get_item_mut(&mut self, id: &str) -> Option<&mut TemplateItem> {
        self.templates.items.get_mut(id)
    }

    pub fn set_item(&mut self, item: TemplateItem) {
        self.templates.items.insert(item.id.clone(), item);
    }

    pub fn get_trader_mut(&mut self, id: &str) -> Option<&mut Trader> {
        self.traders.get_mut(id)
    }

    pub fn find_hideout_area_mut(&mut self, id: &str) -> Option<&mut HideoutArea> {
        self.hideout.areas.iter_mut().find(|area| area.id == id)
    }

    pub fn find_mastering_mut(&mut self, name: &str) -> Option<&mut Mastering> {
        self.globals
            .config
            .mastering
            .iter_mut()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Register an image route; returns `false` when the route already existed.
    pub fn add_image_route(&mut self, route: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        self.image_routes.insert(route.into(), path.into()).is_none()
    }
}
