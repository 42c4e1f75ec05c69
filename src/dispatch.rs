//! Effect dispatch: route a freshly created item to the appliers its record
//! asks for.

use std::fmt;

use crate::alias::AliasCatalog;
use crate::appliers::{
    generator_fuel, mastery, poster_loot, preset, slots, static_loot, trader,
};
use crate::db::Database;
use crate::deferred::DeferredModSlot;
use crate::materialize::MaterializedEntity;
use crate::record::ItemConfig;

/// One effect a record can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Traders,
    WeaponPresets,
    Masteries,
    ModSlots,
    InventorySlots,
    HallOfFame,
    SpecialSlots,
    StaticLoot,
    GeneratorFuel,
    PosterSlots,
    PosterLoot,
    StatuetteSlots,
}

impl Effect {
    /// Dispatch order.
    pub const ALL: [Effect; 12] = [
        Effect::Traders,
        Effect::WeaponPresets,
        Effect::Masteries,
        Effect::ModSlots,
        Effect::InventorySlots,
        Effect::HallOfFame,
        Effect::SpecialSlots,
        Effect::StaticLoot,
        Effect::GeneratorFuel,
        Effect::PosterSlots,
        Effect::PosterLoot,
        Effect::StatuetteSlots,
    ];

    /// Whether `record` turns this effect on.
    pub fn is_requested(self, record: &ItemConfig) -> bool {
        match self {
            Effect::Traders => record.add_to_traders && record.traders.is_some(),
            Effect::WeaponPresets => record.add_weapon_preset,
            Effect::Masteries => record.masteries && record.mastery_sections.is_some(),
            Effect::ModSlots => record.add_to_mod_slots,
            Effect::InventorySlots => record.add_to_inventory_slots.is_some(),
            Effect::HallOfFame => record.add_to_hall_of_fame,
            Effect::SpecialSlots => record.add_to_special_slots,
            Effect::StaticLoot => {
                record.add_to_static_loot_containers && record.static_loot_containers.is_some()
            }
            Effect::GeneratorFuel => {
                record.add_to_generator_as_fuel && record.generator_fuel_slot_stages.is_some()
            }
            Effect::PosterSlots => record.add_to_hideout_poster_slots,
            Effect::PosterLoot => record.add_poster_to_maps && record.poster_spawn_probability.is_some(),
            Effect::StatuetteSlots => record.add_to_statuette_slots,
        }
    }

    /// Effects that cannot run until every item of the batch exists.
    pub fn is_deferred(self) -> bool {
        self == Effect::ModSlots
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The effects `record` requests, in dispatch order.
pub fn requested_effects(record: &ItemConfig) -> Vec<Effect> {
    Effect::ALL
        .into_iter()
        .filter(|effect| effect.is_requested(record))
        .collect()
}

/// What dispatching one item did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Immediate effects with their insertion counts; a transformer queued on
    /// a table the host has not produced yet counts as one.
    pub applied: Vec<(Effect, usize)>,
    /// Work handed to the deferred phase.
    pub deferred: Option<DeferredModSlot>,
}

/// Run every immediate effect `record` requests for `entity` and return the
/// mod-slot work, if any, for the deferred phase.
pub fn dispatch(
    db: &mut Database,
    aliases: &AliasCatalog,
    entity: &MaterializedEntity,
    record: &ItemConfig,
) -> DispatchReport {
    let new_id = entity.id.as_str();
    let mut report = DispatchReport::default();

    for effect in requested_effects(record) {
        let count = match effect {
            Effect::Traders => record
                .traders
                .as_ref()
                .map(|traders| trader::add_to_traders(db, aliases, new_id, traders))
                .unwrap_or(0),
            Effect::WeaponPresets => match record.weapon_presets.as_deref() {
                Some(presets) => preset::add_weapon_presets(db, new_id, presets),
                None => {
                    tracing::warn!("[Presets] weaponPresets missing for {}, skipping", new_id);
                    0
                }
            },
            Effect::Masteries => record
                .mastery_sections
                .as_deref()
                .map(|sections| mastery::add_or_update_masteries(db, new_id, sections))
                .unwrap_or(0),
            Effect::ModSlots => {
                report.deferred = Some(DeferredModSlot {
                    new_id: new_id.to_string(),
                    record: record.clone(),
                });
                continue;
            }
            Effect::InventorySlots => record
                .add_to_inventory_slots
                .as_deref()
                .map(|names| slots::add_to_inventory_slots(db, new_id, names))
                .unwrap_or(0),
            Effect::HallOfFame => slots::add_to_hall_of_fame(
                db,
                new_id,
                record.hall_of_fame_slots.as_deref().unwrap_or_default(),
            ),
            Effect::SpecialSlots => slots::add_to_special_slots(db, new_id),
            Effect::StaticLoot => record
                .static_loot_containers
                .as_deref()
                .map(|containers| static_loot::add_to_static_loot(db, aliases, new_id, containers))
                .unwrap_or(0),
            Effect::GeneratorFuel => record
                .generator_fuel_slot_stages
                .as_deref()
                .map(|stages| generator_fuel::add_generator_fuel(db, new_id, stages))
                .unwrap_or(0),
            Effect::PosterSlots => slots::add_to_poster_slots(db, new_id),
            Effect::PosterLoot => record
                .poster_spawn_probability
                .map(|probability| poster_loot::add_poster_to_maps(db, new_id, probability))
                .unwrap_or(0),
            Effect::StatuetteSlots => slots::add_to_statuette_slots(db, new_id),
        };
        report.applied.push((effect, count));
    }

    report
}
