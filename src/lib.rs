//! # Graft: Declarative Data-Overlay Engine
//!
//! Graft merges author-written JSON (new items, quests, loot placements,
//! hideout recipes, trader offers, localized text) into a host game
//! database that is already loaded in memory.
//!
//! ## Features
//!
//! - **Alias resolution**: human-friendly names ("Mechanic", "case", "weaponcase") resolve to canonical ids
//! - **Item materialization**: every record clones an existing template into a new item
//! - **Idempotent merge appliers**: traders, presets, masteries, inventory, hall of fame, loot, hideout
//! - **Two-phase mod slots**: mod-slot work runs after every item of the batch exists
//! - **Lazy tables**: merges into locations and locales wait for the host to load them
//!
//! ## Example: one item record
//!
//! ```json
//! {
//!   "aaaaaaaaaaaaaaaaaaaa0001": {
//!     "itemTplToClone": "case",
//!     "parentId": "SIMPLE_CONTAINER",
//!     "handbookParentId": "STORAGE_CONTAINERS",
//!     "addToTraders": true,
//!     "traders": {
//!       "mechanic": {
//!         "bbbbbbbbbbbbbbbbbbbb0001": {
//!           "barterSettings": { "loyalLevel": 2 },
//!           "barters": [{ "count": 30000, "_tpl": "RUB" }]
//!         }
//!       }
//!     },
//!     "addToHallOfFame": true,
//!     "hallOfFameSlots": ["smallTrophies"]
//!   }
//! }
//! ```
//!
//! ## Example: applying mods
//!
//! ```ignore
//! graft::logging::init_tracing("graft=info");
//!
//! let aliases = graft::engine::catalog_for_mods(&mod_roots)?;
//! let report = graft::Overlay::new(&aliases).run(&mut db, &mod_roots);
//! ```

// Identifiers and aliases
pub mod alias;
pub mod catalog;
pub mod ids;

// Host tables and the clone primitive
pub mod db;

// Config records and discovery
pub mod loader;
pub mod mod_config;
pub mod record;

// Two-phase item pipeline
pub mod appliers;
pub mod deferred;
pub mod dispatch;
pub mod engine;
pub mod materialize;

// Non-item content
pub mod services;

pub mod logging;

// Re-export key types
pub use alias::{AliasCatalog, AliasError, AliasTable};
pub use db::{Database, ItemCloner, LazyLoad, TemplateCloner};
pub use deferred::{DeferredQueue, DrainReport};
pub use dispatch::{dispatch, Effect};
pub use engine::{Overlay, RunReport};
pub use loader::LoadError;
pub use materialize::{MaterializeError, MaterializedEntity};
pub use mod_config::{ModConfig, ModConfigError};
pub use record::ItemConfig;
