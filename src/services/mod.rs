//! Per-mod loaders for content that is not an item record.
//!
//! Each loader reads its own directory of a mod and merges into the host
//! tables with the same rules as the appliers: add what is missing, never
//! replace what the host already has, log and skip what cannot be used.

pub mod assort_schemes;
pub mod hideout_recipes;
pub mod locales;
pub mod loot_spawns;
pub mod quests;

pub use assort_schemes::load_assort_schemes;
pub use hideout_recipes::load_hideout_recipes;
pub use locales::load_locales;
pub use loot_spawns::{load_loot_spawns, LootSpawnReport};
pub use quests::{load_quests, QuestReport};
