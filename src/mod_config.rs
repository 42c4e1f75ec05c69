//! Per-mod configuration from graft.yaml
//!
//! Names the directories each concern is loaded from, relative to the mod
//! root, plus any custom trader aliases the mod's records refer to.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::alias::AliasCatalogBuilder;

/// Default config file name at the mod root.
pub const MOD_CONFIG_FILE: &str = "graft.yaml";

/// Error type for mod configuration
#[derive(Debug, thiserror::Error)]
pub enum ModConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level mod configuration from graft.yaml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ModConfig {
    #[serde(default)]
    pub directories: Directories,
    /// Custom trader name → trader id.
    #[serde(default)]
    pub traders: IndexMap<String, String>,
}

/// Directory configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Directories {
    #[serde(default = "default_items_dir")]
    pub items: String,
    #[serde(default = "default_quests_dir")]
    pub quests: String,
    #[serde(default = "default_hideout_recipes_dir")]
    pub hideout_recipes: String,
    #[serde(default = "default_loot_spawns_dir")]
    pub loot_spawns: String,
    #[serde(default = "default_assort_schemes_dir")]
    pub assort_schemes: String,
    #[serde(default = "default_locales_dir")]
    pub locales: String,
}

fn default_items_dir() -> String {
    "db/CustomItems".to_string()
}

fn default_quests_dir() -> String {
    "db/Quests".to_string()
}

fn default_hideout_recipes_dir() -> String {
    "db/CustomHideoutRecipes".to_string()
}

fn default_loot_spawns_dir() -> String {
    "db/CustomLootspawns".to_string()
}

fn default_assort_schemes_dir() -> String {
    "db/CustomAssortSchemes".to_string()
}

fn default_locales_dir() -> String {
    "db/locales".to_string()
}

impl Default for Directories {
    fn default() -> Self {
        Self {
            items: default_items_dir(),
            quests: default_quests_dir(),
            hideout_recipes: default_hideout_recipes_dir(),
            loot_spawns: default_loot_spawns_dir(),
            assort_schemes: default_assort_schemes_dir(),
            locales: default_locales_dir(),
        }
    }
}

impl ModConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ModConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&contents).map_err(|source| ModConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `graft.yaml` from `mod_root`, or the defaults when there is none.
    pub fn load(mod_root: &Path) -> Result<Self, ModConfigError> {
        let path = mod_root.join(MOD_CONFIG_FILE);
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Register this mod's custom traders on a catalog builder.
    pub fn register_aliases(&self, mut builder: AliasCatalogBuilder) -> AliasCatalogBuilder {
        for (name, id) in &self.traders {
            builder = builder.with_trader(name, id.clone());
        }
        builder
    }

    pub fn items_dir(&self, mod_root: &Path) -> PathBuf {
        mod_root.join(&self.directories.items)
    }

    pub fn quests_dir(&self, mod_root: &Path) -> PathBuf {
        mod_root.join(&self.directories.quests)
    }

    pub fn hideout_recipes_dir(&self, mod_root: &Path) -> PathBuf {
        mod_root.join(&self.directories.hideout_recipes)
    }

    pub fn loot_spawns_dir(&self, mod_root: &Path) -> PathBuf {
        mod_root.join(&self.directories.loot_spawns)
    }

    pub fn assort_schemes_dir(&self, mod_root: &Path) -> PathBuf {
        mod_root.join(&self.directories.assort_schemes)
    }

    pub fn locales_dir(&self, mod_root: &Path) -> PathBuf {
        mod_root.join(&self.directories.locales)
    }
}
