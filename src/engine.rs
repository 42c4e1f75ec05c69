//! Overlay entry point.
//!
//! Loading a mod is phase 1: every item record is materialized and its
//! immediate effects applied, then quests, recipes, loot spawns, assort
//! schemes and locales are merged. Mod-slot work is collected in a
//! [`DeferredQueue`] and applied in phase 2, once, after every mod of the
//! run has finished phase 1.

use std::path::{Path, PathBuf};

use crate::alias::AliasCatalog;
use crate::db::{Database, ItemCloner, TemplateCloner};
use crate::deferred::{DeferredQueue, DrainReport};
use crate::dispatch::dispatch;
use crate::loader::{self, LoadError};
use crate::materialize::{materialize, resolve_record};
use crate::mod_config::{ModConfig, ModConfigError};
use crate::services;

/// Outcome of phase 1 for one item directory.
#[derive(Debug, Default)]
pub struct ItemBatchReport {
    pub created: usize,
    pub failed: usize,
    pub deferred: DeferredQueue,
}

/// Build the alias catalog for a run: the static catalogs plus every
/// custom trader the mods declare in their `graft.yaml`.
pub fn catalog_for_mods<P: AsRef<Path>>(mod_roots: &[P]) -> Result<AliasCatalog, ModConfigError> {
    let mut builder = AliasCatalog::builder();
    for root in mod_roots {
        builder = ModConfig::load(root.as_ref())?.register_aliases(builder);
    }
    Ok(builder.build())
}

/// Applies mods to a host database.
///
/// # Example
/// ```ignore
/// let aliases = graft::engine::catalog_for_mods(&mod_roots)?;
/// let report = graft::Overlay::new(&aliases).run(&mut db, &mod_roots);
/// ```
pub struct Overlay<'a, C: ItemCloner = TemplateCloner> {
    aliases: &'a AliasCatalog,
    cloner: C,
}

impl<'a> Overlay<'a, TemplateCloner> {
    pub fn new(aliases: &'a AliasCatalog) -> Self {
        Self {
            aliases,
            cloner: TemplateCloner,
        }
    }
}

impl Overlay<'static, TemplateCloner> {
    /// Overlay over the catalog installed with [`AliasCatalog::install`].
    pub fn installed() -> Option<Self> {
        AliasCatalog::global().map(Overlay::new)
    }
}

impl<'a, C: ItemCloner> Overlay<'a, C> {
    /// Use a host-provided clone primitive.
    pub fn with_cloner(aliases: &'a AliasCatalog, cloner: C) -> Self {
        Self { aliases, cloner }
    }

    pub fn aliases(&self) -> &AliasCatalog {
        self.aliases
    }

    /// Phase 1 for the item records under `dir`.
    ///
    /// A record that fails to resolve or clone is logged and produces no
    /// effects; the batch continues with the next record.
    pub fn create_custom_items(&self, db: &mut Database, dir: &Path) -> ItemBatchReport {
        let _span = tracing::info_span!("custom_items", dir = %dir.display()).entered();
        let mut report = ItemBatchReport::default();

        let records = match loader::load_records(dir) {
            Ok(records) => records,
            Err(LoadError::DirectoryNotFound(path)) => {
                tracing::warn!("Config directory not found: {}", path.display());
                return report;
            }
            Err(e) => {
                tracing::error!("{}", e);
                return report;
            }
        };

        for (new_id, record) in records {
            let entity = match resolve_record(self.aliases, &new_id, &record)
                .and_then(|details| materialize(db, &self.cloner, &details))
            {
                Ok(entity) => entity,
                Err(e) => {
                    tracing::error!("Error processing item {}: {}", new_id, e);
                    report.failed += 1;
                    continue;
                }
            };

            let dispatched = dispatch(db, self.aliases, &entity, &record);
            for (effect, count) in &dispatched.applied {
                tracing::debug!("{} for {}: {} insertions", effect, entity.id, count);
            }
            if let Some(deferred) = dispatched.deferred {
                if let Err(e) = report.deferred.push(deferred.new_id, deferred.record) {
                    tracing::warn!("{}, skipping", e);
                }
            }
            report.created += 1;
        }

        tracing::info!(
            "Created {} items ({} failed), {} deferred modslot entries",
            report.created,
            report.failed,
            report.deferred.len()
        );
        report
    }

    /// Phase 1 for one mod: items first, then every other concern.
    ///
    /// # Errors
    /// [`ModConfigError`] when the mod's `graft.yaml` cannot be read.
    pub fn load_mod(
        &self,
        db: &mut Database,
        mod_root: &Path,
    ) -> Result<DeferredQueue, ModConfigError> {
        let _span = tracing::info_span!("load_mod", root = %mod_root.display()).entered();
        let config = ModConfig::load(mod_root)?;

        let items = self.create_custom_items(db, &config.items_dir(mod_root));
        services::load_quests(db, self.aliases, &config.quests_dir(mod_root));
        services::load_hideout_recipes(db, &config.hideout_recipes_dir(mod_root));
        services::load_loot_spawns(db, &config.loot_spawns_dir(mod_root));
        services::load_assort_schemes(db, self.aliases, &config.assort_schemes_dir(mod_root));
        services::load_locales(db, &config.locales_dir(mod_root));

        Ok(items.deferred)
    }

    /// Phase 2.
    pub fn apply_deferred(&self, db: &mut Database, queue: DeferredQueue) -> DrainReport {
        queue.drain(db, self.aliases)
    }

    /// Both phases for a list of mods. A mod whose config fails to load is
    /// skipped; the others still run.
    pub fn run<P: AsRef<Path>>(&self, db: &mut Database, mod_roots: &[P]) -> RunReport {
        let mut report = RunReport::default();
        let mut queue = DeferredQueue::new();

        for root in mod_roots {
            let root = root.as_ref();
            match self.load_mod(db, root) {
                Ok(deferred) => {
                    queue.extend(deferred);
                    report.loaded.push(root.to_path_buf());
                }
                Err(e) => {
                    tracing::error!("Skipping mod {}: {}", root.display(), e);
                    report.skipped.push(root.to_path_buf());
                }
            }
        }

        report.deferred = self.apply_deferred(db, queue);
        report
    }
}

/// Outcome of [`Overlay::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub loaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub deferred: DrainReport,
}
