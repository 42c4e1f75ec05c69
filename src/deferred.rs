//! Two-phase pipeline for mod-slot work.
//!
//! Phase 1 (item creation) pushes one [`DeferredModSlot`] per record that
//! asks to be added to mod slots. Phase 2 consumes the queue exactly once,
//! after every item of the batch exists, so slot filters on items created
//! earlier in the same batch are already in their final state.

use indexmap::IndexMap;

use crate::alias::AliasCatalog;
use crate::appliers::mod_slot::add_to_mod_slots;
use crate::db::Database;
use crate::record::ItemConfig;

/// One record waiting for the mod-slot pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredModSlot {
    pub new_id: String,
    pub record: ItemConfig,
}

/// Returned when a second entry for the same new id is pushed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("deferred mod-slot entry for {0} already exists")]
pub struct DuplicateDeferred(pub String);

/// Summary of a drained queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub processed: usize,
    pub failed: usize,
    pub insertions: usize,
}

/// Ordered queue of deferred mod-slot work, keyed by new id.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    entries: IndexMap<String, ItemConfig>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `record` for `new_id`. The first registration for an id wins.
    pub fn push(&mut self, new_id: impl Into<String>, record: ItemConfig) -> Result<(), DuplicateDeferred> {
        let new_id = new_id.into();
        if self.entries.contains_key(&new_id) {
            return Err(DuplicateDeferred(new_id));
        }
        self.entries.insert(new_id, record);
        Ok(())
    }

    /// Move every entry of `other` to the end of this queue.
    ///
    /// Entries whose id is already queued are dropped with a warning.
    pub fn extend(&mut self, other: DeferredQueue) {
        for (new_id, record) in other.entries {
            if let Err(e) = self.push(new_id, record) {
                tracing::warn!("{}, skipping", e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, new_id: &str) -> bool {
        self.entries.contains_key(new_id)
    }

    /// Queued entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = DeferredModSlot> + '_ {
        self.entries.iter().map(|(new_id, record)| DeferredModSlot {
            new_id: new_id.clone(),
            record: record.clone(),
        })
    }

    /// Phase 2: run the mod-slot applier for every entry, in registration
    /// order. Consumes the queue.
    ///
    /// The source template of each record is resolved again here; an entry
    /// whose source does not resolve is logged and counted as failed.
    pub fn drain(self, db: &mut Database, aliases: &AliasCatalog) -> DrainReport {
        let _span = tracing::info_span!("deferred_mod_slots", entries = self.entries.len()).entered();
        let mut report = DrainReport::default();

        if self.entries.is_empty() {
            tracing::info!("No deferred modslots to process");
            return report;
        }
        tracing::info!("Processing {} deferred modslots...", self.entries.len());

        for (new_id, record) in self.entries {
            let source = match aliases.item_templates.resolve(&record.item_tpl_to_clone) {
                Ok(source) => source,
                Err(e) => {
                    tracing::error!("Failed processing modslots for {}: {}", new_id, e);
                    report.failed += 1;
                    continue;
                }
            };

            let targets = record.mod_slot.as_deref().unwrap_or_default();
            report.insertions += add_to_mod_slots(db, &source, &new_id, targets);
            report.processed += 1;
            tracing::debug!("Processed modslots for {}", new_id);
        }

        tracing::info!("Finished processing deferred modslots");
        report
    }
}
