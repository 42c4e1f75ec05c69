//! Weapon mastery sections.

use super::{union_into, Insertion};
use crate::db::{Database, Mastering};
use indexmap::IndexSet;

/// Merge `sections` into the global mastering table.
///
/// A section whose name matches an existing one (ignoring case) has its
/// templates, plus `new_id`, unioned into the existing list. Otherwise a new
/// section is created with the declared level thresholds.
pub fn add_or_update_masteries(db: &mut Database, new_id: &str, sections: &[Mastering]) -> usize {
    if sections.is_empty() {
        tracing::warn!("[Mastery] No mastery sections defined for item {}", new_id);
        return 0;
    }

    let mut changed = 0;
    for section in sections {
        if section.name.trim().is_empty() {
            tracing::error!("[Mastery] Mastery section has no name, skipping");
            continue;
        }

        let mut wanted: IndexSet<String> = IndexSet::new();
        for template in &section.templates {
            if template.trim().is_empty() {
                tracing::warn!("[Mastery] Blank template in mastery '{}', skipping", section.name);
                continue;
            }
            wanted.insert(template.clone());
        }
        wanted.insert(new_id.to_string());

        match db.find_mastering_mut(&section.name) {
            Some(existing) => {
                let mut templates: IndexSet<String> = existing.templates.drain(..).collect();
                for template in &wanted {
                    if union_into(&mut templates, template) == Insertion::Added {
                        tracing::info!("[Mastery] Added template {} to mastery '{}'", template, existing.name);
                        changed += 1;
                    }
                }
                existing.templates = templates.into_iter().collect();
            }
            None => {
                tracing::info!("[Mastery] Created mastery '{}' for {}", section.name, new_id);
                db.globals.config.mastering.push(Mastering {
                    name: section.name.clone(),
                    templates: wanted.into_iter().collect(),
                    level2: section.level2,
                    level3: section.level3,
                });
                changed += 1;
            }
        }
    }
    changed
}
