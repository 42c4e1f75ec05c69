//! Generator fuel: the new item joins the `AdditionalSlots` bonus filters of
//! the declared generator stages.

use super::{union_into, Insertion};
use crate::catalog::hideout_area;
use crate::db::{Database, BONUS_ADDITIONAL_SLOTS};

/// Add `new_id` as generator fuel for each stage in `stages`.
///
/// Stage names are matched exactly. Unknown stages are logged and skipped.
pub fn add_generator_fuel(db: &mut Database, new_id: &str, stages: &[String]) -> usize {
    let Some(generator) = db.find_hideout_area_mut(hideout_area::GENERATOR) else {
        tracing::warn!("[GeneratorFuel] Generator not found in hideout areas");
        return 0;
    };

    let mut added = 0;
    for stage_name in stages {
        let Some(stage) = generator.stages.get_mut(stage_name) else {
            tracing::warn!("[GeneratorFuel] Stage {} not found in generator", stage_name);
            continue;
        };

        for bonus in stage.bonuses.iter_mut() {
            if bonus.bonus_type != BONUS_ADDITIONAL_SLOTS {
                continue;
            }
            let Some(filter) = bonus.filter.as_mut() else {
                continue;
            };
            match union_into(filter, new_id) {
                Insertion::Added => {
                    tracing::info!(
                        "[GeneratorFuel] Added item {} as fuel at stage {} (bonus {})",
                        new_id,
                        stage_name,
                        bonus.id
                    );
                    added += 1;
                }
                Insertion::AlreadyPresent => {
                    tracing::debug!("[GeneratorFuel] {} already fuel at stage {}", new_id, stage_name);
                }
            }
        }
    }
    added
}
