//! Custom hideout production recipes, one recipe per file.

use std::path::Path;

use crate::db::{Database, HideoutProduction};
use crate::ids::is_valid_id;
use crate::loader;

/// Add every recipe under `dir` (recursively) that the host does not have yet.
///
/// Returns the number of recipes added.
pub fn load_hideout_recipes(db: &mut Database, dir: &Path) -> usize {
    if !dir.is_dir() {
        tracing::warn!("Hideout recipe directory not found: {}", dir.display());
        return 0;
    }

    let mut added = 0;
    for (path, recipe) in loader::load_all::<HideoutProduction>(dir, true) {
        if add_recipe(db, recipe, &path) {
            added += 1;
        }
    }

    tracing::info!("Loaded {} custom hideout recipes", added);
    added
}

fn add_recipe(db: &mut Database, recipe: HideoutProduction, path: &Path) -> bool {
    if !is_valid_id(&recipe.id) {
        tracing::error!(
            "Invalid recipe id '{}' in {}, skipping",
            recipe.id,
            path.display()
        );
        return false;
    }

    let recipes = &mut db.hideout.production.recipes;
    if recipes.iter().any(|existing| existing.id == recipe.id) {
        tracing::debug!("Recipe {} already exists, skipping", recipe.id);
        return false;
    }

    tracing::info!("Added hideout recipe {} for {}", recipe.id, recipe.end_product);
    recipes.push(recipe);
    true
}
