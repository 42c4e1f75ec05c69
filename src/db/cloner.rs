//! The host's item-cloning primitive.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use super::tables::{Database, HandbookItem, ItemProps};

/// Everything needed to clone an existing template into a new item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItemFromCloneDetails {
    pub item_tpl_to_clone: String,
    pub parent_id: String,
    pub new_id: String,
    pub flea_price_roubles: Option<i64>,
    pub handbook_parent_id: String,
    pub handbook_price_roubles: Option<i64>,
    /// Language code → field name (`name`, `shortName`, `description`) → text.
    pub locales: IndexMap<String, IndexMap<String, String>>,
    pub override_properties: Option<Map<String, JsonValue>>,
}

/// Error type for the clone primitive
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CloneError {
    #[error("template {0} to clone does not exist")]
    TemplateNotFound(String),

    #[error("item {0} already exists")]
    ItemAlreadyExists(String),

    #[error("override properties for {id} are invalid: {reason}")]
    InvalidOverride { id: String, reason: String },
}

/// Clone-and-insert primitive owned by the host.
///
/// Implementations must either apply every table change or none of them.
pub trait ItemCloner {
    fn create_item_from_clone(
        &self,
        db: &mut Database,
        details: &NewItemFromCloneDetails,
    ) -> Result<(), CloneError>;
}

/// Clones templates inside the in-memory [`Database`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCloner;

impl ItemCloner for TemplateCloner {
    fn create_item_from_clone(
        &self,
        db: &mut Database,
        details: &NewItemFromCloneDetails,
    ) -> Result<(), CloneError> {
        if db.get_item(&details.new_id).is_some() {
            return Err(CloneError::ItemAlreadyExists(details.new_id.clone()));
        }

        let source = db
            .get_item(&details.item_tpl_to_clone)
            .ok_or_else(|| CloneError::TemplateNotFound(details.item_tpl_to_clone.clone()))?;

        let mut item = source.clone();
        item.id = details.new_id.clone();
        item.parent = details.parent_id.clone();
        if let Some(overrides) = &details.override_properties {
            item.props = apply_overrides(&item.props, overrides).map_err(|reason| {
                CloneError::InvalidOverride {
                    id: details.new_id.clone(),
                    reason,
                }
            })?;
        }

        // Nothing below can fail.
        db.set_item(item);

        let handbook_price = details.handbook_price_roubles.unwrap_or(0);
        db.templates.handbook.items.push(HandbookItem {
            id: details.new_id.clone(),
            parent_id: details.handbook_parent_id.clone(),
            price: handbook_price,
        });
        db.templates.prices.insert(
            details.new_id.clone(),
            details.flea_price_roubles.unwrap_or(handbook_price),
        );

        add_item_locales(db, &details.new_id, &details.locales);
        Ok(())
    }
}

/// Shallow-merge `overrides` into `props`: each top-level key replaces the
/// existing property of the same name.
fn apply_overrides(
    props: &ItemProps,
    overrides: &Map<String, JsonValue>,
) -> Result<ItemProps, String> {
    let mut merged = serde_json::to_value(props).map_err(|e| e.to_string())?;
    if let JsonValue::Object(map) = &mut merged {
        for (key, value) in overrides {
            map.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(merged).map_err(|e| e.to_string())
}

/// Write `"{id} Name"`-style entries into every host language.
///
/// A language without its own entry falls back to `en`, then to the first
/// language the record provides.
fn add_item_locales(
    db: &mut Database,
    item_id: &str,
    locales: &IndexMap<String, IndexMap<String, String>>,
) {
    let Some(fallback) = locales.get("en").or_else(|| locales.values().next()) else {
        return;
    };

    for (language, table) in db.locales.global.iter_mut() {
        let fields = locales.get(language).unwrap_or(fallback);
        let entries: Vec<(String, String)> = fields
            .iter()
            .map(|(field, text)| (format!("{} {}", item_id, locale_field_name(field)), text.clone()))
            .collect();

        table.add_transformer(move |values| {
            for (key, text) in &entries {
                values.insert(key.clone(), text.clone());
            }
        });
    }
}

/// `shortName` → `ShortName`
fn locale_field_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
