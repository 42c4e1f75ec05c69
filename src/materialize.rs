//! Entity materialization: resolve a record's references and clone the new
//! item into the host database.

use crate::alias::{AliasCatalog, AliasError};
use crate::db::{CloneError, Database, ItemCloner, NewItemFromCloneDetails};
use crate::record::ItemConfig;

/// Error type for materialization
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MaterializeError {
    #[error("failed to resolve {field} of {id}: {source}")]
    Resolve {
        id: String,
        field: &'static str,
        #[source]
        source: AliasError,
    },

    #[error("failed to create item {id}: {source}")]
    Clone {
        id: String,
        #[source]
        source: CloneError,
    },
}

/// A new item that now exists in the host database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedEntity {
    pub id: String,
    /// Canonical id of the template the item was cloned from.
    pub source_template: String,
}

/// Resolve the three references of `record` into a clone request.
///
/// # Errors
/// [`MaterializeError::Resolve`] naming the first field that fails.
pub fn resolve_record(
    aliases: &AliasCatalog,
    new_id: &str,
    record: &ItemConfig,
) -> Result<NewItemFromCloneDetails, MaterializeError> {
    let resolve_err = move |field: &'static str| {
        move |source: AliasError| MaterializeError::Resolve {
            id: new_id.to_string(),
            field,
            source,
        }
    };

    let template_id = aliases
        .item_templates
        .resolve(&record.item_tpl_to_clone)
        .map_err(resolve_err("itemTplToClone"))?;
    let parent_id = aliases
        .base_classes
        .resolve(&record.parent_id)
        .map_err(resolve_err("parentId"))?;
    let handbook_parent_id = aliases
        .handbook_categories
        .resolve(&record.handbook_parent_id)
        .map_err(resolve_err("handbookParentId"))?;

    Ok(record.clone_details(new_id, template_id, parent_id, handbook_parent_id))
}

/// Clone the item described by `details` through the host primitive.
///
/// Any failure leaves the database without the item and without any other
/// effect of the record.
pub fn materialize<C>(
    db: &mut Database,
    cloner: &C,
    details: &NewItemFromCloneDetails,
) -> Result<MaterializedEntity, MaterializeError>
where
    C: ItemCloner + ?Sized,
{
    cloner
        .create_item_from_clone(db, details)
        .map_err(|source| MaterializeError::Clone {
            id: details.new_id.clone(),
            source,
        })?;

    tracing::info!("Created item {}", details.new_id);
    Ok(MaterializedEntity {
        id: details.new_id.clone(),
        source_template: details.item_tpl_to_clone.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{base_class, handbook_category, item_tpl};
    use crate::db::fixtures::host_database;
    use crate::db::TemplateCloner;

    const NEW_ID: &str = "aaaaaaaaaaaaaaaaaaaa0001";

    fn record() -> ItemConfig {
        ItemConfig {
            item_tpl_to_clone: "case".to_string(),
            parent_id: "SIMPLE_CONTAINER".to_string(),
            handbook_parent_id: handbook_category::STORAGE_CONTAINERS.to_string(),
            handbook_price_roubles: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_record_mixes_aliases_and_ids() {
        let aliases = AliasCatalog::builtin();

        let details = resolve_record(&aliases, NEW_ID, &record()).unwrap();

        assert_eq!(details.item_tpl_to_clone, item_tpl::CONTAINER_ITEM_CASE);
        assert_eq!(details.parent_id, base_class::SIMPLE_CONTAINER);
        assert_eq!(details.handbook_parent_id, handbook_category::STORAGE_CONTAINERS);
        assert_eq!(details.new_id, NEW_ID);
    }

    #[test]
    fn test_resolve_record_names_failing_field() {
        let aliases = AliasCatalog::builtin();
        let mut bad = record();
        bad.parent_id = "NOT_A_CLASS".to_string();

        let err = resolve_record(&aliases, NEW_ID, &bad).unwrap_err();
        assert!(matches!(err, MaterializeError::Resolve { field: "parentId", .. }));
    }

    #[test]
    fn test_materialize_reports_clone_failure() {
        let mut db = host_database();
        let aliases = AliasCatalog::builtin();
        let details = resolve_record(&aliases, NEW_ID, &record()).unwrap();

        let entity = materialize(&mut db, &TemplateCloner, &details).unwrap();
        assert_eq!(entity.source_template, item_tpl::CONTAINER_ITEM_CASE);

        let again = materialize(&mut db, &TemplateCloner, &details);
        assert!(matches!(
            again,
            Err(MaterializeError::Clone {
                source: CloneError::ItemAlreadyExists(_),
                ..
            })
        ));
    }
}
