//! Alias resolution: symbolic names to canonical identifiers.
//!
//! One [`AliasTable`] per domain (traders, item base classes, handbook
//! categories, item templates), grouped in an [`AliasCatalog`]. Tables are
//! filled while the catalog is built and are read-only afterwards, so a
//! finished catalog can be shared freely between threads.

use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::catalog;
use crate::ids::is_valid_id;

/// Which alias table a lookup ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasDomain {
    Trader,
    BaseClass,
    HandbookCategory,
    ItemTemplate,
}

impl fmt::Display for AliasDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasDomain::Trader => write!(f, "trader"),
            AliasDomain::BaseClass => write!(f, "item base class"),
            AliasDomain::HandbookCategory => write!(f, "handbook category"),
            AliasDomain::ItemTemplate => write!(f, "item template"),
        }
    }
}

/// Error type for alias resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    #[error("{domain} reference is empty")]
    Empty { domain: AliasDomain },

    #[error("'{name}' is not a canonical id and was not found in the {domain} table")]
    Unresolved { name: String, domain: AliasDomain },

    #[error("{domain} table maps '{name}' to invalid id '{value}'")]
    InvalidCanonicalId {
        name: String,
        value: String,
        domain: AliasDomain,
    },
}

/// Case-insensitive mapping from symbolic name to canonical identifier.
#[derive(Debug, Clone)]
pub struct AliasTable {
    domain: AliasDomain,
    entries: IndexMap<String, String>,
}

impl AliasTable {
    /// Create an empty table for `domain`.
    pub fn new(domain: AliasDomain) -> Self {
        Self {
            domain,
            entries: IndexMap::new(),
        }
    }

    /// Create a table from `(name, id)` pairs.
    pub fn from_pairs(domain: AliasDomain, pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new(domain);
        for (name, id) in pairs {
            table.insert(*name, *id);
        }
        table
    }

    /// Register (or replace) an alias. Later registrations win.
    pub fn insert(&mut self, name: impl AsRef<str>, id: impl Into<String>) {
        self.entries.insert(name.as_ref().to_lowercase(), id.into());
    }

    /// Look up a symbolic name without validating the result.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Resolve a symbolic name or canonical id to a canonical id.
    ///
    /// Canonical ids are returned unchanged without consulting the table.
    /// Names are matched case-insensitively and exactly.
    ///
    /// # Errors
    /// * [`AliasError::Empty`] for blank input
    /// * [`AliasError::Unresolved`] when the name is not in the table
    /// * [`AliasError::InvalidCanonicalId`] when the table entry itself is corrupt
    ///
    /// # Example
    /// ```
    /// use graft::alias::AliasCatalog;
    ///
    /// let catalog = AliasCatalog::builtin();
    /// assert_eq!(
    ///     catalog.traders.resolve("prapor").unwrap(),
    ///     "54cb50c76803fa8b248b4571"
    /// );
    /// ```
    pub fn resolve(&self, name_or_id: &str) -> Result<String, AliasError> {
        if name_or_id.trim().is_empty() {
            return Err(AliasError::Empty {
                domain: self.domain,
            });
        }

        if is_valid_id(name_or_id) {
            return Ok(name_or_id.to_string());
        }

        let value = self
            .lookup(name_or_id)
            .ok_or_else(|| AliasError::Unresolved {
                name: name_or_id.to_string(),
                domain: self.domain,
            })?;

        if !is_valid_id(value) {
            return Err(AliasError::InvalidCanonicalId {
                name: name_or_id.to_string(),
                value: value.to_string(),
                domain: self.domain,
            });
        }

        Ok(value.to_string())
    }

    pub fn domain(&self) -> AliasDomain {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve `name_or_id` against `table`.
pub fn resolve(name_or_id: &str, table: &AliasTable) -> Result<String, AliasError> {
    table.resolve(name_or_id)
}

/// The full set of alias tables used by one engine.
#[derive(Debug, Clone)]
pub struct AliasCatalog {
    pub traders: AliasTable,
    pub base_classes: AliasTable,
    pub handbook_categories: AliasTable,
    pub item_templates: AliasTable,
}

static GLOBAL_CATALOG: OnceLock<AliasCatalog> = OnceLock::new();

impl AliasCatalog {
    /// Catalog populated from the static constant catalogs only.
    pub fn builtin() -> Self {
        Self::builder().build()
    }

    /// Start a catalog from the static constant catalogs, ready for extra aliases.
    pub fn builder() -> AliasCatalogBuilder {
        let mut traders = AliasTable::from_pairs(AliasDomain::Trader, catalog::trader::ALL);
        for (name, id) in catalog::TRADER_NAMES {
            traders.insert(name, *id);
        }

        let mut item_templates =
            AliasTable::from_pairs(AliasDomain::ItemTemplate, catalog::item_tpl::ALL);
        for (name, id) in catalog::ITEM_TPL_SHORTHANDS {
            item_templates.insert(name, *id);
        }

        AliasCatalogBuilder {
            catalog: Self {
                traders,
                base_classes: AliasTable::from_pairs(
                    AliasDomain::BaseClass,
                    catalog::base_class::ALL,
                ),
                handbook_categories: AliasTable::from_pairs(
                    AliasDomain::HandbookCategory,
                    catalog::handbook_category::ALL,
                ),
                item_templates,
            },
        }
    }

    /// Install this catalog as the process-wide catalog.
    ///
    /// Must be called once during startup, before any batch runs. A second
    /// call leaves the installed catalog untouched and hands `self` back.
    pub fn install(self) -> Result<&'static AliasCatalog, AliasCatalog> {
        let mut candidate = Some(self);
        let installed =
            GLOBAL_CATALOG.get_or_init(|| candidate.take().unwrap_or_else(AliasCatalog::builtin));
        match candidate {
            Some(rejected) => Err(rejected),
            None => Ok(installed),
        }
    }

    /// The process-wide catalog, if [`AliasCatalog::install`] has run.
    pub fn global() -> Option<&'static AliasCatalog> {
        GLOBAL_CATALOG.get()
    }
}

/// Builder that adds extra aliases on top of the static catalogs.
#[derive(Debug, Clone)]
pub struct AliasCatalogBuilder {
    catalog: AliasCatalog,
}

impl AliasCatalogBuilder {
    /// Register a custom trader name.
    pub fn with_trader(mut self, name: impl AsRef<str>, id: impl Into<String>) -> Self {
        self.catalog.traders.insert(name, id);
        self
    }

    /// Register an additional item-template alias.
    pub fn with_item_template(mut self, name: impl AsRef<str>, id: impl Into<String>) -> Self {
        self.catalog.item_templates.insert(name, id);
        self
    }

    /// Register an additional base-class alias.
    pub fn with_base_class(mut self, name: impl AsRef<str>, id: impl Into<String>) -> Self {
        self.catalog.base_classes.insert(name, id);
        self
    }

    /// Register an additional handbook-category alias.
    pub fn with_handbook_category(mut self, name: impl AsRef<str>, id: impl Into<String>) -> Self {
        self.catalog.handbook_categories.insert(name, id);
        self
    }

    pub fn build(self) -> AliasCatalog {
        self.catalog
    }
}
