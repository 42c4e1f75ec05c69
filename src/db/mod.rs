//! In-memory host database: typed tables, lazily produced tables and the
//! item-cloning primitive the overlay engine writes through.

pub mod cloner;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;
pub mod lazy;
pub mod tables;

pub use cloner::{CloneError, ItemCloner, NewItemFromCloneDetails, TemplateCloner};
pub use lazy::{LazyLoad, Registration};
pub use tables::*;
