//! Calculator directory and its query engine
//!
//! The directory is immutable once built. [`CatalogIndex::builtin`] is the
//! process-wide copy; [`CatalogIndex::from_csv_path`] loads the same shape
//! from data files.

mod data;
pub mod loader;
mod query;

pub use data::{CatalogCategory, CatalogEntry, CatalogIndex};
pub use loader::DEFAULT_CATALOG_PATH;
pub use query::{
    CatalogListing, CatalogQuery, CatalogQueryEngine, CategoryFilter, CategoryGroup, SortMode,
    DEFAULT_FEATURED_LIMIT,
};
