//! Load the calculator directory from CSV files in data/catalog/

use csv::Reader;
use log::info;
use std::io::Read;
use std::path::Path;

use super::data::{CatalogCategory, CatalogEntry, CatalogIndex};
use crate::error::CatalogLoadError;

/// Default path to the catalog directory
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog";

/// Raw row of categories.csv
#[derive(Debug, serde::Deserialize)]
struct CategoryRow {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Accent")]
    accent: String,
    #[serde(rename = "Icon")]
    icon: String,
}

/// Raw row of calculators.csv
#[derive(Debug, serde::Deserialize)]
struct EntryRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Tagline")]
    tagline: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Featured")]
    featured: bool,
    #[serde(rename = "Usage")]
    usage: u64,
}

pub fn load_categories_from_reader<R: Read>(reader: R) -> Result<Vec<CatalogCategory>, CatalogLoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut categories = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CategoryRow = result?;
        categories.push(CatalogCategory {
            key: row.key,
            name: row.name,
            accent: row.accent,
            icon: row.icon,
        });
    }

    Ok(categories)
}

pub fn load_entries_from_reader<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, CatalogLoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EntryRow = result?;
        entries.push(CatalogEntry {
            id: row.id,
            title: row.title,
            tagline: row.tagline,
            category_key: row.category,
            featured: row.featured,
            usage_count: row.usage,
        });
    }

    Ok(entries)
}

impl CatalogIndex {
    /// Build an index from a pair of CSV readers (categories, calculators)
    pub fn from_readers<C: Read, E: Read>(categories: C, entries: E) -> Result<Self, CatalogLoadError> {
        CatalogIndex::new(
            load_categories_from_reader(categories)?,
            load_entries_from_reader(entries)?,
        )
    }

    /// Load categories.csv and calculators.csv from a directory
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogLoadError> {
        let categories = std::fs::File::open(path.join("categories.csv"))?;
        let entries = std::fs::File::open(path.join("calculators.csv"))?;
        let index = Self::from_readers(categories, entries)?;

        info!(
            "Loaded {} calculators in {} categories from {}",
            index.len(),
            index.categories().len(),
            path.display()
        );
        Ok(index)
    }

    /// Load from the default data/catalog location
    pub fn from_csv() -> Result<Self, CatalogLoadError> {
        Self::from_csv_path(Path::new(DEFAULT_CATALOG_PATH))
    }
}
