//! Calculator directory data: categories, entries and the immutable index

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::error::CatalogLoadError;

/// A directory section such as "Retirement"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCategory {
    pub key: String,
    pub name: String,
    /// Display accent colour token
    pub accent: String,
    /// Icon reference understood by the renderer
    pub icon: String,
}

/// One calculator listed in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique across all categories; doubles as the route slug
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub category_key: String,
    pub featured: bool,
    /// Static seed used only for ranking
    pub usage_count: u64,
}

/// Immutable directory of calculators grouped by category.
///
/// Entries keep the order in which they were supplied; that arrival order is
/// the tie-break for every ranking the query engine applies.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    categories: Vec<CatalogCategory>,
    entries: Vec<CatalogEntry>,
}

impl CatalogIndex {
    /// Build an index, rejecting duplicate keys/ids and dangling category references
    pub fn new(
        categories: Vec<CatalogCategory>,
        entries: Vec<CatalogEntry>,
    ) -> Result<Self, CatalogLoadError> {
        let mut category_keys = HashSet::new();
        for category in &categories {
            if !category_keys.insert(category.key.as_str()) {
                return Err(CatalogLoadError::DuplicateCategory(category.key.clone()));
            }
        }

        let mut ids = HashSet::new();
        for entry in &entries {
            if !ids.insert(entry.id.as_str()) {
                return Err(CatalogLoadError::DuplicateId(entry.id.clone()));
            }
            if !category_keys.contains(entry.category_key.as_str()) {
                return Err(CatalogLoadError::UnknownCategory {
                    entry: entry.id.clone(),
                    category: entry.category_key.clone(),
                });
            }
        }

        Ok(Self { categories, entries })
    }

    /// The hand-curated directory shipped with the crate, built on first use
    pub fn builtin() -> &'static CatalogIndex {
        static BUILTIN: OnceLock<CatalogIndex> = OnceLock::new();
        BUILTIN.get_or_init(|| CatalogIndex {
            categories: BUILTIN_CATEGORIES
                .iter()
                .map(|&(key, name, accent, icon)| CatalogCategory {
                    key: key.to_string(),
                    name: name.to_string(),
                    accent: accent.to_string(),
                    icon: icon.to_string(),
                })
                .collect(),
            entries: BUILTIN_ENTRIES
                .iter()
                .map(|&(id, title, tagline, category_key, featured, usage_count)| CatalogEntry {
                    id: id.to_string(),
                    title: title.to_string(),
                    tagline: tagline.to_string(),
                    category_key: category_key.to_string(),
                    featured,
                    usage_count,
                })
                .collect(),
        })
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn category(&self, key: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// (key, name, accent, icon)
const BUILTIN_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("investment", "Investment", "#00FF66", "trending-up"),
    ("retirement", "Retirement", "#FFD700", "shield"),
    ("goal-based", "Goal-Based", "blue-400", "target"),
    ("tax-saving", "Tax Saving", "orange-400", "file-text"),
    ("wealth", "Wealth Assets", "gray-300", "coins"),
];

/// (id, title, tagline, category, featured, usage)
const BUILTIN_ENTRIES: &[(&str, &str, &str, &str, bool, u64)] = &[
    ("sip", "SIP Calculator", "Calculate systematic investment plan returns", "investment", true, 15420),
    ("fd", "FD Calculator", "Estimate fixed deposit maturity amount", "investment", true, 12340),
    ("compound-interest", "Compound Interest", "See the power of compounding on your wealth", "investment", false, 8900),
    ("nps", "NPS Calculator", "Estimate your pension corpus and tax benefit", "retirement", true, 11200),
    ("pension", "Pension Calculator", "Plan your retirement income needs", "retirement", false, 7800),
    ("fire", "FIRE Calculator", "Calculate Financial Independence, Retire Early", "retirement", true, 9500),
    ("education", "Child Education", "Plan for your child's education expenses", "goal-based", false, 6700),
    ("home", "Home Purchase", "Calculate how much you need for your dream home", "goal-based", false, 5900),
    ("marriage", "Marriage Planning", "Save smartly for wedding expenses", "goal-based", false, 4200),
    ("80c", "80C Tax Saver", "Maximize your tax deductions under 80C", "tax-saving", true, 13100),
    ("tax-regime", "Old vs New Tax Regime", "Compare which tax regime saves you more", "tax-saving", false, 10300),
    ("gold", "Gold/SGB Returns", "Track your precious metal investments", "wealth", false, 5600),
    ("ups", "UPS Calculator", "Calculate Unified Pension Scheme benefits", "wealth", false, 3800),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn category(key: &str) -> CatalogCategory {
        CatalogCategory {
            key: key.to_string(),
            name: key.to_uppercase(),
            accent: "gray-300".to_string(),
            icon: "coins".to_string(),
        }
    }

    fn entry(id: &str, category_key: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: id.to_string(),
            tagline: String::new(),
            category_key: category_key.to_string(),
            featured: false,
            usage_count: 0,
        }
    }

    #[test]
    fn test_builtin_passes_validation() {
        let builtin = CatalogIndex::builtin();
        let rebuilt = CatalogIndex::new(builtin.categories().to_vec(), builtin.entries().to_vec());
        assert!(rebuilt.is_ok());
        assert_eq!(builtin.len(), 13);
        assert_eq!(builtin.categories().len(), 5);
    }

    #[test]
    fn test_builtin_is_initialised_once() {
        assert!(std::ptr::eq(CatalogIndex::builtin(), CatalogIndex::builtin()));
    }

    #[test]
    fn test_lookup_by_id_and_key() {
        let index = CatalogIndex::builtin();
        assert_eq!(index.entry("nps").map(|e| e.category_key.as_str()), Some("retirement"));
        assert_eq!(index.category("wealth").map(|c| c.name.as_str()), Some("Wealth Assets"));
        assert!(index.entry("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_across_categories_is_rejected() {
        let result = CatalogIndex::new(
            vec![category("a"), category("b")],
            vec![entry("x", "a"), entry("x", "b")],
        );
        assert!(matches!(result, Err(CatalogLoadError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn test_dangling_category_is_rejected() {
        let result = CatalogIndex::new(vec![category("a")], vec![entry("x", "z")]);
        assert!(matches!(result, Err(CatalogLoadError::UnknownCategory { .. })));
    }

    #[test]
    fn test_duplicate_category_is_rejected() {
        let result = CatalogIndex::new(vec![category("a"), category("a")], vec![]);
        assert!(matches!(result, Err(CatalogLoadError::DuplicateCategory(_))));
    }
}
