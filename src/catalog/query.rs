//! Search, filter and sort over a [`CatalogIndex`]

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::data::{CatalogCategory, CatalogEntry, CatalogIndex};
use crate::error::{CalcError, Result};

/// Number of featured calculators shown when the caller does not choose
pub const DEFAULT_FEATURED_LIMIT: usize = 5;

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Usage count, highest first
    #[default]
    Popular,
    /// Filter order is kept; entries carry no creation date yet
    Newest,
    /// Featured entries first, each group in catalog order
    Recommended,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Popular => "popular",
            SortMode::Newest => "newest",
            SortMode::Recommended => "recommended",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" => Ok(SortMode::Popular),
            "newest" => Ok(SortMode::Newest),
            "recommended" => Ok(SortMode::Recommended),
            other => Err(CalcError::invalid(
                "sort_mode",
                format!("unknown sort mode '{}'", other),
            )),
        }
    }
}

/// Category restriction; the wire form is a category key or `"all"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(key) => entry.category_key == *key,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::from(value.as_str())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(key) => key,
        }
    }
}

/// Search state supplied by the directory page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogQuery {
    pub search_text: String,
    pub category_filter: CategoryFilter,
    pub sort_mode: SortMode,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    pub fn category(mut self, filter: impl Into<CategoryFilter>) -> Self {
        self.category_filter = filter.into();
        self
    }

    pub fn sort(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }
}

/// An entry together with the display data of its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    pub category: &'a CatalogCategory,
}

/// Search results for one category, in the order the category is listed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a CatalogCategory,
    pub entries: Vec<&'a CatalogEntry>,
}

/// Read-only query API over a catalog index
#[derive(Debug, Clone, Copy)]
pub struct CatalogQueryEngine<'a> {
    index: &'a CatalogIndex,
}

impl CatalogQueryEngine<'static> {
    /// Engine over the built-in directory
    pub fn builtin() -> Self {
        Self::new(CatalogIndex::builtin())
    }
}

impl<'a> CatalogQueryEngine<'a> {
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a CatalogIndex {
        self.index
    }

    pub fn categories(&self) -> &'a [CatalogCategory] {
        self.index.categories()
    }

    /// Strict category lookup
    pub fn category(&self, key: &str) -> Result<&'a CatalogCategory> {
        self.index
            .category(key)
            .ok_or_else(|| CalcError::InvalidCategory(key.to_string()))
    }

    /// Featured calculators by usage, highest first, at most `limit` of them.
    /// Equal usage keeps catalog order.
    pub fn list_featured(&self, limit: usize) -> Vec<&'a CatalogEntry> {
        let mut featured: Vec<&CatalogEntry> =
            self.index.entries().iter().filter(|e| e.featured).collect();
        sort_by_usage(&mut featured);
        featured.truncate(limit);
        featured
    }

    /// Filter by text and category, then order by the query's sort mode.
    ///
    /// An unknown category is a filter that matches nothing, not an error.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&'a CatalogEntry> {
        if let CategoryFilter::Only(key) = &query.category_filter {
            if self.index.category(key).is_none() {
                warn!("Catalog query names unknown category '{}'", key);
                return Vec::new();
            }
        }

        let needle = query.search_text.to_lowercase();
        let mut matches: Vec<&CatalogEntry> = self
            .index
            .entries()
            .iter()
            .filter(|e| matches_text(e, &needle) && query.category_filter.matches(e))
            .collect();

        match query.sort_mode {
            SortMode::Popular => sort_by_usage(&mut matches),
            SortMode::Newest => {}
            // Stable sort on a boolean key partitions without reordering peers
            SortMode::Recommended => matches.sort_by_key(|e| !e.featured),
        }

        debug!(
            "Catalog search '{}' in {:?} sorted {} -> {} results",
            query.search_text,
            query.category_filter,
            query.sort_mode,
            matches.len()
        );
        matches
    }

    /// Attach category display data to each entry
    pub fn listings(&self, entries: &[&'a CatalogEntry]) -> Vec<CatalogListing<'a>> {
        entries
            .iter()
            .filter_map(|&entry| {
                self.index
                    .category(&entry.category_key)
                    .map(|category| CatalogListing { entry, category })
            })
            .collect()
    }

    /// Search results split into per-category sections, skipping empty sections
    pub fn grouped(&self, query: &CatalogQuery) -> Vec<CategoryGroup<'a>> {
        let results = self.search(query);
        self.index
            .categories()
            .iter()
            .filter_map(|category| {
                let entries: Vec<&CatalogEntry> = results
                    .iter()
                    .copied()
                    .filter(|e| e.category_key == category.key)
                    .collect();
                (!entries.is_empty()).then_some(CategoryGroup { category, entries })
            })
            .collect()
    }
}

fn matches_text(entry: &CatalogEntry, needle: &str) -> bool {
    needle.is_empty()
        || entry.title.to_lowercase().contains(needle)
        || entry.tagline.to_lowercase().contains(needle)
}

fn sort_by_usage(entries: &mut [&CatalogEntry]) {
    entries.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[&CatalogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    fn tied_index() -> CatalogIndex {
        let category = CatalogCategory {
            key: "investment".to_string(),
            name: "Investment".to_string(),
            accent: "#00FF66".to_string(),
            icon: "trending-up".to_string(),
        };
        let entry = |id: &str, featured: bool, usage_count: u64| CatalogEntry {
            id: id.to_string(),
            title: format!("{} Calculator", id.to_uppercase()),
            tagline: String::new(),
            category_key: "investment".to_string(),
            featured,
            usage_count,
        };
        CatalogIndex::new(
            vec![category],
            vec![
                entry("a", true, 100),
                entry("b", false, 300),
                entry("c", true, 100),
                entry("d", true, 200),
                entry("e", false, 100),
                entry("f", true, 50),
                entry("g", true, 10),
                entry("h", true, 500),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_nps_search_finds_single_entry() {
        let engine = CatalogQueryEngine::builtin();
        let query = CatalogQuery::new().text("nps").sort(SortMode::Popular);
        assert_eq!(ids(&engine.search(&query)), vec!["nps"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_tagline() {
        let engine = CatalogQueryEngine::builtin();
        let by_title = engine.search(&CatalogQuery::new().text("FiRe"));
        assert_eq!(ids(&by_title), vec!["fire"]);

        // "wedding" appears only in the tagline
        let by_tagline = engine.search(&CatalogQuery::new().text("WEDDING"));
        assert_eq!(ids(&by_tagline), vec!["marriage"]);
    }

    #[test]
    fn test_empty_query_returns_whole_catalog_for_every_sort() {
        let engine = CatalogQueryEngine::builtin();
        for sort in [SortMode::Popular, SortMode::Newest, SortMode::Recommended] {
            let results = engine.search(&CatalogQuery::new().sort(sort));
            assert_eq!(results.len(), engine.index().len());
        }
    }

    #[test]
    fn test_popular_orders_by_usage() {
        let engine = CatalogQueryEngine::builtin();
        let results = engine.search(&CatalogQuery::new().sort(SortMode::Popular));
        assert_eq!(results[0].id, "sip");
        assert_eq!(results.last().unwrap().id, "ups");
        for pair in results.windows(2) {
            assert!(pair[0].usage_count >= pair[1].usage_count);
        }
    }

    #[test]
    fn test_newest_keeps_catalog_order() {
        let engine = CatalogQueryEngine::builtin();
        let results = engine.search(&CatalogQuery::new().sort(SortMode::Newest));
        let catalog: Vec<&CatalogEntry> = engine.index().entries().iter().collect();
        assert_eq!(ids(&results), ids(&catalog));
    }

    #[test]
    fn test_recommended_partitions_featured_first_and_keeps_peer_order() {
        let index = tied_index();
        let engine = CatalogQueryEngine::new(&index);
        let results = engine.search(&CatalogQuery::new().sort(SortMode::Recommended));
        assert_eq!(ids(&results), vec!["a", "c", "d", "f", "g", "h", "b", "e"]);
    }

    #[test]
    fn test_category_filter() {
        let engine = CatalogQueryEngine::builtin();
        let results = engine.search(&CatalogQuery::new().category("tax-saving"));
        assert_eq!(ids(&results), vec!["80c", "tax-regime"]);
        assert!(results.iter().all(|e| e.category_key == "tax-saving"));
    }

    #[test]
    fn test_text_and_category_combine() {
        let engine = CatalogQueryEngine::builtin();
        let query = CatalogQuery::new().text("pension").category("wealth");
        assert_eq!(ids(&engine.search(&query)), vec!["ups"]);
    }

    #[test]
    fn test_unknown_category_yields_empty_not_error() {
        let engine = CatalogQueryEngine::builtin();
        assert!(engine.search(&CatalogQuery::new().category("crypto")).is_empty());
        assert_eq!(
            engine.category("crypto").unwrap_err(),
            CalcError::InvalidCategory("crypto".to_string())
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let engine = CatalogQueryEngine::builtin();
        assert!(engine.search(&CatalogQuery::new().text("zzz")).is_empty());
    }

    #[test]
    fn test_list_featured_respects_limit_and_flag() {
        let index = tied_index();
        let engine = CatalogQueryEngine::new(&index);
        let featured = engine.list_featured(DEFAULT_FEATURED_LIMIT);
        assert_eq!(featured.len(), 5);
        assert!(featured.iter().all(|e| e.featured));
        // Ties on usage keep catalog order
        assert_eq!(ids(&featured), vec!["h", "d", "a", "c", "f"]);
    }

    #[test]
    fn test_list_featured_builtin() {
        let engine = CatalogQueryEngine::builtin();
        assert_eq!(
            ids(&engine.list_featured(DEFAULT_FEATURED_LIMIT)),
            vec!["sip", "80c", "fd", "nps", "fire"]
        );
        assert_eq!(engine.list_featured(2).len(), 2);
        assert!(engine.list_featured(0).is_empty());
    }

    #[test]
    fn test_grouped_follows_category_order() {
        let engine = CatalogQueryEngine::builtin();
        let groups = engine.grouped(&CatalogQuery::new().text("pension"));
        let keys: Vec<&str> = groups.iter().map(|g| g.category.key.as_str()).collect();
        assert_eq!(keys, vec!["retirement", "wealth"]);
        assert_eq!(ids(&groups[0].entries), vec!["nps", "pension"]);
    }

    #[test]
    fn test_listings_carry_category_display() {
        let engine = CatalogQueryEngine::builtin();
        let featured = engine.list_featured(1);
        let listings = engine.listings(&featured);
        assert_eq!(listings[0].category.name, "Investment");
        assert_eq!(listings[0].category.accent, "#00FF66");
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("Popular".parse::<SortMode>().unwrap(), SortMode::Popular);
        assert_eq!(" recommended ".parse::<SortMode>().unwrap(), SortMode::Recommended);
        assert!("oldest".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_query_wire_format() {
        let query: CatalogQuery = serde_json::from_str(
            r#"{"searchText":"sip","categoryFilter":"all","sortMode":"recommended"}"#,
        )
        .unwrap();
        assert_eq!(query.category_filter, CategoryFilter::All);
        assert_eq!(query.sort_mode, SortMode::Recommended);

        let json = serde_json::to_string(&CatalogQuery::new().category("wealth")).unwrap();
        assert!(json.contains(r#""categoryFilter":"wealth""#));
    }
}
