//! Client-side catalog filtering.
//!
//! The visible grid is always derived from the full record list: nothing
//! here is stored or indexed, every call re-scans the list.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::defaults::ALL_CATEGORIES;
use crate::models::{Prompt, SortOption};

/// Search text plus category selection applied to the loaded records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Free text matched case-insensitively against title and body.
    pub search: String,
    /// Selected category, or [`ALL_CATEGORIES`].
    pub category: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl CatalogFilter {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    /// True when the category selection is the "All" sentinel.
    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }

    /// Whether a single record passes both the search and the category test.
    pub fn matches(&self, prompt: &Prompt) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = prompt.title.to_lowercase().contains(&needle)
            || prompt.body.to_lowercase().contains(&needle);
        let matches_category = self.is_all_categories() || prompt.category == self.category;
        matches_search && matches_category
    }

    /// Records passing the filter, in their original order.
    pub fn apply<'a>(&self, prompts: &'a [Prompt]) -> Vec<&'a Prompt> {
        prompts.iter().filter(|p| self.matches(p)).collect()
    }
}

/// "All" followed by the distinct categories present, in first-seen order.
pub fn derive_categories(prompts: &[Prompt]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(ALL_CATEGORIES);

    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for prompt in prompts {
        if seen.insert(prompt.category.as_str()) {
            categories.push(prompt.category.clone());
        }
    }
    categories
}

/// Stable in-place sort of an already filtered list.
pub fn sort_prompts(prompts: &mut [&Prompt], sort: SortOption) {
    match sort {
        SortOption::Newest => prompts.sort_by(|a, b| by_created(a, b, true)),
        SortOption::Oldest => prompts.sort_by(|a, b| by_created(a, b, false)),
        SortOption::Az => prompts.sort_by_key(|p| p.title.to_lowercase()),
    }
}

// Unparseable timestamps sort last in both directions.
fn by_created(a: &Prompt, b: &Prompt, newest_first: bool) -> Ordering {
    match (a.created_at_utc(), b.created_at_utc()) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
