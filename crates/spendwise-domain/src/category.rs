//! Expense categories and the configured category set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label used to group expenses for summaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The fixed set of categories an expense may be filed under.
///
/// The set comes from configuration; lookups are case-insensitive and return
/// the catalog's own spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Builds a catalog, dropping blank names and case-insensitive duplicates.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<Category> = Vec::new();
        for name in names {
            let name: String = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            if categories
                .iter()
                .any(|existing| existing.as_str().eq_ignore_ascii_case(trimmed))
            {
                continue;
            }
            categories.push(Category::new(trimmed));
        }
        Self { categories }
    }

    pub fn default_names() -> Vec<String> {
        ["Food", "Travel", "Entertainment", "Shopping"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Returns the catalog entry matching `name`, ignoring case and padding.
    pub fn resolve(&self, name: &str) -> Option<&Category> {
        let needle = name.trim();
        self.categories
            .iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(Self::default_names())
    }
}
