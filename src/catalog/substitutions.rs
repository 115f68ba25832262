use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::RecipeError;

const BUILTIN_SUBSTITUTIONS: &str = include_str!("../../data/substitutions.json");

pub const TO_HEALTHY_KEY: &str = "to_healthy";
pub const TO_UNHEALTHY_KEY: &str = "to_unhealthy";
pub const TO_VEGETARIAN_KEY: &str = "to_vegetarian";
pub const TO_NON_VEGETARIAN_KEY: &str = "to_non_vegetarian";

const FIXED_CATEGORY_KEYS: [&str; 4] = [
    TO_HEALTHY_KEY,
    TO_UNHEALTHY_KEY,
    TO_VEGETARIAN_KEY,
    TO_NON_VEGETARIAN_KEY,
];

/// Selects one sub-table of the substitution catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    ToHealthy,
    ToUnhealthy,
    ToVegetarian,
    ToNonVegetarian,
    Cuisine(String),
}

impl Category {
    /// The key this category is stored under in the catalog.
    pub fn key(&self) -> &str {
        match self {
            Category::ToHealthy => TO_HEALTHY_KEY,
            Category::ToUnhealthy => TO_UNHEALTHY_KEY,
            Category::ToVegetarian => TO_VEGETARIAN_KEY,
            Category::ToNonVegetarian => TO_NON_VEGETARIAN_KEY,
            Category::Cuisine(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Read-only source of substitution candidates.
///
/// An unknown category is an error; an ingredient missing from a known
/// category is the ordinary "nothing to substitute" case and yields `Ok(None)`.
pub trait SubstitutionCatalog {
    fn has_category(&self, category: &Category) -> bool;

    fn lookup(
        &self,
        category: &Category,
        ingredient_name: &str,
    ) -> Result<Option<&[String]>, RecipeError>;

    /// Supported cuisine names, sorted.
    fn cuisines(&self) -> Vec<String>;
}

/// Catalog backed by an in-memory table, usually loaded from JSON:
/// `{ "<category>": { "<ingredient>": ["<candidate>", ...] } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct StaticCatalog {
    tables: HashMap<String, HashMap<String, Vec<String>>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the crate (`data/substitutions.json`).
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_SUBSTITUTIONS).context("Failed to parse built-in substitution catalog")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: StaticCatalog =
            serde_json::from_str(json).context("Substitution catalog is not valid JSON")?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Substitution catalog file not found at: {:?}", path));
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read substitution catalog at {:?}", path))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load substitution catalog from {:?}", path))
    }

    /// Registers an (empty) category so lookups against it succeed.
    pub fn with_category(mut self, category: Category) -> Self {
        self.tables.entry(category.key().to_string()).or_default();
        self
    }

    pub fn with_candidates(mut self, category: Category, ingredient: &str, candidates: &[&str]) -> Self {
        self.tables
            .entry(category.key().to_string())
            .or_default()
            .insert(
                ingredient.to_string(),
                candidates.iter().map(|c| c.to_string()).collect(),
            );
        self
    }

    /// The sub-table for `category`. A cuisine never resolves to one of the
    /// fixed tables, even if it is named like one.
    fn table(&self, category: &Category) -> Option<&HashMap<String, Vec<String>>> {
        if let Category::Cuisine(name) = category {
            if FIXED_CATEGORY_KEYS.contains(&name.as_str()) {
                return None;
            }
        }
        self.tables.get(category.key())
    }
}

impl SubstitutionCatalog for StaticCatalog {
    fn has_category(&self, category: &Category) -> bool {
        self.table(category).is_some()
    }

    fn lookup(
        &self,
        category: &Category,
        ingredient_name: &str,
    ) -> Result<Option<&[String]>, RecipeError> {
        let table = self
            .table(category)
            .ok_or_else(|| RecipeError::UnknownCategory(category.key().to_string()))?;
        Ok(table.get(ingredient_name).map(Vec::as_slice))
    }

    fn cuisines(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .keys()
            .filter(|key| !FIXED_CATEGORY_KEYS.contains(&key.as_str()))
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_has_all_categories() -> Result<()> {
        let catalog = StaticCatalog::builtin()?;
        for category in [
            Category::ToHealthy,
            Category::ToUnhealthy,
            Category::ToVegetarian,
            Category::ToNonVegetarian,
        ] {
            assert!(catalog.has_category(&category), "missing {}", category);
        }
        assert_eq!(catalog.cuisines(), vec!["italy", "japan", "mexico"]);
        Ok(())
    }

    #[test]
    fn test_lookup_distinguishes_unknown_category_from_missing_ingredient() {
        let catalog = StaticCatalog::new()
            .with_candidates(Category::ToHealthy, "butter", &["margarine", "applesauce"]);

        let found = catalog.lookup(&Category::ToHealthy, "butter").unwrap();
        assert_eq!(found, Some(&["margarine".to_string(), "applesauce".to_string()][..]));

        assert_eq!(catalog.lookup(&Category::ToHealthy, "rice").unwrap(), None);

        let err = catalog
            .lookup(&Category::Cuisine("atlantis".to_string()), "butter")
            .unwrap_err();
        assert_eq!(err, RecipeError::UnknownCategory("atlantis".to_string()));
    }

    #[test]
    fn test_fixed_table_is_not_a_cuisine() -> Result<()> {
        let catalog = StaticCatalog::builtin()?;
        let posing = Category::Cuisine(TO_VEGETARIAN_KEY.to_string());

        assert!(catalog.has_category(&Category::ToVegetarian));
        assert!(!catalog.has_category(&posing));
        assert_eq!(
            catalog.lookup(&posing, "chicken").unwrap_err(),
            RecipeError::UnknownCategory(TO_VEGETARIAN_KEY.to_string())
        );
        Ok(())
    }

    #[test]
    fn test_from_path_loads_json() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, r#"{{"to_healthy": {{"butter": ["margarine"]}}, "france": {{}}}}"#)?;
        file.flush()?;

        let catalog = StaticCatalog::from_path(file.path())?;
        assert!(catalog.has_category(&Category::ToHealthy));
        assert!(!catalog.has_category(&Category::ToVegetarian));
        assert_eq!(catalog.cuisines(), vec!["france"]);
        Ok(())
    }

    #[test]
    fn test_from_path_file_not_found() {
        let result = StaticCatalog::from_path(Path::new("no_such_catalog.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Substitution catalog file not found"));
    }

    #[test]
    fn test_from_json_str_rejects_wrong_shape() {
        let result = StaticCatalog::from_json_str(r#"{"to_healthy": ["butter"]}"#);
        assert!(result.is_err());
    }
}
