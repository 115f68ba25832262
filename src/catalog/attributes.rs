use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const BUILTIN_UNHEALTHY: &str = include_str!("../../data/unhealthy_ingredients.csv");
const BUILTIN_MEAT: &str = include_str!("../../data/meat_ingredients.csv");

// Expected column header for ingredient set files
const NAME_COL: &str = "name";

/// Named ingredient sets consulted by the transformations.
pub trait AttributeLookup {
    fn unhealthy_ingredient_names(&self) -> &HashSet<String>;
    fn meat_ingredient_names(&self) -> &HashSet<String>;
}

/// Ingredient sets loaded once and held for the life of the program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientSets {
    unhealthy: HashSet<String>,
    meat: HashSet<String>,
}

impl IngredientSets {
    pub fn new<U, M, S>(unhealthy: U, meat: M) -> Self
    where
        U: IntoIterator<Item = S>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            unhealthy: unhealthy.into_iter().map(Into::into).collect(),
            meat: meat.into_iter().map(Into::into).collect(),
        }
    }

    /// The sets shipped with the crate under `data/`.
    pub fn builtin() -> Result<Self> {
        let unhealthy = read_ingredient_names(BUILTIN_UNHEALTHY.as_bytes())
            .context("Failed to parse built-in unhealthy ingredient list")?;
        let meat = read_ingredient_names(BUILTIN_MEAT.as_bytes())
            .context("Failed to parse built-in meat ingredient list")?;
        Ok(Self { unhealthy, meat })
    }

    /// Loads either set from a CSV file, falling back to the built-in list when no path is given.
    pub fn load(unhealthy_path: Option<&Path>, meat_path: Option<&Path>) -> Result<Self> {
        let builtin = Self::builtin()?;
        let unhealthy = match unhealthy_path {
            Some(path) => load_ingredient_set(path)?,
            None => builtin.unhealthy,
        };
        let meat = match meat_path {
            Some(path) => load_ingredient_set(path)?,
            None => builtin.meat,
        };
        Ok(Self { unhealthy, meat })
    }
}

impl AttributeLookup for IngredientSets {
    fn unhealthy_ingredient_names(&self) -> &HashSet<String> {
        &self.unhealthy
    }

    fn meat_ingredient_names(&self) -> &HashSet<String> {
        &self.meat
    }
}

/// Reads a CSV file with a `name` column into a set of ingredient names.
pub fn load_ingredient_set(csv_path: &Path) -> Result<HashSet<String>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Ingredient set CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open ingredient set CSV file at {:?}", csv_path))?;
    read_ingredient_names(file)
        .with_context(|| format!("Failed to load ingredient set from {:?}", csv_path))
}

fn read_ingredient_names<R: Read>(reader: R) -> Result<HashSet<String>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim() == NAME_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", NAME_COL))?;

    let mut names = HashSet::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let name = record.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        names.insert(name.to_string());
    }

    if names.is_empty() {
        return Err(anyhow::anyhow!("No ingredient names found"));
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_sets() -> Result<()> {
        let sets = IngredientSets::builtin()?;
        assert!(sets.unhealthy_ingredient_names().contains("mayonnaise"));
        assert!(sets.unhealthy_ingredient_names().contains("butter"));
        assert!(sets.meat_ingredient_names().contains("chicken"));
        assert!(!sets.meat_ingredient_names().contains("tofu"));
        Ok(())
    }

    #[test]
    fn test_load_ingredient_set_success() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},category", NAME_COL)?;
        writeln!(file, "salt,seasoning")?;
        writeln!(file, "  lard ,fat")?;
        writeln!(file, ",empty")?; // Empty name
        file.flush()?;

        let names = load_ingredient_set(file.path())?;
        assert_eq!(names.len(), 2);
        assert!(names.contains("salt"));
        assert!(names.contains("lard"));
        Ok(())
    }

    #[test]
    fn test_load_ingredient_set_missing_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "ingredient")?;
        writeln!(file, "salt")?;
        file.flush()?;

        let result = load_ingredient_set(file.path());
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains(&format!("Column '{}' not found", NAME_COL)));
        Ok(())
    }

    #[test]
    fn test_load_ingredient_set_headers_only() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", NAME_COL)?;
        file.flush()?;

        let result = load_ingredient_set(file.path());
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("No ingredient names found"));
        Ok(())
    }

    #[test]
    fn test_load_ingredient_set_file_not_found() {
        let result = load_ingredient_set(Path::new("this_file_does_not_exist.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Ingredient set CSV file not found"));
    }

    #[test]
    fn test_load_falls_back_to_builtin() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", NAME_COL)?;
        writeln!(file, "tofu")?;
        file.flush()?;

        let sets = IngredientSets::load(None, Some(file.path()))?;
        assert!(sets.unhealthy_ingredient_names().contains("salt"));
        assert_eq!(sets.meat_ingredient_names().len(), 1);
        assert!(sets.meat_ingredient_names().contains("tofu"));
        Ok(())
    }
}
