use anyhow::{Context, Result};
use std::path::Path;

use crate::recipe::Recipe;

/// Parses a recipe from JSON text. Surrounding whitespace is ignored.
pub fn parse_recipe_json(recipe_text: &str) -> Result<Recipe> {
    let content = recipe_text.trim();
    if content.is_empty() {
        return Err(anyhow::anyhow!("Recipe text is empty"));
    }

    let recipe: Recipe = serde_json::from_str(content).context("Failed to deserialize recipe JSON")?;
    Ok(recipe)
}

/// Reads and parses a recipe file.
pub async fn load_recipe_file(path: &Path) -> Result<Recipe> {
    let recipe_content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recipe file {:?}", path))?;
    parse_recipe_json(&recipe_content).with_context(|| format!("Failed to parse recipe file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PANCAKES: &str = r#"{
        "ingredients": [
            {"name": "flour", "quantity": 1.5, "unit": "cups", "prep_descriptors": ["sifted"]},
            {"name": "butter", "quantity": 3, "unit": "tablespoons", "state_descriptors": ["melted"]}
        ],
        "cooking_steps": [
            {"ingredient_refs": ["flour", "butter"], "tool_refs": ["bowl"], "method": "mix",
             "text_template": "Whisk {0} into {1}."},
            {"ingredient_refs": [], "duration_quantity": 2, "duration_unit": "minutes",
             "text_template": "Cook each side."}
        ],
        "tools": ["bowl", "skillet"],
        "methods": ["mix", "fry"]
    }"#;

    #[test]
    fn test_parse_recipe_json() -> Result<()> {
        let recipe = parse_recipe_json(PANCAKES)?;
        assert_eq!(recipe.ingredient_names(), vec!["flour", "butter"]);
        assert_eq!(recipe.ingredients[1].quantity, 3.0);
        assert_eq!(recipe.ingredients[1].state_descriptors, vec!["melted".to_string()]);
        assert!(recipe.ingredients[1].prep_descriptors.is_empty());
        assert_eq!(recipe.cooking_steps[1].duration_quantity, Some(2.0));
        assert!(recipe.cooking_steps[1].quantities.is_empty());
        assert_eq!(recipe.tools, vec!["bowl".to_string(), "skillet".to_string()]);
        Ok(())
    }

    #[test]
    fn test_parse_recipe_json_rejects_markdown_fences() {
        let fenced = format!("```json\n{}\n```", PANCAKES);
        assert!(parse_recipe_json(&fenced).is_err());
        assert!(parse_recipe_json(&format!("\n  {}\n", PANCAKES)).is_ok());
    }

    #[test]
    fn test_parse_recipe_json_missing_lists_default() -> Result<()> {
        let recipe = parse_recipe_json(r#"{"ingredients": [{"name": "water", "quantity": 1}]}"#)?;
        assert!(recipe.cooking_steps.is_empty());
        assert!(recipe.tools.is_empty());
        assert!(recipe.methods.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_recipe_json_errors() {
        assert!(parse_recipe_json("   ").unwrap_err().to_string().contains("Recipe text is empty"));
        assert!(parse_recipe_json("```json\n```").is_err());
        assert!(parse_recipe_json(r#"{"ingredients": [{"quantity": 1}]}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_recipe_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", PANCAKES)?;
        file.flush()?;

        let recipe = load_recipe_file(file.path()).await?;
        assert_eq!(recipe.cooking_steps.len(), 2);

        let missing = load_recipe_file(Path::new("no_such_recipe.json")).await;
        assert!(missing.is_err());
        Ok(())
    }
}
