use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::AttributeLookup;
use crate::cooking_step::CookingStep;
use crate::error::Result;
use crate::ingredient::Ingredient;

const BANNER: &str = "***************************************************************";

/// A recipe and everything the transformations need to know about it.
///
/// Transformations never mutate a `Recipe` in place; they clone it (every
/// nested ingredient, step and descriptor list included) and return the copy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Recipe {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub cooking_steps: Vec<CookingStep>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl Recipe {
    pub fn new(
        ingredients: Vec<Ingredient>,
        cooking_steps: Vec<CookingStep>,
        tools: Vec<String>,
        methods: Vec<String>,
    ) -> Self {
        Self {
            ingredients,
            cooking_steps,
            tools,
            methods,
        }
    }

    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|ing| ing.name.as_str()).collect()
    }

    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|ing| ing.name == name)
    }

    pub fn find_ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|ing| ing.name == name)
    }

    /// Names that occur more than once in the ingredient list, in first-seen order.
    pub fn duplicate_ingredient_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for ing in &self.ingredients {
            if !seen.insert(ing.name.as_str()) && !duplicates.contains(&ing.name) {
                duplicates.push(ing.name.clone());
            }
        }
        duplicates
    }

    /// Step references that match no ingredient in this recipe.
    pub fn dangling_references(&self) -> Vec<String> {
        let names: HashSet<&str> = self.ingredients.iter().map(|ing| ing.name.as_str()).collect();
        let mut dangling: Vec<String> = Vec::new();
        for step in &self.cooking_steps {
            for reference in &step.ingredient_refs {
                if !names.contains(reference.as_str()) && !dangling.contains(reference) {
                    dangling.push(reference.clone());
                }
            }
        }
        dangling
    }

    /// Renames ingredient `old_name` to `new_name` in both the ingredient list
    /// and every cooking step.
    ///
    /// This is the only code path that renames ingredients. Renamed
    /// ingredients lose their state and prep descriptors, since "diced
    /// chicken" says nothing about how the replacement should be prepared.
    ///
    /// # Returns
    /// The number of ingredient entries renamed.
    pub fn substitute_ingredient(&mut self, old_name: &str, new_name: &str) -> usize {
        let mut renamed = 0;
        for ing in self.ingredients.iter_mut() {
            if ing.name == old_name {
                ing.name = new_name.to_string();
                ing.clear_descriptors();
                renamed += 1;
            }
        }
        for step in self.cooking_steps.iter_mut() {
            step.rename_ingredient_ref(old_name, new_name);
        }
        renamed
    }

    /// True if any ingredient is in the lookup's meat set.
    pub fn contains_meat(&self, attributes: &dyn AttributeLookup) -> bool {
        let meat = attributes.meat_ingredient_names();
        self.ingredients.iter().any(|ing| meat.contains(&ing.name))
    }

    /// Renders the whole recipe as banner-separated sections.
    ///
    /// # Errors
    /// Fails if any cooking step's template cannot be filled.
    pub fn render(&self) -> Result<String> {
        let steps = self
            .cooking_steps
            .iter()
            .map(CookingStep::render)
            .collect::<Result<Vec<String>>>()?;
        let ingredients: Vec<String> = self.ingredients.iter().map(|ing| ing.to_string()).collect();

        let mut out = String::new();
        push_section(&mut out, "INGREDIENTS", "    ", &ingredients);
        push_section(&mut out, "COOKING STEPS", "    - ", &steps);
        push_section(&mut out, "TOOLS", "    ", &self.tools);
        push_section(&mut out, "METHODS", "    ", &self.methods);
        Ok(out)
    }
}

fn push_section(out: &mut String, title: &str, bullet: &str, lines: &[String]) {
    out.push_str(BANNER);
    out.push('\n');
    out.push_str(title);
    out.push_str(":\n");
    out.push_str(BANNER);
    out.push('\n');
    for line in lines {
        out.push_str(bullet);
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}
