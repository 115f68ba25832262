use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::changelog::Changelog;
use super::chooser::CandidateChooser;
use super::KnowledgeBase;
use crate::catalog::{AttributeLookup, Category, SubstitutionCatalog};
use crate::cooking_step::CookingStep;
use crate::error::{RecipeError, Result};
use crate::ingredient::Ingredient;
use crate::recipe::Recipe;

/// Factor applied to unhealthy ingredients when making a recipe healthier.
pub const HEALTHY_SCALE: f64 = 0.5;
/// Factor applied to unhealthy ingredients when making a recipe less healthy.
pub const UNHEALTHY_SCALE: f64 = 1.5;

// Added by the non-vegetarian transformation when nothing could be substituted
pub const DEFAULT_MEAT_INGREDIENT: &str = "chicken";
const DEFAULT_MEAT_QUANTITY: f64 = 0.5;
const DEFAULT_MEAT_UNIT: &str = "cup";
const DEFAULT_MEAT_STATE: &str = "cooked";
const DEFAULT_MEAT_PREP: &str = "diced";
const DEFAULT_MEAT_STEP: &str = "Add {0}.";

impl Recipe {
    /// Makes the recipe healthier: substitutes from the `to_healthy` table,
    /// then halves every ingredient in the unhealthy set.
    ///
    /// # Returns
    /// The transformed copy and a changelog of name substitutions plus
    /// `before -> after` descriptions of every halved ingredient.
    pub fn transform_healthy(
        &self,
        kb: &KnowledgeBase<'_>,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<(Recipe, Changelog)> {
        let (mut transformed, mut changelog) =
            substitute_from_catalog(self, &Category::ToHealthy, kb.catalog, chooser)?;
        rescale_unhealthy(&mut transformed, kb.attributes, HEALTHY_SCALE, &mut changelog);
        Ok((transformed, changelog))
    }

    /// Makes the recipe less healthy: substitutes from the `to_unhealthy`
    /// table, then grows every unhealthy ingredient by half.
    pub fn transform_unhealthy(
        &self,
        kb: &KnowledgeBase<'_>,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<(Recipe, Changelog)> {
        let (mut transformed, mut changelog) =
            substitute_from_catalog(self, &Category::ToUnhealthy, kb.catalog, chooser)?;
        rescale_unhealthy(&mut transformed, kb.attributes, UNHEALTHY_SCALE, &mut changelog);
        Ok((transformed, changelog))
    }

    pub fn transform_vegetarian(
        &self,
        kb: &KnowledgeBase<'_>,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<(Recipe, Changelog)> {
        substitute_from_catalog(self, &Category::ToVegetarian, kb.catalog, chooser)
    }

    /// Makes the recipe non-vegetarian.
    ///
    /// When no substitution applies and the recipe has no meat at all, half a
    /// cup of cooked diced chicken is added along with an "Add chicken." step,
    /// recorded under `ChangeKey::Added`.
    pub fn transform_non_vegetarian(
        &self,
        kb: &KnowledgeBase<'_>,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<(Recipe, Changelog)> {
        let (mut transformed, mut changelog) =
            substitute_from_catalog(self, &Category::ToNonVegetarian, kb.catalog, chooser)?;

        if changelog.substitution_count() == 0 && !transformed.contains_meat(kb.attributes) {
            if transformed.has_ingredient(DEFAULT_MEAT_INGREDIENT) {
                // Adding it again would duplicate the name
                warn!(
                    ingredient = DEFAULT_MEAT_INGREDIENT,
                    "Recipe already lists the default meat but it is not in the meat set; nothing added"
                );
            } else {
                add_default_meat(&mut transformed);
                changelog.record_addition(DEFAULT_MEAT_INGREDIENT);
            }
        }

        Ok((transformed, changelog))
    }

    /// Moves the recipe toward the named cuisine.
    ///
    /// # Errors
    /// `UnknownCategory` if the catalog has no table for `cuisine_name`.
    pub fn transform_cuisine(
        &self,
        cuisine_name: &str,
        kb: &KnowledgeBase<'_>,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<(Recipe, Changelog)> {
        let category = Category::Cuisine(cuisine_name.to_string());
        substitute_from_catalog(self, &category, kb.catalog, chooser)
    }
}

/// The substitution pass shared by every catalog-driven transformation.
///
/// Walks the original ingredient list in order and, for each ingredient the
/// category knows about, drops candidates already named in the copy (which
/// includes names introduced earlier in this pass), lets the chooser pick a
/// survivor and routes the rename through `Recipe::substitute_ingredient`.
/// Ingredients with no surviving candidate are left as they are.
///
/// Output names are unique only when the input's names already are: two
/// ingredients sharing a name are renamed together by the first rename.
pub fn substitute_from_catalog(
    original: &Recipe,
    category: &Category,
    catalog: &dyn SubstitutionCatalog,
    chooser: &mut dyn CandidateChooser,
) -> Result<(Recipe, Changelog)> {
    if !catalog.has_category(category) {
        return Err(RecipeError::UnknownCategory(category.key().to_string()));
    }

    let mut transformed = original.clone();
    let mut changelog = Changelog::new();

    for orig_ing in &original.ingredients {
        let Some(candidates) = catalog.lookup(category, &orig_ing.name)? else {
            continue;
        };

        if !transformed.has_ingredient(&orig_ing.name) {
            debug!(ingredient = %orig_ing.name, "Already substituted earlier in this pass");
            continue;
        }

        let valid_candidates: Vec<String> = {
            let current_names: HashSet<&str> = transformed.ingredient_names().into_iter().collect();
            candidates
                .iter()
                .filter(|candidate| !current_names.contains(candidate.as_str()))
                .cloned()
                .collect()
        };

        if valid_candidates.is_empty() {
            debug!(
                ingredient = %orig_ing.name,
                %category,
                "Every candidate is already in the recipe; leaving ingredient unchanged"
            );
            continue;
        }

        let index = chooser.choose(&valid_candidates);
        let Some(new_name) = valid_candidates.get(index) else {
            warn!(
                ingredient = %orig_ing.name,
                index,
                candidates = valid_candidates.len(),
                "Chooser returned an out-of-range index; skipping ingredient"
            );
            continue;
        };

        transformed.substitute_ingredient(&orig_ing.name, new_name);
        info!(from = %orig_ing.name, to = %new_name, %category, "Substituted ingredient");
        changelog.record_substitution(&orig_ing.name, new_name);
    }

    Ok((transformed, changelog))
}

fn rescale_unhealthy(
    recipe: &mut Recipe,
    attributes: &dyn AttributeLookup,
    factor: f64,
    changelog: &mut Changelog,
) {
    let unhealthy = attributes.unhealthy_ingredient_names();
    for ing in recipe.ingredients.iter_mut() {
        if unhealthy.contains(&ing.name) {
            let before = ing.to_string();
            ing.scale(factor);
            let after = ing.to_string();
            info!(%before, %after, "Rescaled unhealthy ingredient");
            changelog.record_rescale(&before, &after);
        }
    }
}

fn add_default_meat(recipe: &mut Recipe) {
    let meat = Ingredient::new(DEFAULT_MEAT_INGREDIENT, DEFAULT_MEAT_QUANTITY, DEFAULT_MEAT_UNIT)
        .with_state(DEFAULT_MEAT_STATE)
        .with_prep(DEFAULT_MEAT_PREP);
    let step = CookingStep::new(DEFAULT_MEAT_STEP, vec![meat.name.clone()]);
    info!(ingredient = %meat, "No meat substitution possible; adding default meat");

    recipe.ingredients.push(meat);
    recipe.cooking_steps.push(step);
}
