pub mod changelog;
pub mod chooser;
pub mod size;
pub mod substitution;

use std::fmt;
use tracing::info;

pub use changelog::{ChangeKey, Changelog, ADDED_INGREDIENT_KEY};
pub use chooser::{CandidateChooser, FirstCandidate, RandomChooser};
pub use size::validate_scale;
pub use substitution::{substitute_from_catalog, DEFAULT_MEAT_INGREDIENT};

use crate::catalog::{AttributeLookup, SubstitutionCatalog};
use crate::error::Result;
use crate::recipe::Recipe;

/// The read-only data every transformation consults.
#[derive(Clone, Copy)]
pub struct KnowledgeBase<'a> {
    pub catalog: &'a dyn SubstitutionCatalog,
    pub attributes: &'a dyn AttributeLookup,
}

impl<'a> KnowledgeBase<'a> {
    pub fn new(catalog: &'a dyn SubstitutionCatalog, attributes: &'a dyn AttributeLookup) -> Self {
        Self { catalog, attributes }
    }
}

/// A transformation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformation {
    Healthy,
    Unhealthy,
    Vegetarian,
    NonVegetarian,
    Cuisine(String),
    Size(f64),
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformation::Healthy => write!(f, "healthy"),
            Transformation::Unhealthy => write!(f, "unhealthy"),
            Transformation::Vegetarian => write!(f, "vegetarian"),
            Transformation::NonVegetarian => write!(f, "non-vegetarian"),
            Transformation::Cuisine(name) => write!(f, "cuisine '{}'", name),
            Transformation::Size(scale) => write!(f, "size x{}", scale),
        }
    }
}

/// A transformed recipe. Size transformations carry no changelog.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    pub recipe: Recipe,
    pub changelog: Option<Changelog>,
}

impl Transformation {
    /// Runs this transformation on a copy of `recipe`.
    ///
    /// Size requests are validated here, so a non-positive or non-finite
    /// factor is reported as `InvalidScale` instead of producing a degenerate recipe.
    pub fn apply(
        &self,
        recipe: &Recipe,
        kb: &KnowledgeBase<'_>,
        chooser: &mut dyn CandidateChooser,
    ) -> Result<TransformOutcome> {
        info!(transformation = %self, "Transforming recipe");
        let (recipe, changelog) = match self {
            Transformation::Healthy => recipe.transform_healthy(kb, chooser)?,
            Transformation::Unhealthy => recipe.transform_unhealthy(kb, chooser)?,
            Transformation::Vegetarian => recipe.transform_vegetarian(kb, chooser)?,
            Transformation::NonVegetarian => recipe.transform_non_vegetarian(kb, chooser)?,
            Transformation::Cuisine(name) => recipe.transform_cuisine(name, kb, chooser)?,
            Transformation::Size(scale) => {
                let scale = validate_scale(*scale)?;
                return Ok(TransformOutcome {
                    recipe: recipe.transform_size(scale),
                    changelog: None,
                });
            }
        };
        Ok(TransformOutcome {
            recipe,
            changelog: Some(changelog),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IngredientSets, StaticCatalog};
    use crate::error::RecipeError;
    use crate::ingredient::Ingredient;

    #[test]
    fn test_apply_size_validates_scale() {
        let catalog = StaticCatalog::new();
        let sets = IngredientSets::default();
        let kb = KnowledgeBase::new(&catalog, &sets);
        let recipe = Recipe::new(vec![Ingredient::new("rice", 1.0, "cup")], Vec::new(), Vec::new(), Vec::new());

        let err = Transformation::Size(0.0).apply(&recipe, &kb, &mut FirstCandidate).unwrap_err();
        assert_eq!(err, RecipeError::InvalidScale(0.0));

        let outcome = Transformation::Size(3.0).apply(&recipe, &kb, &mut FirstCandidate).unwrap();
        assert_eq!(outcome.recipe.ingredients[0].quantity, 3.0);
        assert!(outcome.changelog.is_none());
    }

    #[test]
    fn test_apply_dispatches_substitutions() -> anyhow::Result<()> {
        let catalog = StaticCatalog::builtin()?;
        let sets = IngredientSets::builtin()?;
        let kb = KnowledgeBase::new(&catalog, &sets);
        let recipe = Recipe::new(vec![Ingredient::new("ground beef", 1.0, "pound")], Vec::new(), Vec::new(), Vec::new());

        let outcome = Transformation::Vegetarian.apply(&recipe, &kb, &mut FirstCandidate)?;
        assert_eq!(outcome.recipe.ingredients[0].name, "lentils");
        assert_eq!(
            outcome.changelog.as_ref().and_then(|log| log.substitution_for("ground beef")),
            Some("lentils")
        );
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(Transformation::NonVegetarian.to_string(), "non-vegetarian");
        assert_eq!(Transformation::Cuisine("japan".to_string()).to_string(), "cuisine 'japan'");
    }
}
