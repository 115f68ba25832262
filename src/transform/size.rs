use tracing::info;

use crate::error::{RecipeError, Result};
use crate::recipe::Recipe;

/// Rejects scale factors that would produce a degenerate recipe.
pub fn validate_scale(scale: f64) -> Result<f64> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(RecipeError::InvalidScale(scale))
    }
}

impl Recipe {
    /// Returns a copy of the recipe resized by `scale`.
    ///
    /// Every ingredient quantity, step duration and step amount is
    /// multiplied; units stay as they are. The factor is not checked here, so
    /// callers taking user input should run it through `validate_scale` first.
    pub fn transform_size(&self, scale: f64) -> Recipe {
        let mut transformed = self.clone();
        for ing in transformed.ingredients.iter_mut() {
            ing.scale(scale);
        }
        for step in transformed.cooking_steps.iter_mut() {
            step.scale(scale);
        }
        info!(scale, ingredients = transformed.ingredients.len(), "Resized recipe");
        transformed
    }
}
