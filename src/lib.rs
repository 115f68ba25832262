pub mod catalog;
pub mod cli;
pub mod config;
pub mod cooking_step;
pub mod error;
pub mod ingredient;
pub mod recipe;
pub mod recipe_parser;
pub mod transform;

pub use catalog::{AttributeLookup, Category, IngredientSets, StaticCatalog, SubstitutionCatalog};
pub use cooking_step::CookingStep;
pub use error::RecipeError;
pub use ingredient::Ingredient;
pub use recipe::Recipe;
pub use transform::{Changelog, KnowledgeBase, Transformation};
