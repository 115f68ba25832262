pub mod attributes;
pub mod substitutions;

pub use attributes::{load_ingredient_set, AttributeLookup, IngredientSets};
pub use substitutions::{Category, StaticCatalog, SubstitutionCatalog};
