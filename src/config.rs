use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::catalog::{IngredientSets, StaticCatalog};

// Environment variables read at startup (a `.env` file is honoured via dotenv)
pub const SUBSTITUTIONS_PATH_ENV_VAR: &str = "RECIPE_SUBSTITUTIONS_PATH";
pub const UNHEALTHY_PATH_ENV_VAR: &str = "RECIPE_UNHEALTHY_PATH";
pub const MEAT_PATH_ENV_VAR: &str = "RECIPE_MEAT_PATH";
pub const CHOOSER_SEED_ENV_VAR: &str = "RECIPE_CHOOSER_SEED";

/// Where the knowledge base comes from and how candidates are chosen.
/// `None` paths mean the built-in data under `data/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub substitutions_path: Option<PathBuf>,
    pub unhealthy_path: Option<PathBuf>,
    pub meat_path: Option<PathBuf>,
    pub chooser_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let chooser_seed = match get(CHOOSER_SEED_ENV_VAR) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} must be an unsigned integer, got '{}'", CHOOSER_SEED_ENV_VAR, raw))?,
            ),
            None => None,
        };

        Ok(Self {
            substitutions_path: get(SUBSTITUTIONS_PATH_ENV_VAR).map(PathBuf::from),
            unhealthy_path: get(UNHEALTHY_PATH_ENV_VAR).map(PathBuf::from),
            meat_path: get(MEAT_PATH_ENV_VAR).map(PathBuf::from),
            chooser_seed,
        })
    }

    pub fn load_catalog(&self) -> Result<StaticCatalog> {
        match &self.substitutions_path {
            Some(path) => StaticCatalog::from_path(path),
            None => StaticCatalog::builtin(),
        }
    }

    pub fn load_ingredient_sets(&self) -> Result<IngredientSets> {
        IngredientSets::load(self.unhealthy_path.as_deref(), self.meat_path.as_deref())
    }
}
