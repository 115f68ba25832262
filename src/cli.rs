use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::transform::Transformation;

#[derive(Parser, Debug)]
#[command(author, version, about = "Transform a recipe into a healthier, vegetarian, regional or resized variant", long_about = None)]
pub struct Cli {
    /// Path to the recipe JSON file
    #[arg(short, long)]
    pub recipe_file: PathBuf,

    /// Substitution catalog JSON (overrides RECIPE_SUBSTITUTIONS_PATH)
    #[arg(long)]
    pub substitutions: Option<PathBuf>,

    /// CSV of unhealthy ingredient names (overrides RECIPE_UNHEALTHY_PATH)
    #[arg(long)]
    pub unhealthy: Option<PathBuf>,

    /// CSV of meat ingredient names (overrides RECIPE_MEAT_PATH)
    #[arg(long)]
    pub meat: Option<PathBuf>,

    /// Seed for reproducible substitution choices (overrides RECIPE_CHOOSER_SEED)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the transformed recipe and changelog as JSON
    #[arg(long)]
    pub json: bool,

    /// Log every candidate decision
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub target: Target,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Target {
    /// Swap in healthier ingredients and halve unhealthy ones
    Healthy,
    /// Swap in richer ingredients and increase unhealthy ones
    Unhealthy,
    Vegetarian,
    /// Swap in meat, or add chicken if nothing can be swapped
    NonVegetarian,
    /// Move the recipe toward a cuisine (e.g. mexico, japan, italy)
    Cuisine { name: String },
    /// Scale every quantity by a factor greater than zero
    Size {
        #[arg(allow_negative_numbers = true)]
        factor: f64,
    },
}

impl From<Target> for Transformation {
    fn from(target: Target) -> Self {
        match target {
            Target::Healthy => Transformation::Healthy,
            Target::Unhealthy => Transformation::Unhealthy,
            Target::Vegetarian => Transformation::Vegetarian,
            Target::NonVegetarian => Transformation::NonVegetarian,
            Target::Cuisine { name } => Transformation::Cuisine(name),
            Target::Size { factor } => Transformation::Size(factor),
        }
    }
}

impl Cli {
    /// Command-line values win over the environment.
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(path) = &self.substitutions {
            config.substitutions_path = Some(path.clone());
        }
        if let Some(path) = &self.unhealthy {
            config.unhealthy_path = Some(path.clone());
        }
        if let Some(path) = &self.meat {
            config.meat_path = Some(path.clone());
        }
        if self.seed.is_some() {
            config.chooser_seed = self.seed;
        }
        config
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
