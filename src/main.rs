use anyhow::{Context, Result};
use recipe_transform::cli::parse_args;
use recipe_transform::config::AppConfig;
use recipe_transform::error::RecipeError;
use recipe_transform::recipe_parser::load_recipe_file;
use recipe_transform::transform::{CandidateChooser, KnowledgeBase, RandomChooser, Transformation};
use recipe_transform::SubstitutionCatalog;
use tracing::{info, warn, Level};

const RULE: &str = "==============================================================================";

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();

    let level = if cli_args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = cli_args.apply_overrides(AppConfig::from_env()?);
    let catalog = config
        .load_catalog()
        .context("Failed to load substitution catalog")?;
    let ingredient_sets = config
        .load_ingredient_sets()
        .context("Failed to load ingredient sets")?;
    let kb = KnowledgeBase::new(&catalog, &ingredient_sets);

    info!(path = ?cli_args.recipe_file, "Reading recipe");
    let recipe = load_recipe_file(&cli_args.recipe_file).await?;

    // Transformations keep names unique and references valid only if the input already does
    let duplicates = recipe.duplicate_ingredient_names();
    if !duplicates.is_empty() {
        warn!(?duplicates, "Recipe lists some ingredients more than once");
    }
    let dangling = recipe.dangling_references();
    if !dangling.is_empty() {
        warn!(?dangling, "Cooking steps reference ingredients missing from the ingredient list");
    }

    let mut chooser: Box<dyn CandidateChooser> = match config.chooser_seed {
        Some(seed) => Box::new(RandomChooser::seeded(seed)),
        None => Box::new(RandomChooser::new()),
    };

    let transformation = Transformation::from(cli_args.target.clone());
    let outcome = match transformation.apply(&recipe, &kb, chooser.as_mut()) {
        Ok(outcome) => outcome,
        Err(RecipeError::UnknownCategory(name)) => {
            return Err(anyhow::anyhow!(
                "Unknown cuisine or category '{}'. Supported cuisines: {}",
                name,
                catalog.cuisines().join(", ")
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if cli_args.json {
        let output = serde_json::json!({
            "transformation": transformation.to_string(),
            "recipe": outcome.recipe,
            "changelog": outcome.changelog,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}\nORIGINAL RECIPE\n{}", RULE, RULE);
    println!("{}", recipe.render().context("Failed to render original recipe")?);
    println!("{}\nTRANSFORMED RECIPE ({})\n{}", RULE, transformation, RULE);
    println!("{}", outcome.recipe.render().context("Failed to render transformed recipe")?);
    if let Some(changelog) = &outcome.changelog {
        println!("{}\nCHANGES\n{}", RULE, RULE);
        print!("{}", changelog);
    }

    Ok(())
}
