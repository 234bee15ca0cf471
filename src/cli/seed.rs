use anyhow::Result;
use mealplanner::config::Config;
use mealplanner_shared::{Api, HttpApi};

/// Resets the backend to its fixture recipes.
pub async fn seed(config: Config) -> Result<()> {
    let api = HttpApi::new(&config.api.base_url, config.api.timeout())?;

    api.seed().await?;
    let recipes = api.list_recipes().await?;

    tracing::info!(
        backend = config.api.base_url,
        recipes = recipes.len(),
        "Backend seeded"
    );

    Ok(())
}
