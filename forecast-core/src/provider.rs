use crate::{Config, Coordinate, ForecastPoint, provider::stormglass::StormGlassProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod stormglass;

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch normalized hourly points for a location. Transport and parse
    /// failures are returned as-is; incomplete records are skipped.
    async fn fetch_points(&self, coordinate: Coordinate) -> anyhow::Result<Vec<ForecastPoint>>;
}

/// Construct the StormGlass provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    if config.api_token().is_none() {
        return Err(anyhow::anyhow!(
            "No API token configured for StormGlass.\n\
             Hint: run `forecast configure` and enter your API token."
        ));
    }

    Ok(Box::new(StormGlassProvider::new(config.stormglass_config().clone())))
}
