use crate::{
    Config, CurrentConditions, LookupError, provider::open_meteo::WeatherClient, region::Coordinate,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Source of current conditions for a coordinate.
///
/// One call is one attempt: implementations must not retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_conditions(&self, coord: Coordinate) -> Result<CurrentConditions, LookupError>;
}

/// Construct the Open-Meteo provider from validated config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    config.validate()?;
    let client = WeatherClient::from_config(config)?;
    Ok(Box::new(client))
}
