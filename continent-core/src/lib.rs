//! Core library for the `continent-weather` CLI.
//!
//! This crate defines:
//! - The fixed continent → representative coordinate table
//! - The WMO weather-code dictionary
//! - The Open-Meteo client behind the `WeatherProvider` seam
//! - The lookup service turning a continent name into a display string
//! - Classified errors and on-disk configuration
//!
//! It is used by `continent-cli`, but the lookup service can be embedded in
//! any other front end.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod region;
pub mod service;
pub mod weather_code;

pub use config::Config;
pub use error::{ErrorKind, LookupError};
pub use model::{CurrentConditions, WeatherReport};
pub use provider::{WeatherProvider, open_meteo::WeatherClient};
pub use region::{Coordinate, Region};
pub use service::{LookupResult, WeatherLookupService};
