use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{region::Region, weather_code};

/// Conditions at a single instant, as reported by the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: u32,
    /// Local time of the observation at the queried point.
    pub observed_at: Option<NaiveDateTime>,
    pub timezone: Option<String>,
}

/// Successful lookup: the continent, its conditions and the decoded description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub region: Region,
    pub conditions: CurrentConditions,
    pub description: String,
}

impl WeatherReport {
    pub fn new(region: Region, conditions: CurrentConditions) -> Self {
        let description = weather_code::describe(conditions.weather_code).into_owned();
        Self { region, conditions, description }
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Continent: {}", self.region)?;
        writeln!(f, "Temperature: {}°C", tenths(self.conditions.temperature_c))?;
        writeln!(f, "Weather: {}", self.description)?;
        write!(f, "Wind Speed: {} km/h", tenths(self.conditions.wind_speed_kmh))
    }
}

/// One decimal place; readings that round to zero never show as `-0.0`.
fn tenths(value: f64) -> String {
    let text = format!("{value:.1}");
    if text == "-0.0" { "0.0".to_string() } else { text }
}
