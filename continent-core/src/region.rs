use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use crate::error::LookupError;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One of the seven continents the lookup understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Antarctica => "Antarctica",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Oceania => "Oceania",
            Region::SouthAmerica => "South America",
        }
    }

    pub const fn all() -> &'static [Region] {
        &[
            Region::Africa,
            Region::Antarctica,
            Region::Asia,
            Region::Europe,
            Region::NorthAmerica,
            Region::Oceania,
            Region::SouthAmerica,
        ]
    }

    /// Representative point standing in for the whole continent.
    pub const fn coordinate(&self) -> Coordinate {
        match self {
            Region::Africa => Coordinate::new(0.0, 20.0),
            Region::Antarctica => Coordinate::new(-82.0, 60.0),
            Region::Asia => Coordinate::new(34.0, 100.0),
            Region::Europe => Coordinate::new(50.0, 10.0),
            Region::NorthAmerica => Coordinate::new(40.0, -100.0),
            Region::Oceania => Coordinate::new(-25.0, 135.0),
            Region::SouthAmerica => Coordinate::new(-20.0, -60.0),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the continent name.
impl TryFrom<&str> for Region {
    type Error = LookupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Region::all()
            .iter()
            .copied()
            .find(|region| region.as_str() == value)
            .ok_or_else(|| LookupError::UnknownRegion(value.to_string()))
    }
}

/// Coordinate for a continent name, if the name is one of the seven.
pub fn resolve(name: &str) -> Option<Coordinate> {
    Region::try_from(name).ok().map(|region| region.coordinate())
}
