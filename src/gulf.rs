use itertools::Itertools;
use std::str::FromStr;

use crate::util::ApiError;

pub const GULF_COUNTRIES: [&str; 6] = [
    "Saudi Arabia",
    "United Arab Emirates",
    "Oman",
    "Qatar",
    "Bahrain",
    "Kuwait",
];

pub fn is_gulf_country(country: &str) -> bool {
    GULF_COUNTRIES.contains(&country)
}

pub fn gulf_country_list() -> String {
    GULF_COUNTRIES.iter().join(", ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Sky,
    Ground,
    /// A `location` parameter given without a value. It admits no aircraft.
    Blank,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Sky => "sky",
            Location::Ground => "ground",
            Location::Blank => "",
        }
    }

    /// Whether an aircraft with the given effective on-ground status is kept.
    pub fn admits(&self, on_ground: bool) -> bool {
        match self {
            Location::Sky => !on_ground,
            Location::Ground => on_ground,
            Location::Blank => false,
        }
    }
}

impl FromStr for Location {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sky" => Ok(Location::Sky),
            "ground" => Ok(Location::Ground),
            "" => Ok(Location::Blank),
            _ => Err(ApiError::InvalidLocation),
        }
    }
}

/// Raw query parameters shared by the aircraft and download endpoints.
#[derive(Clone, Debug, Default)]
pub struct AircraftQuery {
    pub country: Option<String>,
    pub location: Option<String>,
}

impl AircraftQuery {
    /// Builds the query from decoded key/value pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = AircraftQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "country" => &mut query.country,
                "location" => &mut query.location,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Validated selectors passed on to the filter.
///
/// An empty `country` is kept as given: it is never checked against the Gulf
/// Country Set and, like a blank location, matches no aircraft.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub country: Option<String>,
    pub location: Option<Location>,
}

impl Selection {
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn describe_country(&self) -> &str {
        self.country().filter(|c| !c.is_empty()).unwrap_or("Gulf countries")
    }

    pub fn describe_location(&self) -> &'static str {
        match self.location {
            None | Some(Location::Blank) => "all locations",
            Some(location) => location.as_str(),
        }
    }
}

impl TryFrom<AircraftQuery> for Selection {
    type Error = ApiError;

    fn try_from(query: AircraftQuery) -> Result<Self, Self::Error> {
        if let Some(ref country) = query.country {
            if !country.is_empty() && !is_gulf_country(country) {
                return Err(ApiError::InvalidCountry(country.clone()));
            }
        }

        let location = query
            .location
            .map(|l| l.parse::<Location>())
            .transpose()?;

        Ok(Selection {
            country: query.country,
            location,
        })
    }
}
