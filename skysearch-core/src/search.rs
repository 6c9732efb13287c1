use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Criteria forwarded to the provider's offer search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub adults: u32,
    pub non_stop: bool,
}

impl FlightSearchCriteria {
    pub fn validate(&self) -> CoreResult<()> {
        for (field, code) in [("origin", &self.origin), ("destination", &self.destination)] {
            if code.chars().count() != 3 {
                return Err(CoreError::Validation(format!(
                    "{} must be a 3-letter IATA code, got '{}'",
                    field, code
                )));
            }
        }
        if self.adults < 1 {
            return Err(CoreError::Validation("adults must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Whether the search covers an outbound and a return leg.
    pub fn is_round_trip(&self) -> bool {
        self.return_date.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Non-stop flag as it arrives from a client: either a real boolean or text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NonStopParam {
    Flag(bool),
    Text(String),
}

/// Collapse the client's non-stop flag into a strict boolean.
/// Only `true` (any casing) counts as set.
pub fn coerce_non_stop(param: Option<&NonStopParam>) -> bool {
    match param {
        Some(NonStopParam::Flag(flag)) => *flag,
        Some(NonStopParam::Text(text)) => text.eq_ignore_ascii_case("true"),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFlightOffer {
    pub price: Option<String>,
    pub currency: Option<String>,
    pub stops: u32,
    pub duration_minutes: u32,
    pub segments: Vec<FlightSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSegment {
    pub from: Option<String>,
    pub to: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub carrier: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLocation {
    pub iata_code: Option<String>,
    pub name: Option<String>,
    pub city_name: Option<String>,
    pub country_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlightSearchResult {
    pub flights: Vec<NormalizedFlightOffer>,
}

#[derive(Debug, Serialize)]
pub struct LocationSearchResult {
    pub locations: Vec<NormalizedLocation>,
}
