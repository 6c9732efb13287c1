use serde::Deserialize;

// ============================================================================
// Flight Offers Search payload
// ============================================================================
//
// Every nested block is optional so a partially populated offer still
// deserializes; the normalizer decides what an absent field means.

#[derive(Debug, Default, Deserialize)]
pub struct FlightOffersPayload {
    #[serde(default)]
    pub data: Vec<ProviderOffer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderOffer {
    pub price: Option<ProviderPrice>,
    #[serde(default)]
    pub itineraries: Vec<ProviderItinerary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderPrice {
    pub total: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderItinerary {
    #[serde(default)]
    pub segments: Vec<ProviderSegment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSegment {
    pub departure: Option<FlightEndpoint>,
    pub arrival: Option<FlightEndpoint>,
    pub carrier_code: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub iata_code: Option<String>,
    pub at: Option<String>,
}

// ============================================================================
// Airport & City Search payload
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LocationsPayload {
    #[serde(default)]
    pub data: Vec<ProviderLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLocation {
    pub iata_code: Option<String>,
    pub name: Option<String>,
    pub address: Option<ProviderAddress>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAddress {
    pub city_name: Option<String>,
    pub country_name: Option<String>,
}

// ============================================================================
// OAuth2 token grant
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
