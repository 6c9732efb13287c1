use async_trait::async_trait;

use crate::iata::{FlightOffersPayload, LocationsPayload};
use crate::search::FlightSearchCriteria;
use crate::CoreResult;

#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Search priced flight offers matching the criteria
    async fn fetch_flight_offers(&self, criteria: &FlightSearchCriteria) -> CoreResult<FlightOffersPayload>;

    /// Search airports and cities by keyword
    async fn fetch_locations(&self, keyword: &str) -> CoreResult<LocationsPayload>;
}
