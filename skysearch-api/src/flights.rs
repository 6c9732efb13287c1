use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use skysearch_core::filters::OfferFilter;
use skysearch_core::normalize::normalize_offers;
use skysearch_core::search::{coerce_non_stop, FlightSearchCriteria, FlightSearchResult, NonStopParam};
use tracing::info;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FlightSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    pub non_stop: Option<NonStopParam>,
    // Result narrowing, applied locally
    pub stops: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub airlines: Option<String>,
}

fn default_adults() -> u32 { 1 }

impl FlightSearchParams {
    pub fn criteria(&self) -> FlightSearchCriteria {
        FlightSearchCriteria {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date.clone(),
            return_date: self.return_date.clone(),
            adults: self.adults,
            non_stop: coerce_non_stop(self.non_stop.as_ref()),
        }
    }

    pub fn filter(&self) -> Result<OfferFilter, AppError> {
        Ok(OfferFilter::parse(
            self.stops.as_deref(),
            self.min_price,
            self.max_price,
            self.airlines.as_deref(),
        )?)
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search_flights))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/flights/search
pub async fn search_flights(
    State(state): State<AppState>,
    params: Result<Query<FlightSearchParams>, QueryRejection>,
) -> Result<Json<FlightSearchResult>, AppError> {
    let Query(params) = params?;

    let criteria = params.criteria();
    criteria.validate()?;
    let filter = params.filter()?;

    info!(
        "Flight search {} -> {} on {} (return: {:?}, adults: {})",
        criteria.origin, criteria.destination, criteria.departure_date, criteria.return_date, criteria.adults
    );

    let payload = state.provider.fetch_flight_offers(&criteria).await?;
    let flights = filter.apply(normalize_offers(payload)?);

    Ok(Json(FlightSearchResult { flights }))
}
