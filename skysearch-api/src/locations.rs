use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use skysearch_core::normalize::normalize_locations;
use skysearch_core::search::LocationSearchResult;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LocationSearchParams {
    /// City or airport keyword.
    pub q: Option<String>,
    /// Older clients send the keyword under this name; `q` wins when both are present.
    pub keyword: Option<String>,
}

impl LocationSearchParams {
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().or(self.keyword.as_deref())
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search_locations))
}

/// GET /api/locations/search
pub async fn search_locations(
    State(state): State<AppState>,
    params: Result<Query<LocationSearchParams>, QueryRejection>,
) -> Result<Json<LocationSearchResult>, AppError> {
    let Query(params) = params?;

    let keyword = params
        .search_term()
        .ok_or_else(|| AppError::Validation("q is required".to_string()))?;
    if keyword.chars().count() < 2 {
        return Err(AppError::Validation(
            "q must be at least 2 characters".to_string(),
        ));
    }

    let payload = state.provider.fetch_locations(keyword).await?;

    Ok(Json(LocationSearchResult {
        locations: normalize_locations(payload),
    }))
}
