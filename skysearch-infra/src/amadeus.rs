use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use skysearch_core::iata::{FlightOffersPayload, LocationsPayload, TokenResponse};
use skysearch_core::search::FlightSearchCriteria;
use skysearch_core::{CoreError, CoreResult, FlightProvider};
use std::time::Duration;
use tracing::{debug, warn};

use crate::app_config::ProviderConfig;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

/// HTTP client for the Amadeus self-service APIs.
///
/// Every search performs its own client-credentials grant before the data
/// request; tokens are not reused across calls.
pub struct AmadeusClient {
    http: Client,
    config: ProviderConfig,
}

impl AmadeusClient {
    pub fn new(config: ProviderConfig) -> CoreResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CoreError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Exchange the configured client id and secret for a bearer token.
    pub async fn acquire_token(&self) -> CoreResult<String> {
        if !self.config.has_credentials() {
            return Err(CoreError::Authentication(
                "provider client id/secret are not configured".to_string(),
            ));
        }

        debug!("Requesting provider access token");
        let resp = self
            .http
            .post(self.url(TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!("Token grant rejected with {}: {}", status, body);
            return Err(CoreError::Authentication(format!("{} {}", status.as_u16(), body)));
        }

        let token: TokenResponse = decode(resp).await?;
        Ok(token.access_token)
    }

    fn transport_error(&self, err: reqwest::Error) -> CoreError {
        if err.is_timeout() {
            CoreError::Transport(format!(
                "provider did not respond within {}s",
                self.config.timeout_seconds
            ))
        } else {
            CoreError::Transport(err.to_string())
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        accept: impl Fn(StatusCode) -> bool,
    ) -> CoreResult<T> {
        let token = self.acquire_token().await?;

        debug!("GET {} {:?}", path, query);
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !accept(status) {
            let payload = resp.text().await.unwrap_or_default();
            warn!("Provider {} returned {}: {}", path, status, payload);
            return Err(CoreError::Provider {
                status: status.as_u16(),
                payload,
            });
        }

        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> CoreResult<T> {
    resp.json::<T>()
        .await
        .map_err(|e| CoreError::Decode(e.to_string()))
}

/// Query string for the offer search, in the order the provider documents it.
pub fn flight_offer_query(criteria: &FlightSearchCriteria, max_results: u32) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("originLocationCode", criteria.origin.to_uppercase()),
        ("destinationLocationCode", criteria.destination.to_uppercase()),
        ("departureDate", criteria.departure_date.clone()),
        ("adults", criteria.adults.to_string()),
        ("max", max_results.to_string()),
    ];

    // nonStop only travels with a return date
    if let Some(return_date) = criteria.return_date.as_deref().filter(|d| !d.is_empty()) {
        query.push(("returnDate", return_date.to_string()));
        query.push(("nonStop", criteria.non_stop.to_string()));
    }

    query
}

pub fn location_query(keyword: &str) -> Vec<(&'static str, String)> {
    vec![
        ("subType", "AIRPORT,CITY".to_string()),
        ("keyword", keyword.to_uppercase()),
    ]
}

#[async_trait]
impl FlightProvider for AmadeusClient {
    async fn fetch_flight_offers(&self, criteria: &FlightSearchCriteria) -> CoreResult<FlightOffersPayload> {
        let query = flight_offer_query(criteria, self.config.max_results);
        self.get_json(FLIGHT_OFFERS_PATH, &query, |s| s == StatusCode::OK).await
    }

    async fn fetch_locations(&self, keyword: &str) -> CoreResult<LocationsPayload> {
        let query = location_query(keyword);
        self.get_json(LOCATIONS_PATH, &query, |s| s.is_success()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> FlightSearchCriteria {
        FlightSearchCriteria {
            origin: "jfk".to_string(),
            destination: "lhr".to_string(),
            departure_date: "2024-06-01".to_string(),
            return_date: None,
            adults: 2,
            non_stop: true,
        }
    }

    #[test]
    fn test_one_way_query_omits_non_stop() {
        let query = flight_offer_query(&criteria(), 20);
        let keys: Vec<_> = query.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["originLocationCode", "destinationLocationCode", "departureDate", "adults", "max"]
        );
        assert_eq!(query[0].1, "JFK");
        assert_eq!(query[1].1, "LHR");
        assert_eq!(query[3].1, "2");
        assert_eq!(query[4].1, "20");
    }

    #[test]
    fn test_round_trip_query_carries_non_stop() {
        let mut c = criteria();
        c.return_date = Some("2024-06-10".to_string());
        let query = flight_offer_query(&c, 20);
        assert!(query.contains(&("returnDate", "2024-06-10".to_string())));
        assert!(query.contains(&("nonStop", "true".to_string())));
    }

    #[test]
    fn test_location_query_uppercases_keyword() {
        let query = location_query("lon");
        assert_eq!(query[0], ("subType", "AIRPORT,CITY".to_string()));
        assert_eq!(query[1], ("keyword", "LON".to_string()));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_network() {
        let client = AmadeusClient::new(ProviderConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..ProviderConfig::default()
        })
        .unwrap();
        let err = client.acquire_token().await.unwrap_err();
        assert!(matches!(err, CoreError::Authentication(_)));
    }
}
