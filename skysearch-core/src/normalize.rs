use crate::duration::parse_duration_minutes;
use crate::iata::{FlightOffersPayload, LocationsPayload, ProviderLocation, ProviderOffer, ProviderSegment};
use crate::search::{FlightSegment, NormalizedFlightOffer, NormalizedLocation};
use crate::CoreResult;
use tracing::debug;

/// Flatten every provider offer, preserving provider order.
pub fn normalize_offers(payload: FlightOffersPayload) -> CoreResult<Vec<NormalizedFlightOffer>> {
    let offers = payload
        .data
        .into_iter()
        .map(normalize_offer)
        .collect::<CoreResult<Vec<_>>>()?;
    debug!("Normalized {} flight offers", offers.len());
    Ok(offers)
}

/// Flatten one offer. Segments from all itineraries are concatenated in order;
/// stops count across the whole trip.
pub fn normalize_offer(offer: ProviderOffer) -> CoreResult<NormalizedFlightOffer> {
    let (price, currency) = match offer.price {
        Some(p) => (p.total, p.currency),
        None => (None, None),
    };

    let mut segments = Vec::new();
    let mut duration_minutes = 0u32;

    for itinerary in offer.itineraries {
        for seg in itinerary.segments {
            if let Some(raw) = seg.duration.as_deref() {
                duration_minutes = duration_minutes.saturating_add(parse_duration_minutes(raw)?);
            }
            segments.push(flatten_segment(seg));
        }
    }

    let stops = segments.len().saturating_sub(1) as u32;

    Ok(NormalizedFlightOffer {
        price,
        currency,
        stops,
        duration_minutes,
        segments,
    })
}

fn flatten_segment(seg: ProviderSegment) -> FlightSegment {
    let (from, departure) = match seg.departure {
        Some(d) => (d.iata_code, d.at),
        None => (None, None),
    };
    let (to, arrival) = match seg.arrival {
        Some(a) => (a.iata_code, a.at),
        None => (None, None),
    };

    FlightSegment {
        from,
        to,
        departure,
        arrival,
        carrier: seg.carrier_code,
        duration: seg.duration,
    }
}

pub fn normalize_locations(payload: LocationsPayload) -> Vec<NormalizedLocation> {
    payload.data.into_iter().map(normalize_location).collect()
}

fn normalize_location(item: ProviderLocation) -> NormalizedLocation {
    let (city_name, country_name) = match item.address {
        Some(addr) => (addr.city_name, addr.country_name),
        None => (None, None),
    };

    NormalizedLocation {
        iata_code: item.iata_code,
        name: item.name,
        city_name,
        country_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use serde_json::json;

    fn segment(from: &str, to: &str, carrier: &str, duration: &str) -> serde_json::Value {
        json!({
            "departure": { "iataCode": from, "at": "2024-06-01T10:00:00" },
            "arrival": { "iataCode": to, "at": "2024-06-01T14:00:00" },
            "carrierCode": carrier,
            "duration": duration
        })
    }

    fn offers(value: serde_json::Value) -> FlightOffersPayload {
        serde_json::from_value(value).expect("Failed to deserialize")
    }

    #[test]
    fn test_round_trip_offer_stops_and_duration() {
        let payload = offers(json!({
            "data": [{
                "price": { "total": "512.40", "currency": "USD" },
                "itineraries": [
                    { "segments": [
                        segment("JFK", "KEF", "FI", "PT5H45M"),
                        segment("KEF", "LHR", "FI", "PT3H")
                    ]},
                    { "segments": [ segment("LHR", "JFK", "BA", "PT8H10M") ] }
                ]
            }]
        }));

        let result = normalize_offers(payload).unwrap();
        assert_eq!(result.len(), 1);
        let offer = &result[0];
        assert_eq!(offer.stops, 2);
        assert_eq!(offer.duration_minutes, 345 + 180 + 490);
        assert_eq!(offer.price.as_deref(), Some("512.40"));
        assert_eq!(offer.currency.as_deref(), Some("USD"));

        let route: Vec<_> = offer.segments.iter().map(|s| s.from.as_deref().unwrap()).collect();
        assert_eq!(route, vec!["JFK", "KEF", "LHR"]);
    }

    #[test]
    fn test_single_segment_is_non_stop() {
        let payload = offers(json!({
            "data": [{
                "price": { "total": "99.00", "currency": "EUR" },
                "itineraries": [{ "segments": [ segment("MAD", "BCN", "IB", "PT1H20M") ] }]
            }]
        }));

        let offer = &normalize_offers(payload).unwrap()[0];
        assert_eq!(offer.stops, 0);
        assert_eq!(offer.duration_minutes, 80);
        assert_eq!(offer.segments[0].carrier.as_deref(), Some("IB"));
    }

    #[test]
    fn test_offer_without_itineraries_has_zero_stops() {
        let offer = normalize_offer(ProviderOffer::default()).unwrap();
        assert_eq!(offer.stops, 0);
        assert_eq!(offer.duration_minutes, 0);
        assert!(offer.segments.is_empty());
    }

    #[test]
    fn test_missing_price_block_is_tolerated() {
        let payload = offers(json!({
            "data": [{ "itineraries": [{ "segments": [ segment("JFK", "LAX", "AA", "PT6H") ] }] }]
        }));

        let offer = &normalize_offers(payload).unwrap()[0];
        assert!(offer.price.is_none());
        assert!(offer.currency.is_none());
        assert_eq!(offer.duration_minutes, 360);
    }

    #[test]
    fn test_missing_segment_fields_are_tolerated() {
        let payload = offers(json!({
            "data": [{ "itineraries": [{ "segments": [ { "carrierCode": "LH" } ] }] }]
        }));

        let offer = &normalize_offers(payload).unwrap()[0];
        let seg = &offer.segments[0];
        assert!(seg.from.is_none());
        assert!(seg.arrival.is_none());
        assert_eq!(seg.carrier.as_deref(), Some("LH"));
        assert_eq!(offer.duration_minutes, 0);
    }

    #[test]
    fn test_malformed_duration_fails_batch() {
        let payload = offers(json!({
            "data": [{ "itineraries": [{ "segments": [ segment("JFK", "LAX", "AA", "PTabcH") ] }] }]
        }));

        assert!(matches!(normalize_offers(payload), Err(CoreError::Parse(_))));
    }

    #[test]
    fn test_locations_tolerate_missing_address() {
        let payload: LocationsPayload = serde_json::from_value(json!({
            "data": [
                {
                    "subType": "CITY",
                    "iataCode": "PAR",
                    "name": "PARIS",
                    "address": { "cityName": "PARIS", "countryName": "FRANCE" }
                },
                { "iataCode": "XYZ" }
            ]
        }))
        .unwrap();

        let locations = normalize_locations(payload);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].city_name.as_deref(), Some("PARIS"));
        assert_eq!(locations[0].country_name.as_deref(), Some("FRANCE"));
        assert_eq!(locations[1].iata_code.as_deref(), Some("XYZ"));
        assert!(locations[1].name.is_none());
        assert!(locations[1].city_name.is_none());
    }
}
