use crate::search::NormalizedFlightOffer;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBucket {
    Exactly(u32),
    /// Two or more stops
    TwoPlus,
}

impl StopBucket {
    pub fn matches(&self, stops: u32) -> bool {
        match self {
            StopBucket::Exactly(n) => stops == *n,
            StopBucket::TwoPlus => stops >= 2,
        }
    }
}

impl std::str::FromStr for StopBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(StopBucket::Exactly(0)),
            "1" => Ok(StopBucket::Exactly(1)),
            "2+" => Ok(StopBucket::TwoPlus),
            other => Err(CoreError::Validation(format!(
                "unknown stops bucket '{}', expected one of 0, 1, 2+",
                other
            ))),
        }
    }
}

/// Post-search narrowing applied to normalized offers. Never sent upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferFilter {
    pub stops: Vec<StopBucket>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Carrier codes, upper-cased
    pub airlines: Vec<String>,
}

impl OfferFilter {
    /// Build a filter from comma-separated query values.
    pub fn parse(
        stops: Option<&str>,
        min_price: Option<f64>,
        max_price: Option<f64>,
        airlines: Option<&str>,
    ) -> CoreResult<Self> {
        let stops = split_list(stops)
            .map(|s| s.parse::<StopBucket>())
            .collect::<CoreResult<Vec<_>>>()?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_price {} exceeds max_price {}",
                    min, max
                )));
            }
        }

        let airlines = split_list(airlines).map(|a| a.to_ascii_uppercase()).collect();

        Ok(Self {
            stops,
            min_price,
            max_price,
            airlines,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.airlines.is_empty()
    }

    pub fn matches(&self, offer: &NormalizedFlightOffer) -> bool {
        if !self.stops.is_empty() && !self.stops.iter().any(|b| b.matches(offer.stops)) {
            return false;
        }

        // Offers without a readable price are never dropped by the price bounds
        if let Some(price) = offer.price.as_deref().and_then(|p| p.trim().parse::<f64>().ok()) {
            if self.min_price.is_some_and(|min| price < min) {
                return false;
            }
            if self.max_price.is_some_and(|max| price > max) {
                return false;
            }
        }

        if !self.airlines.is_empty() {
            let carrier = offer
                .segments
                .first()
                .and_then(|s| s.carrier.as_deref())
                .map(|c| c.to_ascii_uppercase());
            match carrier {
                Some(c) if self.airlines.contains(&c) => {}
                _ => return false,
            }
        }

        true
    }

    pub fn apply(&self, offers: Vec<NormalizedFlightOffer>) -> Vec<NormalizedFlightOffer> {
        if self.is_empty() {
            return offers;
        }
        offers.into_iter().filter(|o| self.matches(o)).collect()
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
