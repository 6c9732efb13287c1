use crate::{CoreError, CoreResult};

/// Convert a segment duration such as `PT2H30M` into total minutes.
///
/// Either component may be missing (`PT45M`, `PT3H`). A string carrying
/// neither marker yields zero. Day, week and second components are not
/// part of the provider's segment format and are not recognised.
pub fn parse_duration_minutes(raw: &str) -> CoreResult<u32> {
    let mut rest = raw.strip_prefix("PT").unwrap_or(raw);
    let mut hours = 0u32;
    let mut minutes = 0u32;

    if let Some((h, tail)) = rest.split_once('H') {
        hours = parse_component(h, raw)?;
        // Minutes only count when a marker follows the hours.
        rest = if tail.contains('M') { tail } else { "" };
    }

    if let Some((m, _)) = rest.split_once('M') {
        minutes = parse_component(m, raw)?;
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| CoreError::Parse(format!("duration out of range: {}", raw)))
}

fn parse_component(digits: &str, raw: &str) -> CoreResult<u32> {
    digits
        .parse::<u32>()
        .map_err(|e| CoreError::Parse(format!("invalid duration '{}': {}", raw, e)))
}
