use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::Coordinates;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "crowdscan/0.1.0 (https://github.com/shantanugoel/crowdscan)";

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// Resolve a free-form place name (e.g. "Shibuya, Tokyo") to coordinates.
///
/// One request, no retry. Used once at startup to stand in for a device
/// location fix.
///
/// # Returns
/// * `Ok(Coordinates)` - Best match
/// * `Err` - If nothing matched or the API failed
pub fn geocode(place: &str) -> Result<Coordinates> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(NOMINATIM_URL)
        .query(&[("q", place), ("format", "json"), ("limit", "1")])
        .send()
        .context("Failed to send request to Nominatim API")?;

    if !response.status().is_success() {
        bail!("Nominatim API returned error status: {}", response.status());
    }

    let results: Vec<NominatimResult> = response
        .json()
        .context("Failed to parse Nominatim JSON response")?;

    first_coordinates(results, place)
}

fn first_coordinates(results: Vec<NominatimResult>, place: &str) -> Result<Coordinates> {
    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Place not found: {}", place))?;

    let lat: f64 = result
        .lat
        .parse()
        .context("Failed to parse latitude from Nominatim response")?;
    let lon: f64 = result
        .lon
        .parse()
        .context("Failed to parse longitude from Nominatim response")?;

    tracing::debug!(display_name = %result.display_name, lat, lon, "geocoded location");

    Ok(Coordinates::new(lat, lon))
}
