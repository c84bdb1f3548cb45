//! One-shot location fix taken at startup.
//!
//! A terminal has no device location service, so the fix comes from explicit
//! coordinates or from geocoding a place name. Any failure leaves the session
//! without a location bias; nothing is retried.

use anyhow::Result;

use crate::domain::Coordinates;

pub const SIGNAL_LOST_MESSAGE: &str = "GPS Signal Lost. Using default scan parameters.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "No location configured. Scanning without location bias.";

/// Where the startup fix should come from
#[derive(Debug, Clone, PartialEq)]
pub enum LocationRequest {
    Coordinates(Coordinates),
    Near(String),
    Unset,
}

/// Result of the startup fix, fixed for the rest of the session
#[derive(Debug, Clone, PartialEq)]
pub enum LocationStatus {
    Locked(Coordinates),
    Unavailable(&'static str),
}

impl LocationStatus {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationStatus::Locked(c) => Some(*c),
            LocationStatus::Unavailable(_) => None,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            LocationStatus::Locked(_) => "GPS LOCKED",
            LocationStatus::Unavailable(_) => "GPS SEARCHING",
        }
    }
}

fn in_range(c: &Coordinates) -> bool {
    (-90.0..=90.0).contains(&c.latitude) && (-180.0..=180.0).contains(&c.longitude)
}

/// Resolve `request` once, using `geocoder` for place names
pub fn acquire<F>(request: LocationRequest, geocoder: F) -> LocationStatus
where
    F: FnOnce(&str) -> Result<Coordinates>,
{
    match request {
        LocationRequest::Coordinates(c) if in_range(&c) => LocationStatus::Locked(c),
        LocationRequest::Coordinates(c) => {
            tracing::warn!(latitude = c.latitude, longitude = c.longitude, "coordinates out of range");
            LocationStatus::Unavailable(SIGNAL_LOST_MESSAGE)
        }
        LocationRequest::Near(place) => match geocoder(&place) {
            Ok(c) if in_range(&c) => LocationStatus::Locked(c),
            Ok(c) => {
                tracing::warn!(%place, latitude = c.latitude, longitude = c.longitude, "geocoder returned out of range coordinates");
                LocationStatus::Unavailable(SIGNAL_LOST_MESSAGE)
            }
            Err(e) => {
                tracing::warn!(%place, "location lookup failed: {:#}", e);
                LocationStatus::Unavailable(SIGNAL_LOST_MESSAGE)
            }
        },
        LocationRequest::Unset => LocationStatus::Unavailable(NOT_CONFIGURED_MESSAGE),
    }
}
