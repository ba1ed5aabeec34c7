#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding client for the pothole reporting pipeline.
//!
//! Wraps the Nominatim / OpenStreetMap HTTP API for two operations:
//!
//! 1. **Reverse lookup** — coordinate to structured address components
//!    (street, neighbourhood, city, postal code) or a free-form display
//!    string when components are absent.
//! 2. **Street search** — street name plus city/region filter to a bounded
//!    list of addressed points with known house numbers, used as
//!    interpolation input.
//!
//! [`GeocodeClient`] is the boundary the rest of the system talks to:
//! network and parse failures are logged and mapped to
//! [`ReverseLookup::Unresolved`] or an empty candidate list, never
//! propagated. Callers layer their own timeout/retry policy on the
//! underlying `reqwest::Client` if they need one; a single attempt is made
//! per call.

pub mod nominatim;

use pothole_watch_report_models::{AddressPoint, Coordinate};
use thiserror::Error;

/// Structured address components from a reverse lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressComponents {
    /// House number, when the geocoder knows one.
    pub house_number: Option<String>,
    /// Street name.
    pub road: Option<String>,
    /// Neighbourhood name.
    pub neighbourhood: Option<String>,
    /// Suburb name (fallback locality when neighbourhood is absent).
    pub suburb: Option<String>,
    /// City, town, or village name.
    pub city: Option<String>,
    /// Postal code.
    pub postcode: Option<String>,
    /// Free-form display string for the whole result.
    pub display_name: Option<String>,
}

/// Outcome of a reverse lookup at the [`GeocodeClient`] boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverseLookup {
    /// Structured components were returned.
    Components(AddressComponents),
    /// Only a free-form display string was returned.
    DisplayName(String),
    /// The lookup failed or matched nothing; callers fall back to the
    /// jurisdiction default.
    Unresolved,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// Upper bound on street-search candidates requested per interpolation.
pub const MAX_SEARCH_CANDIDATES: usize = 10;

/// Geocoding boundary used by the address-resolution pipeline.
///
/// Holds the HTTP client and the fixed city/region filter applied to
/// street searches. All methods degrade gracefully: failures are logged at
/// warn level and surface as "unresolved" / empty results.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    city: String,
    region: String,
}

impl GeocodeClient {
    /// Creates a client for the Nominatim instance at `base_url`, filtering
    /// street searches to the given city and region.
    #[must_use]
    pub const fn new(
        http: reqwest::Client,
        base_url: String,
        city: String,
        region: String,
    ) -> Self {
        Self {
            http,
            base_url,
            city,
            region,
        }
    }

    /// Reverse-geocodes a coordinate to address components.
    ///
    /// Never fails: network, rate-limit, and parse errors all map to
    /// [`ReverseLookup::Unresolved`].
    pub async fn reverse(&self, coordinate: &Coordinate) -> ReverseLookup {
        match nominatim::reverse_lookup(
            &self.http,
            &self.base_url,
            coordinate.latitude,
            coordinate.longitude,
        )
        .await
        {
            Ok(Some(components)) => {
                if components.road.is_some() || components.city.is_some() {
                    ReverseLookup::Components(components)
                } else if let Some(display) = components.display_name {
                    ReverseLookup::DisplayName(display)
                } else {
                    ReverseLookup::Unresolved
                }
            }
            Ok(None) => ReverseLookup::Unresolved,
            Err(e) => {
                log::warn!(
                    "Reverse lookup failed for {},{}: {e}",
                    coordinate.latitude,
                    coordinate.longitude
                );
                ReverseLookup::Unresolved
            }
        }
    }

    /// Searches for addressed points on the named street within the
    /// configured city/region, keeping only entries with a parseable
    /// integer house number.
    ///
    /// Never fails: errors are logged and an empty list is returned, which
    /// sends the interpolator to its grid fallback.
    pub async fn nearby_numbered_points(&self, street: &str) -> Vec<AddressPoint> {
        if street.trim().is_empty() {
            return Vec::new();
        }

        match nominatim::search_street(
            &self.http,
            &self.base_url,
            street,
            &self.city,
            &self.region,
            MAX_SEARCH_CANDIDATES,
        )
        .await
        {
            Ok(points) => points,
            Err(e) => {
                log::warn!("Street search failed for '{street}': {e}");
                Vec::new()
            }
        }
    }
}
