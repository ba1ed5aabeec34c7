#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address resolution for pothole reports.
//!
//! Given a captured coordinate, derives a best-effort mailing address in
//! three stages:
//!
//! 1. Reverse-geocode the coordinate ([`pothole_watch_geocoder`]).
//! 2. When the geocoder knows the street but not the house number,
//!    estimate one by interpolating between nearby addressed points
//!    ([`interpolate`]), falling back to a civic-grid heuristic
//!    ([`grid`]) when fewer than two addressed points exist.
//! 3. Compose the final comma-joined mailing address ([`compose`]).
//!
//! Every stage degrades instead of failing: the pipeline always produces a
//! non-empty address string, bottoming out at the jurisdiction's
//! "city, region" default. Address *quality* degrades; resolution never
//! errors.

pub mod compose;
pub mod grid;
pub mod interpolate;

use pothole_watch_geocoder::{GeocodeClient, ReverseLookup};
use pothole_watch_report_models::{Coordinate, ResolvedAddress};

/// Which house-number parity is assigned to the positive side of the
/// street (positive cross product relative to the p1→p2 segment).
///
/// US numbering conventions differ by city; this must be confirmed against
/// the target jurisdiction rather than assumed. The default matches the
/// odd-numbers-on-the-left convention observed downtown in the default
/// jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityConvention {
    /// Odd numbers sit on the positive side, even on the negative.
    OddPositiveSide,
    /// Even numbers sit on the positive side, odd on the negative.
    EvenPositiveSide,
}

/// Fixed civic parameters for the deployment target.
///
/// Passed into the pipeline at construction so the core stays testable
/// independent of any one city; nothing in the resolution logic hardcodes
/// a jurisdiction.
#[derive(Debug, Clone)]
pub struct Jurisdiction {
    /// City name used when the geocoder returns none.
    pub default_city: String,
    /// Fixed region code appended to every composed address.
    pub region_code: String,
    /// Downtown reference latitude for the grid estimator.
    pub reference_latitude: f64,
    /// Downtown reference longitude for the grid estimator.
    pub reference_longitude: f64,
    /// Size of one city block in decimal degrees (distance quantum for the
    /// grid estimator).
    pub block_size_degrees: f64,
    /// House number at the downtown reference point.
    pub numbering_base: u32,
    /// Side-of-street parity assignment.
    pub parity: ParityConvention,
}

impl Default for Jurisdiction {
    /// Los Angeles defaults: City Hall as the downtown reference, roughly
    /// one downtown block per 0.0015 degrees.
    fn default() -> Self {
        Self {
            default_city: "Los Angeles".to_string(),
            region_code: "CA".to_string(),
            reference_latitude: 34.0537,
            reference_longitude: -118.2428,
            block_size_degrees: 0.0015,
            numbering_base: 100,
            parity: ParityConvention::OddPositiveSide,
        }
    }
}

/// The single parameterized resolution pipeline.
///
/// Replaces the per-front-end copies of this logic; front ends differ in
/// presentation only and all share one resolver.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    geocoder: GeocodeClient,
    jurisdiction: Jurisdiction,
}

impl AddressResolver {
    /// Creates a resolver over the given geocoding client and civic
    /// parameters.
    #[must_use]
    pub const fn new(geocoder: GeocodeClient, jurisdiction: Jurisdiction) -> Self {
        Self {
            geocoder,
            jurisdiction,
        }
    }

    /// Civic parameters this resolver was built with.
    #[must_use]
    pub const fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    /// Resolves a coordinate to a best-effort mailing address.
    ///
    /// Never fails; geocoder outages and sparse address data degrade the
    /// result toward the jurisdiction default rather than erroring.
    pub async fn resolve(&self, coordinate: &Coordinate) -> ResolvedAddress {
        match self.geocoder.reverse(coordinate).await {
            ReverseLookup::Components(components) => {
                let street_number = match (&components.house_number, &components.road) {
                    (Some(number), _) => Some(number.clone()),
                    (None, Some(road)) => {
                        let points = self.geocoder.nearby_numbered_points(road).await;
                        Some(interpolate::estimate_street_number(
                            &points,
                            coordinate,
                            road,
                            &self.jurisdiction,
                        ))
                    }
                    (None, None) => None,
                };

                let formatted = compose::compose_mailing_address(
                    street_number.as_deref(),
                    &components,
                    &self.jurisdiction,
                );

                ResolvedAddress {
                    street_number,
                    street_name: components.road.unwrap_or_default(),
                    locality: components
                        .neighbourhood
                        .or(components.suburb)
                        .unwrap_or_default(),
                    region: self.jurisdiction.region_code.clone(),
                    postal_code: components.postcode,
                    formatted,
                }
            }
            ReverseLookup::DisplayName(display) => ResolvedAddress {
                street_number: None,
                street_name: String::new(),
                locality: String::new(),
                region: self.jurisdiction.region_code.clone(),
                postal_code: None,
                formatted: display,
            },
            ReverseLookup::Unresolved => {
                log::info!(
                    "No address for {},{}; using jurisdiction default",
                    coordinate.latitude,
                    coordinate.longitude
                );
                ResolvedAddress {
                    street_number: None,
                    street_name: String::new(),
                    locality: String::new(),
                    region: self.jurisdiction.region_code.clone(),
                    postal_code: None,
                    formatted: compose::default_address(&self.jurisdiction),
                }
            }
        }
    }
}
