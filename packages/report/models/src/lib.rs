#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Core data model for pothole report submissions.
//!
//! These types are shared across the geocoding, address-resolution, and
//! report-building crates. [`SubmissionRecord`] is the persisted shape;
//! everything else is request-scoped and recomputed per capture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A geographic fix captured by the reporting device.
///
/// Immutable once captured; [`Coordinate::validate`] enforces the WGS84
/// ranges before a capture enters the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (WGS84).
    pub latitude: f64,
    /// Longitude in decimal degrees (WGS84).
    pub longitude: f64,
    /// Reported horizontal accuracy in meters, if the device provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Coordinate {
    /// Creates a coordinate without an accuracy estimate.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
        }
    }

    /// Checks the WGS84 range invariants.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if latitude is outside [-90, 90],
    /// longitude is outside [-180, 180], either is non-finite, or a negative
    /// accuracy was reported.
    pub fn validate(&self) -> Result<(), InvalidCoordinateError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(InvalidCoordinateError::Latitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(InvalidCoordinateError::Longitude(self.longitude));
        }
        if let Some(acc) = self.accuracy {
            if !acc.is_finite() || acc < 0.0 {
                return Err(InvalidCoordinateError::Accuracy(acc));
            }
        }
        Ok(())
    }
}

/// Error returned when a [`Coordinate`] violates its range invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidCoordinateError {
    /// Latitude outside [-90, 90] or non-finite.
    Latitude(f64),
    /// Longitude outside [-180, 180] or non-finite.
    Longitude(f64),
    /// Negative or non-finite accuracy.
    Accuracy(f64),
}

impl std::fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude(v) => write!(f, "invalid latitude {v}: expected [-90, 90]"),
            Self::Longitude(v) => write!(f, "invalid longitude {v}: expected [-180, 180]"),
            Self::Accuracy(v) => write!(f, "invalid accuracy {v}: expected >= 0"),
        }
    }
}

impl std::error::Error for InvalidCoordinateError {}

/// One authoritative addressed location returned by a street search.
///
/// Used only as interpolation input; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressPoint {
    /// The known house number at this location.
    pub street_number: u32,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A best-effort mailing address derived for a capture.
///
/// Recomputed per request; never cached beyond the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAddress {
    /// House number, possibly carrying an `" (approx)"` marker when it came
    /// from the grid estimator rather than the geocoder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    /// Street name as reported by the geocoder.
    pub street_name: String,
    /// Neighbourhood or suburb, when known.
    pub locality: String,
    /// Region code (e.g. "CA").
    pub region: String,
    /// Postal code, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// The full comma-joined mailing address string.
    pub formatted: String,
}

/// Lifecycle status of a submission record.
///
/// Only one state exists today: the system prepares drafts, it does not
/// transmit them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportStatus {
    /// Draft prepared and persisted, awaiting manual submission.
    PendingSubmission,
}

/// The raw capture handed to the report builder.
#[derive(Debug, Clone)]
pub struct RawCapture {
    /// Where the defect was observed.
    pub coordinate: Coordinate,
    /// When the capture was taken on the device.
    pub captured_at: DateTime<Utc>,
    /// Photo of the defect as a data-URI string, if one was taken.
    pub image: Option<String>,
    /// Client-observed address string, if the front end already resolved one.
    pub address: Option<String>,
    /// Which front-end variant produced the capture.
    pub source: String,
}

/// A fully assembled submission record.
///
/// Created once per capture and never mutated; the store owns it for the
/// configured TTL, after which it is logically deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Generated identifier (time component plus random suffix).
    pub id: String,
    /// The captured coordinate.
    pub coordinate: Coordinate,
    /// Device capture time.
    pub captured_at: DateTime<Utc>,
    /// Photo payload as a data-URI string, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_payload: Option<String>,
    /// The formatted mailing address used in the letter.
    pub resolved_address: String,
    /// Submission lifecycle status.
    pub status: ReportStatus,
    /// When the record was created server-side.
    pub created_at: DateTime<Utc>,
    /// Map link embedding the raw coordinate.
    pub map_link: String,
    /// Image link embedding the record identifier, when a photo exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    /// Public view link embedding the record identifier.
    pub view_link: String,
    /// Which front-end variant produced the capture.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinate() {
        let coord = Coordinate {
            latitude: 34.05,
            longitude: -118.25,
            accuracy: Some(10.0),
        };
        assert!(coord.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let coord = Coordinate::new(90.5, 0.0);
        assert_eq!(
            coord.validate(),
            Err(InvalidCoordinateError::Latitude(90.5))
        );
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let coord = Coordinate::new(0.0, -180.5);
        assert_eq!(
            coord.validate(),
            Err(InvalidCoordinateError::Longitude(-180.5))
        );
    }

    #[test]
    fn rejects_negative_accuracy() {
        let coord = Coordinate {
            latitude: 0.0,
            longitude: 0.0,
            accuracy: Some(-1.0),
        };
        assert_eq!(coord.validate(), Err(InvalidCoordinateError::Accuracy(-1.0)));
    }

    #[test]
    fn rejects_nan_latitude() {
        let coord = Coordinate::new(f64::NAN, 0.0);
        assert!(coord.validate().is_err());
    }

    #[test]
    fn status_displays_snake_case() {
        assert_eq!(
            ReportStatus::PendingSubmission.to_string(),
            "pending_submission"
        );
    }
}
