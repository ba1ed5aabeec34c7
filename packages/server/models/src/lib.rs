#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the pothole report server.
//!
//! These types are serialized to JSON for the REST API and kept separate
//! from the domain model so the wire contract can evolve independently.

use serde::{Deserialize, Serialize};

/// Location payload inside a report request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLocation {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Reported horizontal accuracy in meters.
    pub accuracy: Option<f64>,
}

/// Body of `POST /report`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Defect type tag from the front end (currently always "pothole").
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    /// Where the defect was observed.
    pub location: ApiLocation,
    /// Device capture time as epoch milliseconds.
    pub timestamp: Option<i64>,
    /// Photo as a data-URI string.
    pub image: Option<String>,
    /// Client-observed address string, when the front end resolved one.
    pub address: Option<String>,
    /// Which front-end variant produced the capture.
    pub source: Option<String>,
}

/// Success body of `POST /report`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Always `true` on this shape.
    pub success: bool,
    /// Generated record identifier.
    pub report_id: String,
    /// Map link embedding the raw coordinate.
    pub map_link: String,
    /// Photo link, when a photo was submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    /// Public view link for the stored record.
    pub view_link: String,
    /// Rendered formal letter.
    pub formal_letter: String,
    /// Pre-filled mail draft URL.
    pub mailto_url: String,
    /// Municipal 311 portal URL.
    pub portal_url: String,
    /// The mailing address used in the letter.
    pub address: String,
    /// Human-readable confirmation message.
    pub message: String,
}

/// Error body for any failed request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Always `false` on this shape.
    pub success: bool,
    /// What went wrong.
    pub error: String,
}

impl ApiError {
    /// Builds an error body from any displayable error.
    #[must_use]
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
