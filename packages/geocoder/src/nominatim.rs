//! Nominatim / OpenStreetMap HTTP calls and response parsing.
//!
//! Two endpoints are used:
//! - `/reverse` with `format=jsonv2` for coordinate-to-address lookups
//! - `/search` with structured street/city/state parameters and
//!   `addressdetails=1` for addressed-point candidates on a street
//!
//! The public Nominatim instance enforces strict rate limits (1 request
//! per second); the caller is responsible for pacing.
//!
//! See <https://nominatim.org/release-docs/develop/api/Reverse/>

use crate::{AddressComponents, GeocodeError};
use pothole_watch_report_models::AddressPoint;

/// Reverse-geocodes a coordinate via the `/reverse` endpoint.
///
/// Returns `Ok(None)` when Nominatim reports that the coordinate cannot be
/// geocoded (it returns an `error` object rather than an empty response).
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn reverse_lookup(
    client: &reqwest::Client,
    base_url: &str,
    lat: f64,
    lng: f64,
) -> Result<Option<AddressComponents>, GeocodeError> {
    let url = format!("{base_url}/reverse");
    let resp = client
        .get(&url)
        .query(&[
            ("lat", lat.to_string().as_str()),
            ("lon", lng.to_string().as_str()),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    if !resp.status().is_success() {
        return Err(GeocodeError::Parse {
            message: format!("Nominatim reverse returned status {}", resp.status()),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    Ok(parse_reverse(&body))
}

/// Searches for addressed points on a street via the `/search` endpoint.
///
/// Entries without a house number that parses as an integer are dropped;
/// the result preserves Nominatim's relevance ordering.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn search_street(
    client: &reqwest::Client,
    base_url: &str,
    street: &str,
    city: &str,
    state: &str,
    limit: usize,
) -> Result<Vec<AddressPoint>, GeocodeError> {
    let url = format!("{base_url}/search");
    let resp = client
        .get(&url)
        .query(&[
            ("street", street),
            ("city", city),
            ("state", state),
            ("format", "jsonv2"),
            ("addressdetails", "1"),
            ("limit", &limit.to_string()),
        ])
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    if !resp.status().is_success() {
        return Err(GeocodeError::Parse {
            message: format!("Nominatim search returned status {}", resp.status()),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_search(&body, limit)
}

/// Parses a `/reverse` response into [`AddressComponents`].
///
/// Returns `None` for the `{"error": ...}` shape Nominatim uses when a
/// coordinate matches nothing.
fn parse_reverse(body: &serde_json::Value) -> Option<AddressComponents> {
    if body.get("error").is_some() {
        return None;
    }

    let address = body.get("address");
    let field = |name: &str| {
        address
            .and_then(|a| a.get(name))
            .and_then(serde_json::Value::as_str)
            .map(String::from)
    };

    // Nominatim reports the municipality under city, town, or village
    // depending on the place type.
    let city = field("city").or_else(|| field("town")).or_else(|| field("village"));

    Some(AddressComponents {
        house_number: field("house_number"),
        road: field("road"),
        neighbourhood: field("neighbourhood"),
        suburb: field("suburb"),
        city,
        postcode: field("postcode"),
        display_name: body
            .get("display_name")
            .and_then(serde_json::Value::as_str)
            .map(String::from),
    })
}

/// Parses a `/search` response into addressed points, keeping only entries
/// whose house number parses as an integer.
fn parse_search(
    body: &serde_json::Value,
    limit: usize,
) -> Result<Vec<AddressPoint>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim search response is not an array".to_string(),
    })?;

    let mut points = Vec::new();
    for entry in results {
        let Some(number) = entry
            .pointer("/address/house_number")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.trim().parse::<u32>().ok())
        else {
            continue;
        };

        // lat/lon are strings in jsonv2 responses
        let Some(lat) = entry["lat"].as_str().and_then(|s| s.parse::<f64>().ok()) else {
            continue;
        };
        let Some(lng) = entry["lon"].as_str().and_then(|s| s.parse::<f64>().ok()) else {
            continue;
        };

        points.push(AddressPoint {
            street_number: number,
            latitude: lat,
            longitude: lng,
        });

        if points.len() >= limit {
            break;
        }
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reverse_components() {
        let body = serde_json::json!({
            "display_name": "123, Main Street, Downtown, Los Angeles, CA, 90012, USA",
            "address": {
                "house_number": "123",
                "road": "Main Street",
                "neighbourhood": "Downtown",
                "city": "Los Angeles",
                "postcode": "90012"
            }
        });
        let components = parse_reverse(&body).unwrap();
        assert_eq!(components.house_number.as_deref(), Some("123"));
        assert_eq!(components.road.as_deref(), Some("Main Street"));
        assert_eq!(components.neighbourhood.as_deref(), Some("Downtown"));
        assert_eq!(components.city.as_deref(), Some("Los Angeles"));
        assert_eq!(components.postcode.as_deref(), Some("90012"));
    }

    #[test]
    fn parses_reverse_town_fallback() {
        let body = serde_json::json!({
            "address": {
                "road": "Elm Street",
                "town": "Smallville"
            }
        });
        let components = parse_reverse(&body).unwrap();
        assert_eq!(components.city.as_deref(), Some("Smallville"));
    }

    #[test]
    fn parses_reverse_error_as_none() {
        let body = serde_json::json!({ "error": "Unable to geocode" });
        assert!(parse_reverse(&body).is_none());
    }

    #[test]
    fn parses_search_points() {
        let body = serde_json::json!([
            {
                "lat": "34.0500",
                "lon": "-118.2500",
                "address": { "house_number": "100", "road": "Main Street" }
            },
            {
                "lat": "34.0510",
                "lon": "-118.2510",
                "address": { "house_number": "200", "road": "Main Street" }
            }
        ]);
        let points = parse_search(&body, 10).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].street_number, 100);
        assert_eq!(points[1].street_number, 200);
        assert!((points[0].latitude - 34.05).abs() < 1e-6);
    }

    #[test]
    fn filters_non_numeric_house_numbers() {
        let body = serde_json::json!([
            {
                "lat": "34.0500",
                "lon": "-118.2500",
                "address": { "house_number": "100A" }
            },
            {
                "lat": "34.0510",
                "lon": "-118.2510",
                "address": { "house_number": "200" }
            },
            {
                "lat": "34.0520",
                "lon": "-118.2520",
                "address": { "road": "Main Street" }
            }
        ]);
        let points = parse_search(&body, 10).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].street_number, 200);
    }

    #[test]
    fn respects_search_limit() {
        let entries: Vec<serde_json::Value> = (1..=20)
            .map(|n| {
                serde_json::json!({
                    "lat": "34.05",
                    "lon": "-118.25",
                    "address": { "house_number": n.to_string() }
                })
            })
            .collect();
        let body = serde_json::Value::Array(entries);
        let points = parse_search(&body, 10).unwrap();
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn rejects_non_array_search_response() {
        let body = serde_json::json!({ "error": "bad request" });
        assert!(parse_search(&body, 10).is_err());
    }
}
