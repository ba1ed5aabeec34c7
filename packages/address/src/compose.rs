//! Mailing-address composition.
//!
//! Joins the resolved pieces into the fixed field order used by the
//! formal letter: house number + street, locality, city, region, postal
//! code. Composition never produces an empty string; the worst case is
//! the jurisdiction's "city, region" default.

use crate::Jurisdiction;
use pothole_watch_geocoder::AddressComponents;

/// Composes the comma-joined mailing address for a capture.
///
/// `street_number` is the authoritative or interpolated house number, if
/// any. Locality prefers the neighbourhood over the suburb; the city
/// falls back to the jurisdiction default. When no street name is known
/// at all, the geocoder's raw display string is used, and failing that,
/// [`default_address`].
#[must_use]
pub fn compose_mailing_address(
    street_number: Option<&str>,
    components: &AddressComponents,
    jurisdiction: &Jurisdiction,
) -> String {
    let Some(road) = components.road.as_deref().filter(|r| !r.trim().is_empty()) else {
        return components
            .display_name
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map_or_else(|| default_address(jurisdiction), ToString::to_string);
    };

    let mut parts: Vec<String> = Vec::with_capacity(5);

    match street_number.filter(|n| !n.trim().is_empty()) {
        Some(number) => parts.push(format!("{number} {road}")),
        None => parts.push(road.to_string()),
    }

    if let Some(locality) = components
        .neighbourhood
        .as_deref()
        .or(components.suburb.as_deref())
        .filter(|l| !l.trim().is_empty())
    {
        parts.push(locality.to_string());
    }

    let city = components
        .city
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(&jurisdiction.default_city);
    parts.push(city.to_string());

    parts.push(jurisdiction.region_code.clone());

    if let Some(postcode) = components
        .postcode
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        parts.push(postcode.to_string());
    }

    parts.join(", ")
}

/// The fixed "city, region" fallback for unresolvable coordinates.
#[must_use]
pub fn default_address(jurisdiction: &Jurisdiction) -> String {
    format!(
        "{}, {}",
        jurisdiction.default_city, jurisdiction.region_code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jurisdiction() -> Jurisdiction {
        Jurisdiction::default()
    }

    #[test]
    fn composes_full_address() {
        let components = AddressComponents {
            road: Some("Main Street".to_string()),
            neighbourhood: Some("Downtown".to_string()),
            city: Some("Los Angeles".to_string()),
            postcode: Some("90012".to_string()),
            ..AddressComponents::default()
        };
        assert_eq!(
            compose_mailing_address(Some("123"), &components, &jurisdiction()),
            "123 Main Street, Downtown, Los Angeles, CA, 90012"
        );
    }

    #[test]
    fn prefers_neighbourhood_over_suburb() {
        let components = AddressComponents {
            road: Some("Main Street".to_string()),
            neighbourhood: Some("Downtown".to_string()),
            suburb: Some("Central LA".to_string()),
            city: Some("Los Angeles".to_string()),
            ..AddressComponents::default()
        };
        let address = compose_mailing_address(None, &components, &jurisdiction());
        assert!(address.contains("Downtown"));
        assert!(!address.contains("Central LA"));
    }

    #[test]
    fn uses_suburb_when_neighbourhood_missing() {
        let components = AddressComponents {
            road: Some("Main Street".to_string()),
            suburb: Some("Central LA".to_string()),
            city: Some("Los Angeles".to_string()),
            ..AddressComponents::default()
        };
        let address = compose_mailing_address(None, &components, &jurisdiction());
        assert!(address.contains("Central LA"));
    }

    #[test]
    fn defaults_city_when_absent() {
        let components = AddressComponents {
            road: Some("Main Street".to_string()),
            ..AddressComponents::default()
        };
        assert_eq!(
            compose_mailing_address(Some("42 (approx)"), &components, &jurisdiction()),
            "42 (approx) Main Street, Los Angeles, CA"
        );
    }

    #[test]
    fn falls_back_to_display_name_without_road() {
        let components = AddressComponents {
            display_name: Some("Griffith Park, Los Angeles, CA".to_string()),
            ..AddressComponents::default()
        };
        assert_eq!(
            compose_mailing_address(None, &components, &jurisdiction()),
            "Griffith Park, Los Angeles, CA"
        );
    }

    #[test]
    fn never_empty() {
        let address =
            compose_mailing_address(None, &AddressComponents::default(), &jurisdiction());
        assert_eq!(address, "Los Angeles, CA");
        assert!(!address.is_empty());
    }
}
