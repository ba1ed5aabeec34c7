//! Civic-grid fallback estimator for house numbers.
//!
//! Used when a street has fewer than two known addressed points. The
//! number is approximated from the distance to a fixed downtown reference
//! coordinate, assuming 100 numbering units per block and a constant block
//! size in degrees. This is a rough civic heuristic, not a geodetic model;
//! its output is tagged `" (approx)"` and must never be treated as
//! authoritative.

use std::sync::LazyLock;

use rand::Rng as _;
use regex::Regex;

use crate::Jurisdiction;
use pothole_watch_report_models::Coordinate;

/// Leading directional token (e.g. "N Main St", "West 3rd St").
static DIRECTION_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(N|S|E|W|NORTH|SOUTH|EAST|WEST)\b").expect("valid regex")
});

/// Avenue-family suffixes, which run north-south in the local numbering
/// convention (streets run east-west).
static AVENUE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(AVE|AVENUE|AV)\.?$").expect("valid regex"));

/// Primary axis a street runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreetOrientation {
    /// Street runs north-south; numbers advance with longitude offset
    /// from the reference point.
    NorthSouth,
    /// Street runs east-west; numbers advance with latitude offset.
    EastWest,
}

/// Guesses a street's orientation from lexical cues in its name.
///
/// A leading "N"/"S" token means the street itself runs north-south, and
/// "E"/"W" east-west. Absent a directional, avenue-family suffixes are
/// taken as north-south per the local convention; everything else
/// defaults to east-west.
#[must_use]
pub fn street_orientation(street_name: &str) -> StreetOrientation {
    let name = street_name.trim();

    if let Some(m) = DIRECTION_PREFIX_RE.find(name) {
        return match m.as_str().to_uppercase().as_bytes()[0] {
            b'N' | b'S' => StreetOrientation::NorthSouth,
            _ => StreetOrientation::EastWest,
        };
    }

    if AVENUE_SUFFIX_RE.is_match(name) {
        return StreetOrientation::NorthSouth;
    }

    StreetOrientation::EastWest
}

/// The pre-jitter estimate: always a non-zero multiple of 10.
///
/// `base + blocks * 100` where `blocks` is the (fractional) block count
/// along the street's numbering axis from the downtown reference, rounded
/// to the nearest 10.
#[must_use]
pub fn base_number(
    target: &Coordinate,
    street_name: &str,
    jurisdiction: &Jurisdiction,
) -> u32 {
    let delta = match street_orientation(street_name) {
        StreetOrientation::NorthSouth => target.longitude - jurisdiction.reference_longitude,
        StreetOrientation::EastWest => target.latitude - jurisdiction.reference_latitude,
    };

    let blocks = if jurisdiction.block_size_degrees > 0.0 {
        (delta / jurisdiction.block_size_degrees).abs()
    } else {
        0.0
    };

    let raw = (blocks * 100.0) + f64::from(jurisdiction.numbering_base);
    let rounded = (raw / 10.0).round() * 10.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = rounded.min(f64::from(u32::MAX - 100)) as u32;
    rounded.max(10)
}

/// Approximates a street number near `target`, tagged `" (approx)"`.
///
/// A small jitter drawn uniformly from [0, 50) is added to the base so
/// that adjacent captures don't all collapse onto the same block-corner
/// number.
#[must_use]
pub fn approximate_street_number(
    target: &Coordinate,
    street_name: &str,
    jurisdiction: &Jurisdiction,
) -> String {
    let base = base_number(target, street_name, jurisdiction);
    let jitter: u32 = rand::rng().random_range(0..50);
    format!("{} (approx)", base + jitter)
}
