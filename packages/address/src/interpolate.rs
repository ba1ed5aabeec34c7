//! Linear house-number interpolation between nearby addressed points.
//!
//! Distances are planar Euclidean on raw lat/lng rather than geodesic,
//! which is acceptable at block scale where the candidates live.

use pothole_watch_report_models::{AddressPoint, Coordinate};

use crate::{Jurisdiction, ParityConvention, grid};

/// Cross products smaller than this are treated as "on the street
/// centerline" and get no parity adjustment.
const SIDE_EPSILON: f64 = 1e-12;

/// Estimates a street number for `target` from addressed points on the
/// same street.
///
/// With fewer than two candidates the [`grid`] estimator takes over, so
/// the result is always a non-empty string; it carries an `" (approx)"`
/// marker only when it came from the grid fallback.
#[must_use]
pub fn estimate_street_number(
    points: &[AddressPoint],
    target: &Coordinate,
    street_name: &str,
    jurisdiction: &Jurisdiction,
) -> String {
    match interpolate(points, target, jurisdiction) {
        Some(number) => number.to_string(),
        None => grid::approximate_street_number(target, street_name, jurisdiction),
    }
}

/// Core interpolation; `None` means "not enough data, use the fallback".
fn interpolate(
    points: &[AddressPoint],
    target: &Coordinate,
    jurisdiction: &Jurisdiction,
) -> Option<u32> {
    if points.len() < 2 {
        return None;
    }

    let mut candidates: Vec<&AddressPoint> = points.iter().collect();
    candidates.sort_by(|a, b| {
        distance_squared(a, target)
            .partial_cmp(&distance_squared(b, target))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let p1 = candidates[0];
    let p2 = candidates[1];

    // Segment p1 -> p2 in (x, y) = (lng, lat)
    let vx = p2.longitude - p1.longitude;
    let vy = p2.latitude - p1.latitude;
    let wx = target.longitude - p1.longitude;
    let wy = target.latitude - p1.latitude;

    let segment_len_sq = vx.mul_add(vx, vy * vy);
    if segment_len_sq < SIDE_EPSILON {
        // Degenerate segment (both candidates at the same point): the
        // nearest known number is the best available answer.
        return Some(p1.street_number);
    }

    let ratio = (vx.mul_add(wx, vy * wy) / segment_len_sq).clamp(0.0, 1.0);

    let n1 = f64::from(p1.street_number);
    let n2 = f64::from(p2.street_number);
    let estimate = (n2 - n1).mul_add(ratio, n1).round();
    if !estimate.is_finite() || estimate < 0.0 {
        return None;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let estimate = estimate as u32;

    let cross = vx.mul_add(wy, -(vy * wx));
    Some(adjust_parity(estimate, cross, jurisdiction.parity))
}

/// Nudges the estimate by one so its parity matches the side of the street
/// the target sits on.
///
/// A cross product within [`SIDE_EPSILON`] of zero means the target is on
/// the p1→p2 line itself and the estimate is left alone.
fn adjust_parity(estimate: u32, cross: f64, parity: ParityConvention) -> u32 {
    if cross.abs() < SIDE_EPSILON {
        return estimate;
    }

    let want_odd = match parity {
        ParityConvention::OddPositiveSide => cross > 0.0,
        ParityConvention::EvenPositiveSide => cross < 0.0,
    };

    if (estimate % 2 == 1) == want_odd {
        estimate
    } else {
        estimate + 1
    }
}

fn distance_squared(point: &AddressPoint, target: &Coordinate) -> f64 {
    let dx = point.longitude - target.longitude;
    let dy = point.latitude - target.latitude;
    dx.mul_add(dx, dy * dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(number: u32, latitude: f64, longitude: f64) -> AddressPoint {
        AddressPoint {
            street_number: number,
            latitude,
            longitude,
        }
    }

    #[test]
    fn midpoint_yields_rounded_average() {
        // Target exactly at the midpoint of a straight east-west segment:
        // zero cross product, so no parity nudge applies.
        let points = vec![point(100, 34.05, -118.25), point(200, 34.05, -118.24)];
        let target = Coordinate::new(34.05, -118.245);
        let result =
            estimate_street_number(&points, &target, "Main Street", &Jurisdiction::default());
        assert_eq!(result, "150");
    }

    #[test]
    fn endpoint_clamps_ratio() {
        // Target beyond p2 clamps to p2's number.
        let points = vec![point(100, 34.05, -118.25), point(200, 34.05, -118.24)];
        let target = Coordinate::new(34.05, -118.23);
        let result =
            estimate_street_number(&points, &target, "Main Street", &Jurisdiction::default());
        assert_eq!(result, "200");
    }

    #[test]
    fn picks_two_nearest_of_many() {
        let points = vec![
            point(900, 34.10, -118.30),
            point(100, 34.05, -118.25),
            point(200, 34.05, -118.24),
        ];
        let target = Coordinate::new(34.05, -118.245);
        let result =
            estimate_street_number(&points, &target, "Main Street", &Jurisdiction::default());
        assert_eq!(result, "150");
    }

    #[test]
    fn off_axis_target_gets_parity_adjusted() {
        // Target north of an eastward segment: positive cross product, so
        // the default convention forces an odd number.
        let points = vec![point(100, 34.05, -118.25), point(200, 34.05, -118.24)];
        let target = Coordinate::new(34.051, -118.245);
        let result =
            estimate_street_number(&points, &target, "Main Street", &Jurisdiction::default());
        assert_eq!(result, "151");
    }

    #[test]
    fn converse_convention_flips_adjustment() {
        let points = vec![point(100, 34.05, -118.25), point(200, 34.05, -118.24)];
        let target = Coordinate::new(34.051, -118.245);
        let jurisdiction = Jurisdiction {
            parity: ParityConvention::EvenPositiveSide,
            ..Jurisdiction::default()
        };
        let result = estimate_street_number(&points, &target, "Main Street", &jurisdiction);
        assert_eq!(result, "150");
    }

    #[test]
    fn identical_candidates_return_nearest_number() {
        let points = vec![point(100, 34.05, -118.25), point(100, 34.05, -118.25)];
        let target = Coordinate::new(34.051, -118.251);
        let result =
            estimate_street_number(&points, &target, "Main Street", &Jurisdiction::default());
        assert_eq!(result, "100");
    }

    #[test]
    fn single_candidate_falls_back_to_grid() {
        let points = vec![point(100, 34.05, -118.25)];
        let target = Coordinate::new(34.05, -118.245);
        let result =
            estimate_street_number(&points, &target, "Main Street", &Jurisdiction::default());
        assert!(result.ends_with("(approx)"), "got: {result}");
    }

    #[test]
    fn no_candidates_fall_back_to_grid() {
        let target = Coordinate::new(34.05, -118.245);
        let result = estimate_street_number(&[], &target, "Main Street", &Jurisdiction::default());
        assert!(result.ends_with("(approx)"), "got: {result}");
    }
}
