//! Derived URL construction.
//!
//! Map links embed the raw coordinate as a query parameter; image and
//! view links embed the record identifier as a path segment. All links
//! are pure functions of their inputs so that repeated retrieval of a
//! record yields byte-identical URLs.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use pothole_watch_report_models::Coordinate;

/// Map link for a coordinate, e.g. `https://maps.google.com/?q=34.05,-118.25`.
#[must_use]
pub fn map_link(coordinate: &Coordinate) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        coordinate.latitude, coordinate.longitude
    )
}

/// Image link for a record identifier under the public base URL.
#[must_use]
pub fn image_link(base_url: &str, id: &str) -> String {
    format!("{}/image/{id}", base_url.trim_end_matches('/'))
}

/// View link for a record identifier under the public base URL.
#[must_use]
pub fn view_link(base_url: &str, id: &str) -> String {
    format!("{}/report/{id}", base_url.trim_end_matches('/'))
}

/// Pre-filled mail draft URL: primary recipient in `to`, hotline in `cc`,
/// subject and body percent-encoded.
#[must_use]
pub fn mailto_url(recipient: &str, recipient_cc: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{recipient}?cc={recipient_cc}&subject={}&body={}",
        utf8_percent_encode(subject, NON_ALPHANUMERIC),
        utf8_percent_encode(body, NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_link_embeds_raw_coordinate() {
        let link = map_link(&Coordinate::new(34.05, -118.25));
        assert!(link.contains("34.05,-118.25"), "got: {link}");
    }

    #[test]
    fn image_link_embeds_identifier() {
        assert_eq!(
            image_link("https://example.test/", "1700000000000-a1b2c3"),
            "https://example.test/image/1700000000000-a1b2c3"
        );
    }

    #[test]
    fn view_link_embeds_identifier() {
        assert_eq!(
            view_link("https://example.test", "abc"),
            "https://example.test/report/abc"
        );
    }

    #[test]
    fn links_are_deterministic() {
        let coord = Coordinate::new(34.05, -118.25);
        assert_eq!(map_link(&coord), map_link(&coord));
        assert_eq!(view_link("https://x.test", "id"), view_link("https://x.test", "id"));
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let url = mailto_url(
            "desk@example.gov",
            "hotline@example.gov",
            "Pothole at 123 Main St",
            "See map: https://maps.google.com/?q=34.05,-118.25",
        );
        assert!(url.starts_with("mailto:desk@example.gov?cc=hotline@example.gov&subject="));
        assert!(url.contains("Pothole%20at%20123%20Main%20St"));
        assert!(!url.split("body=").nth(1).unwrap().contains(' '));
    }
}
