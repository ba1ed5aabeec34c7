//! Formal letter rendering.
//!
//! Produces the fixed-template letter a resident can print or paste into
//! the municipal service portal. The template embeds the resolved
//! address, the raw coordinate, the map link, and any media links.

use chrono::{DateTime, Utc};
use pothole_watch_report_models::Coordinate;

/// Input fields for one rendered letter.
#[derive(Debug, Clone)]
pub struct LetterContext<'a> {
    /// Resolved mailing address of the defect.
    pub address: &'a str,
    /// Captured coordinate.
    pub coordinate: &'a Coordinate,
    /// Map link embedding the coordinate.
    pub map_link: &'a str,
    /// Photo link, when a photo was captured.
    pub image_link: Option<&'a str>,
    /// Public view link for the stored report.
    pub view_link: &'a str,
    /// Letter date (record creation time).
    pub created_at: DateTime<Utc>,
}

/// Renders the formal letter for a submission.
#[must_use]
pub fn render_formal_letter(ctx: &LetterContext<'_>) -> String {
    let date = ctx.created_at.format("%B %-d, %Y");

    let accuracy_note = ctx.coordinate.accuracy.map_or_else(String::new, |acc| {
        format!(" (reported GPS accuracy: {acc:.0} m)")
    });

    let media = ctx.image_link.map_or_else(
        || format!("A map of the location is available at {}.", ctx.map_link),
        |image| {
            format!(
                "A photograph of the defect is available at {image}, and a map of the \
                 location at {}.",
                ctx.map_link
            )
        },
    );

    format!(
        "{date}\n\
         \n\
         To the Bureau of Street Services:\n\
         \n\
         I am writing to report a pothole in need of repair at the following \
         location:\n\
         \n\
         {address}\n\
         \n\
         The defect was observed at coordinates {lat}, {lng}{accuracy_note}. \
         {media}\n\
         \n\
         This road surface defect poses a hazard to vehicles, cyclists, and \
         pedestrians. I respectfully request that it be inspected and repaired.\n\
         \n\
         The full report is available at {view_link}.\n\
         \n\
         Thank you for your attention to this matter.\n\
         \n\
         Sincerely,\n\
         A concerned resident\n",
        address = ctx.address,
        lat = ctx.coordinate.latitude,
        lng = ctx.coordinate.longitude,
        view_link = ctx.view_link,
    )
}
