#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Submission assembly for pothole reports.
//!
//! [`ReportBuilder`] turns a validated capture plus a resolved address
//! into a full [`SubmissionRecord`]: a fresh identifier, derived map /
//! image / view links, the formal letter, and a pre-filled mail draft
//! URL. The record is persisted through the [`ReportStore`] before the
//! prepared report is returned, so a success response never references a
//! record that was not stored.
//!
//! Submission is deliberately non-idempotent: the same capture submitted
//! twice produces two records under two identifiers.

pub mod letter;
pub mod links;

use std::sync::Arc;

use chrono::Utc;
use pothole_watch_report_models::{RawCapture, ReportStatus, SubmissionRecord};
use pothole_watch_store::{REPORT_TTL_SECONDS, ReportStore, StoreError};
use rand::Rng as _;
use thiserror::Error;

/// Errors from report assembly.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The capture payload was malformed or incomplete. Nothing was
    /// persisted.
    #[error("Processing failed: {message}")]
    InvalidCapture {
        /// What was wrong with the capture.
        message: String,
    },

    /// Persisting the record failed; the report was not created.
    #[error("Failed to store report: {0}")]
    Store(#[from] StoreError),
}

/// Deployment-specific values for report assembly.
///
/// Recipients and portal/link bases are configuration, not literals, so
/// the builder stays testable independent of the deployment target.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Primary service-desk recipient of the mail draft.
    pub recipient: String,
    /// General hotline, carried as the cc recipient.
    pub recipient_cc: String,
    /// The municipal 311 portal advertised alongside the draft.
    pub portal_url: String,
    /// Public base URL that image and view links are derived under.
    pub public_base_url: String,
}

/// A fully assembled and persisted report.
#[derive(Debug, Clone)]
pub struct PreparedReport {
    /// The stored record.
    pub record: SubmissionRecord,
    /// Rendered formal letter.
    pub formal_letter: String,
    /// Pre-filled mail draft URL.
    pub mailto_url: String,
}

/// Assembles and persists submission records.
pub struct ReportBuilder {
    config: ReportConfig,
    store: Arc<dyn ReportStore>,
}

impl ReportBuilder {
    /// Creates a builder writing through the given store.
    #[must_use]
    pub fn new(config: ReportConfig, store: Arc<dyn ReportStore>) -> Self {
        Self { config, store }
    }

    /// Portal URL from the builder's configuration.
    #[must_use]
    pub fn portal_url(&self) -> &str {
        &self.config.portal_url
    }

    /// Builds, persists, and returns a report for a capture.
    ///
    /// `resolved_address` is the already-composed mailing address (from
    /// the resolver pipeline or a client-observed string); it is embedded
    /// verbatim in the letter and record.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidCapture`] if the coordinate violates
    /// its range invariants or the address is empty (no partial record is
    /// persisted), or [`ReportError::Store`] if the write fails.
    pub async fn submit(
        &self,
        capture: RawCapture,
        resolved_address: String,
    ) -> Result<PreparedReport, ReportError> {
        capture
            .coordinate
            .validate()
            .map_err(|e| ReportError::InvalidCapture {
                message: e.to_string(),
            })?;

        if resolved_address.trim().is_empty() {
            return Err(ReportError::InvalidCapture {
                message: "empty resolved address".to_string(),
            });
        }

        let id = generate_report_id();
        let created_at = Utc::now();

        let map_link = links::map_link(&capture.coordinate);
        let image_link = capture
            .image
            .is_some()
            .then(|| links::image_link(&self.config.public_base_url, &id));
        let view_link = links::view_link(&self.config.public_base_url, &id);

        let formal_letter = letter::render_formal_letter(&letter::LetterContext {
            address: &resolved_address,
            coordinate: &capture.coordinate,
            map_link: &map_link,
            image_link: image_link.as_deref(),
            view_link: &view_link,
            created_at,
        });

        let subject = format!("Pothole repair request: {resolved_address}");
        let mailto_url = links::mailto_url(
            &self.config.recipient,
            &self.config.recipient_cc,
            &subject,
            &formal_letter,
        );

        let record = SubmissionRecord {
            id: id.clone(),
            coordinate: capture.coordinate,
            captured_at: capture.captured_at,
            image_payload: capture.image,
            resolved_address,
            status: ReportStatus::PendingSubmission,
            created_at,
            map_link,
            image_link,
            view_link,
            source: capture.source,
        };

        self.store.put(&id, &record, REPORT_TTL_SECONDS).await?;
        log::info!("Created report {id} at {}", record.resolved_address);

        Ok(PreparedReport {
            record,
            formal_letter,
            mailto_url,
        })
    }
}

/// Generates a report identifier from the current time plus a random
/// suffix, e.g. `"1755427200123-a1b2c3"`.
///
/// Collisions are possible but acceptably improbable for this use case;
/// substitute a UUID if stronger uniqueness is ever required.
#[must_use]
pub fn generate_report_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..0x0100_0000);
    format!("{millis}-{suffix:06x}")
}
