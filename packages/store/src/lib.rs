#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Persistence for submission records.
//!
//! Records are stored as JSON values under their generated identifier
//! with a fixed TTL; expiry is owned entirely by the store (there is no
//! cleanup job). [`ReportStore`] is the trait the report builder writes
//! through, so the backing key-value collaborator is swappable;
//! [`MemoryStore`] is the in-process implementation, which checks expiry
//! lazily on read.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use pothole_watch_report_models::SubmissionRecord;
use thiserror::Error;
use tokio::sync::RwLock;

/// Fixed record lifetime: 180 days (15,552,000 seconds).
pub const REPORT_TTL_SECONDS: i64 = 180 * 24 * 60 * 60;

/// Errors from store operations.
///
/// [`StoreError::NotFound`] is a distinct outcome, not a transport
/// failure; callers branch on it for 404 handling.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No live record exists under the requested identifier.
    #[error("No record found for id {id}")]
    NotFound {
        /// The identifier that was requested.
        id: String,
    },

    /// The backing store failed to read or write.
    #[error("Store backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },

    /// Record serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value persistence boundary for submission records.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists a record under `id` for `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    async fn put(
        &self,
        id: &str,
        record: &SubmissionRecord,
        ttl_seconds: i64,
    ) -> Result<(), StoreError>;

    /// Retrieves the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no live record exists, or
    /// another [`StoreError`] variant on backend/deserialization failure.
    async fn get(&self, id: &str) -> Result<SubmissionRecord, StoreError>;
}

/// A stored value with its expiry deadline.
struct Entry {
    json: String,
    expires_at: DateTime<Utc>,
}

/// In-process [`ReportStore`] backed by a `HashMap`.
///
/// Expired entries are dropped when read; nothing sweeps the map in the
/// background, matching the TTL-ownership contract of the external
/// key-value collaborator this stands in for.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn put(
        &self,
        id: &str,
        record: &SubmissionRecord,
        ttl_seconds: i64,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds);

        let mut entries = self.entries.write().await;
        entries.insert(id.to_string(), Entry { json, expires_at });
        log::debug!("Stored report {id} (expires {expires_at})");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<SubmissionRecord, StoreError> {
        {
            let entries = self.entries.read().await;
            match entries.get(id) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Ok(serde_json::from_str(&entry.json)?);
                }
                Some(_) | None => {}
            }
        }

        // Drop the expired entry, if that's why the read missed.
        let mut entries = self.entries.write().await;
        if entries
            .get(id)
            .is_some_and(|entry| entry.expires_at <= Utc::now())
        {
            entries.remove(id);
            log::debug!("Dropped expired report {id}");
        }

        Err(StoreError::NotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;
    use pothole_watch_report_models::{Coordinate, ReportStatus};

    fn record(id: &str) -> SubmissionRecord {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        SubmissionRecord {
            id: id.to_string(),
            coordinate: Coordinate::new(34.05, -118.25),
            captured_at: now,
            image_payload: None,
            resolved_address: "123 Main St, Los Angeles, CA".to_string(),
            status: ReportStatus::PendingSubmission,
            created_at: now,
            map_link: "https://maps.google.com/?q=34.05,-118.25".to_string(),
            image_link: None,
            view_link: "https://example.test/report/abc".to_string(),
            source: "web".to_string(),
        }
    }

    #[tokio::test]
    async fn round_trips_record() {
        let store = MemoryStore::new();
        let original = record("r-1");
        store.put("r-1", &original, REPORT_TTL_SECONDS).await.unwrap();

        let fetched = store.get("r-1").await.unwrap();
        assert_eq!(fetched, original);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("never-put").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn expired_record_is_not_found() {
        let store = MemoryStore::new();
        store.put("r-2", &record("r-2"), -1).await.unwrap();

        let err = store.get("r-2").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn links_are_stable_across_reads() {
        let store = MemoryStore::new();
        store.put("r-3", &record("r-3"), REPORT_TTL_SECONDS).await.unwrap();

        let first = store.get("r-3").await.unwrap();
        let second = store.get("r-3").await.unwrap();
        assert_eq!(first.map_link, second.map_link);
        assert_eq!(first.view_link, second.view_link);
    }
}
