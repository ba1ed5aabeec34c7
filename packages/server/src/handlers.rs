//! HTTP handler functions for the pothole report API.

use actix_web::{HttpResponse, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use pothole_watch_report::ReportError;
use pothole_watch_report_models::{Coordinate, RawCapture};
use pothole_watch_server_models::{ApiError, ApiHealth, ReportRequest, ReportResponse};
use pothole_watch_store::StoreError;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /report`
///
/// Accepts a capture, resolves an address when the client didn't provide
/// one, assembles and persists the record, and returns the submission
/// package (links, letter, mail draft).
pub async fn submit_report(
    state: web::Data<AppState>,
    body: web::Json<ReportRequest>,
) -> HttpResponse {
    let request = body.into_inner();

    let coordinate = Coordinate {
        latitude: request.location.lat,
        longitude: request.location.lng,
        accuracy: request.location.accuracy,
    };
    if let Err(e) = coordinate.validate() {
        return HttpResponse::BadRequest().json(ApiError::new(e));
    }

    let captured_at = request
        .timestamp
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(Utc::now);

    // Prefer the client-observed address; resolve server-side otherwise.
    // Resolution degrades internally and never fails the request.
    let address = match request.address.filter(|a| !a.trim().is_empty()) {
        Some(address) => address,
        None => state.resolver.resolve(&coordinate).await.formatted,
    };

    let capture = RawCapture {
        coordinate,
        captured_at,
        image: request.image.filter(|i| !i.trim().is_empty()),
        address: None,
        source: request.source.unwrap_or_else(|| "web".to_string()),
    };

    match state.builder.submit(capture, address).await {
        Ok(prepared) => HttpResponse::Ok().json(ReportResponse {
            success: true,
            report_id: prepared.record.id.clone(),
            map_link: prepared.record.map_link.clone(),
            image_link: prepared.record.image_link.clone(),
            view_link: prepared.record.view_link.clone(),
            formal_letter: prepared.formal_letter,
            mailto_url: prepared.mailto_url,
            portal_url: state.builder.portal_url().to_string(),
            address: prepared.record.resolved_address.clone(),
            message: "Report prepared. Use the mail draft or portal to submit it.".to_string(),
        }),
        Err(e @ ReportError::InvalidCapture { .. }) => {
            HttpResponse::BadRequest().json(ApiError::new(e))
        }
        Err(e @ ReportError::Store(_)) => {
            log::error!("Failed to store report: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to store report"))
        }
    }
}

/// `GET /api/report/{id}`
///
/// Returns the stored submission record as JSON.
pub async fn get_report(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.store.get(&id).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(StoreError::NotFound { .. }) => {
            HttpResponse::NotFound().json(ApiError::new(format!("No report found for {id}")))
        }
        Err(e) => {
            log::error!("Failed to load report {id}: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to load report"))
        }
    }
}

/// `GET /image/{id}`
///
/// Decodes the record's stored data-URI photo and serves the raw bytes
/// with the declared content type.
pub async fn report_image(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    let record = match state.store.get(&id).await {
        Ok(record) => record,
        Err(StoreError::NotFound { .. }) => {
            return HttpResponse::NotFound().json(ApiError::new(format!("No report found for {id}")));
        }
        Err(e) => {
            log::error!("Failed to load report {id}: {e}");
            return HttpResponse::InternalServerError().json(ApiError::new("Failed to load report"));
        }
    };

    let Some(payload) = record.image_payload else {
        return HttpResponse::NotFound().json(ApiError::new("Report has no photo"));
    };

    match decode_data_uri(&payload) {
        Some((content_type, bytes)) => HttpResponse::Ok().content_type(content_type).body(bytes),
        None => {
            log::error!("Report {id} has an unparseable image payload");
            HttpResponse::InternalServerError().json(ApiError::new("Invalid image payload"))
        }
    }
}

/// Splits a `data:<mime>;base64,<payload>` URI into content type and
/// decoded bytes.
fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let content_type = if mime.is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime.to_string()
    };
    let bytes = BASE64.decode(payload).ok()?;
    Some((content_type, bytes))
}
