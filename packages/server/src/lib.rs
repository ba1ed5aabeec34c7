#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for pothole report submission.
//!
//! Thin routing layer over the shared pipeline: `POST /report` runs the
//! capture through address resolution and the report builder, `GET
//! /api/report/{id}` and `GET /image/{id}` serve stored records and
//! their photo payloads back out of the store. All deployment-specific
//! values (recipients, portal, jurisdiction, geocoder URL) come from
//! environment variables at startup.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use pothole_watch_address::{AddressResolver, Jurisdiction};
use pothole_watch_geocoder::GeocodeClient;
use pothole_watch_report::{ReportBuilder, ReportConfig};
use pothole_watch_store::{MemoryStore, ReportStore};

/// Shared application state.
pub struct AppState {
    /// Address-resolution pipeline for captures without a client-observed
    /// address.
    pub resolver: AddressResolver,
    /// Report assembly and persistence.
    pub builder: ReportBuilder,
    /// Record store, shared with the builder.
    pub store: Arc<dyn ReportStore>,
}

/// Reads an environment variable with a default.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Builds the application state from environment variables.
#[must_use]
pub fn state_from_env() -> AppState {
    let nominatim_url = env_or("NOMINATIM_URL", "https://nominatim.openstreetmap.org");
    let public_base_url = env_or("PUBLIC_BASE_URL", "http://127.0.0.1:8080");

    let jurisdiction = Jurisdiction::default();
    let geocoder = GeocodeClient::new(
        reqwest::Client::new(),
        nominatim_url,
        jurisdiction.default_city.clone(),
        jurisdiction.region_code.clone(),
    );
    let resolver = AddressResolver::new(geocoder, jurisdiction);

    let config = ReportConfig {
        recipient: env_or("REPORT_RECIPIENT", "street.services@lacity.org"),
        recipient_cc: env_or("REPORT_RECIPIENT_CC", "311@lacity.org"),
        portal_url: env_or("PORTAL_URL", "https://myla311.lacity.org"),
        public_base_url,
    };

    let store: Arc<dyn ReportStore> = Arc::new(MemoryStore::new());
    let builder = ReportBuilder::new(config, store.clone());

    AppState {
        resolver,
        builder,
        store,
    }
}

/// Starts the pothole report API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let state = web::Data::new(state_from_env());

    let bind_addr = env_or("BIND_ADDR", "127.0.0.1");
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/report", web::post().to(handlers::submit_report))
            .route("/image/{id}", web::get().to(handlers::report_image))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/report/{id}", web::get().to(handlers::get_report)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
