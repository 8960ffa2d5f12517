//! HTTP surface for the summarizer and the route/calendar actions.

mod error;
pub mod handlers;

pub use error::ApiError;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ai::TextGenerator;
use crate::geo::GeoLocator;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    /// Service used for summaries and reply drafts
    pub generator: Arc<dyn TextGenerator>,
    /// Optional origin lookup for routes
    pub locator: Option<Arc<dyn GeoLocator>>,
    /// Timezone extracted local times are interpreted in
    pub timezone: Tz,
    /// Upper bound on the origin lookup
    pub geolocation_timeout: Duration,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/summarize", post(handlers::summarize_handler))
        .route("/api/reply", post(handlers::reply_handler))
        .route("/api/extract", post(handlers::extract_handler))
        .route("/api/route", post(handlers::route_handler))
        .route("/api/calendar", post(handlers::calendar_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
