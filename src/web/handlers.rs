use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{ApiError, AppState};
use crate::ai::{self, ReplyLength, DEFAULT_TONE};
use crate::extract::{extract_destination, extract_event_fields, EventFields};
use crate::geo::resolve_origin;
use crate::links::{build_calendar_url, build_route_url};
use crate::utils::text::combine_texts;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SummarizeRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplyRequest {
    pub email: String,
    pub tone: String,
    pub length: ReplyLength,
}

impl Default for ReplyRequest {
    fn default() -> Self {
        Self {
            email: String::new(),
            tone: DEFAULT_TONE.to_string(),
            length: ReplyLength::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractRequest {
    pub email: String,
    pub summary: String,
    pub current: EventFields,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub destination: Option<String>,
    pub fields: EventFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RouteRequest {
    pub email: String,
    pub summary: String,
    pub destination: Option<String>,
    pub origin: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub url: String,
    pub destination: String,
    pub origin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CalendarRequest {
    pub email: String,
    pub summary: String,
    pub fields: EventFields,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub url: String,
    pub fields: EventFields,
}

/// Handler for the index page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Summarize a pasted email
pub async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let summary = ai::summarize(state.generator.as_ref(), &request.email)
        .await
        .map_err(|e| ApiError::from_service(&e, t!("summary_failed")))?;

    Ok(Json(SummarizeResponse { summary }))
}

/// Draft a reply to a pasted email
pub async fn reply_handler(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let reply = ai::draft_reply(
        state.generator.as_ref(),
        &request.email,
        &request.tone,
        request.length,
    )
    .await
    .map_err(|e| ApiError::from_service(&e, t!("reply_failed")))?;

    Ok(Json(ReplyResponse { reply }))
}

/// Run both extractors without building any link
pub async fn extract_handler(Json(request): Json<ExtractRequest>) -> Json<ExtractResponse> {
    let destination = extract_destination(&request_text(&request.email, &request.summary));
    let fields = extract_event_fields(&request.email, &request.summary, request.current);

    Json(ExtractResponse {
        destination,
        fields,
    })
}

/// Build a directions link, extracting the destination when none is given
pub async fn route_handler(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let destination = match request.destination.as_deref().map(str::trim) {
        Some(given) if !given.is_empty() => given.to_string(),
        _ => extract_destination(&request_text(&request.email, &request.summary))
            .ok_or_else(|| {
                warn!("Could not extract a destination");
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, t!("destination_not_found"))
            })?,
    };

    let origin = match request.origin.as_deref().map(str::trim) {
        Some(given) if !given.is_empty() => Some(given.to_string()),
        _ => resolve_origin(state.locator.as_deref(), state.geolocation_timeout).await,
    };

    let url = build_route_url(&destination, origin.as_deref()).map_err(|_| {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, t!("destination_not_found"))
    })?;
    info!("Built route link to {}", destination);

    Ok(Json(RouteResponse {
        url,
        destination,
        origin,
    }))
}

/// Fill event fields from the text and build a calendar link
pub async fn calendar_handler(
    State(state): State<AppState>,
    Json(request): Json<CalendarRequest>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let fields = extract_event_fields(&request.email, &request.summary, request.fields);

    let url = build_calendar_url(&fields, state.timezone).map_err(|e| {
        warn!("Rejected calendar link: {}", e);
        ApiError::from_service(&e, t!("invalid_request"))
    })?;
    info!("Built calendar link for {}", fields.title);

    Ok(Json(CalendarResponse { url, fields }))
}

fn request_text(email: &str, summary: &str) -> String {
    combine_texts(&[email, summary])
}
