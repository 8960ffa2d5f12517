use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_i18n::t;
use serde::Serialize;

use crate::error::Error;

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// An error ready to be sent to the browser
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a service error, using `failure` for anything unexpected
    pub fn from_service(err: &Error, failure: impl Into<String>) -> Self {
        match err {
            Error::Validation(_) => Self::new(StatusCode::BAD_REQUEST, t!("email_required")),
            Error::InvalidDateTime(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, t!("invalid_datetime"))
            }
            Error::RangeInvalid { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, t!("range_invalid"))
            }
            _ => Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
