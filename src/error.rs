use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Application-level error type
///
/// Every variant renders as the `{error, details?}` JSON body the API
/// exposes; `Upstream` carries the already-decided response status, so call
/// sites own the propagation policy (502 fallback for the listing, verbatim
/// passthrough for the detail route).
#[derive(Debug)]
pub enum AppError {
    /// Invalid caller input, rejected before any upstream call
    Validation(String),
    /// The requested resource does not exist upstream
    NotFound { message: String, details: Vec<String> },
    /// The upstream call failed; respond with the given status
    Upstream {
        message: String,
        status: u16,
        details: Vec<String>,
    },
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::NotFound { message, .. } => write!(f, "Not found: {message}"),
            Self::Upstream { message, status, .. } => {
                write!(f, "Upstream failure ({status}): {message}")
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, details) = match self {
            Self::Validation(msg) => (msg.clone(), None),
            Self::NotFound { message, details } | Self::Upstream { message, details, .. } => {
                (message.clone(), some_if_nonempty(details))
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: message,
            details,
        })
    }
}

fn some_if_nonempty(details: &[String]) -> Option<Vec<String>> {
    if details.is_empty() {
        None
    } else {
        Some(details.to_vec())
    }
}
