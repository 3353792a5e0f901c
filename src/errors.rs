use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::auth::validate::FieldError;
use crate::templates_structs::ApiErrorResponse;

/// Failures surfaced by the remote client and recorded by the controllers.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// No token stored, or the backend rejected it with 401.
    Auth(String),
    Http { status: u16, body: String },
    Network(String),
    TimedOut,
    Decode(String),
    Config(String),
    Validation(Vec<FieldError>),
    InvalidTransition { from: String, to: String },
    /// The owning controller was disposed while the request was in flight.
    Cancelled,
}

impl ClientError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Auth(e) => write!(f, "Authentication required: {e}"),
            ClientError::Http { status, body } if body.is_empty() => {
                write!(f, "Backend returned HTTP {status}")
            }
            ClientError::Http { status, body } => write!(f, "Backend returned HTTP {status}: {body}"),
            ClientError::Network(e) => write!(f, "Network error: {e}"),
            ClientError::TimedOut => write!(f, "Request timed out"),
            ClientError::Decode(e) => write!(f, "Unexpected response body: {e}"),
            ClientError::Config(e) => write!(f, "Configuration error: {e}"),
            ClientError::Validation(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            ClientError::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {from} -> {to}")
            }
            ClientError::Cancelled => write!(f, "Request cancelled"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::TimedOut
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_builder() {
            ClientError::Config(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// Errors raised by the mock backend handlers.
#[derive(Debug)]
pub enum AppError {
    Template(askama::Error),
    BadRequest(String),
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
            AppError::NotFound(what) => write!(f, "Not found: {what}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(what) => HttpResponse::NotFound().json(ApiErrorResponse {
                error: "Not found".to_string(),
                details: Some(what.clone()),
            }),
            AppError::BadRequest(details) => HttpResponse::BadRequest().json(ApiErrorResponse {
                error: "Bad request".to_string(),
                details: Some(details.clone()),
            }),
            AppError::Template(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(ApiErrorResponse {
                    error: "Internal Server Error".to_string(),
                    details: None,
                })
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render(tmpl: impl askama::Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
