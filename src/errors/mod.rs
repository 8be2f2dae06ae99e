//! Error handling module for the ESCOtech site.
//!
//! Provides the central error type, its mapping to HTTP status codes, and the
//! error panel page rendered for full-page failures.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const RENDER_ERROR: &str = "RENDER_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The upstream API could not be reached
    Network(String),
    /// The upstream API answered with a non-2xx status
    Api { status: u16, message: String },
    /// The upstream API answered with a body we could not decode
    Decode(String),
    /// A submitted form is missing required fields
    Validation(String),
    /// Resource not found
    NotFound(String),
    /// The same row is already being mutated
    Conflict(String),
    /// A template failed to render
    Render(String),
    /// Malformed request from the browser
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Network(_) => StatusCode::BAD_GATEWAY,
            AppError::Api { status, .. } => match *status {
                401 | 403 => StatusCode::UNAUTHORIZED,
                404 => StatusCode::NOT_FOUND,
                400..=499 => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::Decode(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Network(_) => codes::NETWORK_ERROR,
            AppError::Api { .. } => codes::UPSTREAM_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::Render(_) => codes::RENDER_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Network(msg) => msg.clone(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Decode(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Render(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::error!("Upstream decode error: {:?}", err);
            AppError::Decode(format!("Unexpected response from server: {}", err))
        } else {
            tracing::error!("Upstream request error: {:?}", err);
            AppError::Network(format!("Could not reach the server: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Decode(format!("Unexpected response from server: {}", err))
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        tracing::error!("Template error: {:?}", err);
        AppError::Render(format!("Failed to render page: {}", err))
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid form submission: {}", err))
    }
}

/// Full-page error panel.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    title: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let page = ErrorPage {
            title: status
                .canonical_reason()
                .unwrap_or("Something went wrong")
                .to_string(),
            message: self.message(),
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, self.message()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_mapping() {
        let unauthorized = AppError::Api {
            status: 401,
            message: "Invalid token".to_string(),
        };
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);

        let missing = AppError::Api {
            status: 404,
            message: "Project not found".to_string(),
        };
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let broken = AppError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(broken.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(broken.error_code(), codes::UPSTREAM_ERROR);
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = AppError::Validation("Full name is required".to_string());
        assert_eq!(err.to_string(), "VALIDATION_ERROR: Full name is required");
    }

    #[test]
    fn test_error_page_shows_message() {
        let response = AppError::NotFound("Project 9 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
