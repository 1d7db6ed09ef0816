//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every variant maps to one entry of the API error taxonomy: validation failures,
//! authentication failures, ownership/not-found, malformed identifiers, duplicate
//! email conflicts, and unexpected infrastructure errors.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return
//! `Result<_, AppError>` and have failures rendered as the standard
//! `{success: false, message}` envelope. A `From<sqlx::Error>` implementation
//! keeps the `?` operator usable at the storage seam; the crypto helpers in
//! `auth` map their library errors explicitly since the variant depends on
//! the operation (issuing vs. verifying).

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Request payload violates a field constraint (HTTP 400).
    /// The message names the first offending field.
    Validation(String),
    /// Missing/malformed/invalid/expired token, or bad login credentials (HTTP 401).
    Unauthorized(String),
    /// Client-side error that is not a payload-shape problem, e.g. a wrong
    /// current password on password change (HTTP 400).
    BadRequest(String),
    /// Duplicate email at signup (HTTP 400, kept distinct for logging).
    Conflict(String),
    /// A path id that is not a valid UUID (HTTP 400). Distinct from `NotFound`.
    InvalidIdentifier(String),
    /// Requested User/Task does not exist, or belongs to another user (HTTP 404).
    NotFound(String),
    /// Unexpected server-side error, e.g. a token signing failure (HTTP 500).
    Internal(String),
    /// Error originating from the database (HTTP 500).
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidIdentifier(msg) => write!(f, "Invalid Identifier: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_)
            | AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Infrastructure detail is logged server-side, never sent to the caller.
            AppError::Internal(detail) | AppError::Database(detail) => {
                log::error!("internal error: {}", detail);
                "Server Error".to_string()
            }
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::InvalidIdentifier(msg)
            | AppError::NotFound(msg) => msg.clone(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": message
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}
