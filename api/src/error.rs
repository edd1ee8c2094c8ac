//! Unified error types for the OrgTrack API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors raised by services and repositories
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// A lookup by identifier or unique field yielded no record
    #[error("{entity} not found with {field}: '{value}'")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A uniqueness constraint would be violated
    #[error("{entity} already exists with {field}: '{value}'")]
    DuplicateKey {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Display) -> Self {
        DomainError::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn duplicate_key(entity: &'static str, field: &'static str, value: impl Display) -> Self {
        DomainError::DuplicateKey {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Check whether this is a NotFound for the given entity type
    #[cfg(test)]
    pub fn is_not_found(&self, expected: &str) -> bool {
        matches!(self, DomainError::NotFound { entity, .. } if *entity == expected)
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Borrow the wrapped domain error, if any
    #[cfg(test)]
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(e @ DomainError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Not found", Some(e.to_string()))
            }
            AppError::Domain(e @ DomainError::DuplicateKey { .. }) => {
                (StatusCode::CONFLICT, "Duplicate key", Some(e.to_string()))
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_field_and_value() {
        let err = DomainError::not_found("Project", "id", 42);
        assert_eq!(err.to_string(), "Project not found with id: '42'");
        assert!(err.is_not_found("Project"));
        assert!(!err.is_not_found("Task"));
    }

    #[test]
    fn duplicate_key_message() {
        let err = DomainError::duplicate_key("Employee", "email", "a@b.io");
        assert_eq!(
            err.to_string(),
            "Employee already exists with email: 'a@b.io'"
        );
    }

    #[test]
    fn status_codes() {
        let cases = [
            (
                AppError::from(DomainError::not_found("Team", "id", "x")),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(DomainError::duplicate_key("Employee", "email", "x")),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(DomainError::Database("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::BadRequest("nope".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
