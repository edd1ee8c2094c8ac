//! HTTP handlers
//!
//! Axum request handlers for the API endpoints, one module per resource.
//! Request bodies are checked here before they reach the services; bad input
//! becomes a 400.

pub mod employees;
pub mod projects;
pub mod tasks;
pub mod teams;

use std::str::FromStr;

use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::AppState;

/// All resource routes, to be nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/employees", employees::router())
        .nest("/teams", teams::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
}

/// `?name=` search parameter
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// `?status=` parameter
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

/// Body of the status change endpoints
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

/// `?date=` parameter, `YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// `?count=` threshold, exclusive
#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: usize,
}

/// Trimmed, non-blank and at most `max` characters
pub(crate) fn require_text(field: &str, value: String, max: usize) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be blank", field)));
    }
    check_length(field, &value, max)?;
    Ok(value)
}

pub(crate) fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

pub(crate) fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), AppError> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(AppError::BadRequest(format!(
            "{} must be zero or greater",
            field
        ))),
        _ => Ok(()),
    }
}

/// Parse a status or priority name, case-insensitively
pub(crate) fn parse_enum<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(AppError::BadRequest)
}

pub(crate) fn parse_optional_enum<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = String>,
{
    value.map(parse_enum).transpose()
}
