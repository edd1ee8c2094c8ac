//! Project handlers
//!
//! Endpoints under `/api/projects`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{check_non_negative, parse_enum, parse_optional_enum, require_text, StatusUpdate};
use crate::domain::entities::{NewProject, Project, ProjectId, ProjectStatus, TeamId};
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/status", get(get_by_status))
        .route("/overdue", get(get_overdue))
        .route("/starting", get(get_by_start_date))
        .route("/budget", get(get_by_budget))
        .route("/team/:team_id", get(get_by_team))
        .route(
            "/:id",
            get(get_project)
                .put(update_project)
                .delete(delete_project),
        )
        .route("/:id/team/:team_id", put(assign_to_team))
        .route("/:id/status", put(update_status))
}

/// Request body for creating or updating a project
///
/// `status` is only honoured on create; use the status endpoint afterwards.
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl ProjectRequest {
    fn validate(self) -> Result<NewProject, AppError> {
        let name = require_text("name", self.name, 150)?;
        check_non_negative("budget", self.budget)?;
        let start_date = self
            .start_date
            .ok_or_else(|| AppError::BadRequest("start_date is required".to_string()))?;
        let status = parse_optional_enum(self.status.as_deref())?;

        Ok(NewProject {
            name,
            description: self.description,
            budget: self.budget,
            start_date,
            end_date: self.end_date,
            status,
        })
    }
}

/// `?status=&team_id=`
#[derive(Debug, Deserialize)]
pub struct ProjectStatusQuery {
    pub status: String,
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    pub min: f64,
}

/// `?as_of=`, defaulting to today
#[derive(Debug, Deserialize)]
pub struct OverdueQuery {
    pub as_of: Option<NaiveDate>,
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = state.project_service.create(req.validate()?).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.project_service.find_all().await?))
}

/// GET /api/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(state.project_service.find_by_id(&ProjectId(id)).await?))
}

/// PUT /api/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .project_service
        .update(&ProjectId(id), req.validate()?)
        .await?;

    Ok(Json(project))
}

/// DELETE /api/projects/:id
///
/// Also deletes the project's tasks.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.project_service.delete(&ProjectId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/projects/:id/team/:team_id
pub async fn assign_to_team(
    State(state): State<AppState>,
    Path((id, team_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .project_service
        .assign_to_team(&ProjectId(id), &TeamId(team_id))
        .await?;

    Ok(Json(project))
}

/// PUT /api/projects/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Project>, AppError> {
    let status: ProjectStatus = parse_enum(&req.status)?;
    let project = state
        .project_service
        .update_status(&ProjectId(id), status)
        .await?;

    Ok(Json(project))
}

/// GET /api/projects/status?status=&team_id=
pub async fn get_by_status(
    State(state): State<AppState>,
    Query(query): Query<ProjectStatusQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    let status: ProjectStatus = parse_enum(&query.status)?;
    let projects = match query.team_id {
        Some(team_id) => {
            state
                .project_service
                .find_by_status_and_team(status, &TeamId(team_id))
                .await?
        }
        None => state.project_service.find_by_status(status).await?,
    };

    Ok(Json(projects))
}

/// GET /api/projects/team/:team_id
pub async fn get_by_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(
        state.project_service.find_by_team_id(&TeamId(team_id)).await?,
    ))
}

/// GET /api/projects/overdue
pub async fn get_overdue(
    State(state): State<AppState>,
    Query(query): Query<OverdueQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = match query.as_of {
        Some(date) => state.project_service.find_overdue_as_of(date).await?,
        None => state.project_service.find_overdue().await?,
    };

    Ok(Json(projects))
}

/// GET /api/projects/starting?from=&to=
pub async fn get_by_start_date(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(
        state
            .project_service
            .find_by_start_date_between(query.from, query.to)
            .await?,
    ))
}

/// GET /api/projects/budget?min=
pub async fn get_by_budget(
    State(state): State<AppState>,
    Query(query): Query<BudgetQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(
        state
            .project_service
            .find_by_budget_greater_than(query.min)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProjectRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn start_date_is_required() {
        let err = parse(r#"{"name":"Apollo"}"#).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: start_date is required");
    }

    #[test]
    fn status_is_parsed_case_insensitively() {
        let new = parse(r#"{"name":"Apollo","start_date":"2024-01-01","status":"in_progress"}"#)
            .validate()
            .unwrap();

        assert_eq!(new.status, Some(ProjectStatus::InProgress));
        assert_eq!(new.end_date, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse(r#"{"name":"Apollo","start_date":"2024-01-01","status":"PAUSED"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn negative_budget_is_rejected() {
        let err = parse(r#"{"name":"Apollo","start_date":"2024-01-01","budget":-5}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
