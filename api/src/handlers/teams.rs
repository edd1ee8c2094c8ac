//! Team handlers
//!
//! Endpoints under `/api/teams`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{require_text, CountQuery, DateQuery, NameQuery};
use crate::app::TeamWithProjects;
use crate::domain::entities::{EmployeeId, NewTeam, Team, TeamId};
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/search", get(search_teams))
        .route("/created-after", get(get_created_after))
        .route("/large", get(get_large))
        .route("/employee/:employee_id", get(get_by_employee))
        .route("/:id", get(get_team).put(update_team).delete(delete_team))
        .route("/:id/projects", get(get_team_projects))
        .route(
            "/:id/employees/:employee_id",
            post(add_employee).delete(remove_employee),
        )
}

/// Request body for creating or updating a team
///
/// `created_date` is only honoured on create.
#[derive(Debug, Deserialize)]
pub struct TeamRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub created_date: Option<NaiveDate>,
}

impl TeamRequest {
    fn validate(self) -> Result<NewTeam, AppError> {
        Ok(NewTeam {
            name: require_text("name", self.name, 100)?,
            description: self.description,
            created_date: self.created_date,
        })
    }
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(req): Json<TeamRequest>,
) -> Result<(StatusCode, Json<Team>), AppError> {
    let team = state.team_service.create(req.validate()?).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(state.team_service.find_all().await?))
}

/// GET /api/teams/:id
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Team>, AppError> {
    Ok(Json(state.team_service.find_by_id(&TeamId(id)).await?))
}

/// GET /api/teams/:id/projects
///
/// The team with its owned projects.
pub async fn get_team_projects(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamWithProjects>, AppError> {
    Ok(Json(state.team_service.find_with_projects(&TeamId(id)).await?))
}

/// PUT /api/teams/:id
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TeamRequest>,
) -> Result<Json<Team>, AppError> {
    let team = state
        .team_service
        .update(&TeamId(id), req.validate()?)
        .await?;

    Ok(Json(team))
}

/// DELETE /api/teams/:id
///
/// Also deletes the team's projects and their tasks.
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.team_service.delete(&TeamId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/teams/:id/employees/:employee_id
pub async fn add_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Team>, AppError> {
    let team = state
        .team_service
        .add_employee(&TeamId(id), &EmployeeId(employee_id))
        .await?;

    Ok(Json(team))
}

/// DELETE /api/teams/:id/employees/:employee_id
pub async fn remove_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Team>, AppError> {
    let team = state
        .team_service
        .remove_employee(&TeamId(id), &EmployeeId(employee_id))
        .await?;

    Ok(Json(team))
}

/// GET /api/teams/search?name=
pub async fn search_teams(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(state.team_service.search_by_name(&query.name).await?))
}

/// GET /api/teams/employee/:employee_id
pub async fn get_by_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(
        state
            .team_service
            .find_teams_by_employee(&EmployeeId(employee_id))
            .await?,
    ))
}

/// GET /api/teams/created-after?date=
pub async fn get_created_after(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(state.team_service.find_created_after(query.date).await?))
}

/// GET /api/teams/large?count=
///
/// Teams owning more than `count` projects.
pub async fn get_large(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Json<Vec<Team>>, AppError> {
    Ok(Json(
        state
            .team_service
            .find_with_more_than_n_projects(query.count)
            .await?,
    ))
}
