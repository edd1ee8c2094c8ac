//! Task handlers
//!
//! Endpoints under `/api/tasks`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    parse_enum, parse_optional_enum, require_text, DateQuery, StatusQuery, StatusUpdate,
};
use crate::domain::entities::{
    EmployeeId, NewTask, ProjectId, Task, TaskId, TaskPriority, TaskStatus,
};
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/status", get(get_by_status))
        .route("/priority", get(get_by_priority))
        .route("/due-before", get(get_due_before))
        .route("/project/:project_id", get(get_by_project))
        .route("/project/:project_id/incomplete", get(get_incomplete_by_project))
        .route("/project/:project_id/count", get(count_by_project_and_status))
        .route("/employee/:employee_id", get(get_by_employee))
        .route("/:id", get(get_task).put(update_task).delete(delete_task))
        .route("/:id/project/:project_id", put(assign_to_project))
        .route(
            "/:id/employees/:employee_id",
            post(assign_employee).delete(remove_employee),
        )
        .route("/:id/status", put(update_status))
        .route("/:id/priority", put(update_priority))
}

/// Request body for creating or updating a task
///
/// On update, an absent priority or status leaves the current value alone.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub estimated_hours: Option<i32>,
    pub due_date: Option<NaiveDate>,
}

impl TaskRequest {
    fn validate(self) -> Result<NewTask, AppError> {
        let title = require_text("title", self.title, 200)?;
        if matches!(self.estimated_hours, Some(h) if h < 0) {
            return Err(AppError::BadRequest(
                "estimated_hours must be zero or greater".to_string(),
            ));
        }

        Ok(NewTask {
            title,
            description: self.description,
            priority: parse_optional_enum(self.priority.as_deref())?,
            status: parse_optional_enum(self.status.as_deref())?,
            estimated_hours: self.estimated_hours,
            due_date: self.due_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PriorityUpdate {
    #[serde(default)]
    pub priority: String,
}

/// `?priority=&status=`
#[derive(Debug, Deserialize)]
pub struct PriorityQuery {
    pub priority: String,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskCount {
    pub project_id: Uuid,
    pub status: TaskStatus,
    pub count: u64,
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = state.task_service.create(req.validate()?).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.task_service.find_all().await?))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, AppError> {
    Ok(Json(state.task_service.find_by_id(&TaskId(id)).await?))
}

/// PUT /api/tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .task_service
        .update(&TaskId(id), req.validate()?)
        .await?;

    Ok(Json(task))
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.task_service.delete(&TaskId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/tasks/:id/project/:project_id
pub async fn assign_to_project(
    State(state): State<AppState>,
    Path((id, project_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .task_service
        .assign_to_project(&TaskId(id), &ProjectId(project_id))
        .await?;

    Ok(Json(task))
}

/// POST /api/tasks/:id/employees/:employee_id
pub async fn assign_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .task_service
        .assign_employee(&TaskId(id), &EmployeeId(employee_id))
        .await?;

    Ok(Json(task))
}

/// DELETE /api/tasks/:id/employees/:employee_id
pub async fn remove_employee(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Task>, AppError> {
    let task = state
        .task_service
        .remove_employee(&TaskId(id), &EmployeeId(employee_id))
        .await?;

    Ok(Json(task))
}

/// PUT /api/tasks/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<Task>, AppError> {
    let status: TaskStatus = parse_enum(&req.status)?;

    Ok(Json(
        state.task_service.update_status(&TaskId(id), status).await?,
    ))
}

/// PUT /api/tasks/:id/priority
pub async fn update_priority(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PriorityUpdate>,
) -> Result<Json<Task>, AppError> {
    let priority: TaskPriority = parse_enum(&req.priority)?;

    Ok(Json(
        state
            .task_service
            .update_priority(&TaskId(id), priority)
            .await?,
    ))
}

/// GET /api/tasks/project/:project_id
pub async fn get_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(
        state
            .task_service
            .find_by_project_id(&ProjectId(project_id))
            .await?,
    ))
}

/// GET /api/tasks/project/:project_id/incomplete
pub async fn get_incomplete_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(
        state
            .task_service
            .find_incomplete_by_project(&ProjectId(project_id))
            .await?,
    ))
}

/// GET /api/tasks/project/:project_id/count?status=
pub async fn count_by_project_and_status(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<TaskCount>, AppError> {
    let status: TaskStatus = parse_enum(&query.status)?;
    let count = state
        .task_service
        .count_by_project_and_status(&ProjectId(project_id), status)
        .await?;

    Ok(Json(TaskCount {
        project_id,
        status,
        count,
    }))
}

/// GET /api/tasks/employee/:employee_id
pub async fn get_by_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(
        state
            .task_service
            .find_by_employee_id(&EmployeeId(employee_id))
            .await?,
    ))
}

/// GET /api/tasks/status?status=
pub async fn get_by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let status: TaskStatus = parse_enum(&query.status)?;

    Ok(Json(state.task_service.find_by_status(status).await?))
}

/// GET /api/tasks/priority?priority=&status=
pub async fn get_by_priority(
    State(state): State<AppState>,
    Query(query): Query<PriorityQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let priority: TaskPriority = parse_enum(&query.priority)?;
    let tasks = match parse_optional_enum::<TaskStatus>(query.status.as_deref())? {
        Some(status) => {
            state
                .task_service
                .find_by_priority_and_status(priority, status)
                .await?
        }
        None => state.task_service.find_by_priority(priority).await?,
    };

    Ok(Json(tasks))
}

/// GET /api/tasks/due-before?date=
pub async fn get_due_before(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.task_service.find_due_before(query.date).await?))
}
