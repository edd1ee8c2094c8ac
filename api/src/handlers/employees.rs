//! Employee handlers
//!
//! Endpoints under `/api/employees`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{check_length, check_non_negative, require_text, CountQuery, DateQuery, NameQuery};
use crate::domain::entities::{Employee, EmployeeId, NewEmployee, TaskId, TeamId};
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/email", get(get_by_email))
        .route("/search", get(search_employees))
        .route("/salary-range", get(get_by_salary_range))
        .route("/hired-after", get(get_hired_after))
        .route("/busy", get(get_busy))
        .route("/position/:position", get(get_by_position))
        .route("/team/:team_id", get(get_by_team))
        .route("/task/:task_id", get(get_by_task))
        .route(
            "/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

/// Request body for creating or updating an employee
#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

impl EmployeeRequest {
    fn validate(self) -> Result<NewEmployee, AppError> {
        let first_name = require_text("first_name", self.first_name, 50)?;
        let last_name = require_text("last_name", self.last_name, 50)?;
        let email = require_text("email", self.email, 100)?;
        if !email.contains('@') {
            return Err(AppError::BadRequest(
                "email must be a valid address".to_string(),
            ));
        }
        if let Some(position) = &self.position {
            check_length("position", position, 100)?;
        }
        check_non_negative("salary", self.salary)?;

        Ok(NewEmployee {
            first_name,
            last_name,
            email,
            position: self.position,
            hire_date: self.hire_date,
            salary: self.salary,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SalaryRangeQuery {
    pub min: f64,
    pub max: f64,
}


/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<EmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = state.employee_service.create(req.validate()?).await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /api/employees
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.employee_service.find_all().await?))
}

/// GET /api/employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employee_service.find_by_id(&EmployeeId(id)).await?))
}

/// PUT /api/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    let employee = state
        .employee_service
        .update(&EmployeeId(id), req.validate()?)
        .await?;

    Ok(Json(employee))
}

/// DELETE /api/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.employee_service.delete(&EmployeeId(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/employees/email?email=
pub async fn get_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employee_service.find_by_email(&query.email).await?))
}

/// GET /api/employees/position/:position
pub async fn get_by_position(
    State(state): State<AppState>,
    Path(position): Path<String>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.employee_service.find_by_position(&position).await?))
}

/// GET /api/employees/team/:team_id
pub async fn get_by_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(
        state.employee_service.find_by_team_id(&TeamId(team_id)).await?,
    ))
}

/// GET /api/employees/task/:task_id
pub async fn get_by_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(
        state.employee_service.find_by_task_id(&TaskId(task_id)).await?,
    ))
}

/// GET /api/employees/search?name=
pub async fn search_employees(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.employee_service.search_by_name(&query.name).await?))
}

/// GET /api/employees/salary-range?min=&max=
pub async fn get_by_salary_range(
    State(state): State<AppState>,
    Query(query): Query<SalaryRangeQuery>,
) -> Result<Json<Vec<Employee>>, AppError> {
    if query.min > query.max {
        return Err(AppError::BadRequest(format!(
            "min ({}) must not exceed max ({})",
            query.min, query.max
        )));
    }

    Ok(Json(
        state
            .employee_service
            .find_by_salary_range(query.min, query.max)
            .await?,
    ))
}

/// GET /api/employees/hired-after?date=
pub async fn get_hired_after(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.employee_service.find_hired_after(query.date).await?))
}

/// GET /api/employees/busy?count=
///
/// Employees assigned to more than `count` tasks.
pub async fn get_busy(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(
        state
            .employee_service
            .find_with_more_than_n_tasks(query.count)
            .await?,
    ))
}
