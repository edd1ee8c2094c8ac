//! OrgTrack API Server
//!
//! Tracks employees, the teams they belong to, the projects teams own and
//! the tasks within those projects.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod migrator;

#[cfg(test)]
mod test_utils;


use adapters::{SqlEmployeeRepository, SqlProjectRepository, SqlTaskRepository, SqlTeamRepository};
use app::{EmployeeService, ProjectService, TaskService, TeamService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub employee_service: Arc<EmployeeService<SqlEmployeeRepository, SqlTaskRepository>>,
    pub team_service:
        Arc<TeamService<SqlTeamRepository, SqlEmployeeRepository, SqlProjectRepository>>,
    pub project_service: Arc<ProjectService<SqlProjectRepository, SqlTeamRepository>>,
    pub task_service:
        Arc<TaskService<SqlTaskRepository, SqlProjectRepository, SqlEmployeeRepository>>,
}

impl AppState {
    /// Wire every service to repositories sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        let employee_repo = Arc::new(SqlEmployeeRepository::new(db.clone()));
        let team_repo = Arc::new(SqlTeamRepository::new(db.clone()));
        let project_repo = Arc::new(SqlProjectRepository::new(db.clone()));
        let task_repo = Arc::new(SqlTaskRepository::new(db));

        Self {
            employee_service: Arc::new(EmployeeService::new(
                employee_repo.clone(),
                task_repo.clone(),
            )),
            team_service: Arc::new(TeamService::new(
                team_repo.clone(),
                employee_repo.clone(),
                project_repo.clone(),
            )),
            project_service: Arc::new(ProjectService::new(project_repo.clone(), team_repo)),
            task_service: Arc::new(TaskService::new(task_repo, project_repo, employee_repo)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        .nest("/api", handlers::router())
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orgtrack_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrgTrack API...");

    let config = Config::from_env();

    tracing::info!("Connecting to database...");
    let db = adapters::sql::connect(&config.database_url).await?;

    if config.run_migrations {
        adapters::sql::migrate(&db).await?;
    }

    let app = build_router(AppState::new(db));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
