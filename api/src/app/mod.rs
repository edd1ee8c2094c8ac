//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services enforce the relationship and lifecycle rules between domain
//! entities and delegate persistence to the repository ports.

pub mod employee_service;
pub mod project_service;
pub mod task_service;
pub mod team_service;

pub use employee_service::EmployeeService;
pub use project_service::ProjectService;
pub use task_service::TaskService;
pub use team_service::{TeamService, TeamWithProjects};
