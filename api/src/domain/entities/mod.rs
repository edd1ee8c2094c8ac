//! Domain entities
//!
//! Pure domain models for the four organizational records.
//! These are separate from the SeaORM entities in the `entity` module.
//! Relationships are held as identifiers, never as object references.

pub mod employee;
pub mod project;
pub mod task;
pub mod team;

pub use employee::{Employee, EmployeeId, NewEmployee};
pub use project::{NewProject, Project, ProjectId, ProjectStatus};
pub use task::{NewTask, Task, TaskId, TaskPriority, TaskStatus};
pub use team::{NewTeam, Team, TeamId};
