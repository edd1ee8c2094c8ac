//! Domain layer
//!
//! Contains pure business types with no framework dependencies.
//! - `entities`: Employee, Team, Project and Task
//! - `ports`: Repository traits the services depend on

pub mod entities;
pub mod ports;
