//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod sql;

pub use sql::{
    SqlEmployeeRepository, SqlProjectRepository, SqlTaskRepository, SqlTeamRepository,
};
