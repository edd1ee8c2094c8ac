//! Domain ports (traits)
//!
//! Port traits define the persistence gateway the services require.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;

pub use repositories::{
    EmployeeRepository, ProjectRepository, TaskRepository, TeamRemoval, TeamRepository,
};
