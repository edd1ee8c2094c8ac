//! SeaORM entity models
//!
//! One module per table. Domain conversions live next to the repositories
//! in `adapters::sql`.

pub mod employees;
pub mod projects;
pub mod task_employees;
pub mod tasks;
pub mod team_employees;
pub mod teams;
