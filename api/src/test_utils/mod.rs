//! Test utilities
//!
//! In-memory repositories and fixtures for unit testing the services.
//! One `InMemoryStore` implements all four repository traits so cascades
//! and join-row cleanup can be observed from any of them.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
