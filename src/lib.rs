//! Rental marketplace conformance harness
//!
//! Exercises the marketplace HTTP API as an external client and checks a
//! multi-step workflow (registration, roles, profiles, listings, reviews,
//! access control) against a fixed contract.

pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod http;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use harness::{run_scenario, RunReport};
