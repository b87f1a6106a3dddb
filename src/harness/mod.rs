//! Conformance scenario engine
//!
//! Threads credentials and identifiers between otherwise independent HTTP
//! calls, runs the phases in their declared order, records every check and
//! aggregates them into a single pass/fail report.

mod checks;
mod context;
mod fixtures;
mod phases;
mod plan;
mod report;
mod runner;
mod state;

pub use checks::{CheckLog, CheckRecord};
pub use fixtures::{Fixtures, ListingFixture, ProfileFixture, UserFixture};
pub use plan::{validate, Phase};
pub use report::{Abort, RunReport};
pub use runner::{run_phases, run_scenario};
pub use state::{Actor, Artifact, Entity, ScenarioState, ABSENT_ID};
