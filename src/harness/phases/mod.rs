//! Steps of each phase
//!
//! Every phase reads and writes the shared `RunContext` and reports whether
//! the run may continue. Only prerequisite failures abort.

mod access;
mod auth;
mod edge;
mod health;
mod listings;
mod profile;
mod reviews;
mod roles;

use super::context::{PhaseFlow, RunContext};
use super::plan::Phase;

/// Execute every step of `phase`
pub async fn run(phase: Phase, ctx: &mut RunContext<'_>) -> PhaseFlow {
    match phase {
        Phase::Health => health::run(ctx).await,
        Phase::Auth => auth::run(ctx).await,
        Phase::RoleSelection => roles::run(ctx).await,
        Phase::OwnerProfile => profile::run(ctx).await,
        Phase::Listings => listings::run(ctx).await,
        Phase::Reviews => reviews::run(ctx).await,
        Phase::AccessControl => access::run(ctx).await,
        Phase::EdgeCases => edge::run(ctx).await,
    }
}
