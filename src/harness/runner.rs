//! Step sequencer
//!
//! Runs phases strictly in order on one task. A phase whose required
//! credentials are missing, or whose prerequisite step fails, aborts the
//! run; every later phase is skipped.

use colored::Colorize;

use super::context::{PhaseFlow, RunContext};
use super::fixtures::Fixtures;
use super::phases;
use super::plan::{self, Phase};
use super::report::{Abort, RunReport};
use super::state::ScenarioState;
use crate::common::Result;
use crate::http::Executor;

/// Run the full fixed scenario
pub async fn run_scenario(executor: &Executor) -> Result<RunReport> {
    run_phases(executor, &Phase::ALL, Fixtures::default()).await
}

/// Run an ordered selection of phases with the given fixtures
///
/// The plan is validated before any request is sent.
pub async fn run_phases(
    executor: &Executor,
    phases: &[Phase],
    fixtures: Fixtures,
) -> Result<RunReport> {
    plan::validate(phases)?;

    let mut ctx = RunContext::new(executor, fixtures);
    let mut abort: Option<Abort> = None;
    let mut skipped = Vec::new();

    for (i, &phase) in phases.iter().enumerate() {
        if abort.is_some() {
            skipped.push(phase);
            continue;
        }

        println!("\n{}", format!("{}. {}", i + 1, phase.title()).blue().bold());
        ctx.checks.enter_phase(phase);
        tracing::info!(phase = ?phase, "Phase started");

        let flow = match missing_credential(&ctx.state, phase) {
            Some(reason) => PhaseFlow::Abort(reason),
            None => phases::run(phase, &mut ctx).await,
        };

        if let PhaseFlow::Abort(reason) = flow {
            println!("  {} {}. Stopping tests.", "✗".red(), reason.red());
            tracing::warn!(phase = ?phase, %reason, "Run aborted");
            abort = Some(Abort { phase, reason });
        }
    }

    Ok(RunReport {
        records: ctx.checks.into_records(),
        abort,
        skipped,
    })
}

/// A credential the phase reads but no earlier step managed to obtain
fn missing_credential(state: &ScenarioState, phase: Phase) -> Option<String> {
    phase
        .requires()
        .iter()
        .find(|artifact| artifact.is_credential() && !state.has(**artifact))
        .map(|artifact| format!("Cannot proceed without {}", artifact))
}
