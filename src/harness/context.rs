//! Per-run context handed to every phase

use colored::Colorize;

use super::checks::CheckLog;
use super::fixtures::Fixtures;
use super::state::{Actor, ScenarioState};
use crate::http::{Auth, Call, Exchange, Executor};

/// What the sequencer does after a phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseFlow {
    Continue,
    /// A prerequisite failed; nothing after this can be meaningful
    Abort(String),
}

impl PhaseFlow {
    pub fn abort(reason: impl Into<String>) -> Self {
        PhaseFlow::Abort(reason.into())
    }
}

pub struct RunContext<'a> {
    executor: &'a Executor,
    pub state: ScenarioState,
    pub checks: CheckLog,
    pub fixtures: Fixtures,
}

impl<'a> RunContext<'a> {
    pub fn new(executor: &'a Executor, fixtures: Fixtures) -> Self {
        Self {
            executor,
            state: ScenarioState::new(),
            checks: CheckLog::new(),
            fixtures,
        }
    }

    pub async fn send(&self, call: Call) -> Exchange {
        self.executor.execute(call).await
    }

    pub fn check(&mut self, condition: bool, name: impl Into<String>) -> bool {
        self.checks.check(condition, name)
    }

    /// Bearer credential for `actor`, or no credential if none was issued
    pub fn auth(&self, actor: Actor) -> Auth {
        self.state
            .token(actor)
            .map(|token| Auth::Bearer(token.to_string()))
            .unwrap_or_default()
    }

    /// Announce the next step
    pub fn step(&self, description: impl AsRef<str>) {
        println!("  {}", description.as_ref());
    }

    /// Announce a step that cannot run for lack of an artifact
    pub fn skip(&self, description: &str, reason: &str) {
        println!(
            "  {}",
            format!("Skipping {}: {}", description, reason).yellow()
        );
        tracing::info!(step = description, reason, "Step skipped");
    }
}
