//! Assertion recording
//!
//! `CheckLog::check` never fails and never halts the run; it just records
//! the verdict under the current phase and prints it.

use colored::Colorize;
use serde::Serialize;

use super::plan::Phase;

/// One named assertion and its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    pub phase: Option<Phase>,
    pub name: String,
    pub passed: bool,
}

#[derive(Debug, Default)]
pub struct CheckLog {
    records: Vec<CheckRecord>,
    phase: Option<Phase>,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag subsequent checks with `phase`
    pub fn enter_phase(&mut self, phase: Phase) {
        self.phase = Some(phase);
    }

    /// Record a check and return its verdict
    pub fn check(&mut self, condition: bool, name: impl Into<String>) -> bool {
        let name = name.into();
        if condition {
            println!("  {} {}", "✓".green(), name.green());
        } else {
            println!("  {} {}", "✗".red(), name.red());
        }
        tracing::debug!(phase = ?self.phase, check = %name, passed = condition, "Check recorded");

        self.records.push(CheckRecord {
            phase: self.phase,
            name,
            passed: condition,
        });
        condition
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.passed()
    }

    pub fn into_records(self) -> Vec<CheckRecord> {
        self.records
    }
}
