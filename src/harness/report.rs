//! Run summary
//!
//! The run succeeds only when no check failed and no prerequisite aborted it.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use super::checks::CheckRecord;
use super::plan::Phase;
use crate::common::Result;

/// Why and where a run stopped early
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Abort {
    pub phase: Phase,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub records: Vec<CheckRecord>,
    pub abort: Option<Abort>,
    pub skipped: Vec<Phase>,
}

/// Counts as written to the JSON report
#[derive(Serialize)]
struct Summary<'a> {
    total: usize,
    passed: usize,
    failed: usize,
    success_rate: f64,
    success: bool,
    #[serde(flatten)]
    report: &'a RunReport,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn passed(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Percentage of passed checks; 0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed() as f64 / self.total() as f64 * 100.0
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.abort.is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().filter(|r| !r.passed)
    }

    /// Look up a check by name (first match)
    pub fn find(&self, name: &str) -> Option<&CheckRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn print_summary(&self) {
        println!("\n{}", "TEST RESULTS SUMMARY".bold());
        println!("Total Tests: {}", self.total());
        println!("{}", format!("Passed: {}", self.passed()).green());

        let failed = format!("Failed: {}", self.failed());
        if self.failed() > 0 {
            println!("{}", failed.red());
        } else {
            println!("{}", failed.green());
        }

        let rate = self.success_rate();
        let rate_line = format!("Success Rate: {:.1}%", rate);
        if rate >= 90.0 {
            println!("{}", rate_line.green());
        } else if rate >= 70.0 {
            println!("{}", rate_line.yellow());
        } else {
            println!("{}", rate_line.red());
        }

        if self.failed() > 0 {
            println!("\n{}", "Failed checks:".red());
            let mut current: Option<Option<Phase>> = None;
            for record in self.failures() {
                if current != Some(record.phase) {
                    if let Some(phase) = record.phase {
                        println!("  {}", phase.title().dimmed());
                    }
                    current = Some(record.phase);
                }
                println!("    {} {}", "✗".red(), record.name);
            }
        }

        if let Some(abort) = &self.abort {
            println!(
                "\n{} {} ({})",
                "Run aborted:".red().bold(),
                abort.reason,
                abort.phase.title()
            );
            if !self.skipped.is_empty() {
                let skipped: Vec<&str> = self.skipped.iter().map(|p| p.title()).collect();
                println!("  Skipped phases: {}", skipped.join(", ").dimmed());
            }
        }

        if self.is_success() {
            println!(
                "\n{} {}",
                "✓".green().bold(),
                "ALL TESTS PASSED! Backend API is working correctly.".green().bold()
            );
        } else if self.failed() > 0 {
            println!(
                "\n{}",
                format!(
                    "{} test(s) failed. Please check the issues above.",
                    self.failed()
                )
                .yellow()
            );
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let summary = Summary {
            total: self.total(),
            passed: self.passed(),
            failed: self.failed(),
            success_rate: self.success_rate(),
            success: self.is_success(),
            report: self,
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(phase: Phase, name: &str, passed: bool) -> CheckRecord {
        CheckRecord {
            phase: Some(phase),
            name: name.to_string(),
            passed,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = RunReport {
            records: Vec::new(),
            abort: None,
            skipped: Vec::new(),
        };
        assert_eq!(report.total(), 0);
        assert_eq!(report.success_rate(), 0.0);
        assert!(report.is_success());
    }

    #[test]
    fn test_counts_and_rate() {
        let report = RunReport {
            records: vec![
                record(Phase::Health, "API Health Check", true),
                record(Phase::Auth, "Owner registration success", true),
                record(Phase::Auth, "Duplicate registration prevented", false),
                record(Phase::Reviews, "Duplicate review blocked", true),
            ],
            abort: None,
            skipped: Vec::new(),
        };
        assert_eq!(report.total(), 4);
        assert_eq!(report.passed(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.success_rate(), 75.0);
        assert!(!report.is_success());
        assert_eq!(
            report.failures().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["Duplicate registration prevented"]
        );
    }

    #[test]
    fn test_abort_fails_run_even_without_failed_checks() {
        let report = RunReport {
            records: vec![record(Phase::Auth, "Owner registration success", true)],
            abort: Some(Abort {
                phase: Phase::RoleSelection,
                reason: "Missing customer token".to_string(),
            }),
            skipped: vec![Phase::OwnerProfile],
        };
        assert_eq!(report.failed(), 0);
        assert!(!report.is_success());
    }

    #[test]
    fn test_json_summary_includes_counts_and_records() {
        let report = RunReport {
            records: vec![record(Phase::Health, "API Health Check", false)],
            abort: Some(Abort {
                phase: Phase::Health,
                reason: "Backend API is not responding".to_string(),
            }),
            skipped: vec![Phase::Auth],
        };
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["success"], false);
        assert_eq!(value["records"][0]["phase"], "health");
        assert_eq!(value["abort"]["phase"], "health");
        assert_eq!(value["skipped"][0], "auth");
    }
}
