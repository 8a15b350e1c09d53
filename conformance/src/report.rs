//! Findings of one conformance run, grouped by the stage that produced them.
//!
//! A run moves through [`Stage::Syntax`], [`Stage::Structure`] and
//! [`Stage::Inventory`]. Each stage records its findings through a
//! [`StageLog`]; a stage that cannot run is marked skipped with a reason
//! instead.

use std::fmt;
use std::path::{Path, PathBuf};

/// A step of the conformance run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// The artifact parses in its format.
    Syntax,
    /// The header and the link/joint TBox are declared.
    Structure,
    /// The individuals and relations of the source URDF are present.
    Inventory,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Stage; 3] = [Stage::Syntax, Stage::Structure, Stage::Inventory];

    /// Lowercase stage name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stage::Syntax => "syntax",
            Stage::Structure => "structure",
            Stage::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How bad a finding is. Ordered, so the worst of several is their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The check holds.
    Pass,
    /// Suspicious, but the artifact still conforms.
    Warning,
    /// The artifact does not conform.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Warning => "WARN",
            Self::Failure => "FAIL",
        })
    }
}

/// One observation about the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Stage that made the observation.
    pub stage: Stage,
    /// How bad it is.
    pub severity: Severity,
    /// One-line summary.
    pub message: String,
    /// Offending terms or parser output, one per line.
    pub details: Vec<String>,
}

impl Finding {
    /// Returns `true` if this finding breaks conformance.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Everything a conformance run found about one artifact.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    artifact: PathBuf,
    findings: Vec<Finding>,
    skipped: Vec<(Stage, String)>,
}

impl ConformanceReport {
    /// An empty report for `artifact`.
    pub fn new(artifact: impl Into<PathBuf>) -> Self {
        Self {
            artifact: artifact.into(),
            findings: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// The artifact under check.
    #[must_use]
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Records findings for `stage`.
    pub fn stage(&mut self, stage: Stage) -> StageLog<'_> {
        StageLog {
            report: self,
            stage,
        }
    }

    /// Marks `stage` as not run.
    pub fn skip(&mut self, stage: Stage, reason: impl Into<String>) {
        self.skipped.push((stage, reason.into()));
    }

    /// All findings in the order they were recorded.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings of one stage.
    pub fn findings_for(&self, stage: Stage) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.stage == stage)
    }

    /// Why `stage` was skipped, if it was.
    #[must_use]
    pub fn skip_reason(&self, stage: Stage) -> Option<&str> {
        self.skipped
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, reason)| reason.as_str())
    }

    /// Worst severity recorded by `stage`; `None` if it recorded nothing,
    /// which is the case for skipped stages.
    #[must_use]
    pub fn outcome(&self, stage: Stage) -> Option<Severity> {
        self.findings_for(stage).map(|f| f.severity).max()
    }

    /// Number of findings with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Number of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns `true` if nothing failed. Skipped stages do not fail a run.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Records findings under one [`Stage`] of a [`ConformanceReport`].
#[derive(Debug)]
pub struct StageLog<'r> {
    report: &'r mut ConformanceReport,
    stage: Stage,
}

impl StageLog<'_> {
    /// A check that held.
    pub fn pass(&mut self, message: impl Into<String>) {
        self.record(Severity::Pass, message, Vec::new());
    }

    /// A non-blocking observation, with optional detail lines.
    pub fn warn(&mut self, message: impl Into<String>, details: Vec<String>) {
        self.record(Severity::Warning, message, details);
    }

    /// A check that failed, with optional detail lines.
    pub fn fail(&mut self, message: impl Into<String>, details: Vec<String>) {
        self.record(Severity::Failure, message, details);
    }

    fn record(&mut self, severity: Severity, message: impl Into<String>, details: Vec<String>) {
        self.report.findings.push(Finding {
            stage: self.stage,
            severity,
            message: message.into(),
            details,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_is_the_worst_finding_of_the_stage() {
        let mut report = ConformanceReport::new("robot.owl");
        report.stage(Stage::Syntax).pass("parses");
        let mut structure = report.stage(Stage::Structure);
        structure.pass("header");
        structure.warn("odd", vec!["x".to_owned()]);
        structure.pass("classes");

        assert_eq!(report.outcome(Stage::Syntax), Some(Severity::Pass));
        assert_eq!(report.outcome(Stage::Structure), Some(Severity::Warning));
        assert_eq!(report.outcome(Stage::Inventory), None);
        assert_eq!(report.findings_for(Stage::Structure).count(), 3);
        assert!(report.all_passed());
    }

    #[test]
    fn skipped_stage_records_reason_and_no_findings() {
        let mut report = ConformanceReport::new("robot.owl");
        report.stage(Stage::Syntax).fail("not XML", vec!["line 1".to_owned()]);
        report.skip(Stage::Structure, "artifact did not parse");

        assert_eq!(report.skip_reason(Stage::Structure), Some("artifact did not parse"));
        assert_eq!(report.skip_reason(Stage::Syntax), None);
        assert_eq!(report.outcome(Stage::Structure), None);
        assert_eq!(report.failure_count(), 1);
        assert!(report.findings()[0].is_failure());
        assert_eq!(report.artifact(), Path::new("robot.owl"));
    }

    #[test]
    fn stages_sort_in_execution_order() {
        let mut stages = [Stage::Inventory, Stage::Syntax, Stage::Structure];
        stages.sort();
        assert_eq!(stages, Stage::ALL);
        assert_eq!(Stage::Inventory.to_string(), "inventory");
    }
}
