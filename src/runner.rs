//! Fixture conformance runner
//!
//! Maps each discovered fixture pair through the transformation
//! collaborator and compares the produced text against the golden
//! expected output. Broken pairing halts the run before any case
//! executes; everything else is recorded per-case and the run continues.

use crate::compare::{compare, Diff};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::fixture::{content_hash, discover, FixturePair};
use crate::lang::Lang;
use crate::transform::Transform;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Run all fixture cases in a directory
pub fn run(dir: &Path, transform: &dyn Transform) -> Result<RunReport> {
    Runner::new().run(dir, transform)
}

/// Conformance runner
pub struct Runner {
    config: RunConfig,
}

/// Outcome of a single fixture case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CaseStatus {
    /// Produced text matches the expected output
    Passed,
    /// Collaborator produced wrong output
    Failed,
    /// Case could not be compared (unreadable fixture or collaborator error)
    Errored,
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::Passed => write!(f, "passed"),
            CaseStatus::Failed => write!(f, "failed"),
            CaseStatus::Errored => write!(f, "errored"),
        }
    }
}

/// Result of one fixture case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CaseResult {
    pub case: String,
    pub source: Lang,
    pub target: Lang,
    pub status: CaseStatus,
    /// Present when the collaborator produced wrong output
    pub diff: Option<Diff>,
    /// Present when the case errored
    pub error: Option<String>,
    pub input_hash: Option<String>,
    pub expected_hash: Option<String>,
}

/// Aggregate counts for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

/// Full report of a conformance run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunReport {
    pub fixture_dir: String,
    pub transform: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    #[schemars(with = "String")]
    pub generated_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub results: Vec<CaseResult>,
}

impl RunReport {
    /// Whether every case passed
    pub fn passed(&self) -> bool {
        self.summary.failed == 0 && self.summary.errored == 0
    }

    /// Human-readable report
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Conformance run: {} ({} case(s), transform: {})\n\n",
            self.fixture_dir, self.summary.total, self.transform
        ));

        for result in &self.results {
            match result.status {
                CaseStatus::Passed => {
                    out.push_str(&format!(
                        "✓ {}: passed ({} → {})\n",
                        result.case, result.source, result.target
                    ));
                }
                CaseStatus::Failed => {
                    let line = result.diff.as_ref().map(|d| d.first_mismatch).unwrap_or(0);
                    out.push_str(&format!(
                        "✗ {}: output mismatch at line {} ({} → {})\n",
                        result.case, line, result.source, result.target
                    ));
                    if let Some(diff) = &result.diff {
                        for diff_line in diff.rendered.lines() {
                            out.push_str(&format!("    {}\n", diff_line));
                        }
                    }
                }
                CaseStatus::Errored => {
                    out.push_str(&format!(
                        "✗ {}: {}\n",
                        result.case,
                        result.error.as_deref().unwrap_or("errored")
                    ));
                }
            }
        }

        out.push_str(&format!(
            "\nSummary: {} passed, {} failed, {} errored\n",
            self.summary.passed, self.summary.failed, self.summary.errored
        ));
        out
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
        }
    }

    pub fn with_config(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run all selected fixture cases in a directory
    ///
    /// Discovery errors (broken pairing, unreadable directory) are fatal;
    /// per-case errors are recorded and the run continues.
    pub fn run(&self, dir: &Path, transform: &dyn Transform) -> Result<RunReport> {
        let pairs = discover(dir)?;
        let pairs: Vec<FixturePair> = pairs
            .into_iter()
            .filter(|p| self.config.selects(&p.case))
            .collect();

        if pairs.is_empty() {
            return Err(Error::Config(format!(
                "No fixture pairs selected in {}",
                dir.display()
            )));
        }

        let results: Vec<CaseResult> = pairs
            .iter()
            .map(|pair| self.run_case(pair, transform))
            .collect();

        let summary = RunSummary {
            total: results.len(),
            passed: results
                .iter()
                .filter(|r| r.status == CaseStatus::Passed)
                .count(),
            failed: results
                .iter()
                .filter(|r| r.status == CaseStatus::Failed)
                .count(),
            errored: results
                .iter()
                .filter(|r| r.status == CaseStatus::Errored)
                .count(),
        };

        Ok(RunReport {
            fixture_dir: dir.display().to_string(),
            transform: transform.name().to_string(),
            generated_at: Utc::now(),
            summary,
            results,
        })
    }

    fn run_case(&self, pair: &FixturePair, transform: &dyn Transform) -> CaseResult {
        let mut result = CaseResult {
            case: pair.case.clone(),
            source: pair.input.lang,
            target: pair.expected.lang,
            status: CaseStatus::Errored,
            diff: None,
            error: None,
            input_hash: None,
            expected_hash: None,
        };

        let input_text = match std::fs::read_to_string(&pair.input.path) {
            Ok(text) => text,
            Err(e) => {
                result.error = Some(format!(
                    "Unreadable input {}: {}",
                    pair.input.path.display(),
                    e
                ));
                return result;
            }
        };
        result.input_hash = Some(content_hash(&input_text));

        let expected_text = match std::fs::read_to_string(&pair.expected.path) {
            Ok(text) => text,
            Err(e) => {
                result.error = Some(format!(
                    "Unreadable expected output {}: {}",
                    pair.expected.path.display(),
                    e
                ));
                return result;
            }
        };
        result.expected_hash = Some(content_hash(&expected_text));

        let produced = match transform.apply(&input_text, pair.input.lang, pair.expected.lang) {
            Ok(text) => text,
            Err(e) => {
                result.error = Some(format!("Transform errored: {}", e));
                return result;
            }
        };

        match compare(&produced, &expected_text) {
            None => result.status = CaseStatus::Passed,
            Some(diff) => {
                result.status = CaseStatus::Failed;
                result.diff = Some(diff);
            }
        }

        result
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Identity;
    use std::fs;
    use tempfile::TempDir;

    struct FailingTransform;

    impl Transform for FailingTransform {
        fn apply(&self, _input: &str, _source: Lang, _target: Lang) -> Result<String> {
            Err(Error::Transform("unsupported construct".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn identity_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("case_input.kt"), "val x = 1\n").unwrap();
        fs::write(dir.path().join("case_output.kt"), "val x = 1\n").unwrap();
        dir
    }

    #[test]
    fn test_identity_run_passes() {
        let dir = identity_dir();
        let report = run(dir.path(), &Identity).unwrap();
        assert!(report.passed());
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.results[0].status, CaseStatus::Passed);
        assert!(report.results[0].input_hash.is_some());
    }

    #[test]
    fn test_divergence_fails_with_diff() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("case_input.kt"), "val x = 1\n").unwrap();
        fs::write(dir.path().join("case_output.kt"), "val x = 2\n").unwrap();

        let report = run(dir.path(), &Identity).unwrap();
        assert!(!report.passed());
        assert_eq!(report.summary.failed, 1);
        let diff = report.results[0].diff.as_ref().unwrap();
        assert!(!diff.rendered.is_empty());
    }

    #[test]
    fn test_transform_error_recorded_as_errored() {
        let dir = identity_dir();
        let report = run(dir.path(), &FailingTransform).unwrap();
        assert_eq!(report.summary.errored, 1);
        assert_eq!(report.results[0].status, CaseStatus::Errored);
        assert!(report.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("Transform errored"));
    }

    #[test]
    fn test_broken_pairing_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("case_input.kt"), "val x = 1\n").unwrap();

        let err = run(dir.path(), &Identity).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_case_filter() {
        let dir = TempDir::new().unwrap();
        for case in ["alpha", "beta"] {
            fs::write(dir.path().join(format!("{}_input.kt", case)), "x\n").unwrap();
            fs::write(dir.path().join(format!("{}_output.kt", case)), "x\n").unwrap();
        }

        let runner = Runner::with_config(RunConfig {
            cases: vec!["alpha".into()],
            ..Default::default()
        });
        let report = runner.run(dir.path(), &Identity).unwrap();
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.results[0].case, "alpha");
    }

    #[test]
    fn test_empty_selection_is_config_error() {
        let dir = identity_dir();
        let runner = Runner::with_config(RunConfig {
            cases: vec!["missing".into()],
            ..Default::default()
        });
        let err = runner.run(dir.path(), &Identity).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_to_report_summary_line() {
        let dir = identity_dir();
        let report = run(dir.path(), &Identity).unwrap();
        let text = report.to_report();
        assert!(text.contains("✓ case: passed"));
        assert!(text.contains("Summary: 1 passed, 0 failed, 0 errored"));
    }
}
