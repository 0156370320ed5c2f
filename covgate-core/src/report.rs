//! Plain-text rendering of evaluation results for notification surfaces.
//!
//! Three independent renderers feed the text macros consumed by downstream
//! templates; each macro key resolves through [`TokenName`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CoverageReport;
use crate::evaluate::Evaluation;

/// Visual separator between failed-test sections.
pub const SEPARATOR: &str = "___________________________________________";

const MESSAGE_HEADER: &str = "-------- Message --------";
const STACKTRACE_HEADER: &str = "-------- Stacktrace --------";

/// One failed test, as reported by the host's test-result provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedTest {
    /// Fully qualified test name.
    pub full_name: String,
    /// Failure message; may be empty.
    #[serde(default)]
    pub error_details: String,
    /// Captured stderr / stack trace; may be empty.
    #[serde(default)]
    pub stderr: String,
}

/// Lookup keys of the three text surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenName {
    /// `COVERAGE_RESULT`: percentage plus qualitative status.
    CoverageResult,
    /// `COVERAGE_STATUS`: per-bucket file counts.
    CoverageStatus,
    /// `TEST_RESULT`: build health plus failed-test detail.
    TestResult,
}

impl TokenName {
    /// Resolve a macro name, case-insensitively. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("COVERAGE_RESULT") {
            Some(Self::CoverageResult)
        } else if name.eq_ignore_ascii_case("COVERAGE_STATUS") {
            Some(Self::CoverageStatus)
        } else if name.eq_ignore_ascii_case("TEST_RESULT") {
            Some(Self::TestResult)
        } else {
            None
        }
    }

    /// Canonical macro key for this surface.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CoverageResult => "COVERAGE_RESULT",
            Self::CoverageStatus => "COVERAGE_STATUS",
            Self::TestResult => "TEST_RESULT",
        }
    }
}

/// Render the coverage-result summary.
///
/// Empty when the report carries no coverage data.
pub fn render_coverage_result(evaluation: &Evaluation) -> String {
    if !evaluation.report.has_coverage_data() {
        return String::new();
    }
    format!(
        "Coverage Result: {}% of code coverage, {} status.",
        evaluation.percentage, evaluation.status
    )
}

/// Render the coverage-status summary.
///
/// Empty when the report carries no analysis data.
pub fn render_coverage_status(report: &CoverageReport) -> String {
    if !report.has_analysis_data() {
        return String::new();
    }
    format!("Coverage Status: {}", report.file_coverage_status())
}

/// Render the failed-test detail block.
///
/// Starts with the build-health description. Each failure is introduced by a
/// separator line and its full name; message and stacktrace blocks appear only
/// when their content trims non-empty. A trailing separator follows the last
/// failure only.
pub fn render_test_result(health_description: &str, failures: &[FailedTest]) -> String {
    let mut output = String::from(health_description);
    for failure in failures {
        let _ = write!(output, "\n{SEPARATOR}\n{}", failure.full_name);
        if !failure.error_details.trim().is_empty() {
            let _ = write!(output, "\n{MESSAGE_HEADER}\n{}", failure.error_details);
        }
        if !failure.stderr.trim().is_empty() {
            let _ = write!(output, "\n{STACKTRACE_HEADER}\n{}", failure.stderr);
        }
    }
    if !failures.is_empty() {
        let _ = write!(output, "\n{SEPARATOR}");
    }
    output
}
