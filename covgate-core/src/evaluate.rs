//! Build-gate evaluation: load a report, compare it to the configured
//! minimum, and hand the verdict back to the host.

use std::path::Path;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classify::{CoverageStatus, color_for, status_for};
use crate::domain::CoverageReport;
use crate::error::Result;
use crate::fs::FileSystem;

/// Gate configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    /// Report file name, relative to the build workspace.
    #[serde(default = "default_report_file")]
    pub report_file: String,
    /// Minimum coverage percentage required to pass the gate.
    #[serde(default)]
    pub minimum_coverage: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            report_file: default_report_file(),
            minimum_coverage: 0.0,
        }
    }
}

fn default_report_file() -> String {
    "coverage.json".to_string()
}

/// Terminal status of a build, set exactly once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    /// The build passed the coverage gate.
    Success,
    /// The build failed the coverage gate or the report could not be read.
    Failure,
}

/// Host collaborator that receives log lines and the terminal build status.
#[cfg_attr(test, mockall::automock)]
pub trait BuildListener {
    /// Append a line to the build log.
    fn log(&mut self, line: &str);
    /// Record the build's terminal status.
    fn set_build_status(&mut self, status: BuildStatus);
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Coverage percentage rounded to two decimal places.
    pub percentage: f64,
    /// Qualitative status of the percentage.
    pub status: CoverageStatus,
    /// Display color of the percentage's threshold band.
    pub color: String,
    /// Whether the build passed the gate.
    pub passed: bool,
    /// Human-readable gate message.
    pub message: String,
    /// The report the evaluation ran against.
    #[serde(skip)]
    pub report: CoverageReport,
}

/// Evaluates coverage reports against a configured gate.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: GateConfig,
}

impl Evaluator {
    /// Create an evaluator for the given gate configuration.
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// The gate configuration this evaluator runs with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate the workspace's coverage report against the gate.
    ///
    /// A missing report file is a soft condition: the evaluation logs a
    /// diagnostic and continues with an empty report, so the fail-open gating
    /// below lets the build pass. An unreadable or unparseable report is
    /// terminal: the build is marked failed and the error propagates.
    ///
    /// The gate fails the build only when the report actually carries
    /// coverage data and its rounded percentage sits below the minimum.
    pub fn evaluate<F, L>(&self, workspace: &Path, fs: &F, listener: &mut L) -> Result<Evaluation>
    where
        F: FileSystem,
        L: BuildListener,
    {
        let minimum = self.config.minimum_coverage;
        listener.log(&format!("Minimum Coverage:{minimum}%"));

        let path = workspace.join(&self.config.report_file);
        let report = if fs.exists(&path) {
            match fs
                .read_to_string(&path)
                .and_then(|text| CoverageReport::from_json(&text))
            {
                Ok(report) => report,
                Err(error) => {
                    listener.log(&format!("Unable to read coverage data: {error}"));
                    listener.set_build_status(BuildStatus::Failure);
                    return Err(error);
                }
            }
        } else {
            listener.log(&format!("{} was not found", path.display()));
            CoverageReport::default()
        };

        let percentage = report.rounded_percentage(2);
        let failed = report.has_coverage_data() && percentage < minimum;
        let message = if failed {
            let message = format!(
                "Percentage coverage ({percentage}%) is less than minimum coverage({minimum}%)"
            );
            listener.log(&message);
            message
        } else {
            format!("Minimum Coverage:{minimum}%")
        };

        listener.set_build_status(if failed {
            BuildStatus::Failure
        } else {
            BuildStatus::Success
        });
        listener.log(&format!(
            "Publishing coverage results from:{}",
            self.config.report_file
        ));

        Ok(Evaluation {
            percentage,
            status: status_for(percentage),
            color: color_for(percentage).to_string(),
            passed: !failed,
            message,
            report,
        })
    }
}
