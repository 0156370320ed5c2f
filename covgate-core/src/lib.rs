#![deny(missing_docs)]
//! CovGate core library.
//!
//! This crate contains the coverage-report data model and the gate evaluation
//! engine: percentage arithmetic, threshold-band classification, pass/fail
//! gating, and plain-text rendering for the notification surfaces.

pub mod classify;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod fs;
pub mod report;

pub use classify::{
    CoverageStatus, DASHBOARD_ALERT_COLOR, DASHBOARD_OK_COLOR, DEFAULT_COLOR, color_for,
    dashboard_color, status_for,
};
pub use domain::{Cell, CoverageReport, chart_rows, rounded_value};
pub use error::{CovGateError, Result};
pub use evaluate::{BuildListener, BuildStatus, Evaluation, Evaluator, GateConfig};
pub use fs::{FileSystem, StdFileSystem};
pub use report::{
    FailedTest, SEPARATOR, TokenName, render_coverage_result, render_coverage_status,
    render_test_result,
};
