#![deny(missing_docs)]
//! CovGate command-line interface.
//!
//! Plays the build-host role: reads the coverage report from a build
//! workspace, evaluates it against the configured gate, prints the requested
//! text surfaces, and maps the verdict to the process exit code.

use clap::{Parser, ValueEnum};
use covgate_core::{
    BuildListener, BuildStatus, Evaluation, Evaluator, FailedTest, GateConfig, StdFileSystem,
    TokenName, chart_rows, dashboard_color, render_coverage_result, render_coverage_status,
    render_test_result,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
#[cfg(not(test))]
use std::process::ExitCode;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[cfg(not(test))]
const EXIT_FAILED: u8 = 1;
#[cfg(not(test))]
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "covgate", version, about = "Coverage gate CLI")]
struct Cli {
    /// Build workspace root containing the coverage report.
    #[arg(long, default_value = ".")]
    workspace: PathBuf,
    /// Workspace-relative coverage report file.
    #[arg(long)]
    report: Option<String>,
    /// Minimum coverage percentage required to pass the gate.
    #[arg(long)]
    minimum: Option<f64>,
    /// JSON file with gate configuration; flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON file with the test runner's results, used by the TEST_RESULT
    /// surface.
    #[arg(long = "test-results")]
    test_results: Option<PathBuf>,
    /// Print a single surface by its macro name instead of the full summary.
    #[arg(long)]
    token: Option<String>,
    /// Output format for the evaluation summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

/// Test results supplied by the host's test runner.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestResults {
    #[serde(default)]
    health_description: String,
    #[serde(default)]
    failed_tests: Vec<FailedTest>,
}

/// Build listener that forwards log lines to the process logger and records
/// the terminal status.
#[derive(Debug, Default)]
struct HostListener {
    status: Option<BuildStatus>,
}

impl BuildListener for HostListener {
    fn log(&mut self, line: &str) {
        log::info!("{line}");
    }

    fn set_build_status(&mut self, status: BuildStatus) {
        self.status = Some(status);
    }
}

#[cfg(not(test))]
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(error) => {
            eprintln!("covgate: {error}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
fn main() {}

fn run(cli: Cli) -> CliResult<bool> {
    let config = resolve_config(
        cli.config.as_deref(),
        cli.report.as_deref(),
        cli.minimum,
    )?;
    let token = match cli.token.as_deref() {
        Some(name) => Some(
            TokenName::parse(name).ok_or_else(|| format!("unknown token name: {name}"))?,
        ),
        None => None,
    };
    let test_results = load_test_results(cli.test_results.as_deref())?;

    let evaluator = Evaluator::new(config);
    let fs = StdFileSystem::new();
    let mut listener = HostListener::default();
    let evaluation = evaluator.evaluate(&cli.workspace, &fs, &mut listener)?;

    let output = match cli.format {
        OutputFormat::Text => render_text(&evaluation, &test_results, token),
        OutputFormat::Json => {
            render_json_summary(&evaluation, evaluator.config().minimum_coverage)?
        }
    };
    if !output.is_empty() {
        println!("{output}");
    }

    // The verdict comes from the build-status channel the host listens on.
    Ok(matches!(listener.status, Some(BuildStatus::Success)))
}

fn resolve_config(
    config_file: Option<&Path>,
    report: Option<&str>,
    minimum: Option<f64>,
) -> CliResult<GateConfig> {
    let mut config = match config_file {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => GateConfig::default(),
    };
    if let Some(report) = report {
        config.report_file = report.to_string();
    }
    if let Some(minimum) = minimum {
        config.minimum_coverage = minimum;
    }
    Ok(config)
}

fn load_test_results(path: Option<&Path>) -> CliResult<TestResults> {
    let Some(path) = path else {
        return Ok(TestResults::default());
    };
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn render_text(
    evaluation: &Evaluation,
    test_results: &TestResults,
    token: Option<TokenName>,
) -> String {
    match token {
        Some(TokenName::CoverageResult) => render_coverage_result(evaluation),
        Some(TokenName::CoverageStatus) => render_coverage_status(&evaluation.report),
        Some(TokenName::TestResult) => render_test_result(
            &test_results.health_description,
            &test_results.failed_tests,
        ),
        None => {
            let mut lines = Vec::new();
            let coverage_result = render_coverage_result(evaluation);
            if !coverage_result.is_empty() {
                lines.push(coverage_result);
            }
            let coverage_status = render_coverage_status(&evaluation.report);
            if !coverage_status.is_empty() {
                lines.push(coverage_status);
            }
            lines.push(evaluation.message.clone());
            lines.join("\n")
        }
    }
}

fn render_json_summary(evaluation: &Evaluation, minimum_coverage: f64) -> CliResult<String> {
    let payload = serde_json::json!({
        "percentage": evaluation.percentage,
        "percentageNotCovered": evaluation.report.percentage_not_covered(),
        "status": evaluation.status,
        "color": evaluation.color,
        "dashboardColor": dashboard_color(&evaluation.report, minimum_coverage),
        "passed": evaluation.passed,
        "message": evaluation.message,
        "coverageChart": chart_rows(&evaluation.report.coverage_data),
        "analysisChart": chart_rows(&evaluation.report.data),
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}
