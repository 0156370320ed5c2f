//! Threshold-band classification of coverage percentages.
//!
//! Bands are contiguous over `[0, 100]` with the last band closed at 100;
//! boundary values belong to the upper band (75 is Risk, 95 is Safe).

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::CoverageReport;

/// Qualitative coverage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CoverageStatus {
    /// Coverage below 75%.
    Danger,
    /// Coverage in `[75, 80)`.
    Risk,
    /// Coverage in `[80, 95)`.
    Acceptable,
    /// Coverage of 95% or more.
    Safe,
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Danger => "Danger",
            Self::Risk => "Risk",
            Self::Acceptable => "Acceptable",
            Self::Safe => "Safe",
        };
        write!(f, "{label}")
    }
}

/// A threshold band: every percentage at or above `lower` (and below the next
/// band's `lower`) maps to `status` and `color`.
struct Band {
    lower: f64,
    status: CoverageStatus,
    color: &'static str,
}

const BANDS: [Band; 4] = [
    Band {
        lower: 0.0,
        status: CoverageStatus::Danger,
        color: "#d2322d",
    },
    Band {
        lower: 75.0,
        status: CoverageStatus::Risk,
        color: "#ed9c28",
    },
    Band {
        lower: 80.0,
        status: CoverageStatus::Acceptable,
        color: "#2aabd2",
    },
    Band {
        lower: 95.0,
        status: CoverageStatus::Safe,
        color: "#5cb85c",
    },
];

/// Color returned when a percentage falls outside `[0, 100]`.
pub const DEFAULT_COLOR: &str = "#5cb85c";

/// Dashboard percentage color when the gate is satisfied.
pub const DASHBOARD_OK_COLOR: &str = "green";
/// Dashboard percentage color when coverage falls below the minimum.
pub const DASHBOARD_ALERT_COLOR: &str = "#D2322D";

/// Classify a percentage into its status band.
///
/// Values below zero are Danger, values above 100 are Safe.
pub fn status_for(percentage: f64) -> CoverageStatus {
    BANDS
        .iter()
        .rev()
        .find(|band| percentage >= band.lower)
        .map(|band| band.status)
        .unwrap_or(CoverageStatus::Danger)
}

/// Look up the display color of a percentage's band.
///
/// Any percentage outside `[0, 100]` yields [`DEFAULT_COLOR`]; that only
/// happens on malformed input, but the fallback is part of the contract.
pub fn color_for(percentage: f64) -> &'static str {
    for (index, band) in BANDS.iter().enumerate() {
        let in_band = match BANDS.get(index + 1) {
            Some(next) => percentage >= band.lower && percentage < next.lower,
            None => percentage >= band.lower && percentage <= 100.0,
        };
        if in_band {
            return band.color;
        }
    }
    DEFAULT_COLOR
}

/// Percentage color for the project dashboard.
///
/// Red only when the dashboard shows coverage at all and the report's
/// percentage sits below the configured minimum.
pub fn dashboard_color(report: &CoverageReport, minimum_coverage: f64) -> &'static str {
    let visible = report.has_coverage_data() && report.has_analysis_data();
    if visible && report.percentage() < minimum_coverage {
        DASHBOARD_ALERT_COLOR
    } else {
        DASHBOARD_OK_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CoverageStatus, DASHBOARD_ALERT_COLOR, DASHBOARD_OK_COLOR, DEFAULT_COLOR, color_for,
        dashboard_color, status_for,
    };
    use crate::domain::CoverageReport;
    use serde_json::json;

    #[test]
    fn status_boundaries_belong_to_upper_band() {
        assert_eq!(status_for(74.99), CoverageStatus::Danger);
        assert_eq!(status_for(75.0), CoverageStatus::Risk);
        assert_eq!(status_for(79.99), CoverageStatus::Risk);
        assert_eq!(status_for(80.0), CoverageStatus::Acceptable);
        assert_eq!(status_for(94.99), CoverageStatus::Acceptable);
        assert_eq!(status_for(95.0), CoverageStatus::Safe);
        assert_eq!(status_for(100.0), CoverageStatus::Safe);
    }

    #[test]
    fn status_clamps_out_of_range_input() {
        assert_eq!(status_for(-3.0), CoverageStatus::Danger);
        assert_eq!(status_for(104.0), CoverageStatus::Safe);
    }

    #[test]
    fn colors_mirror_status_bands() {
        assert_eq!(color_for(0.0), "#d2322d");
        assert_eq!(color_for(74.99), "#d2322d");
        assert_eq!(color_for(75.0), "#ed9c28");
        assert_eq!(color_for(80.0), "#2aabd2");
        assert_eq!(color_for(94.99), "#2aabd2");
        assert_eq!(color_for(95.0), "#5cb85c");
        assert_eq!(color_for(100.0), "#5cb85c");
    }

    #[test]
    fn out_of_range_percentages_get_default_color() {
        assert_eq!(color_for(-1.0), DEFAULT_COLOR);
        assert_eq!(color_for(100.01), DEFAULT_COLOR);
    }

    #[test]
    fn status_labels_render_as_text() {
        assert_eq!(CoverageStatus::Acceptable.to_string(), "Acceptable");
        assert_eq!(CoverageStatus::Safe.to_string(), "Safe");
    }

    fn visible_report(covered: i64, not_covered: i64) -> CoverageReport {
        let document = json!({
            "data": [
                ["Lines", "Number"],
                ["Danger (0% - 74%)", 1],
                ["Risk (75% - 79%)", 1],
                ["Acceptable (80% - 94%)", 1],
                ["Safe (95% - 100%)", 1],
            ],
            "coverageData": [
                ["Lines", "Number"],
                ["Covered", covered],
                ["Not Covered", not_covered],
            ],
        });
        CoverageReport::from_json(&document.to_string()).expect("parse report")
    }

    #[test]
    fn dashboard_color_alerts_below_minimum() {
        let report = visible_report(50, 50);
        assert_eq!(dashboard_color(&report, 75.0), DASHBOARD_ALERT_COLOR);
        assert_eq!(dashboard_color(&report, 25.0), DASHBOARD_OK_COLOR);
    }

    #[test]
    fn dashboard_color_stays_green_when_coverage_hidden() {
        let report = CoverageReport::default();
        assert_eq!(dashboard_color(&report, 99.0), DASHBOARD_OK_COLOR);
    }
}
