//! Risk tiers and the two-slice breakdown chart.
//!
//! The percentage is assumed to lie in 0–100 for display purposes only; no
//! value is clamped or rejected here.

use serde::Serialize;

/// Upper bound (exclusive) of the low tier.
pub const LOW_RISK_BELOW: f64 = 30.0;
/// Upper bound (exclusive) of the moderate tier.
pub const MODERATE_RISK_BELOW: f64 = 60.0;

/// Visual class of a display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Three-tier label derived from the prediction percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// `p < 30` → Low, `30 <= p < 60` → Moderate, otherwise High.
    ///
    /// NaN fails both comparisons and lands in High.
    pub fn from_percentage(p: f64) -> Self {
        if p < LOW_RISK_BELOW {
            Self::Low
        } else if p < MODERATE_RISK_BELOW {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk - Consult a Physician!",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::Low => Tone::Success,
            Self::Moderate => Tone::Warning,
            Self::High => Tone::Danger,
        }
    }
}

/// Share of the chart not taken by the risk slice.
pub fn remaining_share(p: f64) -> f64 {
    100.0 - p
}

/// Render a percentage as `"{p}%"` with the shortest decimal form.
pub fn format_percentage(p: f64) -> String {
    if p.is_infinite() {
        let sign = if p < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity%");
    }
    format!("{p}%")
}

/// Dataset of the doughnut chart: risk slice and remaining slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub title: &'static str,
    pub labels: [&'static str; 2],
    pub colors: [&'static str; 2],
    pub data: [f64; 2],
}

impl ChartDataset {
    pub const TITLE: &'static str = "Heart Disease Risk Breakdown";
    pub const LABELS: [&'static str; 2] = ["Heart Disease Risk", "Remaining Health"];
    pub const COLORS: [&'static str; 2] = ["rgba(255, 99, 132, 0.8)", "rgba(75, 192, 192, 0.8)"];

    /// Chart state before any prediction: `[0, 100]`.
    pub fn initial() -> Self {
        Self::with_percentage(0.0)
    }

    /// `[p, 100 - p]`.
    pub fn with_percentage(p: f64) -> Self {
        Self {
            title: Self::TITLE,
            labels: Self::LABELS,
            colors: Self::COLORS,
            data: [p, remaining_share(p)],
        }
    }

    pub fn risk(&self) -> f64 {
        self.data[0]
    }

    pub fn remaining(&self) -> f64 {
        self.data[1]
    }
}

impl Default for ChartDataset {
    fn default() -> Self {
        Self::initial()
    }
}
