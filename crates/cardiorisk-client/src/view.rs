//! Display regions updated by the form handler.

use cardiorisk_core::{ChartDataset, Tone};

/// The four regions of the prediction page.
pub trait View {
    /// Transient status line below the form.
    fn set_status(&mut self, text: &str, tone: Tone);
    /// Large percentage readout.
    fn set_percentage(&mut self, text: &str);
    /// Risk label. `None` keeps the current tone.
    fn set_risk_level(&mut self, text: &str, tone: Option<Tone>);
    /// Replace the breakdown chart's data.
    fn update_chart(&mut self, chart: ChartDataset);
}

/// In-memory view holding the current state of every region.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub status: String,
    pub status_tone: Tone,
    pub percentage: String,
    pub risk_level: String,
    pub risk_tone: Option<Tone>,
    pub chart: ChartDataset,
    /// Number of times the chart was redrawn.
    pub chart_updates: usize,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            status: String::new(),
            status_tone: Tone::Info,
            percentage: "--".to_string(),
            risk_level: String::new(),
            risk_tone: None,
            chart: ChartDataset::initial(),
            chart_updates: 0,
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Dashboard {
    fn set_status(&mut self, text: &str, tone: Tone) {
        self.status = text.to_string();
        self.status_tone = tone;
    }

    fn set_percentage(&mut self, text: &str) {
        self.percentage = text.to_string();
    }

    fn set_risk_level(&mut self, text: &str, tone: Option<Tone>) {
        self.risk_level = text.to_string();
        if tone.is_some() {
            self.risk_tone = tone;
        }
    }

    fn update_chart(&mut self, chart: ChartDataset) {
        self.chart = chart;
        self.chart_updates += 1;
    }
}
