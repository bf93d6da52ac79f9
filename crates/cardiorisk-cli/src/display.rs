//! Terminal card for a prediction dashboard.
//!
//! Renders the four view regions as a vertical card, with the breakdown
//! chart drawn as a proportional bar.

use std::fmt::Write;

use cardiorisk_ai::{DatasetSummary, LogisticModel};
use cardiorisk_client::Dashboard;
use cardiorisk_core::Tone;

const BAR_WIDTH: usize = 40;
const RISK_CELL: char = '#';
const REMAINING_CELL: char = '.';

// ── Public API ──

pub fn print_dashboard(dashboard: &Dashboard) {
    print!("{}", render_dashboard(dashboard));
}

/// Render the dashboard card as text.
pub fn render_dashboard(d: &Dashboard) -> String {
    let mut out = String::new();
    let chart = &d.chart;

    let _ = writeln!(out, "=== {} ===", chart.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<26} {}", "prediction", d.percentage);
    if !d.risk_level.is_empty() {
        let _ = writeln!(
            out,
            "  {:<26} {}{}",
            "risk level",
            d.risk_level,
            tone_tag(d.risk_tone)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  {}", bar(chart.risk()));
    let _ = writeln!(
        out,
        "  {RISK_CELL} {:<24} {}",
        chart.labels[0],
        share(chart.risk())
    );
    let _ = writeln!(
        out,
        "  {REMAINING_CELL} {:<24} {}",
        chart.labels[1],
        share(chart.remaining())
    );
    let _ = writeln!(out);

    if !d.status.is_empty() {
        let _ = writeln!(out, "{}{}", d.status, tone_tag(Some(d.status_tone)));
    }
    out
}

/// Print what `train` produced.
pub fn print_model_summary(model: &LogisticModel, data: &DatasetSummary) {
    println!("=== Model ===");
    println!("  {:<26} {}", "samples", data.samples);
    println!(
        "  {:<26} {} ({:.1}%)",
        "positives",
        data.positives,
        data.positive_rate * 100.0
    );
    println!("  {:<26} {}", "trained_at", model.trained_at.to_rfc3339());
    println!("  {:<26} {:+.6}", "intercept", model.intercept);
    println!();
    println!("Weights");
    for (name, w) in model.feature_names.iter().zip(&model.weights) {
        println!("  {:<26} {:+.6}", name, w);
    }
}

// ── Helpers ──

/// Proportional bar: risk cells then remaining cells.
fn bar(risk: f64) -> String {
    let filled = if risk.is_nan() {
        0
    } else {
        ((risk.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize
    };
    let mut s = String::with_capacity(BAR_WIDTH + 2);
    s.push('[');
    s.extend(std::iter::repeat_n(RISK_CELL, filled));
    s.extend(std::iter::repeat_n(REMAINING_CELL, BAR_WIDTH - filled));
    s.push(']');
    s
}

fn share(v: f64) -> String {
    // Trim float noise such as 54.330000000000005.
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}%")
}

fn tone_tag(tone: Option<Tone>) -> String {
    match tone {
        Some(Tone::Info) | None => String::new(),
        Some(t) => format!("  [{}]", t.as_str()),
    }
}
