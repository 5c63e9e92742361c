//! Chart figures for daily and weekly summaries.
//!
//! A [`Figure`] is plain data: it serializes to JSON for any plotting
//! frontend, and [`Figure::render_text`] gives a table for terminals.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::stats::{DailyStat, HighLow};

const TEMPERATURE_AXIS: &str = "Temperature (°C)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    /// Per-point labels, shown on bars.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,
    pub y_axis_title: String,
    pub traces: Vec<Trace>,
}

impl Figure {
    fn new(title: &str, x_axis_title: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            x_axis_title: x_axis_title.map(str::to_string),
            y_axis_title: TEMPERATURE_AXIS.to_string(),
            traces: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Plain-text table: one row per x value, one column per trace.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);

        let Some(first) = self.traces.first() else {
            out.push_str("(no data)\n");
            return out;
        };

        let mut header = vec![self.x_axis_title.clone().unwrap_or_default()];
        header.extend(
            self.traces
                .iter()
                .map(|t| t.name.clone().unwrap_or_else(|| self.y_axis_title.clone())),
        );

        let rows: Vec<Vec<String>> = first
            .x
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![label.clone()];
                row.extend(self.traces.iter().map(|t| match t.y.get(i) {
                    Some(v) => format!("{:.1}", v),
                    None => "-".to_string(),
                }));
                row
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                std::iter::once(&header)
                    .chain(rows.iter())
                    .map(|row| row[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |row: &[String]| -> String {
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let _ = writeln!(out, "{}", line(&header));
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(rule));
        for row in &rows {
            let _ = writeln!(out, "{}", line(row));
        }
        out
    }
}

/// Line chart of average, min and max temperature per day.
pub fn daily_stats_figure(stats: &[DailyStat]) -> Figure {
    let mut figure = Figure::new("Daily Weather Statistics", Some("Date"));
    if stats.is_empty() {
        tracing::warn!("No daily stats provided for plotting");
        return figure;
    }

    let dates: Vec<String> = stats.iter().map(|s| s.date.to_string()).collect();
    let series: [(&str, fn(&DailyStat) -> f64); 3] = [
        ("Avg Temp", |s| s.avg_temp_c),
        ("Min Temp", |s| s.min_temp_c),
        ("Max Temp", |s| s.max_temp_c),
    ];

    figure.traces = series
        .iter()
        .map(|(name, value)| Trace {
            name: Some(name.to_string()),
            kind: TraceKind::Line,
            x: dates.clone(),
            y: stats.iter().map(value).collect(),
            text: Vec::new(),
        })
        .collect();
    figure
}

/// Two-bar chart of the weekly high and low. Empty unless both are known.
pub fn weekly_high_low_figure(high_low: HighLow) -> Figure {
    let mut figure = Figure::new("Weekly High / Low Temperatures", None);
    let (Some(high), Some(low)) = (high_low.high, high_low.low) else {
        tracing::warn!("High or Low value is missing for weekly plot");
        return figure;
    };

    figure.traces.push(Trace {
        name: None,
        kind: TraceKind::Bar,
        x: vec!["High".to_string(), "Low".to_string()],
        y: vec![high, low],
        text: vec![high.to_string(), low.to_string()],
    });
    figure
}
