//! Text bar charts keyed by year.

use anyhow::{Context, Result};
use derive_builder::Builder;
use std::collections::BTreeMap;
use std::fmt;

/// Width of the y-axis value labels.
const LABEL_WIDTH: usize = 7;
/// Characters per year column; bars take the first two.
const COLUMN_WIDTH: usize = 3;
/// Tallest plot area, in rows.
const MAX_HEIGHT: usize = 20;

const MEAN_MAGNITUDE_LIMIT: f64 = 5.0;

#[derive(Builder, Debug, Clone)]
pub struct BarChart {
    #[builder(setter(into))]
    title: String,
    #[builder(setter(into))]
    x_label: String,
    #[builder(setter(into))]
    y_label: String,
    /// Bar height per year. Years in between with no entry render as empty columns.
    bars: BTreeMap<i32, f64>,
    /// Fixed upper end of the y-axis; defaults to the tallest bar.
    #[builder(default, setter(strip_option))]
    y_limit: Option<f64>,
    /// Plot area height in rows.
    #[builder(default = "10")]
    height: usize,
    /// Label every n-th year on the x-axis.
    #[builder(default = "2")]
    x_tick_step: usize,
    /// Decimal places of the y-axis labels.
    #[builder(default = "1")]
    y_precision: usize,
}

impl BarChart {
    pub fn builder() -> BarChartBuilder {
        BarChartBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn y_top(&self) -> f64 {
        let top = self
            .y_limit
            .unwrap_or_else(|| self.bars.values().copied().fold(0.0, f64::max));
        if top.is_finite() && top > 0.0 {
            top
        } else {
            1.0
        }
    }

    /// Number of filled rows for a bar, clipped to the plot area.
    fn bar_cells(&self, value: f64, top: f64) -> usize {
        if !(value > 0.0) {
            return 0;
        }
        let cells = (value / top * self.height as f64).round() as usize;
        cells.min(self.height)
    }

    fn format_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];

        let (Some(&first), Some(&last)) = (self.bars.keys().next(), self.bars.keys().next_back())
        else {
            lines.push("  (no data)".to_string());
            return lines;
        };

        let top = self.y_top();
        let years: Vec<i32> = (first..=last).collect();
        let cells: Vec<usize> = years
            .iter()
            .map(|y| self.bar_cells(self.bars.get(y).copied().unwrap_or(0.0), top))
            .collect();

        lines.push(self.y_label.clone());

        for row in (1..=self.height).rev() {
            let label = if row % 2 == 0 {
                let value = top * row as f64 / self.height as f64;
                format!("{:>w$.p$}", value, w = LABEL_WIDTH, p = self.y_precision)
            } else {
                " ".repeat(LABEL_WIDTH)
            };
            let mut line = format!("{label} ┤");
            for &filled in &cells {
                line.push_str(if filled >= row { "██ " } else { "   " });
            }
            lines.push(line.trim_end().to_string());
        }

        lines.push(format!(
            "{:>w$.p$} ┼{}",
            0.0,
            "─".repeat(COLUMN_WIDTH * years.len()),
            w = LABEL_WIDTH,
            p = self.y_precision
        ));

        // The tick line is ASCII, so byte length equals column position
        let offset = LABEL_WIDTH + 2;
        let mut ticks = " ".repeat(offset);
        for (i, year) in years.iter().enumerate().step_by(self.x_tick_step.max(1)) {
            let col = offset + i * COLUMN_WIDTH;
            if ticks.len() > col {
                continue;
            }
            ticks.push_str(&" ".repeat(col - ticks.len()));
            ticks.push_str(&year.to_string());
        }
        lines.push(ticks);

        let pad = offset + (COLUMN_WIDTH * years.len()).saturating_sub(self.x_label.len()) / 2;
        lines.push(format!("{}{}", " ".repeat(pad), self.x_label));

        lines
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_lines().join("\n"))
    }
}

/// Mean magnitude per year on a fixed 0–5 axis.
pub fn mean_magnitude_chart(means: &BTreeMap<i32, f64>) -> Result<BarChart> {
    BarChart::builder()
        .title("Mean earthquake magnitude per year")
        .x_label("Year")
        .y_label("Mean earthquake magnitude")
        .bars(means.clone())
        .y_limit(MEAN_MAGNITUDE_LIMIT)
        .build()
        .context("Failed to build mean magnitude chart")
}

/// Number of earthquakes per year. One row per event up to `MAX_HEIGHT`.
pub fn frequency_chart(counts: &BTreeMap<i32, usize>) -> Result<BarChart> {
    let title = match (counts.keys().next(), counts.keys().next_back()) {
        (Some(min), Some(max)) => format!("Earthquake frequencies between {} and {}", min, max),
        _ => "Earthquake frequencies".to_string(),
    };
    let max_count = counts.values().copied().max().unwrap_or(0);

    BarChart::builder()
        .title(title)
        .x_label("Year")
        .y_label("Frequency")
        .bars(counts.iter().map(|(&y, &c)| (y, c as f64)).collect())
        .height(max_count.clamp(1, MAX_HEIGHT))
        .y_precision(0usize)
        .build()
        .context("Failed to build frequency chart")
}
