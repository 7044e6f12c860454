//! Text charts comparing feedback rules
//!
//! Two charts are rendered as plain terminal text:
//! - a grouped bar chart of five core metrics, one bar per series
//! - a scatter plot of opening entropy against realized information gain
//!
//! Both charts implement `Display`, so callers decide where the text goes.

use crate::commands::TestAllStatistics;
use std::fmt;
use std::str::FromStr;

/// Metric names, in bar-chart order
pub const INDICATORS: [&str; 5] = [
    "Guess Entropy (bits)",
    "Information Gain (bits)",
    "Average Guess Attempts",
    "Worst Guess Attempts",
    "Number of Valid Feedback Results",
];

/// Bar glyph per series; series beyond the fourth reuse them
const GLYPHS: [char; 4] = ['█', '▓', '▒', '░'];

/// Summary numbers for one chart series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartMetrics {
    pub label: String,
    pub guess_entropy: f64,
    pub information_gain: f64,
    pub average_guesses: f64,
    pub worst_guesses: f64,
    pub feedback_outcomes: f64,
}

impl ChartMetrics {
    /// Metric values in [`INDICATORS`] order
    #[must_use]
    pub const fn values(&self) -> [f64; 5] {
        [
            self.guess_entropy,
            self.information_gain,
            self.average_guesses,
            self.worst_guesses,
            self.feedback_outcomes,
        ]
    }

    /// Metrics of a finished test run
    ///
    /// Returns `None` for runs without a fixed opening guess (random
    /// strategies), which have no single guess entropy.
    #[must_use]
    pub fn from_statistics(stats: &TestAllStatistics) -> Option<Self> {
        let opening = stats.opening.as_ref()?;
        Some(Self {
            label: stats.feedback.label().to_string(),
            guess_entropy: opening.entropy,
            information_gain: stats.information_gain(),
            average_guesses: stats.average_guesses,
            worst_guesses: stats.max_guesses as f64,
            feedback_outcomes: opening.outcomes as f64,
        })
    }
}

/// Error parsing a `Label=e,g,avg,worst,outcomes` metric string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartMetricsError {
    MissingLabel,
    WrongValueCount(usize),
    InvalidNumber(String),
}

impl fmt::Display for ChartMetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLabel => write!(f, "Expected 'Label=values', found no label"),
            Self::WrongValueCount(n) => write!(f, "Expected 5 values, found {n}"),
            Self::InvalidNumber(s) => write!(f, "Invalid number: '{s}'"),
        }
    }
}

impl std::error::Error for ChartMetricsError {}

impl FromStr for ChartMetrics {
    type Err = ChartMetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, values) = s.split_once('=').ok_or(ChartMetricsError::MissingLabel)?;
        let label = label.trim();
        if label.is_empty() {
            return Err(ChartMetricsError::MissingLabel);
        }

        let values = values
            .split(',')
            .map(|v| {
                let v = v.trim();
                v.parse::<f64>()
                    .map_err(|_| ChartMetricsError::InvalidNumber(v.to_string()))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let &[guess_entropy, information_gain, average_guesses, worst_guesses, feedback_outcomes] =
            values.as_slice()
        else {
            return Err(ChartMetricsError::WrongValueCount(values.len()));
        };

        Ok(Self {
            label: label.to_string(),
            guess_entropy,
            information_gain,
            average_guesses,
            worst_guesses,
            feedback_outcomes,
        })
    }
}

/// Grouped bar chart, one group per indicator
///
/// Bars in a group are scaled to the largest value of that indicator, so
/// metrics of very different magnitude stay readable.
pub struct BarChart<'a> {
    pub title: &'a str,
    pub series: &'a [ChartMetrics],
    /// Columns of a full-length bar
    pub width: usize,
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.width;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "─".repeat(self.title.chars().count()))?;

        let label_width = self
            .series
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);

        for (i, indicator) in INDICATORS.iter().enumerate() {
            let max = self
                .series
                .iter()
                .map(|s| s.values()[i])
                .fold(0.0_f64, f64::max);

            writeln!(f, "\n{indicator}")?;
            for (k, s) in self.series.iter().enumerate() {
                let value = s.values()[i];
                let filled = if max > 0.0 {
                    ((value / max) * width as f64).round() as usize
                } else {
                    0
                }
                .min(width);

                let bar: String = std::iter::repeat_n(glyph(k), filled).collect();
                writeln!(
                    f,
                    "  {:<label_width$} {bar}{} {value:.2}",
                    s.label,
                    " ".repeat(width - filled)
                )?;
            }
        }

        writeln!(f)?;
        for (k, s) in self.series.iter().enumerate() {
            writeln!(f, "  {} {}", glyph(k), s.label)?;
        }
        Ok(())
    }
}

/// Scatter plot of guess entropy (x) against information gain (y)
///
/// Axes start at zero and extend to at least 4 bits (x) and 5 bits (y).
/// Each point is drawn with the first letter of its label.
pub struct ScatterPlot<'a> {
    pub title: &'a str,
    pub series: &'a [ChartMetrics],
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for ScatterPlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.width.max(2);
        let height = self.height.max(2);

        let x_max = self
            .series
            .iter()
            .map(|s| s.guess_entropy)
            .fold(4.0_f64, f64::max)
            .ceil();
        let y_max = self
            .series
            .iter()
            .map(|s| s.information_gain)
            .fold(5.0_f64, f64::max)
            .ceil();

        let mut grid = vec![vec![' '; width]; height];
        for s in self.series {
            let col = ((s.guess_entropy.max(0.0) / x_max) * (width - 1) as f64).round() as usize;
            let row =
                ((s.information_gain.max(0.0) / y_max) * (height - 1) as f64).round() as usize;
            grid[height - 1 - row.min(height - 1)][col.min(width - 1)] = marker(s);
        }

        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "─".repeat(self.title.chars().count()))?;
        writeln!(f, "Information Gain (bits)")?;

        for (r, row) in grid.iter().enumerate() {
            let y = y_max * (height - 1 - r) as f64 / (height - 1) as f64;
            let line: String = row.iter().collect();
            writeln!(f, "{y:5.1} │{}", line.trim_end())?;
        }

        writeln!(f, "      └{}", "─".repeat(width))?;
        let x_label_right = format!("{x_max:.1}");
        writeln!(
            f,
            "       0.0{}{x_label_right}",
            " ".repeat(width.saturating_sub(3 + x_label_right.len()))
        )?;
        writeln!(f, "{:>w$}", "Guess Entropy (bits)", w = 7 + width)?;

        writeln!(f)?;
        for s in self.series {
            writeln!(
                f,
                "  {}  {} ({:.2}, {:.2})",
                marker(s),
                s.label,
                s.guess_entropy,
                s.information_gain
            )?;
        }
        Ok(())
    }
}

fn glyph(series_index: usize) -> char {
    GLYPHS[series_index % GLYPHS.len()]
}

fn marker(series: &ChartMetrics) -> char {
    series
        .label
        .chars()
        .next()
        .map_or('●', |c| c.to_ascii_uppercase())
}

/// Render a [`BarChart`] to a string
#[must_use]
pub fn render_bar_chart(title: &str, series: &[ChartMetrics], width: usize) -> String {
    BarChart {
        title,
        series,
        width,
    }
    .to_string()
}

/// Render a [`ScatterPlot`] to a string
#[must_use]
pub fn render_scatter(title: &str, series: &[ChartMetrics], width: usize, height: usize) -> String {
    ScatterPlot {
        title,
        series,
        width,
        height,
    }
    .to_string()
}
