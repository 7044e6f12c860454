//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod charts;
pub mod display;
pub mod formatters;

pub use charts::{
    BarChart, ChartMetrics, ChartMetricsError, ScatterPlot, render_bar_chart, render_scatter,
};
pub use display::{print_analysis_result, print_charts, print_solve_result};
