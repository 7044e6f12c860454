//! Strategy comparison command
//!
//! Runs every combination of feedback rule and strategy over the same code
//! space and summarizes the results side by side.

use super::test_all::{TestAllStatistics, run_test_all_kind, terminal_progress};
use crate::core::{CodeSpace, FeedbackKind};
use crate::output::charts::ChartMetrics;
use crate::solver::{GuessSelector, SelectorType, SolveError};
use colored::Colorize;

/// Results of one comparison, in run order
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    pub runs: Vec<TestAllStatistics>,
}

impl ComparisonReport {
    /// Statistics for one feedback rule and strategy name
    #[must_use]
    pub fn find(&self, feedback: FeedbackKind, strategy: &str) -> Option<&TestAllStatistics> {
        self.runs
            .iter()
            .find(|run| run.feedback == feedback && run.strategy == strategy)
    }

    /// Chart metrics for every run with a fixed opening guess
    #[must_use]
    pub fn chart_metrics(&self) -> Vec<ChartMetrics> {
        self.runs
            .iter()
            .filter_map(ChartMetrics::from_statistics)
            .collect()
    }
}

/// Run each feedback rule with each strategy
///
/// # Errors
///
/// Propagates solver errors from the individual runs.
pub fn run_comparison(
    space: &CodeSpace,
    feedbacks: &[FeedbackKind],
    strategies: &[SelectorType],
    limit: Option<usize>,
    parallel: bool,
    show_progress: bool,
) -> Result<ComparisonReport, SolveError> {
    let mut report = ComparisonReport::default();

    for &feedback in feedbacks {
        for selector in strategies {
            let label = format!("{} / {}", feedback.label(), selector.name());
            let stats = if show_progress {
                let progress = terminal_progress(&label);
                run_test_all_kind(feedback, selector.clone(), space, limit, parallel, &progress)?
            } else {
                run_test_all_kind(feedback, selector.clone(), space, limit, parallel, &())?
            };
            report.runs.push(stats);
        }
    }

    Ok(report)
}

/// Print the comparison summary table
pub fn print_comparison(report: &ComparisonReport) {
    println!("\n{}", "═".repeat(70));
    println!(" {} ", "Summary".bright_cyan().bold());
    println!("{}", "═".repeat(70));

    println!(
        "\n  {:<34} {:>10} {:>8} {:>12}",
        "Strategy", "Average", "Worst", "Bits/guess"
    );
    println!("  {}", "─".repeat(66));

    for run in &report.runs {
        let name = format!("{} / {}", run.feedback.label(), run.strategy);
        println!(
            "  {:<34} {:>10} {:>8} {:>12.3}",
            name,
            format!("{:.3}", run.average_guesses).bright_yellow(),
            run.max_guesses,
            run.information_gain()
        );
    }

    let classic = report.find(FeedbackKind::Classic, "Entropy");
    let positional = report.find(FeedbackKind::Positional, "Entropy");
    if let (Some(classic), Some(positional)) = (classic, positional) {
        let saved = classic.average_guesses - positional.average_guesses;
        println!(
            "\n  Positional feedback saves {} guesses on average",
            format!("{saved:.3}").green().bold()
        );
    }
}
