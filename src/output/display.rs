//! Display functions for command results

use super::charts::{ChartMetrics, render_bar_chart, render_scatter};
use super::formatters::{entropy_bar, guess_count};
use crate::commands::{AnalysisResult, SolveResult};
use colored::Colorize;

/// Number of feedback cells listed by `analyze`
const CELLS_SHOWN: usize = 10;

/// Print the result of solving a secret
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}  ({} / {})",
        result.secret.bright_yellow().bold(),
        result.feedback.label(),
        result.strategy
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        println!(
            "\nTurn {}: {} {}",
            i + 1,
            step.guess.bold(),
            step.rendered
        );

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
            if let Some(entropy) = step.entropy {
                println!("  Entropy:    {entropy:.3} bits");
            }
            println!(
                "  Info gained: {:.3} bits ({:.1}x reduction)",
                step.information_bits,
                step.information_bits.exp2()
            );
        }
    }

    println!();
    println!(
        "{}",
        format!("✅ Solved in {}!", guess_count(result.guesses.len()))
            .green()
            .bold()
    );
}

/// Print the result of guess analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ENTROPY ANALYSIS:".bright_cyan().bold(),
        result.guess.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let bar = entropy_bar(result.entropy, result.total_candidates, 30);

    println!(
        "\n📊 Against {} possible secrets ({}):",
        result.total_candidates, result.feedback
    );
    println!(
        "   Entropy:     [{}] {}",
        bar.green(),
        format!("{:.3} bits", result.entropy).bright_yellow()
    );
    println!(
        "   Info gain:   {:.1}x reduction",
        result.expected_reduction
    );
    println!(
        "   Expected:    {:.1} candidates remain",
        result.expected_remaining
    );
    println!("   Worst case:  {} candidates remain", result.max_partition);
    println!("   Outcomes:    {}", result.cells.len());

    println!("\n📈 {}", "Largest feedback cells:".bright_cyan().bold());
    for cell in result.cells.iter().take(CELLS_SHOWN) {
        println!("   {:<12} {:5}", cell.rendered, cell.size);
    }
}

/// Print the bar chart and scatter plot for a set of series
pub fn print_charts(series: &[ChartMetrics]) {
    println!(
        "\n{}",
        render_bar_chart(
            "Entropy Maximization Strategy: Core Metrics Comparison",
            series,
            40
        )
    );
    println!(
        "{}",
        render_scatter(
            "Entropy and Information Gain Correlation Comparison",
            series,
            41,
            11
        )
    );
}
