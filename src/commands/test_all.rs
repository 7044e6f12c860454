//! Test all secrets - comprehensive solver evaluation
//!
//! Runs the solver against every code in the space and generates statistics.

use crate::core::{Classic, Code, CodeSpace, FeedbackKind, FeedbackRule, Positional};
use crate::output::formatters::guess_count;
use crate::solver::entropy::calculate_metrics;
use crate::solver::{GuessSelector, SolveError, SolveReport, Solver};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Number of hardest secrets kept in the statistics
const HARDEST_SHOWN: usize = 10;

/// Receives progress while secrets are being solved
///
/// Called from worker threads when the run is parallel.
pub trait ProgressSink: Sync {
    fn start(&self, _total: usize) {}
    fn advance(&self, _report: &SolveReport) {}
    fn finish(&self) {}
}

/// No progress output
impl ProgressSink for () {}

impl ProgressSink for ProgressBar {
    fn start(&self, total: usize) {
        self.set_length(total as u64);
    }

    fn advance(&self, _report: &SolveReport) {
        self.inc(1);
    }

    fn finish(&self) {
        self.finish_with_message("Complete!");
    }
}

/// Terminal progress bar for test runs
#[must_use]
pub fn terminal_progress(label: &str) -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb.set_message(label.to_string());
    pb
}

/// Opening guess of a deterministic strategy and its partition shape
#[derive(Debug, Clone)]
pub struct OpeningSummary {
    pub guess: String,
    pub entropy: f64,
    /// Distinct feedback signals the opening can produce
    pub outcomes: usize,
}

/// Statistics from testing all secrets
#[derive(Debug, Clone)]
pub struct TestAllStatistics {
    pub feedback: FeedbackKind,
    pub strategy: &'static str,
    /// Size of the full code space
    pub space_size: usize,
    pub total_secrets: usize,
    pub guess_distribution: BTreeMap<usize, usize>,
    pub total_time: Duration,
    pub average_guesses: f64,
    pub max_guesses: usize,
    pub min_guesses: usize,
    pub best_secret: Option<(String, usize)>,
    pub hardest_secrets: Vec<(String, usize)>,
    pub opening: Option<OpeningSummary>,
}

impl TestAllStatistics {
    /// Aggregate solve reports
    ///
    /// Reports are expected in code-space order; best and hardest secrets
    /// keep the first occurrence on ties.
    #[must_use]
    pub fn from_reports(
        feedback: FeedbackKind,
        strategy: &'static str,
        space_size: usize,
        reports: &[SolveReport],
        total_time: Duration,
    ) -> Self {
        let mut guess_distribution = BTreeMap::new();
        for report in reports {
            *guess_distribution.entry(report.guesses).or_insert(0) += 1;
        }

        let total_guesses: usize = reports.iter().map(|r| r.guesses).sum();
        let average_guesses = if reports.is_empty() {
            0.0
        } else {
            total_guesses as f64 / reports.len() as f64
        };

        let max_guesses = reports.iter().map(|r| r.guesses).max().unwrap_or(0);
        let min_guesses = reports.iter().map(|r| r.guesses).min().unwrap_or(0);

        let best_secret = reports
            .iter()
            .min_by_key(|r| r.guesses)
            .map(|r| (r.secret.to_string(), r.guesses));

        let mut hardest_secrets: Vec<(String, usize)> = reports
            .iter()
            .map(|r| (r.secret.to_string(), r.guesses))
            .collect();
        hardest_secrets.sort_by_key(|(_, n)| std::cmp::Reverse(*n));
        hardest_secrets.truncate(HARDEST_SHOWN);

        Self {
            feedback,
            strategy,
            space_size,
            total_secrets: reports.len(),
            guess_distribution,
            total_time,
            average_guesses,
            max_guesses,
            min_guesses,
            best_secret,
            hardest_secrets,
            opening: None,
        }
    }

    /// Average information gained per guess: log₂|space| / average guesses
    #[must_use]
    pub fn information_gain(&self) -> f64 {
        if self.average_guesses > 0.0 {
            (self.space_size as f64).log2() / self.average_guesses
        } else {
            0.0
        }
    }
}

/// Run the solver on every secret in its space (or the first `limit`)
///
/// # Errors
///
/// Returns an error if a secret falls outside the solver's space, which
/// cannot happen for secrets drawn from the space itself.
pub fn run_test_all<F, S, P>(
    solver: &Solver<F, S>,
    feedback: FeedbackKind,
    limit: Option<usize>,
    parallel: bool,
    progress: &P,
) -> Result<TestAllStatistics, SolveError>
where
    F: FeedbackRule,
    S: GuessSelector,
    P: ProgressSink,
{
    let space = solver.space();
    let secrets: &[Code] = &space.codes()[..limit.unwrap_or(space.len()).min(space.len())];

    log::info!(
        "testing {} secrets: {} feedback, {} strategy",
        secrets.len(),
        feedback.label(),
        solver.selector().name()
    );

    let total_start = Instant::now();
    // Computed up front so workers share the cached opening
    let opening = solver.opening_guess();
    progress.start(secrets.len());

    let solve_one = |secret: &Code| -> Result<SolveReport, SolveError> {
        let report = solver.solve(secret)?;
        progress.advance(&report);
        Ok(report)
    };
    let reports: Vec<SolveReport> = if parallel {
        secrets.par_iter().map(solve_one).collect::<Result<_, _>>()?
    } else {
        secrets.iter().map(solve_one).collect::<Result<_, _>>()?
    };

    progress.finish();
    let total_time = total_start.elapsed();

    let mut stats = TestAllStatistics::from_reports(
        feedback,
        solver.selector().name(),
        space.len(),
        &reports,
        total_time,
    );
    stats.opening = opening.map(|selection| {
        let metrics = calculate_metrics(solver.rule(), &selection.guess, space.codes());
        OpeningSummary {
            guess: selection.guess.to_string(),
            entropy: metrics.entropy,
            outcomes: metrics.partition_count,
        }
    });

    log::info!(
        "{} / {}: average {:.4}, worst {} ({:.2}s)",
        feedback.label(),
        stats.strategy,
        stats.average_guesses,
        stats.max_guesses,
        total_time.as_secs_f64()
    );
    Ok(stats)
}

/// Run the full test under the rule named by `feedback`
///
/// # Errors
///
/// See [`run_test_all`].
pub fn run_test_all_kind<S: GuessSelector, P: ProgressSink>(
    feedback: FeedbackKind,
    selector: S,
    space: &CodeSpace,
    limit: Option<usize>,
    parallel: bool,
    progress: &P,
) -> Result<TestAllStatistics, SolveError> {
    match feedback {
        FeedbackKind::Classic => {
            let solver = Solver::new(Classic, selector, space);
            run_test_all(&solver, feedback, limit, parallel, progress)
        }
        FeedbackKind::Positional => {
            let solver = Solver::new(Positional, selector, space);
            run_test_all(&solver, feedback, limit, parallel, progress)
        }
    }
}

/// Print test-all statistics
pub fn print_test_all_statistics(stats: &TestAllStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Test Results: {} / {} ", stats.feedback, stats.strategy);
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Secrets tested:      {}", stats.total_secrets);
    println!(
        "  Average guesses:     {}",
        format!("{:.3}", stats.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!("  Worst case:          {}", stats.max_guesses);
    println!("  Best case:           {}", stats.min_guesses);
    println!(
        "  Total time:          {:.2}s",
        stats.total_time.as_secs_f64()
    );
    if stats.total_secrets > 0 {
        println!(
            "  Time per secret:     {:.2}ms",
            stats.total_time.as_secs_f64() * 1000.0 / stats.total_secrets as f64
        );
    }

    println!("\n📈 {}", "Guess Distribution".bright_cyan().bold());
    let max_count = stats.guess_distribution.values().copied().max().unwrap_or(1);
    for (&guesses, &count) in &stats.guess_distribution {
        let percentage = count as f64 / stats.total_secrets as f64 * 100.0;
        let bar_len = (count * 40 / max_count).max(usize::from(count > 0));
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        println!("  {guesses:2} guesses: {bar} {count:5} ({percentage:5.1}%)");
    }

    println!("\n🧮 Information Theory Metrics");
    let total_bits = (stats.space_size as f64).log2();
    println!("  Total information:   {total_bits:.2} bits");
    println!(
        "  Bits per guess:      {:.2} bits",
        stats.information_gain()
    );
    if let Some(opening) = &stats.opening {
        println!(
            "  Opening guess:       {} ({:.3} bits, {} outcomes)",
            opening.guess.bright_yellow(),
            opening.entropy,
            opening.outcomes
        );
    }

    if let Some((secret, guesses)) = &stats.best_secret {
        println!("\n✨ {}", "Best Performance".green().bold());
        println!(
            "  {} solved in {}",
            secret.bright_green(),
            guess_count(*guesses)
        );
    }

    if !stats.hardest_secrets.is_empty() {
        println!("\n😰 {}", "Hardest Secrets".yellow().bold());
        for (secret, guesses) in stats.hardest_secrets.iter().take(5) {
            println!("  {} ({})", secret.yellow(), guess_count(*guesses));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{EntropySelector, RandomSelector};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProgress {
        total: AtomicUsize,
        advanced: AtomicUsize,
        finished: AtomicUsize,
    }

    impl ProgressSink for CountingProgress {
        fn start(&self, total: usize) {
            self.total.store(total, Ordering::SeqCst);
        }

        fn advance(&self, _report: &SolveReport) {
            self.advanced.fetch_add(1, Ordering::SeqCst);
        }

        fn finish(&self) {
            self.finished.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn space() -> CodeSpace {
        CodeSpace::new(10, 3).unwrap()
    }

    #[test]
    fn classic_full_run_matches_reference_values() {
        let space = space();
        let stats =
            run_test_all_kind(FeedbackKind::Classic, EntropySelector, &space, None, true, &())
                .unwrap();

        assert_eq!(stats.total_secrets, 720);
        assert!((stats.average_guesses - 5.15).abs() < 1e-9);
        assert_eq!(stats.max_guesses, 8);
        assert_eq!(stats.min_guesses, 1);
        assert_eq!(stats.guess_distribution.values().sum::<usize>(), 720);

        let opening = stats.opening.unwrap();
        assert_eq!(opening.guess, "012");
        assert_eq!(opening.outcomes, 9);
    }

    #[test]
    fn positional_full_run_matches_reference_values() {
        let space = space();
        let stats =
            run_test_all_kind(FeedbackKind::Positional, EntropySelector, &space, None, true, &())
                .unwrap();

        assert!((stats.average_guesses - 4.704_166_666_666_667).abs() < 1e-9);
        assert_eq!(stats.max_guesses, 8);
        assert_eq!(stats.opening.unwrap().outcomes, 24);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let space = CodeSpace::new(6, 3).unwrap();
        let run = |parallel| {
            run_test_all_kind(FeedbackKind::Classic, EntropySelector, &space, None, parallel, &())
                .unwrap()
        };

        let a = run(true);
        let b = run(false);
        assert_eq!(a.guess_distribution, b.guess_distribution);
        assert_eq!(a.hardest_secrets, b.hardest_secrets);
        assert_eq!(a.best_secret, b.best_secret);
    }

    #[test]
    fn random_runs_are_reproducible_across_threads() {
        let space = CodeSpace::new(6, 3).unwrap();
        let run = |parallel| {
            run_test_all_kind(
                FeedbackKind::Positional,
                RandomSelector::new(5),
                &space,
                None,
                parallel,
                &(),
            )
            .unwrap()
        };

        let a = run(true);
        let b = run(false);
        assert_eq!(a.guess_distribution, b.guess_distribution);
        assert!(a.opening.is_none());
        assert_eq!(a.strategy, "Random");
    }

    #[test]
    fn limit_and_progress() {
        let space = space();
        let progress = CountingProgress::default();
        let stats = run_test_all_kind(
            FeedbackKind::Classic,
            EntropySelector,
            &space,
            Some(25),
            true,
            &progress,
        )
        .unwrap();

        assert_eq!(stats.total_secrets, 25);
        assert_eq!(stats.space_size, 720);
        assert_eq!(progress.total.load(Ordering::SeqCst), 25);
        assert_eq!(progress.advanced.load(Ordering::SeqCst), 25);
        assert_eq!(progress.finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn statistics_from_reports() {
        let report = |text: &str, guesses| SolveReport {
            secret: Code::parse(text).unwrap(),
            guesses,
        };
        let reports = [
            report("012", 1),
            report("013", 4),
            report("014", 4),
            report("015", 3),
        ];
        let stats = TestAllStatistics::from_reports(
            FeedbackKind::Classic,
            "Entropy",
            720,
            &reports,
            Duration::from_millis(10),
        );

        assert!((stats.average_guesses - 3.0).abs() < 1e-12);
        assert_eq!(stats.max_guesses, 4);
        assert_eq!(stats.min_guesses, 1);
        assert_eq!(stats.best_secret, Some(("012".to_string(), 1)));
        assert_eq!(stats.hardest_secrets[0], ("013".to_string(), 4));
        assert_eq!(stats.hardest_secrets[1], ("014".to_string(), 4));
        assert_eq!(stats.guess_distribution.get(&4), Some(&2));
        assert!((stats.information_gain() - 720f64.log2() / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_statistics() {
        let stats = TestAllStatistics::from_reports(
            FeedbackKind::Positional,
            "Entropy",
            720,
            &[],
            Duration::ZERO,
        );
        assert_eq!(stats.total_secrets, 0);
        assert!(stats.average_guesses.abs() < f64::EPSILON);
        assert!(stats.information_gain().abs() < f64::EPSILON);
        assert!(stats.best_secret.is_none());
    }
}
