//! Mastermind Entropy - CLI
//!
//! Entropy-guided Bulls & Cows solver comparing classic and positional
//! feedback.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mastermind_entropy::{
    commands::{
        analyze_with_kind, print_comparison, print_test_all_statistics, run_comparison,
        run_test_all_kind, solve_with_kind, terminal_progress,
    },
    config::SimulationConfig,
    core::{CodeSpace, FeedbackKind},
    output::{ChartMetrics, print_analysis_result, print_charts, print_solve_result},
    solver::{DEFAULT_SEED, EntropySelector, GuessSelector, RandomSelector, SelectorType},
};

#[derive(Parser)]
#[command(
    name = "mastermind",
    about = "Entropy-guided Bulls & Cows solver with classic and positional feedback",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Strategy: entropy (default), random
    #[arg(short, long, global = true, default_value = "entropy")]
    strategy: String,

    /// Code length
    #[arg(short, long, global = true, default_value_t = 3)]
    length: usize,

    /// Number of digit symbols (at most 10)
    #[arg(short, long, global = true, default_value_t = 10)]
    alphabet: usize,

    /// Feedback rule: classic (default), positional
    #[arg(short, long, global = true, default_value = "classic")]
    feedback: String,

    /// Seed for the random strategy
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Solve secrets one at a time instead of in parallel
    #[arg(long, global = true)]
    sequential: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a specific secret and show every round
    Solve {
        /// The secret code, e.g. 123
        secret: String,

        /// Show candidate counts and entropy per round
        #[arg(short, long)]
        detail: bool,
    },

    /// Analyze the entropy of a specific guess against the full space
    Analyze {
        /// Guess to analyze
        guess: String,
    },

    /// Test the solver on ALL possible secrets
    TestAll {
        /// Limit number of secrets to test
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Compare both feedback rules with the entropy and random strategies (default)
    Compare {
        /// Limit number of secrets to test
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Chart core metrics of classic vs positional feedback
    Chart {
        /// Limit number of secrets to test
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Manual series "Label=entropy,gain,average,worst,outcomes" (repeatable)
        #[arg(short, long)]
        metrics: Vec<String>,
    },
}

impl Cli {
    fn config(&self, limit: Option<usize>) -> Result<SimulationConfig> {
        let Some(feedback) = FeedbackKind::from_name(&self.feedback) else {
            bail!(
                "Unknown feedback rule '{}': expected classic or positional",
                self.feedback
            );
        };

        let Some(strategy) = SelectorType::from_name(&self.strategy, self.seed) else {
            bail!(
                "Unknown strategy '{}': expected entropy or random",
                self.strategy
            );
        };

        Ok(SimulationConfig {
            alphabet_size: self.alphabet,
            length: self.length,
            feedback,
            strategy,
            seed: self.seed,
            parallel: !self.sequential,
            limit,
        })
    }
}

fn init_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to comparing both feedback rules if no command given
    let command = cli.command.take().unwrap_or(Commands::Compare { limit: None });

    match command {
        Commands::Solve { secret, detail } => {
            run_solve_command(&cli.config(None)?, &secret, detail)
        }
        Commands::Analyze { guess } => run_analyze_command(&cli.config(None)?, &guess),
        Commands::TestAll { limit } => run_test_all_command(&cli.config(limit)?),
        Commands::Compare { limit } => run_compare_command(&cli.config(limit)?),
        Commands::Chart { limit, metrics } => run_chart_command(&cli.config(limit)?, &metrics),
    }
}

fn code_space(config: &SimulationConfig) -> Result<CodeSpace> {
    config.code_space().with_context(|| {
        format!(
            "Invalid game: length {} over {} symbols",
            config.length, config.alphabet_size
        )
    })
}

fn run_solve_command(config: &SimulationConfig, secret: &str, detail: bool) -> Result<()> {
    let space = code_space(config)?;
    let result = solve_with_kind(config.feedback, config.selector(), &space, secret)?;

    print_solve_result(&result, detail);
    Ok(())
}

fn run_analyze_command(config: &SimulationConfig, guess: &str) -> Result<()> {
    let space = code_space(config)?;
    let result = analyze_with_kind(config.feedback, &space, guess)
        .with_context(|| format!("Invalid guess '{guess}'"))?;

    print_analysis_result(&result);
    Ok(())
}

fn run_test_all_command(config: &SimulationConfig) -> Result<()> {
    let space = code_space(config)?;

    println!("\n{}", "═".repeat(70));
    println!(" Comprehensive Solver Test ");
    println!("{}", "═".repeat(70));
    println!("\nTesting against {} possible secrets", space.len());
    println!("Feedback: {}", config.feedback);
    println!("Strategy: {}", config.strategy.name());
    println!();

    let progress = terminal_progress(config.feedback.label());
    let stats = run_test_all_kind(
        config.feedback,
        config.selector(),
        &space,
        config.limit,
        config.parallel,
        &progress,
    )?;

    print_test_all_statistics(&stats);
    Ok(())
}

fn run_compare_command(config: &SimulationConfig) -> Result<()> {
    let space = code_space(config)?;
    let strategies = [
        SelectorType::Entropy(EntropySelector),
        SelectorType::Random(RandomSelector::new(config.seed)),
    ];

    println!(
        "\nComparing feedback rules over {} secrets ({} digits from {} symbols)\n",
        space.len(),
        config.length,
        config.alphabet_size
    );

    let report = run_comparison(
        &space,
        &FeedbackKind::ALL,
        &strategies,
        config.limit,
        config.parallel,
        true,
    )?;

    print_comparison(&report);
    Ok(())
}

fn run_chart_command(config: &SimulationConfig, metrics: &[String]) -> Result<()> {
    let series = if metrics.is_empty() {
        let space = code_space(config)?;
        let report = run_comparison(
            &space,
            &FeedbackKind::ALL,
            &[SelectorType::Entropy(EntropySelector)],
            config.limit,
            config.parallel,
            true,
        )?;
        report.chart_metrics()
    } else {
        metrics
            .iter()
            .map(|m| {
                m.parse::<ChartMetrics>()
                    .with_context(|| format!("Invalid metrics '{m}'"))
            })
            .collect::<Result<Vec<_>>>()?
    };

    print_charts(&series);
    Ok(())
}
