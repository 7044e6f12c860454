//! Command implementations

pub mod analyze;
pub mod compare;
pub mod solve;
pub mod test_all;

pub use analyze::{AnalysisResult, FeedbackCell, analyze_code, analyze_with_kind};
pub use compare::{ComparisonReport, print_comparison, run_comparison};
pub use solve::{GuessStep, SolveResult, solve_code, solve_with_kind};
pub use test_all::{
    OpeningSummary, ProgressSink, TestAllStatistics, print_test_all_statistics, run_test_all,
    run_test_all_kind, terminal_progress,
};
