//! Entropy-based guess evaluation
//!
//! Implements Shannon entropy calculation for feedback partitions.
//! This is the foundation of information-theoretic solving.

mod calculator;
mod selector;

pub use calculator::{
    GuessMetrics, calculate_metrics, entropy_of_sizes, partition, partition_entropy,
    shannon_entropy,
};
pub use selector::select_best_guess;
