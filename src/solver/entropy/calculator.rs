//! Shannon entropy calculation for feedback partitions
//!
//! Given a guess and set of candidates, computes the expected information gain.

use crate::core::{Code, FeedbackRule};
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Comprehensive metrics for evaluating a guess
#[derive(Debug, Clone, Copy)]
pub struct GuessMetrics {
    /// Shannon entropy (expected information gain in bits)
    pub entropy: f64,
    /// Expected number of remaining candidates after this guess
    pub expected_remaining: f64,
    /// Largest partition cell (worst-case remaining candidates)
    pub max_partition: usize,
    /// Number of distinct feedback signals the guess can produce
    pub partition_count: usize,
}

/// Group candidates by the signal they would produce for `guess`
///
/// Each candidate is treated as a hypothetical secret: the rule is called as
/// `feedback(candidate, guess)`.
pub fn partition<F: FeedbackRule>(
    rule: &F,
    guess: &Code,
    candidates: &[Code],
) -> FxHashMap<F::Signal, usize> {
    let mut counts = FxHashMap::default();

    for candidate in candidates {
        let signal = rule.feedback(candidate, guess);
        *counts.entry(signal).or_insert(0) += 1;
    }

    counts
}

/// Calculate Shannon entropy for a guess against candidates
///
/// Returns the expected information gain in bits, or 0.0 when at most one
/// candidate remains.
///
/// # Formula
/// H(X) = -Σ p(x) * log₂(p(x))
///
/// where p(x) is the fraction of candidates producing signal x.
///
/// # Examples
/// ```
/// use mastermind_entropy::core::{Classic, CodeSpace};
/// use mastermind_entropy::solver::entropy::partition_entropy;
///
/// let space = CodeSpace::new(10, 3).unwrap();
/// let entropy = partition_entropy(&Classic, &space.codes()[0], space.codes());
/// assert!(entropy > 2.0 && entropy <= (720f64).log2());
/// ```
#[must_use]
pub fn partition_entropy<F: FeedbackRule>(rule: &F, guess: &Code, candidates: &[Code]) -> f64 {
    if candidates.len() <= 1 {
        return 0.0;
    }

    shannon_entropy(&partition(rule, guess, candidates))
}

/// Calculate Shannon entropy from a signal distribution
///
/// H = -Σ p * log₂(p)
///
/// Cells are summed smallest first, so two partitions with the same cell
/// sizes score bit-for-bit equal regardless of hash-map order. The solver's
/// tie-breaking depends on this.
///
/// # Properties
/// - Returns 0.0 for certain outcome (one cell with p=1)
/// - Maximized for uniform distribution
/// - Always in range [0, log₂(n)] for n cells
///
/// # Examples
/// ```
/// use mastermind_entropy::solver::entropy::shannon_entropy;
/// use rustc_hash::FxHashMap;
///
/// let mut uniform = FxHashMap::default();
/// uniform.insert('a', 25);
/// uniform.insert('b', 25);
/// uniform.insert('c', 25);
/// uniform.insert('d', 25);
///
/// let entropy = shannon_entropy(&uniform);
/// assert!((entropy - 2.0).abs() < 0.001); // log2(4) = 2 bits
/// ```
#[must_use]
pub fn shannon_entropy<K, S>(counts: &HashMap<K, usize, S>) -> f64
where
    K: Eq + Hash,
    S: BuildHasher,
{
    let mut sizes: Vec<usize> = counts.values().copied().filter(|&c| c > 0).collect();
    entropy_of_sizes(&mut sizes)
}

/// Entropy of a list of cell sizes; sorts the slice in place
#[must_use]
pub fn entropy_of_sizes(sizes: &mut [usize]) -> f64 {
    let total = sizes.iter().sum::<usize>() as f64;
    let occupied = sizes.iter().filter(|&&count| count > 0).count();

    // A single cell carries no information
    if occupied <= 1 {
        return 0.0;
    }

    sizes.sort_unstable();
    sizes
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Calculate comprehensive metrics for a guess
///
/// Returns entropy, expected remaining candidates, largest cell and cell count.
pub fn calculate_metrics<F: FeedbackRule>(
    rule: &F,
    guess: &Code,
    candidates: &[Code],
) -> GuessMetrics {
    if candidates.is_empty() {
        return GuessMetrics {
            entropy: 0.0,
            expected_remaining: 0.0,
            max_partition: 0,
            partition_count: 0,
        };
    }

    let counts = partition(rule, guess, candidates);
    let total = candidates.len() as f64;

    let entropy = if candidates.len() <= 1 {
        0.0
    } else {
        shannon_entropy(&counts)
    };

    // Expected remaining candidates
    let expected_remaining: f64 = counts
        .values()
        .map(|&size| {
            let p = size as f64 / total;
            p * size as f64
        })
        .sum();

    let max_partition = counts.values().copied().max().unwrap_or(0);

    GuessMetrics {
        entropy,
        expected_remaining,
        max_partition,
        partition_count: counts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classic, CodeSpace, Positional};

    fn codes(texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|t| Code::parse(t).unwrap()).collect()
    }

    #[test]
    fn shannon_entropy_uniform_distribution() {
        // 4 cells, each appears once = log2(4) = 2 bits
        let mut counts = FxHashMap::default();
        counts.insert(0u8, 1);
        counts.insert(1u8, 1);
        counts.insert(2u8, 1);
        counts.insert(3u8, 1);

        let entropy = shannon_entropy(&counts);
        assert!((entropy - 2.0).abs() < 0.001);
    }

    #[test]
    fn shannon_entropy_certain_outcome() {
        // Only one cell = 0 bits (no uncertainty)
        let mut counts = FxHashMap::default();
        counts.insert(0u8, 10);

        let entropy = shannon_entropy(&counts);
        assert!(entropy.abs() < 0.001);
    }

    #[test]
    fn shannon_entropy_skewed_distribution() {
        let uniform: FxHashMap<u8, usize> = (0..4).map(|k| (k, 25)).collect();
        let skewed: FxHashMap<u8, usize> = [(0, 97), (1, 1), (2, 1), (3, 1)].into_iter().collect();

        assert!(shannon_entropy(&uniform) > shannon_entropy(&skewed));
    }

    #[test]
    fn shannon_entropy_empty() {
        let counts: FxHashMap<u8, usize> = FxHashMap::default();
        assert!((shannon_entropy(&counts) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_is_order_independent() {
        let mut a = [3, 1, 7, 2, 2];
        let mut b = [2, 7, 2, 1, 3];
        assert_eq!(
            entropy_of_sizes(&mut a).to_bits(),
            entropy_of_sizes(&mut b).to_bits()
        );
    }

    #[test]
    fn partition_entropy_degenerate_sets() {
        let guess = Code::parse("012").unwrap();
        assert!(partition_entropy(&Classic, &guess, &[]).abs() < f64::EPSILON);
        assert!(partition_entropy(&Classic, &guess, &codes(&["345"])).abs() < f64::EPSILON);
    }

    #[test]
    fn partition_entropy_single_cell_is_zero() {
        // None of the candidates share a digit with the guess
        let guess = Code::parse("012").unwrap();
        let candidates = codes(&["345", "678", "987"]);
        assert!(partition_entropy(&Classic, &guess, &candidates).abs() < 0.001);
    }

    #[test]
    fn partition_entropy_all_singletons_is_log2_n() {
        let guess = Code::parse("012").unwrap();
        // (3,0), (0,0), (0,3), (1,0)
        let candidates = codes(&["012", "345", "120", "045"]);
        let entropy = partition_entropy(&Classic, &guess, &candidates);
        assert!((entropy - 2.0).abs() < 1e-12);
    }

    #[test]
    fn partition_entropy_bounded_by_log2_n() {
        let space = CodeSpace::new(6, 3).unwrap();
        let candidates = &space.codes()[..40];
        let bound = (candidates.len() as f64).log2();
        for guess in &space {
            let h = partition_entropy(&Positional, guess, candidates);
            assert!(h >= 0.0);
            assert!(h <= bound + 1e-12);
        }
    }

    #[test]
    fn partition_groups_every_candidate() {
        let space = CodeSpace::new(10, 3).unwrap();
        let guess = Code::parse("012").unwrap();
        let groups = partition(&Classic, &guess, space.codes());

        assert_eq!(groups.values().sum::<usize>(), 720);
        // All (bulls, cows) with bulls + cows <= 3, except (2, 1)
        assert_eq!(groups.len(), 9);
    }

    #[test]
    fn metrics_consistency() {
        let space = CodeSpace::new(10, 3).unwrap();
        let guess = Code::parse("012").unwrap();
        let metrics = calculate_metrics(&Positional, &guess, space.codes());

        assert!((metrics.entropy - partition_entropy(&Positional, &guess, space.codes())).abs() < 1e-12);
        assert!(metrics.expected_remaining >= 1.0);
        assert!(metrics.expected_remaining <= metrics.max_partition as f64);
        assert!(metrics.partition_count > 9);
    }
}
