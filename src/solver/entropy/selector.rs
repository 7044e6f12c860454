//! Pure entropy-based guess selection
//!
//! Selects the guess that maximizes Shannon entropy (expected information gain).

use super::calculator::partition_entropy;
use crate::core::{Code, FeedbackRule};
use rayon::prelude::*;

/// Select best guess by maximizing entropy
///
/// Returns the guess with highest entropy and its entropy value, or `None` if
/// the guess pool is empty. Guesses are scored in parallel; ties go to the
/// guess that comes first in `guess_pool`, exactly as a sequential
/// first-maximum scan would choose.
///
/// # Examples
/// ```
/// use mastermind_entropy::core::{Classic, Code};
/// use mastermind_entropy::solver::entropy::select_best_guess;
///
/// let pool = vec![Code::parse("789").unwrap(), Code::parse("012").unwrap()];
/// let candidates = vec![
///     Code::parse("012").unwrap(),
///     Code::parse("021").unwrap(),
///     Code::parse("345").unwrap(),
/// ];
///
/// let (best, entropy) = select_best_guess(&Classic, &pool, &candidates).unwrap();
/// assert_eq!(best.to_string(), "012"); // 789 cannot tell the candidates apart
/// assert!(entropy > 1.0);
/// ```
#[must_use]
pub fn select_best_guess<F: FeedbackRule>(
    rule: &F,
    guess_pool: &[Code],
    candidates: &[Code],
) -> Option<(Code, f64)> {
    let (index, entropy) = guess_pool
        .par_iter()
        .enumerate()
        .map(|(index, guess)| (index, partition_entropy(rule, guess, candidates)))
        // Higher entropy wins, then the earlier pool position
        .max_by(|(i1, e1), (i2, e2)| e1.total_cmp(e2).then_with(|| i2.cmp(i1)))?;

    log::trace!(
        "best of {} guesses: {} ({entropy:.4} bits)",
        guess_pool.len(),
        guess_pool[index]
    );

    Some((guess_pool[index], entropy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classic, CodeSpace, Positional};

    fn codes(texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|t| Code::parse(t).unwrap()).collect()
    }

    #[test]
    fn selects_highest_entropy() {
        let pool = codes(&["789", "031"]);
        let candidates = codes(&["012", "013", "310", "456"]);

        let (best, entropy) = select_best_guess(&Classic, &pool, &candidates).unwrap();

        // 789 shares nothing with any candidate: a single cell
        assert_eq!(best.to_string(), "031");
        assert!(entropy > 0.5);
    }

    #[test]
    fn single_guess_returns_that_guess() {
        let pool = codes(&["987"]);
        let candidates = codes(&["012"]);

        let (best, entropy) = select_best_guess(&Classic, &pool, &candidates).unwrap();
        assert_eq!(best.to_string(), "987");
        assert!(entropy.abs() < f64::EPSILON);
    }

    #[test]
    fn ties_go_to_first_in_pool_order() {
        // Every guess in the full space splits it identically
        let space = CodeSpace::new(10, 3).unwrap();
        let (best, _) = select_best_guess(&Classic, space.codes(), space.codes()).unwrap();
        assert_eq!(best, space.codes()[0]);

        let reversed: Vec<Code> = space.codes().iter().rev().copied().collect();
        let (best, _) = select_best_guess(&Positional, &reversed, space.codes()).unwrap();
        assert_eq!(best, reversed[0]);
    }

    #[test]
    fn matches_sequential_first_maximum() {
        let space = CodeSpace::new(6, 3).unwrap();
        let candidates: Vec<Code> = space.codes().iter().step_by(3).copied().collect();

        let mut expected: Option<(Code, f64)> = None;
        for guess in &space {
            let score = partition_entropy(&Classic, guess, &candidates);
            if expected.is_none_or(|(_, best)| score > best) {
                expected = Some((*guess, score));
            }
        }

        let (best, score) = select_best_guess(&Classic, space.codes(), &candidates).unwrap();
        let (expected_best, expected_score) = expected.unwrap();
        assert_eq!(best, expected_best);
        assert_eq!(score.to_bits(), expected_score.to_bits());
    }

    #[test]
    fn returns_none_on_empty_guess_pool() {
        let candidates = codes(&["012"]);
        assert!(select_best_guess(&Classic, &[], &candidates).is_none());
    }
}
