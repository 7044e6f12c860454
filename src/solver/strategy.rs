//! Guess selection strategies
//!
//! Defines the `GuessSelector` trait and concrete implementations.

use crate::core::{Code, FeedbackRule};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 0x5EED;

/// A chosen guess and the score that won it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub guess: Code,
    /// Partition entropy in bits, if the selector computed one
    pub score: Option<f64>,
}

impl Selection {
    /// A guess taken without scoring (e.g. the last remaining candidate)
    #[must_use]
    pub const fn forced(guess: Code) -> Self {
        Self { guess, score: None }
    }
}

/// A strategy for choosing the next guess from the candidate set
pub trait GuessSelector: Sync {
    /// Select the next guess
    ///
    /// `candidates` is in code-space order. Returns `None` only if
    /// `candidates` is empty.
    fn select_guess<F: FeedbackRule>(
        &mut self,
        rule: &F,
        candidates: &[Code],
        tried: &FxHashSet<Code>,
    ) -> Option<Selection>;

    /// Independent selector for one solver run
    ///
    /// `run` identifies the secret, so seeded selectors stay reproducible when
    /// runs execute in parallel.
    #[must_use]
    fn fork(&self, run: u64) -> Self
    where
        Self: Sized;

    /// True if the same state always yields the same guess
    fn is_deterministic(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// Candidates not tried yet, in candidate order
///
/// Falls back to every candidate when all of them have been tried.
#[must_use]
pub fn evaluation_pool(candidates: &[Code], tried: &FxHashSet<Code>) -> Vec<Code> {
    let untried: Vec<Code> = candidates
        .iter()
        .filter(|c| !tried.contains(*c))
        .copied()
        .collect();

    if untried.is_empty() {
        candidates.to_vec()
    } else {
        untried
    }
}

/// Enum wrapper for all selector types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone)]
pub enum SelectorType {
    /// Pure entropy maximization (default)
    Entropy(EntropySelector),
    /// Uniform random choice among untried candidates
    Random(RandomSelector),
}

impl SelectorType {
    /// Create selector from name string
    ///
    /// Supported names (case-insensitive): "entropy", "pure-entropy", "random".
    /// Returns `None` if the name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str, seed: u64) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "entropy" | "pure-entropy" => Some(Self::Entropy(EntropySelector)),
            "random" => Some(Self::Random(RandomSelector::new(seed))),
            _ => None,
        }
    }
}

impl Default for SelectorType {
    fn default() -> Self {
        Self::Entropy(EntropySelector)
    }
}

impl GuessSelector for SelectorType {
    fn select_guess<F: FeedbackRule>(
        &mut self,
        rule: &F,
        candidates: &[Code],
        tried: &FxHashSet<Code>,
    ) -> Option<Selection> {
        match self {
            Self::Entropy(s) => s.select_guess(rule, candidates, tried),
            Self::Random(s) => s.select_guess(rule, candidates, tried),
        }
    }

    fn fork(&self, run: u64) -> Self {
        match self {
            Self::Entropy(s) => Self::Entropy(s.fork(run)),
            Self::Random(s) => Self::Random(s.fork(run)),
        }
    }

    fn is_deterministic(&self) -> bool {
        match self {
            Self::Entropy(s) => s.is_deterministic(),
            Self::Random(s) => s.is_deterministic(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Entropy(s) => s.name(),
            Self::Random(s) => s.name(),
        }
    }
}

/// Pure entropy maximization strategy
///
/// Scores every untried candidate by the entropy of the partition it induces
/// over the candidate set and picks the highest; ties go to the earliest
/// candidate in code-space order.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropySelector;

impl GuessSelector for EntropySelector {
    fn select_guess<F: FeedbackRule>(
        &mut self,
        rule: &F,
        candidates: &[Code],
        tried: &FxHashSet<Code>,
    ) -> Option<Selection> {
        let pool = evaluation_pool(candidates, tried);

        super::entropy::select_best_guess(rule, &pool, candidates).map(|(guess, entropy)| {
            Selection {
                guess,
                score: Some(entropy),
            }
        })
    }

    fn fork(&self, _run: u64) -> Self {
        Self
    }

    fn is_deterministic(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Entropy"
    }
}

/// Random strategy
///
/// Picks uniformly among untried candidates. This is the baseline the entropy
/// strategy is measured against.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    seed: u64,
    rng: StdRng,
}

impl RandomSelector {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl GuessSelector for RandomSelector {
    fn select_guess<F: FeedbackRule>(
        &mut self,
        _rule: &F,
        candidates: &[Code],
        tried: &FxHashSet<Code>,
    ) -> Option<Selection> {
        use rand::prelude::IndexedRandom;

        let pool = evaluation_pool(candidates, tried);
        pool.choose(&mut self.rng).copied().map(Selection::forced)
    }

    fn fork(&self, run: u64) -> Self {
        // SplitMix64 increment keeps per-run streams apart
        Self::new(self.seed ^ run.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Classic, CodeSpace};

    fn codes(texts: &[&str]) -> Vec<Code> {
        texts.iter().map(|t| Code::parse(t).unwrap()).collect()
    }

    #[test]
    fn evaluation_pool_skips_tried() {
        let candidates = codes(&["012", "013", "014"]);
        let tried: FxHashSet<Code> = codes(&["013"]).into_iter().collect();

        let pool = evaluation_pool(&candidates, &tried);
        assert_eq!(pool, codes(&["012", "014"]));
    }

    #[test]
    fn evaluation_pool_falls_back_to_all_candidates() {
        let candidates = codes(&["012", "013"]);
        let tried: FxHashSet<Code> = candidates.iter().copied().collect();

        assert_eq!(evaluation_pool(&candidates, &tried), candidates);
    }

    #[test]
    fn entropy_selector_opening_is_first_code() {
        let space = CodeSpace::new(10, 3).unwrap();
        let selection = EntropySelector
            .select_guess(&Classic, space.codes(), &FxHashSet::default())
            .unwrap();

        assert_eq!(selection.guess.to_string(), "012");
        assert!(selection.score.unwrap() > 2.0);
    }

    #[test]
    fn entropy_selector_avoids_tried_guesses() {
        let space = CodeSpace::new(10, 3).unwrap();
        let tried: FxHashSet<Code> = codes(&["012"]).into_iter().collect();
        let selection = EntropySelector
            .select_guess(&Classic, space.codes(), &tried)
            .unwrap();

        // Every code ties on the full space; the first untried one wins
        assert_eq!(selection.guess.to_string(), "013");
    }

    #[test]
    fn random_selector_picks_from_untried_candidates() {
        let candidates = codes(&["012", "013", "014", "015"]);
        let tried: FxHashSet<Code> = codes(&["012", "015"]).into_iter().collect();
        let mut selector = RandomSelector::new(7);

        for _ in 0..20 {
            let selection = selector.select_guess(&Classic, &candidates, &tried).unwrap();
            assert!(!tried.contains(&selection.guess));
            assert!(candidates.contains(&selection.guess));
            assert!(selection.score.is_none());
        }
    }

    #[test]
    fn random_selector_is_reproducible_per_seed() {
        let space = CodeSpace::new(10, 3).unwrap();
        let tried = FxHashSet::default();

        let picks = |seed: u64| -> Vec<Code> {
            let mut selector = RandomSelector::new(seed).fork(3);
            (0..5)
                .map(|_| selector.select_guess(&Classic, space.codes(), &tried).unwrap().guess)
                .collect()
        };

        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn selectors_return_none_without_candidates() {
        let tried = FxHashSet::default();
        assert!(EntropySelector.select_guess(&Classic, &[], &tried).is_none());
        assert!(RandomSelector::default().select_guess(&Classic, &[], &tried).is_none());
    }

    #[test]
    fn selector_type_from_name() {
        assert!(matches!(
            SelectorType::from_name("random", 1),
            Some(SelectorType::Random(_))
        ));
        assert!(matches!(
            SelectorType::from_name("entropy", 1),
            Some(SelectorType::Entropy(_))
        ));
        assert!(matches!(
            SelectorType::from_name("pure-entropy", 1),
            Some(SelectorType::Entropy(_))
        ));
        assert!(SelectorType::from_name("entropy", 1).unwrap().is_deterministic());
        assert!(!SelectorType::from_name("random", 1).unwrap().is_deterministic());
    }

    #[test]
    fn selector_type_from_name_ignores_case() {
        for name in ["Random", "RANDOM", "rAnDoM"] {
            match SelectorType::from_name(name, 9) {
                Some(SelectorType::Random(selector)) => assert_eq!(selector.seed(), 9),
                _ => panic!("{name} should select the random strategy"),
            }
        }
        assert!(matches!(
            SelectorType::from_name("Entropy", 9),
            Some(SelectorType::Entropy(_))
        ));
    }

    #[test]
    fn selector_type_rejects_unknown_names() {
        for name in ["randm", "minimax", "", "entropy "] {
            assert!(SelectorType::from_name(name, 1).is_none(), "{name:?}");
        }
    }
}
