//! Solver loop: select, observe, prune until the secret is found

use super::strategy::{EntropySelector, GuessSelector, Selection};
use crate::core::{Code, CodeError, CodeSpace, FeedbackRule};
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::OnceLock;

/// Error type for solve requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The secret is not a member of the solver's code space
    SecretOutsideSpace { secret: Code, reason: CodeError },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretOutsideSpace { secret, reason } => {
                write!(f, "Secret {secret} is not in the code space: {reason}")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// One guess/feedback/prune cycle
#[derive(Debug, Clone, Copy)]
pub struct RoundReport<S> {
    /// 1-based round number
    pub round: usize,
    pub guess: Code,
    pub signal: S,
    pub candidates_before: usize,
    pub candidates_after: usize,
    /// Partition entropy of the guess, when it was scored
    pub score: Option<f64>,
}

impl<S> RoundReport<S> {
    /// Bits of information actually gained: log₂(before / after)
    #[must_use]
    pub fn information_bits(&self) -> f64 {
        if self.candidates_after == 0 {
            return 0.0;
        }
        (self.candidates_before as f64 / self.candidates_after as f64).log2()
    }
}

/// Receives a report after every round of a solve
///
/// `remaining` is the candidate set after pruning.
pub trait SolveObserver<S> {
    fn on_round(&mut self, round: &RoundReport<S>, remaining: &[Code]);
}

impl<S> SolveObserver<S> for () {
    fn on_round(&mut self, _round: &RoundReport<S>, _remaining: &[Code]) {}
}

/// Records every round for later display
impl<S: Copy> SolveObserver<S> for Vec<RoundReport<S>> {
    fn on_round(&mut self, round: &RoundReport<S>, _remaining: &[Code]) {
        self.push(*round);
    }
}

/// Outcome of solving one secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    pub secret: Code,
    /// Number of guesses used, including the final correct one
    pub guesses: usize,
}

/// Code-breaking solver
///
/// Borrows the shared code space and owns a feedback rule and a selector
/// template. Every call to [`Solver::solve`] works on its own candidate and
/// tried-guess sets, so one solver can be shared across threads.
pub struct Solver<'a, F: FeedbackRule, S: GuessSelector> {
    rule: F,
    selector: S,
    space: &'a CodeSpace,
    opening: OnceLock<Option<Selection>>,
}

impl<'a, F: FeedbackRule, S: GuessSelector> Solver<'a, F, S> {
    /// Create a new solver with the given rule, selector and code space
    pub const fn new(rule: F, selector: S, space: &'a CodeSpace) -> Self {
        Self {
            rule,
            selector,
            space,
            opening: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn rule(&self) -> &F {
        &self.rule
    }

    #[must_use]
    pub const fn selector(&self) -> &S {
        &self.selector
    }

    #[must_use]
    pub const fn space(&self) -> &'a CodeSpace {
        self.space
    }

    /// First guess of every game
    ///
    /// With a deterministic selector the opening state is the same for every
    /// secret, so the choice is computed once and cached. Random selectors
    /// return `None`: their opening differs per run.
    pub fn opening_guess(&self) -> Option<Selection> {
        if !self.selector.is_deterministic() {
            return None;
        }

        *self.opening.get_or_init(|| {
            let mut selector = self.selector.fork(0);
            let opening =
                selector.select_guess(&self.rule, self.space.codes(), &FxHashSet::default());
            if let Some(selection) = opening {
                log::debug!(
                    "{} opening guess: {} ({:.4} bits)",
                    self.rule.name(),
                    selection.guess,
                    selection.score.unwrap_or(0.0)
                );
            }
            opening
        })
    }

    /// Solve a secret and report the number of guesses
    ///
    /// # Errors
    /// Returns `SolveError` if the secret is not in the code space.
    pub fn solve(&self, secret: &Code) -> Result<SolveReport, SolveError> {
        self.solve_observed(secret, &mut ())
    }

    /// Solve a secret, reporting every round to `observer`
    ///
    /// # Errors
    /// Returns `SolveError` if the secret is not in the code space.
    ///
    /// # Panics
    /// Panics only if the candidate set runs empty, which a consistent
    /// feedback rule makes impossible: the secret always survives pruning.
    pub fn solve_observed<O: SolveObserver<F::Signal>>(
        &self,
        secret: &Code,
        observer: &mut O,
    ) -> Result<SolveReport, SolveError> {
        secret
            .validate(self.space.alphabet_size(), self.space.length())
            .map_err(|reason| SolveError::SecretOutsideSpace {
                secret: *secret,
                reason,
            })?;
        let run = self.space.index_of(secret).unwrap_or_default() as u64;

        let mut selector = self.selector.fork(run);
        let mut candidates: Vec<Code> = self.space.codes().to_vec();
        let mut tried: FxHashSet<Code> = FxHashSet::default();
        let mut guesses = 0;

        loop {
            let choice = if candidates.len() == 1 {
                Some(Selection::forced(candidates[0]))
            } else if guesses == 0 && selector.is_deterministic() {
                self.opening_guess()
            } else {
                selector.select_guess(&self.rule, &candidates, &tried)
            };
            let selection = choice.expect("candidate set always contains the secret");

            guesses += 1;
            tried.insert(selection.guess);
            let signal = self.rule.feedback(secret, &selection.guess);

            let candidates_before = candidates.len();
            candidates.retain(|c| self.rule.feedback(c, &selection.guess) == signal);
            debug_assert!(candidates.contains(secret), "secret pruned from candidates");

            let report = RoundReport {
                round: guesses,
                guess: selection.guess,
                signal,
                candidates_before,
                candidates_after: candidates.len(),
                score: selection.score,
            };
            log::trace!(
                "secret {secret} round {guesses}: {} -> {signal} ({candidates_before} -> {})",
                selection.guess,
                candidates.len()
            );
            observer.on_round(&report, &candidates);

            if selection.guess == *secret {
                return Ok(SolveReport {
                    secret: *secret,
                    guesses,
                });
            }
        }
    }
}

/// Solve one secret with the entropy strategy and return the guess count
///
/// # Errors
/// Returns `SolveError` if the secret is not in the code space.
///
/// # Examples
/// ```
/// use mastermind_entropy::core::{Classic, Code, CodeSpace};
/// use mastermind_entropy::solver::solve_secret;
///
/// let space = CodeSpace::new(10, 3).unwrap();
/// let secret = Code::parse("123").unwrap();
/// let guesses = solve_secret(Classic, &space, &secret).unwrap();
/// assert!(guesses >= 1 && guesses <= space.len());
/// ```
pub fn solve_secret<F: FeedbackRule>(
    rule: F,
    space: &CodeSpace,
    secret: &Code,
) -> Result<usize, SolveError> {
    Solver::new(rule, EntropySelector, space)
        .solve(secret)
        .map(|report| report.guesses)
}
