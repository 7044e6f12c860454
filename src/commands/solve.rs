//! Secret solving command
//!
//! Solves a specific secret and returns the full solution path.

use crate::core::{Classic, Code, CodeSpace, FeedbackKind, FeedbackRule, Positional};
use crate::solver::{GuessSelector, RoundReport, SolveError, Solver};
use anyhow::Context;

/// Result of solving a secret
pub struct SolveResult {
    pub secret: String,
    pub feedback: FeedbackKind,
    pub strategy: &'static str,
    pub guesses: Vec<GuessStep>,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub guess: String,
    pub signal: String,
    /// Signal as drawn in the terminal
    pub rendered: String,
    pub candidates_before: usize,
    pub candidates_after: usize,
    pub entropy: Option<f64>,
    pub information_bits: f64,
}

impl GuessStep {
    fn from_round<F: FeedbackRule>(rule: &F, round: &RoundReport<F::Signal>) -> Self {
        Self {
            guess: round.guess.to_string(),
            signal: round.signal.to_string(),
            rendered: rule.render(round.signal),
            candidates_before: round.candidates_before,
            candidates_after: round.candidates_after,
            entropy: round.score,
            information_bits: round.information_bits(),
        }
    }
}

/// Solve a secret using the given solver, recording every round
///
/// # Errors
///
/// Returns an error if the secret is not in the solver's code space.
pub fn solve_code<F: FeedbackRule, S: GuessSelector>(
    solver: &Solver<F, S>,
    secret: &Code,
) -> Result<Vec<GuessStep>, SolveError> {
    let mut rounds: Vec<RoundReport<F::Signal>> = Vec::new();
    solver.solve_observed(secret, &mut rounds)?;

    Ok(rounds
        .iter()
        .map(|round| GuessStep::from_round(solver.rule(), round))
        .collect())
}

/// Parse `secret` and solve it under the given feedback rule
///
/// # Errors
///
/// Returns an error if the secret is not a valid member of `space`.
pub fn solve_with_kind<S: GuessSelector>(
    feedback: FeedbackKind,
    selector: S,
    space: &CodeSpace,
    secret: &str,
) -> anyhow::Result<SolveResult> {
    let code = space
        .parse(secret)
        .with_context(|| format!("Invalid secret '{secret}'"))?;
    let strategy = selector.name();

    let guesses = match feedback {
        FeedbackKind::Classic => solve_code(&Solver::new(Classic, selector, space), &code)?,
        FeedbackKind::Positional => solve_code(&Solver::new(Positional, selector, space), &code)?,
    };

    Ok(SolveResult {
        secret: code.to_string(),
        feedback,
        strategy,
        guesses,
    })
}
