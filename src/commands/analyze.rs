//! Guess analysis command
//!
//! Analyzes the entropy and partition shape of a specific guess against the
//! full code space.

use crate::core::{Classic, CodeError, CodeSpace, FeedbackKind, FeedbackRule, Positional};
use crate::solver::entropy::{calculate_metrics, partition};

/// One feedback cell of a guess's partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCell {
    pub signal: String,
    /// Signal as drawn in the terminal
    pub rendered: String,
    pub size: usize,
}

/// Result of analyzing a guess
pub struct AnalysisResult {
    pub guess: String,
    pub feedback: FeedbackKind,
    pub entropy: f64,
    pub expected_reduction: f64,
    pub expected_remaining: f64,
    pub max_partition: usize,
    pub total_candidates: usize,
    /// Feedback cells, largest first
    pub cells: Vec<FeedbackCell>,
}

/// Analyze a guess under one feedback rule
///
/// # Errors
///
/// Returns an error if the guess is not a member of `space`.
pub fn analyze_code<F: FeedbackRule>(
    rule: &F,
    feedback: FeedbackKind,
    space: &CodeSpace,
    guess: &str,
) -> Result<AnalysisResult, CodeError> {
    let code = space.parse(guess)?;
    let metrics = calculate_metrics(rule, &code, space.codes());

    let mut cells: Vec<FeedbackCell> = partition(rule, &code, space.codes())
        .into_iter()
        .map(|(signal, size)| FeedbackCell {
            signal: signal.to_string(),
            rendered: rule.render(signal),
            size,
        })
        .collect();
    cells.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.signal.cmp(&b.signal)));

    Ok(AnalysisResult {
        guess: code.to_string(),
        feedback,
        entropy: metrics.entropy,
        expected_reduction: metrics.entropy.exp2(),
        expected_remaining: metrics.expected_remaining,
        max_partition: metrics.max_partition,
        total_candidates: space.len(),
        cells,
    })
}

/// Analyze a guess under the rule named by `feedback`
///
/// # Errors
///
/// Returns an error if the guess is not a member of `space`.
pub fn analyze_with_kind(
    feedback: FeedbackKind,
    space: &CodeSpace,
    guess: &str,
) -> Result<AnalysisResult, CodeError> {
    match feedback {
        FeedbackKind::Classic => analyze_code(&Classic, feedback, space, guess),
        FeedbackKind::Positional => analyze_code(&Positional, feedback, space, guess),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> CodeSpace {
        CodeSpace::new(10, 3).unwrap()
    }

    #[test]
    fn analyze_opening_guess() {
        let result = analyze_with_kind(FeedbackKind::Classic, &space(), "012").unwrap();

        assert_eq!(result.guess, "012");
        assert_eq!(result.total_candidates, 720);
        assert_eq!(result.cells.len(), 9);
        assert_eq!(result.cells.iter().map(|cell| cell.size).sum::<usize>(), 720);
        assert!((result.entropy - 2.253_737_971_176_099).abs() < 1e-9);
        assert_eq!(result.max_partition, result.cells[0].size);
        assert!(result.cells.iter().all(|cell| cell.rendered == cell.signal));
    }

    #[test]
    fn positional_analysis_has_more_cells() {
        let classic = analyze_with_kind(FeedbackKind::Classic, &space(), "012").unwrap();
        let positional = analyze_with_kind(FeedbackKind::Positional, &space(), "012").unwrap();

        assert_eq!(positional.cells.len(), 24);
        let solved = positional.cells.iter().find(|cell| cell.signal == "222").unwrap();
        assert_eq!(solved.rendered, "🟩🟩🟩");
        assert_eq!(solved.size, 1);
        assert!(positional.entropy > classic.entropy);
        assert!(positional.expected_remaining < classic.expected_remaining);
    }

    #[test]
    fn analyze_invalid_guess() {
        assert!(analyze_with_kind(FeedbackKind::Classic, &space(), "011").is_err());
        assert!(analyze_with_kind(FeedbackKind::Classic, &space(), "0123").is_err());
    }

    #[test]
    fn entropy_properties() {
        let result = analyze_with_kind(FeedbackKind::Positional, &space(), "987").unwrap();

        assert!(result.entropy >= 0.0);
        assert!(result.entropy <= (result.total_candidates as f64).log2());
        assert!(result.expected_remaining >= 1.0);
        assert!(result.expected_remaining <= result.max_partition as f64);
        assert!(result.expected_reduction >= 1.0);
    }
}
