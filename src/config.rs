//! Simulation configuration
//!
//! Collects the game parameters (alphabet, code length, feedback rule) and the
//! harness options (strategy, seed, parallelism) in one place.

use crate::core::{CodeSpace, CodeSpaceError, FeedbackKind, MAX_LENGTH};
use crate::solver::{DEFAULT_SEED, SelectorType};

/// Configuration for one simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of digit symbols (at most 10)
    pub alphabet_size: usize,
    /// Code length (at most `alphabet_size`)
    pub length: usize,
    pub feedback: FeedbackKind,
    /// Guess selection strategy (entropy by default)
    pub strategy: SelectorType,
    /// Seed for random strategies started by the harness
    pub seed: u64,
    /// Solve secrets on the rayon thread pool
    pub parallel: bool,
    /// Only solve the first N secrets
    pub limit: Option<usize>,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(alphabet_size: usize, length: usize) -> Self {
        Self {
            alphabet_size,
            length,
            ..Self::default()
        }
    }

    /// Build the code space for this configuration
    ///
    /// # Errors
    /// Returns `CodeSpaceError` if the alphabet and length are inconsistent.
    pub fn code_space(&self) -> Result<CodeSpace, CodeSpaceError> {
        CodeSpace::new(self.alphabet_size, self.length)
    }

    /// A fresh copy of the configured selector
    #[must_use]
    pub fn selector(&self) -> SelectorType {
        self.strategy.clone()
    }
}

impl Default for SimulationConfig {
    /// Three digits from 0-9, classic feedback, entropy strategy
    fn default() -> Self {
        Self {
            alphabet_size: MAX_LENGTH,
            length: 3,
            feedback: FeedbackKind::Classic,
            strategy: SelectorType::default(),
            seed: DEFAULT_SEED,
            parallel: true,
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::GuessSelector;

    #[test]
    fn default_configuration() {
        let config = SimulationConfig::default();
        assert_eq!(config.code_space().unwrap().len(), 720);
        assert_eq!(config.feedback, FeedbackKind::Classic);
        assert!(config.selector().is_deterministic());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = SimulationConfig::new(3, 5);
        assert!(matches!(
            config.code_space(),
            Err(CodeSpaceError::LengthExceedsAlphabet { .. })
        ));
    }

    #[test]
    fn configured_strategy_is_used() {
        let config = SimulationConfig {
            strategy: SelectorType::from_name("RANDOM", 11).unwrap(),
            ..SimulationConfig::default()
        };
        match config.selector() {
            SelectorType::Random(selector) => assert_eq!(selector.seed(), 11),
            SelectorType::Entropy(_) => panic!("expected random selector"),
        }
        assert_eq!(config.selector().name(), "Random");
    }
}
