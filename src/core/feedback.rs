//! Feedback calculation and representation
//!
//! Two feedback rules are supported:
//! - Classic: a (bulls, cows) pair summarizing the whole guess
//! - Positional: one mark per position, Wordle-style
//!   - 0 = symbol not in the secret
//!   - 1 = symbol in the secret, different position
//!   - 2 = symbol in the correct position
//!
//! Positional marks are packed as a base-3 number, where position `i`
//! contributes `mark × 3^i`.

use super::code::{Code, MAX_LENGTH};
use std::fmt;
use std::hash::Hash;

/// A rule mapping (secret, guess) to a feedback signal
///
/// Implementations must be pure: the solver calls the same rule both to
/// simulate a hypothetical secret and to score against the real one.
pub trait FeedbackRule: Sync {
    /// Hashable feedback value
    type Signal: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync;

    /// Human-readable rule name
    fn name(&self) -> &'static str;

    /// Feedback for `guess` when `secret` is the hidden code
    fn feedback(&self, secret: &Code, guess: &Code) -> Self::Signal;

    /// The signal produced by a correct guess of the given length
    fn solved_signal(&self, length: usize) -> Self::Signal;

    fn is_solved(&self, signal: Self::Signal, length: usize) -> bool {
        signal == self.solved_signal(length)
    }

    /// Terminal rendering of a signal; plain text unless overridden
    fn render(&self, signal: Self::Signal) -> String {
        signal.to_string()
    }
}

/// Classic Bulls & Cows feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BullsCows {
    pub bulls: u8,
    pub cows: u8,
}

impl BullsCows {
    #[must_use]
    pub const fn new(bulls: u8, cows: u8) -> Self {
        Self { bulls, cows }
    }
}

impl fmt::Display for BullsCows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B {}C", self.bulls, self.cows)
    }
}

/// Per-position feedback marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionalMarks {
    value: u16,
    len: u8,
}

impl PositionalMarks {
    /// Pack marks (each 0, 1 or 2) into a signal
    ///
    /// # Panics
    /// Panics in debug mode if a mark is above 2 or more than
    /// [`MAX_LENGTH`] marks are given
    #[must_use]
    pub fn from_marks(marks: &[u8]) -> Self {
        debug_assert!(marks.len() <= MAX_LENGTH, "Too many marks");

        let mut value = 0u16;
        let mut multiplier = 1u16;
        for &mark in marks {
            debug_assert!(mark <= 2, "Mark must be 0, 1 or 2");
            value += u16::from(mark) * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }

        Self {
            value,
            len: marks.len() as u8,
        }
    }

    /// Raw base-3 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Unpack into one mark per position
    #[must_use]
    pub fn marks(self) -> Vec<u8> {
        let mut marks = Vec::with_capacity(self.len());
        let mut val = self.value;
        for _ in 0..self.len {
            marks.push((val % 3) as u8);
            val /= 3;
        }
        marks
    }

    /// Render as coloured squares, e.g. "🟩🟨⬜"
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.marks()
            .into_iter()
            .map(|mark| match mark {
                2 => '🟩',
                1 => '🟨',
                _ => '⬜',
            })
            .collect()
    }
}

impl fmt::Display for PositionalMarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.marks() {
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}

/// Bulls and cows of `guess` against `secret`
///
/// Bulls count positional matches. Cows use the multiset formula: for each
/// distinct guess symbol, take the smaller of its occurrence counts in secret
/// and guess, sum, then subtract bulls. This stays correct for codes with
/// repeated symbols.
///
/// # Examples
/// ```
/// use mastermind_entropy::core::{Code, classic_feedback};
///
/// let secret = Code::parse("123").unwrap();
/// let guess = Code::parse("321").unwrap();
/// let fb = classic_feedback(&secret, &guess);
/// assert_eq!((fb.bulls, fb.cows), (1, 2));
/// ```
#[must_use]
pub fn classic_feedback(secret: &Code, guess: &Code) -> BullsCows {
    debug_assert_eq!(secret.len(), guess.len(), "Codes must have equal length");

    let bulls = secret
        .symbols()
        .iter()
        .zip(guess.symbols())
        .filter(|(s, g)| s == g)
        .count() as u8;

    let secret_counts = secret.symbol_counts();
    let guess_counts = guess.symbol_counts();
    let common: u8 = secret_counts
        .iter()
        .zip(&guess_counts)
        .filter(|&(_, &g)| g > 0)
        .map(|(&s, &g)| s.min(g))
        .sum();

    BullsCows {
        bulls,
        cows: common - bulls,
    }
}

/// Per-position marks of `guess` against `secret`
///
/// # Examples
/// ```
/// use mastermind_entropy::core::{Code, positional_feedback};
///
/// let secret = Code::parse("123").unwrap();
/// let guess = Code::parse("132").unwrap();
/// assert_eq!(positional_feedback(&secret, &guess).marks(), vec![2, 1, 1]);
/// ```
#[must_use]
pub fn positional_feedback(secret: &Code, guess: &Code) -> PositionalMarks {
    debug_assert_eq!(secret.len(), guess.len(), "Codes must have equal length");

    let mut value = 0u16;
    let mut multiplier = 1u16;
    for (i, &symbol) in guess.symbols().iter().enumerate() {
        let mark = if secret.symbol_at(i) == symbol {
            2
        } else if secret.contains_symbol(symbol) {
            1
        } else {
            0
        };
        value += mark * multiplier;
        multiplier = multiplier.wrapping_mul(3);
    }

    PositionalMarks {
        value,
        len: guess.len() as u8,
    }
}

/// Bulls & Cows rule
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl FeedbackRule for Classic {
    type Signal = BullsCows;

    fn name(&self) -> &'static str {
        "Classic (Bulls/Cows)"
    }

    #[inline]
    fn feedback(&self, secret: &Code, guess: &Code) -> BullsCows {
        classic_feedback(secret, guess)
    }

    fn solved_signal(&self, length: usize) -> BullsCows {
        BullsCows::new(length as u8, 0)
    }
}

/// Per-position marks rule
#[derive(Debug, Clone, Copy, Default)]
pub struct Positional;

impl FeedbackRule for Positional {
    type Signal = PositionalMarks;

    fn name(&self) -> &'static str {
        "Positional (2/1/0)"
    }

    #[inline]
    fn feedback(&self, secret: &Code, guess: &Code) -> PositionalMarks {
        positional_feedback(secret, guess)
    }

    fn solved_signal(&self, length: usize) -> PositionalMarks {
        PositionalMarks::from_marks(&vec![2; length])
    }

    fn render(&self, signal: PositionalMarks) -> String {
        signal.to_emoji()
    }
}

/// Runtime choice of feedback rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Classic,
    Positional,
}

impl FeedbackKind {
    /// Every supported rule, classic first
    pub const ALL: [Self; 2] = [Self::Classic, Self::Positional];

    /// Create from name string
    ///
    /// Supported names: "classic", "bulls-cows", "positional", "wordle".
    /// Returns `None` if the name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" | "bulls-cows" | "bulls" => Some(Self::Classic),
            "positional" | "wordle" => Some(Self::Positional),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "Classic (Bulls/Cows)",
            Self::Positional => "Positional (2/1/0)",
        }
    }

    /// Short label for tables and charts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Positional => "Positional",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
