//! Code representation
//!
//! A Code is a fixed-length sequence of digit symbols. Symbols are stored as
//! indices (0-9) together with a presence bitmask for fast membership tests.

use std::fmt;
use std::str::FromStr;

/// Longest code supported (one slot per digit)
pub const MAX_LENGTH: usize = 10;

/// Symbol alphabet, indexed by symbol value
pub const SYMBOLS: &[u8; MAX_LENGTH] = b"0123456789";

/// A guess or secret in the code-breaking game
///
/// Codes are `Copy` and compare by value: two codes are equal exactly when they
/// have the same symbols in the same order. Unused trailing slots are always
/// zero so the derived `Eq`/`Hash`/`Ord` stay value-based, and `Ord` on
/// same-length codes is lexicographic over symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    symbols: [u8; MAX_LENGTH],
    len: u8,
    mask: u16,
}

/// Error type for invalid codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    Empty,
    TooLong(usize),
    InvalidCharacter(char),
    SymbolOutOfRange { symbol: u8, alphabet_size: usize },
    RepeatedSymbol(char),
    LengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Code must contain at least one digit"),
            Self::TooLong(len) => {
                write!(f, "Code must be at most {MAX_LENGTH} digits, got {len}")
            }
            Self::InvalidCharacter(c) => write!(f, "Code contains non-digit character '{c}'"),
            Self::SymbolOutOfRange {
                symbol,
                alphabet_size,
            } => write!(
                f,
                "Digit {symbol} is outside the alphabet of {alphabet_size} symbols"
            ),
            Self::RepeatedSymbol(c) => write!(f, "Digit '{c}' appears more than once"),
            Self::LengthMismatch { expected, found } => {
                write!(f, "Code must be exactly {expected} digits, got {found}")
            }
        }
    }
}

impl std::error::Error for CodeError {}

impl Code {
    /// Create a code from symbol indices (0-9)
    ///
    /// Repeated symbols are accepted here so feedback can be computed on
    /// general inputs; membership in a [`CodeSpace`](super::CodeSpace)
    /// additionally requires distinct symbols.
    ///
    /// # Errors
    /// Returns `CodeError` if the slice is empty, longer than [`MAX_LENGTH`],
    /// or contains a symbol >= 10.
    ///
    /// # Examples
    /// ```
    /// use mastermind_entropy::core::Code;
    ///
    /// let code = Code::new(&[1, 2, 3]).unwrap();
    /// assert_eq!(code.to_string(), "123");
    ///
    /// assert!(Code::new(&[]).is_err());
    /// assert!(Code::new(&[12]).is_err());
    /// ```
    pub fn new(symbols: &[u8]) -> Result<Self, CodeError> {
        if symbols.is_empty() {
            return Err(CodeError::Empty);
        }
        if symbols.len() > MAX_LENGTH {
            return Err(CodeError::TooLong(symbols.len()));
        }

        let mut stored = [0u8; MAX_LENGTH];
        let mut mask = 0u16;
        for (slot, &symbol) in stored.iter_mut().zip(symbols) {
            if usize::from(symbol) >= MAX_LENGTH {
                return Err(CodeError::SymbolOutOfRange {
                    symbol,
                    alphabet_size: MAX_LENGTH,
                });
            }
            *slot = symbol;
            mask |= 1 << symbol;
        }

        Ok(Self {
            symbols: stored,
            len: symbols.len() as u8,
            mask,
        })
    }

    /// Parse a code from a digit string such as `"0123"`
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    /// Returns `CodeError` for empty input, non-digit characters or
    /// over-long input.
    pub fn parse(text: &str) -> Result<Self, CodeError> {
        let text = text.trim();
        let mut symbols = Vec::with_capacity(text.len());
        for c in text.chars() {
            let digit = c.to_digit(10).ok_or(CodeError::InvalidCharacter(c))?;
            symbols.push(digit as u8);
        }
        Self::new(&symbols)
    }

    /// Symbols of the code, in order
    #[inline]
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols[..self.len()]
    }

    /// Number of positions
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: a code holds at least one symbol
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Symbol at a position
    ///
    /// # Panics
    /// Panics if `position >= MAX_LENGTH`
    #[inline]
    #[must_use]
    pub const fn symbol_at(&self, position: usize) -> u8 {
        self.symbols[position]
    }

    /// Check whether a symbol appears anywhere in the code
    #[inline]
    #[must_use]
    pub const fn contains_symbol(&self, symbol: u8) -> bool {
        symbol < MAX_LENGTH as u8 && self.mask & (1 << symbol) != 0
    }

    /// True if any symbol occurs more than once
    #[must_use]
    pub const fn has_repeats(&self) -> bool {
        self.mask.count_ones() as usize != self.len as usize
    }

    /// Occurrence count of every symbol, indexed by symbol
    #[must_use]
    pub fn symbol_counts(&self) -> [u8; MAX_LENGTH] {
        let mut counts = [0u8; MAX_LENGTH];
        for &symbol in self.symbols() {
            counts[usize::from(symbol)] += 1;
        }
        counts
    }

    /// Validate this code against a game configuration
    ///
    /// # Errors
    /// Returns `CodeError` if the length differs, a symbol falls outside the
    /// alphabet, or a symbol repeats.
    pub fn validate(&self, alphabet_size: usize, length: usize) -> Result<(), CodeError> {
        if self.len() != length {
            return Err(CodeError::LengthMismatch {
                expected: length,
                found: self.len(),
            });
        }
        if let Some(&symbol) = self
            .symbols()
            .iter()
            .find(|&&s| usize::from(s) >= alphabet_size)
        {
            return Err(CodeError::SymbolOutOfRange {
                symbol,
                alphabet_size,
            });
        }
        if self.has_repeats() {
            let counts = self.symbol_counts();
            let repeated = self
                .symbols()
                .iter()
                .find(|&&s| counts[usize::from(s)] > 1)
                .map_or('?', |&s| char::from(SYMBOLS[usize::from(s)]));
            return Err(CodeError::RepeatedSymbol(repeated));
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in self.symbols() {
            write!(f, "{}", char::from(SYMBOLS[usize::from(symbol)]))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_parse_valid() {
        let code = Code::parse("0123").unwrap();
        assert_eq!(code.symbols(), &[0, 1, 2, 3]);
        assert_eq!(code.len(), 4);
        assert_eq!(code.to_string(), "0123");
    }

    #[test]
    fn code_parse_trims_whitespace() {
        let code: Code = " 987 ".parse().unwrap();
        assert_eq!(code.to_string(), "987");
    }

    #[test]
    fn code_parse_invalid() {
        assert_eq!(Code::parse(""), Err(CodeError::Empty));
        assert_eq!(Code::parse("12a"), Err(CodeError::InvalidCharacter('a')));
        assert_eq!(Code::parse("01234567890"), Err(CodeError::TooLong(11)));
    }

    #[test]
    fn code_accepts_repeats_but_reports_them() {
        let code = Code::parse("112").unwrap();
        assert!(code.has_repeats());
        assert!(!Code::parse("102").unwrap().has_repeats());
    }

    #[test]
    fn code_contains_symbol() {
        let code = Code::parse("406").unwrap();
        assert!(code.contains_symbol(4));
        assert!(code.contains_symbol(0));
        assert!(code.contains_symbol(6));
        assert!(!code.contains_symbol(5));
        assert!(!code.contains_symbol(42));
    }

    #[test]
    fn code_symbol_counts() {
        let counts = Code::parse("3313").unwrap().symbol_counts();
        assert_eq!(counts[3], 3);
        assert_eq!(counts[1], 1);
        assert_eq!(counts.iter().map(|&c| usize::from(c)).sum::<usize>(), 4);
    }

    #[test]
    fn code_equality_is_value_based() {
        let a = Code::parse("123").unwrap();
        let b = Code::new(&[1, 2, 3]).unwrap();
        let c = Code::parse("321").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = rustc_hash::FxHashSet::default();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn code_order_is_lexicographic() {
        let mut codes: Vec<Code> = ["210", "012", "102"]
            .iter()
            .map(|s| Code::parse(s).unwrap())
            .collect();
        codes.sort();
        let texts: Vec<String> = codes.iter().map(ToString::to_string).collect();
        assert_eq!(texts, ["012", "102", "210"]);
    }

    #[test]
    fn code_validate() {
        let code = Code::parse("123").unwrap();
        assert!(code.validate(10, 3).is_ok());
        assert_eq!(
            code.validate(10, 4),
            Err(CodeError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            code.validate(3, 3),
            Err(CodeError::SymbolOutOfRange {
                symbol: 3,
                alphabet_size: 3
            })
        );
        assert_eq!(
            Code::parse("121").unwrap().validate(10, 3),
            Err(CodeError::RepeatedSymbol('1'))
        );
    }
}
