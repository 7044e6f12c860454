//! Code space enumeration
//!
//! The code space is every sequence of `length` distinct symbols drawn from an
//! alphabet of `alphabet_size` digits. It is built once per configuration and
//! shared read-only by every solver run.

use super::code::{Code, CodeError, MAX_LENGTH};
use std::fmt;

/// Error type for invalid game configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSpaceError {
    EmptyLength,
    AlphabetTooLarge(usize),
    LengthExceedsAlphabet { length: usize, alphabet_size: usize },
}

impl fmt::Display for CodeSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLength => write!(f, "Code length must be at least 1"),
            Self::AlphabetTooLarge(size) => write!(
                f,
                "Alphabet must have at most {MAX_LENGTH} digits, got {size}"
            ),
            Self::LengthExceedsAlphabet {
                length,
                alphabet_size,
            } => write!(
                f,
                "Code length {length} exceeds alphabet size {alphabet_size} (symbols cannot repeat)"
            ),
        }
    }
}

impl std::error::Error for CodeSpaceError {}

/// All valid codes for one (alphabet, length) configuration
///
/// Codes are stored in lexicographic order of their symbols. Solvers iterate
/// in this order, which makes tie-breaking reproducible.
#[derive(Debug, Clone)]
pub struct CodeSpace {
    alphabet_size: usize,
    length: usize,
    codes: Vec<Code>,
}

impl CodeSpace {
    /// Enumerate every code of `length` distinct symbols from `alphabet_size` digits
    ///
    /// # Errors
    /// Returns `CodeSpaceError` if `length` is zero, the alphabet has more than
    /// ten symbols, or `length > alphabet_size`.
    ///
    /// # Examples
    /// ```
    /// use mastermind_entropy::core::CodeSpace;
    ///
    /// let space = CodeSpace::new(10, 3).unwrap();
    /// assert_eq!(space.len(), 720); // 10 × 9 × 8
    /// assert_eq!(space.codes()[0].to_string(), "012");
    ///
    /// assert!(CodeSpace::new(3, 4).is_err());
    /// ```
    pub fn new(alphabet_size: usize, length: usize) -> Result<Self, CodeSpaceError> {
        if length == 0 {
            return Err(CodeSpaceError::EmptyLength);
        }
        if alphabet_size > MAX_LENGTH {
            return Err(CodeSpaceError::AlphabetTooLarge(alphabet_size));
        }
        if length > alphabet_size {
            return Err(CodeSpaceError::LengthExceedsAlphabet {
                length,
                alphabet_size,
            });
        }

        let mut codes = Vec::with_capacity(permutations(alphabet_size, length));
        let mut prefix = Vec::with_capacity(length);
        extend(&mut prefix, 0, alphabet_size, length, &mut codes);

        log::debug!(
            "enumerated {} codes (alphabet={alphabet_size}, length={length})",
            codes.len()
        );

        Ok(Self {
            alphabet_size,
            length,
            codes,
        })
    }

    /// Number of symbols in the alphabet
    #[inline]
    #[must_use]
    pub const fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Length of every code in the space
    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// All codes, in generation order
    #[inline]
    #[must_use]
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Code> {
        self.codes.iter()
    }

    /// Check membership without searching
    #[must_use]
    pub fn contains(&self, code: &Code) -> bool {
        code.validate(self.alphabet_size, self.length).is_ok()
    }

    /// Position of a code in generation order
    ///
    /// Computed arithmetically: at each position, count the unused symbols
    /// smaller than the chosen one and weight by the number of completions.
    #[must_use]
    pub fn index_of(&self, code: &Code) -> Option<usize> {
        if !self.contains(code) {
            return None;
        }

        let mut used = 0u16;
        let mut index = 0;
        for (position, &symbol) in code.symbols().iter().enumerate() {
            let smaller_unused = (0..symbol).filter(|&s| used & (1 << s) == 0).count();
            let completions = permutations(
                self.alphabet_size - position - 1,
                self.length - position - 1,
            );
            index += smaller_unused * completions;
            used |= 1 << symbol;
        }
        Some(index)
    }

    /// Parse a digit string and check that it belongs to this space
    ///
    /// # Errors
    /// Returns `CodeError` if the text is not a code of the right length with
    /// distinct in-range symbols.
    pub fn parse(&self, text: &str) -> Result<Code, CodeError> {
        let code = Code::parse(text)?;
        code.validate(self.alphabet_size, self.length)?;
        Ok(code)
    }
}

impl<'a> IntoIterator for &'a CodeSpace {
    type Item = &'a Code;
    type IntoIter = std::slice::Iter<'a, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Number of ordered selections of `k` items from `n`: n! / (n - k)!
///
/// Zero when `k > n`.
#[must_use]
pub fn permutations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    ((n + 1 - k)..=n).product()
}

fn extend(prefix: &mut Vec<u8>, used: u16, alphabet_size: usize, length: usize, out: &mut Vec<Code>) {
    if prefix.len() == length {
        out.push(Code::new(prefix).expect("symbols and length already validated"));
        return;
    }

    for symbol in 0..alphabet_size as u8 {
        if used & (1 << symbol) != 0 {
            continue;
        }
        prefix.push(symbol);
        extend(prefix, used | (1 << symbol), alphabet_size, length, out);
        prefix.pop();
    }
}
