//=========================================================================
// Reference Digits
//=========================================================================
//
// The immutable digit sequence a session is checked against.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{GameError, GameResult};

//=== ReferenceDigits =====================================================

/// Non-empty sequence of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDigits {
    digits: String,
}

impl ReferenceDigits {
    /// Validates `digits` as a reference sequence.
    ///
    /// # Errors
    ///
    /// - [`GameError::EmptyReference`] for an empty string
    /// - [`GameError::InvalidReference`] at the first non-digit
    pub fn new(digits: impl Into<String>) -> GameResult<Self> {
        let digits = digits.into();
        if digits.is_empty() {
            return Err(GameError::EmptyReference);
        }
        if let Some((position, found)) = digits.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(GameError::InvalidReference { position, found });
        }
        Ok(Self { digits })
    }

    /// Joins every line of `text` (each trimmed) into one sequence.
    pub fn from_lines(text: &str) -> GameResult<Self> {
        let joined: String = text.lines().map(str::trim).collect();
        Self::new(joined)
    }

    /// Number of digits; never zero.
    pub fn len(&self) -> usize {
        // ASCII only, so bytes == chars.
        self.digits.len()
    }

    /// Always `false` for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digit at zero-based `index`.
    pub fn get(&self, index: usize) -> Option<char> {
        self.digits.as_bytes().get(index).map(|&b| b as char)
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
