//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types.
//
// Defines the contract between whatever produces input (winit window,
// terminal reader, test script) and the blocking game-logic thread.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::GameResult;

//=== KeyPress ============================================================

/// Key presses the game logic reacts to.
///
/// Everything else the keyboard produces is filtered out by the frontend
/// before it reaches a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPress {
    /// An ASCII digit `'0'..='9'`.
    Digit(char),

    /// Quit the game, committing the current run to the best score.
    Escape,

    /// Stop the current run early.
    Pause,

    /// Input that can never match a digit, such as a typed line in
    /// classic mode that is not exactly one digit.
    Other,
}

impl KeyPress {
    /// Builds a digit press, rejecting anything outside `'0'..='9'`.
    pub fn digit(c: char) -> Option<Self> {
        c.is_ascii_digit().then_some(Self::Digit(c))
    }
}

//=== EventSource =========================================================

/// Blocking source of sequential events for the consumer thread.
///
/// Implemented by [`InputBridge`](super::InputBridge). The controller only
/// depends on this trait so frontends and tests can substitute their own.
pub trait EventSource<T>: Send + Sync {
    /// Blocks until the next event is available and returns it.
    ///
    /// Returns [`GameError::BridgeClosed`](crate::core::GameError::BridgeClosed)
    /// once the producer side has gone away.
    fn next_event(&self) -> GameResult<T>;

    /// Drops an event published before the caller started caring.
    fn discard_pending(&self) {}
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_accepts_ascii_digits() {
        for c in '0'..='9' {
            assert_eq!(KeyPress::digit(c), Some(KeyPress::Digit(c)));
        }
    }

    #[test]
    fn digit_rejects_other_characters() {
        assert_eq!(KeyPress::digit('a'), None);
        assert_eq!(KeyPress::digit(' '), None);
        assert_eq!(KeyPress::digit('٣'), None, "non-ASCII digits are not keys");
    }
}
