//=========================================================================
// Session Host
//=========================================================================
//
// The collaborator that owns every user-facing surface the controller
// needs but does not manage itself: showing a question, collecting the
// start index, and displaying messages.
//
// Yes/no answers do not go through the host; the controller reads them
// from the prompt bridge after calling `show_question`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::error::GameResult;

//=== Question ============================================================

/// Yes/no questions asked during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// Asked before each run.
    Explore,
    /// Asked after each run.
    TryAgain,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explore => write!(f, "Do you want to explore the digits of pi?"),
            Self::TryAgain => write!(f, "Do you want to try again?"),
        }
    }
}

//=== Notice ==============================================================

/// Messages shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A run is accepting digits.
    StartListing,

    /// A wrong digit was typed at 1-based `position`.
    Mistake { position: usize, expected: char },

    /// The run was stopped early with the pause key.
    Stopped,

    /// An explore run ended after `count` digits.
    Explored { count: usize },

    /// A memorization run ended after `count` digits.
    Memorized { count: usize },

    /// The best score was raised.
    NewBest { previous: usize, best: usize },

    /// The typed start index was rejected.
    InvalidIndex { input: String, len: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartListing => write!(f, "Start listing the digits of pi!"),
            Self::Mistake { position, expected } => {
                write!(f, "Oops, digit {} of pi is supposed to be {}", position, expected)
            }
            Self::Stopped => write!(f, "Stopping..."),
            Self::Explored { count } => {
                write!(f, "Congrats! You explored the first {} digits of pi!", count)
            }
            Self::Memorized { count } => {
                write!(f, "Congrats! You memorized the first {} digits of pi!", count)
            }
            Self::NewBest { previous, best } => write!(
                f,
                "Wow! You beat your previous PB of {} digits! Your PB is now {} digits",
                previous, best
            ),
            Self::InvalidIndex { input, len } => write!(
                f,
                "Please enter a valid number between 1 and {} (got {:?})",
                len, input
            ),
        }
    }
}

//=== SessionHost =========================================================

/// User-facing side of a session.
pub trait SessionHost {
    /// Displays a yes/no question; the answer arrives on the prompt bridge.
    fn show_question(&mut self, question: Question);

    /// Removes the question once it has been answered.
    fn hide_question(&mut self) {}

    /// Blocks until the player submits a start index and returns it raw.
    ///
    /// `len` is the reference length, for display only; validation is the
    /// controller's job.
    fn read_start_index(&mut self, len: usize) -> GameResult<String>;

    /// Displays a message.
    fn notify(&mut self, notice: &Notice);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mistake_message_is_one_based() {
        let notice = Notice::Mistake {
            position: 5,
            expected: '9',
        };
        assert_eq!(notice.to_string(), "Oops, digit 5 of pi is supposed to be 9");
    }

    #[test]
    fn completion_messages_differ_by_mode() {
        assert!(Notice::Explored { count: 4 }.to_string().contains("explored the first 4"));
        assert!(Notice::Memorized { count: 4 }.to_string().contains("memorized the first 4"));
    }

    #[test]
    fn new_best_mentions_both_scores() {
        let text = Notice::NewBest { previous: 3, best: 7 }.to_string();
        assert!(text.contains("PB of 3"));
        assert!(text.contains("now 7"));
    }

    #[test]
    fn questions_read_naturally() {
        assert!(Question::Explore.to_string().ends_with('?'));
        assert!(Question::TryAgain.to_string().contains("try again"));
    }
}
