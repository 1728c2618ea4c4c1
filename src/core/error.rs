//=========================================================================
// Game Errors
//=========================================================================
//
// Single error type shared by the bridge, render loop, controller,
// storage and configuration layers.
//
// Recovery policy:
//   InvalidIndex            → re-prompt (controller)
//   EmptyReference          → fatal, session cannot start
//   AlreadyRunning          → logic fault, surfaced to caller
//   NotRunning              → logic fault, surfaced to caller
//   PersistenceUnavailable  → best defaults to 0 on read, reported on write
//   BridgeClosed            → frontend went away, controller shuts down
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

//=== GameError ===========================================================

/// Errors surfaced by the pi recall core.
#[derive(Error, Debug)]
pub enum GameError {
    /// Start index was unparseable or outside `1..=len`.
    #[error("start index {input:?} is not a number between 1 and {len}")]
    InvalidIndex {
        /// Raw text the user entered.
        input: String,
        /// Length of the reference sequence.
        len: usize,
    },

    /// Reference sequence has no digits.
    #[error("reference digit sequence is empty")]
    EmptyReference,

    /// Reference sequence contains something other than an ASCII digit.
    #[error("reference contains {found:?} at position {position}, expected a digit")]
    InvalidReference {
        /// Zero-based position of the offending character.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// `RenderLoop::start` called while the loop is running.
    #[error("render loop is already running")]
    AlreadyRunning,

    /// Strict stop requested while the loop is idle.
    #[error("render loop is not running")]
    NotRunning,

    /// Score store or reference file could not be read or written.
    #[error("persistence unavailable for {}: {source}", path.display())]
    PersistenceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bridge was closed while (or before) waiting for an event.
    #[error("input bridge closed")]
    BridgeClosed,

    /// Settings file is malformed or holds out-of-range values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Window or presentation layer failure.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;

//=========================================================================
// Unit Tests
//=========================================================================
