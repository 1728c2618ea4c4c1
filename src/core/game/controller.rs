//=========================================================================
// Game Controller
//=========================================================================
//
// Sequential game logic running on its own thread, driven by blocking
// reads from the bridges.
//
// State machine:
// ```text
//   AwaitingExploreChoice ──yes──> AwaitingStartIndex ──valid──┐
//          │  ▲                        │   ▲                    │
//          no │                     invalid (re-prompt)         │
//          ▼  │                                                 ▼
//   Comparing <─────────────────────────────────────────────────┘
//     │ mistake (memorize) / pause / end of reference
//     ▼
//   SessionComplete ──try again──> AwaitingExploreChoice
//     │ no                    Comparing ──escape──> Quit
//     ▼
//   Quit
// ```
//
// Every digit key spawns a glyph, right or wrong.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::{Notice, Question, ReferenceDigits, ScoreState, SessionHost};
use crate::core::error::{GameError, GameResult};
use crate::core::particles::ParticleField;
use crate::core::platform_bridge::{EventSource, KeyPress};
use crate::core::render_loop::RenderLoop;

//=== SessionState ========================================================

/// Where the controller is in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingExploreChoice,
    AwaitingStartIndex,
    Comparing,
    SessionComplete,
    Quit,
}

//=== Start Index =========================================================

/// Converts a 1-based start index typed by the player into a cursor.
///
/// # Errors
///
/// [`GameError::InvalidIndex`] if `input` is not a number in `1..=len`.
pub fn parse_start_index(input: &str, len: usize) -> GameResult<usize> {
    let invalid = || GameError::InvalidIndex {
        input: input.to_string(),
        len,
    };
    let n: usize = input.trim().parse().map_err(|_| invalid())?;
    if n == 0 || n > len {
        return Err(invalid());
    }
    Ok(n - 1)
}

//=== GameController ======================================================

/// Drives one player's sessions until they quit.
pub struct GameController<H: SessionHost> {
    host: H,
    keys: Arc<dyn EventSource<KeyPress>>,
    prompts: Arc<dyn EventSource<bool>>,
    field: Arc<ParticleField>,
    render_loop: Option<RenderLoop>,
    score: ScoreState,
    state: SessionState,
    exploring: bool,
}

impl<H: SessionHost> GameController<H> {
    //--- Construction -----------------------------------------------------

    /// Creates a controller waiting for the explore choice.
    pub fn new(
        host: H,
        keys: Arc<dyn EventSource<KeyPress>>,
        prompts: Arc<dyn EventSource<bool>>,
        field: Arc<ParticleField>,
        reference: ReferenceDigits,
        best: usize,
    ) -> Self {
        Self {
            host,
            keys,
            prompts,
            field,
            render_loop: None,
            score: ScoreState::new(reference, best),
            state: SessionState::AwaitingExploreChoice,
            exploring: false,
        }
    }

    /// Attaches the render loop started by [`run`](Self::run).
    pub fn with_render_loop(mut self, render_loop: RenderLoop) -> Self {
        self.render_loop = Some(render_loop);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs sessions until the player quits and returns the final best.
    ///
    /// The render loop (if attached) runs for exactly the duration of this
    /// call. A closed bridge ends the session without committing the run
    /// in progress.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyRunning`] if the attached render loop was
    /// already started by someone else.
    pub fn run(&mut self) -> GameResult<usize> {
        if let Some(render_loop) = self.render_loop.as_mut() {
            render_loop.start()?;
        }
        info!(target: "game", "Session started (best: {})", self.score.best());

        let result = loop {
            match self.step() {
                Ok(SessionState::Quit) => break Ok(()),
                Ok(_) => {}
                Err(GameError::BridgeClosed) => {
                    info!(target: "game", "Input closed, ending session");
                    self.state = SessionState::Quit;
                    break Ok(());
                }
                Err(e) => {
                    error!(target: "game", "Session aborted: {}", e);
                    break Err(e);
                }
            }
        };

        if let Some(render_loop) = self.render_loop.as_mut() {
            if let Err(e) = render_loop.try_stop() {
                error!(target: "game", "Render loop was not running at session end: {}", e);
            }
        }
        info!(target: "game", "Session ended (best: {})", self.score.best());

        result.map(|()| self.score.best())
    }

    /// Performs one transition and returns the new state.
    pub fn step(&mut self) -> GameResult<SessionState> {
        let next = match self.state {
            SessionState::AwaitingExploreChoice => self.await_explore_choice()?,
            SessionState::AwaitingStartIndex => self.await_start_index()?,
            SessionState::Comparing => self.compare_next()?,
            SessionState::SessionComplete => self.complete_session()?,
            SessionState::Quit => SessionState::Quit,
        };
        if next != self.state {
            debug!(target: "game", "{:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(next)
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn is_exploring(&self) -> bool {
        self.exploring
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    //--- States -----------------------------------------------------------

    fn await_explore_choice(&mut self) -> GameResult<SessionState> {
        self.exploring = self.ask(Question::Explore)?;
        if self.exploring {
            Ok(SessionState::AwaitingStartIndex)
        } else {
            Ok(self.enter_comparing(0))
        }
    }

    fn await_start_index(&mut self) -> GameResult<SessionState> {
        let len = self.score.reference().len();
        let input = self.host.read_start_index(len)?;
        match parse_start_index(&input, len) {
            Ok(cursor) => Ok(self.enter_comparing(cursor)),
            Err(GameError::InvalidIndex { input, len }) => {
                debug!(target: "game", "Rejected start index {:?}", input);
                self.host.notify(&Notice::InvalidIndex { input, len });
                Ok(SessionState::AwaitingStartIndex)
            }
            Err(e) => Err(e),
        }
    }

    fn compare_next(&mut self) -> GameResult<SessionState> {
        let Some(expected) = self.score.expected() else {
            return Ok(SessionState::SessionComplete);
        };

        match self.keys.next_event()? {
            KeyPress::Escape => {
                if let Some(previous) = self.score.commit_best() {
                    self.host.notify(&Notice::NewBest {
                        previous,
                        best: self.score.best(),
                    });
                }
                info!(target: "game", "Quit at cursor {}", self.score.cursor());
                Ok(SessionState::Quit)
            }
            KeyPress::Pause => {
                self.host.notify(&Notice::Stopped);
                Ok(SessionState::SessionComplete)
            }
            KeyPress::Digit(digit) => {
                self.field.spawn_centered(digit);

                if digit != expected {
                    return Ok(self.mistake(expected));
                }
                self.score.advance();
                if self.score.is_complete() {
                    return Ok(SessionState::SessionComplete);
                }
                Ok(SessionState::Comparing)
            }
            KeyPress::Other => Ok(self.mistake(expected)),
        }
    }

    fn mistake(&mut self, expected: char) -> SessionState {
        self.host.notify(&Notice::Mistake {
            position: self.score.cursor() + 1,
            expected,
        });
        if self.exploring {
            SessionState::Comparing
        } else {
            SessionState::SessionComplete
        }
    }

    fn complete_session(&mut self) -> GameResult<SessionState> {
        let count = self.score.cursor();
        if self.exploring {
            self.host.notify(&Notice::Explored { count });
        } else {
            self.host.notify(&Notice::Memorized { count });
            if let Some(previous) = self.score.commit_best() {
                self.host.notify(&Notice::NewBest {
                    previous,
                    best: self.score.best(),
                });
            }
        }
        info!(
            target: "game",
            "Run finished at {} digits ({})",
            count,
            if self.exploring { "explore" } else { "memorize" }
        );

        if self.ask(Question::TryAgain)? {
            Ok(SessionState::AwaitingExploreChoice)
        } else {
            Ok(SessionState::Quit)
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn ask(&mut self, question: Question) -> GameResult<bool> {
        self.prompts.discard_pending();
        self.host.show_question(question);
        let answer = self.prompts.next_event()?;
        self.host.hide_question();
        debug!(target: "game", "{:?} answered {}", question, answer);
        Ok(answer)
    }

    fn enter_comparing(&mut self, cursor: usize) -> SessionState {
        self.score.restart_at(cursor);
        self.keys.discard_pending();
        self.host.notify(&Notice::StartListing);
        info!(
            target: "game",
            "Comparing from digit {} ({})",
            cursor + 1,
            if self.exploring { "explore" } else { "memorize" }
        );
        SessionState::Comparing
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
