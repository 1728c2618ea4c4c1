//=========================================================================
// Game Logic
//=========================================================================
//
// Consumer side of the drill: compares typed digits against the
// reference and keeps score.
//
// Architecture:
//   InputBridge<KeyPress> ─┐
//   InputBridge<bool>     ─┼─> GameController ──spawn()──> ParticleField
//   SessionHost           ─┘        │
//                                   └─ owns RenderLoop for the session
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;
mod host;
mod reference;
mod score;

//=== Public API ==========================================================

pub use controller::{parse_start_index, GameController, SessionState};
pub use host::{Notice, Question, SessionHost};
pub use reference::ReferenceDigits;
pub use score::ScoreState;
