//=========================================================================
// Core Systems
//=========================================================================
//
// Platform-independent half of pi recall. Everything here runs on the
// game-logic thread or the render-loop thread and never touches winit.
//
// Architecture:
// ```text
//   Frontend (window / terminal)
//     │ publish                          ▲ redraw hook
//     ▼                                  │
//   platform_bridge ──await──> game::GameController
//                                   │ spawn        ▲
//                                   ▼              │
//                               particles ◄── render_loop (tick)
//
//   config ─ settings        storage ─ reference digits + best score
// ```
//
// Components:
// - `platform_bridge`: Single-slot blocking handoff of input events
// - `particles`: Fading glyph model and drawing surface
// - `render_loop`: Fixed-cadence tick/redraw timer thread
// - `game`: Session state machine and scoring
// - `storage`: Reference and best-score files
// - `config`: Tunable constants
// - `error`: Shared error type
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod error;
pub mod game;
pub mod particles;
pub mod platform_bridge;
pub mod render_loop;
pub mod storage;

//=== Public API ==========================================================

pub use config::Settings;
pub use error::{GameError, GameResult};
pub use render_loop::{RedrawHook, RenderLoop};
pub use storage::FileStore;
