//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use pi_recall::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, Frontend};

// Configuration, errors and storage
pub use crate::core::{FileStore, GameError, GameResult, Settings};

// Input bridges
pub use crate::core::platform_bridge::{BridgeSet, EventSource, InputBridge, KeyPress};

// Particles and rendering
pub use crate::core::particles::{Canvas, Glyph, ParticleField, RenderSurface};
pub use crate::core::render_loop::{RedrawHook, RenderLoop};

// Game logic
pub use crate::core::game::{
    GameController, Notice, Question, ReferenceDigits, ScoreState, SessionHost, SessionState,
};
