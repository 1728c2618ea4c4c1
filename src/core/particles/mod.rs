//=========================================================================
// Particle System
//=========================================================================
//
// Time-driven fading glyphs, independent of input arrival.
//
// Architecture:
//   GameController ──spawn()──> ParticleField <──tick()── RenderLoop
//                                     │
//                                render(surface)
//                                     ↓
//                      RenderSurface (Canvas over the frame buffer)
//
//=========================================================================

//=== Module Declarations =================================================

mod field;
mod glyph;
mod surface;

//=== Public API ==========================================================

pub use field::ParticleField;
pub use glyph::Glyph;
pub use surface::{Canvas, Color, RenderSurface, BACKGROUND, INK};
