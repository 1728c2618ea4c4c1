//=========================================================================
// Particle Field
//=========================================================================
//
// Owns every live glyph. Spawned from the game-logic thread, ticked from
// the render loop thread, rendered from the platform thread.
//
// Architecture:
//   spawn()  ─┐
//   tick()   ─┼──> Mutex<FieldState> { glyphs (creation order), rng, center }
//   render() ─┘
//
// One lock guards all three operations, so a glyph is never observed
// half-advanced and an insertion during a tick is never lost.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::{Glyph, RenderSurface};
use crate::core::config::{check_decay_step, check_max_speed, Settings};
use crate::core::error::GameResult;

//=== FieldState ==========================================================

struct FieldState {
    glyphs: Vec<Glyph>,
    rng: StdRng,
    center: (f32, f32),
}

//=== ParticleField =======================================================

/// Thread-safe set of fading, drifting glyphs.
///
/// Glyphs are kept in creation order, which is also the draw order.
pub struct ParticleField {
    state: Mutex<FieldState>,
    decay_step: f32,
    max_speed: f32,
}

impl ParticleField {
    //--- Construction -----------------------------------------------------

    /// Creates an empty field.
    ///
    /// `center` is the default spawn origin, `decay_step` the opacity lost
    /// per tick and `max_speed` bounds each velocity component.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfig`](crate::core::GameError::InvalidConfig)
    /// if `decay_step` is outside `(0, 1]` or `max_speed` is negative or
    /// not finite.
    pub fn new(
        center: (f32, f32),
        decay_step: f32,
        max_speed: f32,
        rng: StdRng,
    ) -> GameResult<Self> {
        check_decay_step(decay_step)?;
        check_max_speed(max_speed)?;
        Ok(Self {
            state: Mutex::new(FieldState {
                glyphs: Vec::new(),
                rng,
                center,
            }),
            decay_step,
            max_speed,
        })
    }

    /// Creates an empty field using the configured constants and seed.
    pub fn from_settings(settings: &Settings) -> GameResult<Self> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(
            settings.surface_center(),
            settings.decay_step,
            settings.max_speed,
            rng,
        )
    }

    //--- Mutation ---------------------------------------------------------

    /// Adds a fully opaque glyph at `origin` with a random velocity.
    pub fn spawn(&self, symbol: char, origin: (f32, f32)) {
        let mut state = self.state.lock();
        let m = self.max_speed;
        let velocity = (state.rng.gen_range(-m..=m), state.rng.gen_range(-m..=m));
        state
            .glyphs
            .push(Glyph::new(symbol, origin, velocity, self.decay_step));
        trace!(
            target: "particles",
            "Spawned {:?} at {:?} moving {:?} ({} live)",
            symbol,
            origin,
            velocity,
            state.glyphs.len()
        );
    }

    /// Adds a glyph at the current default origin.
    pub fn spawn_centered(&self, symbol: char) {
        let center = self.center();
        self.spawn(symbol, center);
    }

    /// Adds a prebuilt glyph as-is.
    #[cfg(test)]
    pub(crate) fn insert(&self, glyph: Glyph) {
        self.state.lock().glyphs.push(glyph);
    }

    /// Advances every glyph by one step and drops those that faded out.
    ///
    /// Returns the number of glyphs removed.
    pub fn tick(&self) -> usize {
        let mut state = self.state.lock();
        Self::advance(&mut state.glyphs)
    }

    /// Moves the default spawn origin (e.g. after a resize).
    pub fn set_center(&self, center: (f32, f32)) {
        self.state.lock().center = center;
    }

    //--- Rendering --------------------------------------------------------

    /// Clears `surface` and draws every visible glyph, oldest first.
    ///
    /// Glyphs that already faded to zero but have not been pruned yet are
    /// skipped.
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let state = self.state.lock();
        Self::draw(&state.glyphs, surface);
    }

    //--- Queries ----------------------------------------------------------

    pub fn center(&self) -> (f32, f32) {
        self.state.lock().center
    }

    /// Number of glyphs held, including faded ones not yet pruned.
    pub fn len(&self) -> usize {
        self.state.lock().glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().glyphs.is_empty()
    }

    /// Copy of the current glyphs in creation order.
    pub fn snapshot(&self) -> Vec<Glyph> {
        self.state.lock().glyphs.clone()
    }

    //--- Internal Helpers -------------------------------------------------

    fn advance(glyphs: &mut Vec<Glyph>) -> usize {
        let before = glyphs.len();
        glyphs.retain_mut(|glyph| {
            glyph.advance();
            glyph.is_live()
        });
        before - glyphs.len()
    }

    fn draw<S: RenderSurface + ?Sized>(glyphs: &[Glyph], surface: &mut S) {
        surface.clear();
        for glyph in glyphs.iter().filter(|g| g.is_live()) {
            surface.draw_glyph(glyph.symbol(), glyph.position(), glyph.opacity());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
