//=========================================================================
// Glyph
//=========================================================================
//
// One typed digit drifting across the surface while it fades out.
//
// Opacity is derived from the number of ticks the glyph has lived:
//   opacity(k) = max(0, 1 - k * decay_step)
// so it never increases and reaches zero after ceil(1 / decay_step) ticks.
//
//=========================================================================

/// A transient animated character.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    symbol: char,
    position: (f32, f32),
    velocity: (f32, f32),
    decay_step: f32,
    age: u32,
}

impl Glyph {
    /// Creates a fully opaque glyph.
    pub fn new(symbol: char, position: (f32, f32), velocity: (f32, f32), decay_step: f32) -> Self {
        Self {
            symbol,
            position,
            velocity,
            decay_step,
            age: 0,
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    pub fn velocity(&self) -> (f32, f32) {
        self.velocity
    }

    /// Number of ticks applied so far.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Current alpha in `[0.0, 1.0]`.
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age as f32 * self.decay_step).clamp(0.0, 1.0)
    }

    /// A glyph is drawn and kept only while its opacity is above zero.
    pub fn is_live(&self) -> bool {
        self.opacity() > 0.0
    }

    /// Moves by one velocity step and fades by one decay step.
    pub fn advance(&mut self) {
        self.position.0 += self.velocity.0;
        self.position.1 += self.velocity.1;
        self.age = self.age.saturating_add(1);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_glyph_is_opaque() {
        let glyph = Glyph::new('3', (10.0, 20.0), (1.0, -1.0), 0.008);
        assert_eq!(glyph.opacity(), 1.0);
        assert!(glyph.is_live());
        assert_eq!(glyph.age(), 0);
    }

    #[test]
    fn advance_moves_by_velocity() {
        let mut glyph = Glyph::new('1', (10.0, 20.0), (1.5, -0.5), 0.008);
        glyph.advance();
        glyph.advance();
        assert_eq!(glyph.position(), (13.0, 19.0));
    }

    #[test]
    fn opacity_follows_tick_count() {
        let mut glyph = Glyph::new('4', (0.0, 0.0), (0.0, 0.0), 0.008);
        for k in 1..=200u32 {
            glyph.advance();
            let expected = (1.0 - k as f32 * 0.008).max(0.0);
            assert_eq!(glyph.opacity(), expected, "after {} ticks", k);
        }
    }

    #[test]
    fn opacity_never_increases() {
        let mut glyph = Glyph::new('5', (0.0, 0.0), (0.0, 0.0), 0.3);
        let mut previous = glyph.opacity();
        for _ in 0..10 {
            glyph.advance();
            assert!(glyph.opacity() <= previous);
            previous = glyph.opacity();
        }
        assert_eq!(previous, 0.0);
        assert!(!glyph.is_live());
    }

    #[test]
    fn exact_step_dies_on_schedule() {
        let mut glyph = Glyph::new('9', (0.0, 0.0), (0.0, 0.0), 0.25);
        for _ in 0..3 {
            glyph.advance();
        }
        assert!(glyph.is_live());
        glyph.advance();
        assert!(!glyph.is_live());
    }
}
