//=========================================================================
// Render Surface
//=========================================================================
//
// Draw-command sink for the particle field plus a CPU implementation.
//
// `Canvas` draws into a borrowed RGBA8 frame (the `pixels` frame buffer
// in the window frontend, a plain Vec in tests) using a small block font
// scaled up to glyph size. Glyph positions stay fractional: each pixel is
// inked by the share of it the scaled font cells cover, times the alpha.
//
//=========================================================================

//=== Types ===============================================================

/// RGBA8 color.
pub type Color = [u8; 4];

pub const BACKGROUND: Color = [255, 255, 255, 255];
pub const INK: Color = [0, 0, 0, 255];

const FONT_W: u32 = 3;
const FONT_H: u32 = 5;

//=== RenderSurface =======================================================

/// Receives draw commands from [`ParticleField::render`](super::ParticleField::render).
pub trait RenderSurface {
    /// Fills the whole surface with the background.
    fn clear(&mut self);

    /// Draws `symbol` centered on `center` with the given alpha.
    fn draw_glyph(&mut self, symbol: char, center: (f32, f32), alpha: f32);
}

//=== Canvas ==============================================================

/// CPU surface over an RGBA8 frame buffer.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    glyph_scale: u32,
}

impl<'a> Canvas<'a> {
    /// Wraps `frame`, which must hold `width * height * 4` bytes.
    ///
    /// Writes outside the frame are clipped, so a short buffer only loses
    /// pixels rather than panicking.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32, glyph_scale: u32) -> Self {
        Self {
            frame,
            width,
            height,
            glyph_scale: glyph_scale.max(1),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reads back one pixel, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let idx = self.index(x, y)?;
        let px = &self.frame[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Draws a line of text with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, alpha: f32) {
        let scale = scale.max(1);
        let advance = ((FONT_W + 1) * scale) as i32;
        for (i, ch) in text.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let left = x + i as i32 * advance;
            self.draw_char((left as f32, y as f32), ch, scale, alpha);
        }
    }

    /// Width in pixels of `text` drawn at `scale`.
    pub fn text_width(text: &str, scale: u32) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        (FONT_W + 1) * scale.max(1) * n - scale.max(1)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Rasterizes `ch` with its top-left corner at a fractional `origin`.
    ///
    /// Coverage is accumulated per pixel over the whole character first,
    /// so a pixel split between two lit cells still ends up fully inked.
    fn draw_char(&mut self, origin: (f32, f32), ch: char, scale: u32, alpha: f32) {
        if !(origin.0.is_finite() && origin.1.is_finite()) {
            return;
        }
        let cell = scale as f32;
        let x0 = origin.0.floor() as i64;
        let y0 = origin.1.floor() as i64;
        let cols = ((origin.0 + (FONT_W * scale) as f32).ceil() as i64 - x0) as usize;
        let rows = ((origin.1 + (FONT_H * scale) as f32).ceil() as i64 - y0) as usize;
        let mut coverage = vec![0.0f32; cols * rows];

        for (row, bits) in font_rows(ch).into_iter().enumerate() {
            for col in 0..FONT_W {
                if bits & (1u8 << (FONT_W - 1 - col)) == 0 {
                    continue;
                }
                let left = origin.0 + col as f32 * cell;
                let top = origin.1 + row as f32 * cell;
                let (right, bottom) = (left + cell, top + cell);

                let first_col = left.floor() as i64;
                let first_row = top.floor() as i64;
                let last_col = (right.ceil() as i64).min(x0 + cols as i64);
                let last_row = (bottom.ceil() as i64).min(y0 + rows as i64);
                for py in first_row.max(y0)..last_row {
                    let dy = overlap(py as f32, top, bottom);
                    for px in first_col.max(x0)..last_col {
                        let dx = overlap(px as f32, left, right);
                        let slot = (py - y0) as usize * cols + (px - x0) as usize;
                        coverage[slot] += dx * dy;
                    }
                }
            }
        }

        for (slot, &covered) in coverage.iter().enumerate() {
            if covered <= 0.0 {
                continue;
            }
            let px = x0 + (slot % cols) as i64;
            let py = y0 + (slot / cols) as i64;
            self.blend_pixel(px, py, INK, alpha * covered.min(1.0));
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return;
        }
        let Some(idx) = self.index(x as u32, y as u32) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let px = &mut self.frame[idx..idx + 4];
        for c in 0..3 {
            let dst = px[c] as f32;
            let src = color[c] as f32;
            px[c] = (dst + (src - dst) * a).round() as u8;
        }
        px[3] = 255;
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        (idx + 4 <= self.frame.len()).then_some(idx)
    }
}

impl RenderSurface for Canvas<'_> {
    fn clear(&mut self) {
        for px in self.frame.chunks_exact_mut(4) {
            px.copy_from_slice(&BACKGROUND);
        }
    }

    fn draw_glyph(&mut self, symbol: char, center: (f32, f32), alpha: f32) {
        let scale = self.glyph_scale;
        let w = (FONT_W * scale) as f32;
        let h = (FONT_H * scale) as f32;
        let origin = (center.0 - w / 2.0, center.1 - h / 2.0);
        self.draw_char(origin, symbol, scale, alpha);
    }
}

/// Length of `[lo, hi)` that falls inside the unit pixel starting at `start`.
fn overlap(start: f32, lo: f32, hi: f32) -> f32 {
    (hi.min(start + 1.0) - lo.max(start)).max(0.0)
}

//=== Block Font ==========================================================

fn font_rows(ch: char) -> [u8; FONT_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
