//=========================================================================
// Window Host
//=========================================================================
//
// Window-backed `SessionHost`. The game-logic thread writes questions,
// prompts and messages into a shared `Overlay`; the event loop thread
// draws it above the glyphs on every frame.
//
// Threading:
//   logic thread   ──lock──> Overlay <──lock── winit thread (draw, typing)
//   logic thread   ──await──> line bridge <──publish── winit thread (Enter)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

//=== Internal Dependencies ===============================================

use crate::core::game::{Notice, Question, SessionHost};
use crate::core::particles::Canvas;
use crate::core::platform_bridge::InputBridge;
use crate::core::GameResult;
use crate::engine::FrontendSignal;

const TEXT_SCALE: u32 = 2;
const MARGIN: i32 = 8;
const LINE_GAP: i32 = 4;

//=== Overlay =============================================================

/// Text drawn on top of the particle field.
#[derive(Debug, Default)]
pub(crate) struct Overlay {
    message: Option<String>,
    question: Option<Question>,
    prompt: Option<String>,
    line: String,
}

impl Overlay {
    //--- Session Host Side ------------------------------------------------

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub(crate) fn show_question(&mut self, question: Question) {
        self.question = Some(question);
    }

    pub(crate) fn hide_question(&mut self) {
        self.question = None;
    }

    /// Starts collecting a typed line under `prompt`.
    pub(crate) fn begin_line(&mut self, prompt: String) {
        self.prompt = Some(prompt);
        self.line.clear();
    }

    pub(crate) fn end_line(&mut self) {
        self.prompt = None;
        self.line.clear();
    }

    //--- Typing Side ------------------------------------------------------

    pub(crate) fn is_collecting(&self) -> bool {
        self.prompt.is_some()
    }

    /// Appends to the typed line while a prompt is active.
    pub(crate) fn push_char(&mut self, c: char) {
        if self.is_collecting() {
            self.line.push(c);
        }
    }

    pub(crate) fn pop_char(&mut self) {
        self.line.pop();
    }

    /// Hands over the typed line, `None` when no prompt is active.
    pub(crate) fn take_line(&mut self) -> Option<String> {
        self.is_collecting().then(|| std::mem::take(&mut self.line))
    }

    //--- Drawing ----------------------------------------------------------

    /// Overlay text, wrapped to `max_chars` per row.
    pub(crate) fn text_rows(&self, max_chars: usize) -> Vec<String> {
        let mut rows = Vec::new();
        if let Some(message) = &self.message {
            rows.extend(wrap(message, max_chars));
        }
        if let Some(question) = self.question {
            rows.extend(wrap(&format!("{} (Y/N)", question), max_chars));
        }
        if let Some(prompt) = &self.prompt {
            rows.extend(wrap(&format!("{} {}_", prompt, self.line), max_chars));
        }
        rows
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas<'_>) {
        let (width, _) = canvas.size();
        let char_width = Canvas::text_width("00", TEXT_SCALE) - Canvas::text_width("0", TEXT_SCALE);
        let usable = width.saturating_sub(2 * MARGIN as u32);
        let max_chars = (usable / char_width.max(1)).max(1) as usize;
        let row_height = (5 * TEXT_SCALE) as i32 + LINE_GAP;

        for (i, row) in self.text_rows(max_chars).iter().enumerate() {
            canvas.draw_text(MARGIN, MARGIN + i as i32 * row_height, row, TEXT_SCALE, 1.0);
        }
    }
}

/// Greedy word wrap. Words longer than a row are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            rows.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

//=== WindowHost ==========================================================

/// `SessionHost` that shows everything in the window overlay.
pub(crate) struct WindowHost {
    overlay: Arc<Mutex<Overlay>>,
    lines: Arc<InputBridge<String>>,
    signal: Arc<dyn FrontendSignal>,
}

impl WindowHost {
    pub(crate) fn new(
        overlay: Arc<Mutex<Overlay>>,
        lines: Arc<InputBridge<String>>,
        signal: Arc<dyn FrontendSignal>,
    ) -> Self {
        Self {
            overlay,
            lines,
            signal,
        }
    }
}

impl SessionHost for WindowHost {
    fn show_question(&mut self, question: Question) {
        self.overlay.lock().show_question(question);
        self.signal.request_redraw();
    }

    fn hide_question(&mut self) {
        self.overlay.lock().hide_question();
        self.signal.request_redraw();
    }

    fn read_start_index(&mut self, len: usize) -> GameResult<String> {
        let _ = self.lines.take_pending();
        self.overlay
            .lock()
            .begin_line(format!("Start from digit (1-{}):", len));
        self.signal.request_redraw();

        let line = self.lines.await_next();

        self.overlay.lock().end_line();
        self.signal.request_redraw();
        line
    }

    fn notify(&mut self, notice: &Notice) {
        debug!(target: "platform", "Notice: {}", notice);
        self.overlay.lock().set_message(notice.to_string());
        self.signal.request_redraw();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
