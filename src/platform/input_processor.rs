//=========================================================================
// Input Processor
//=========================================================================
//
// Routes window key presses to the bridge the game logic is waiting on.
//
// Architecture:
//   winit KeyEvent → event_mapper → PlatformInput → InputProcessor
//     Digit      → key bridge + typed line (while a prompt is open)
//     Y / N      → prompt bridge
//     Enter      → line bridge
//     Escape     → key bridge
//     Pause      → key bridge
//
// Only fresh presses count; releases and auto-repeat are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use winit::event::{ElementState, KeyEvent};

//=== Internal Dependencies ===============================================

use super::event_mapper::{map_key, PlatformInput};
use super::window_host::Overlay;
use crate::core::platform_bridge::{BridgeSet, KeyPress};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    bridges: BridgeSet,
    overlay: Arc<Mutex<Overlay>>,
}

impl InputProcessor {
    pub(crate) fn new(bridges: BridgeSet, overlay: Arc<Mutex<Overlay>>) -> Self {
        Self { bridges, overlay }
    }

    //--- Event Processing -------------------------------------------------

    /// Handles one winit key event. Returns `true` if it was routed.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> bool {
        if key_event.state != ElementState::Pressed || key_event.repeat {
            return false;
        }
        match map_key(key_event.physical_key) {
            Some(input) => {
                self.apply(input);
                true
            }
            None => {
                trace!(target: "platform::input", "Unmapped key ignored");
                false
            }
        }
    }

    /// Publishes `input` to the matching bridge.
    pub(crate) fn apply(&self, input: PlatformInput) {
        trace!(target: "platform::input", "{:?}", input);
        match input {
            PlatformInput::Digit(c) => {
                self.overlay.lock().push_char(c);
                self.bridges.keys.publish(KeyPress::Digit(c));
            }
            PlatformInput::Yes => self.bridges.prompts.publish(true),
            PlatformInput::No => self.bridges.prompts.publish(false),
            PlatformInput::Escape => self.bridges.keys.publish(KeyPress::Escape),
            PlatformInput::Pause => self.bridges.keys.publish(KeyPress::Pause),
            PlatformInput::Submit => {
                let line = self.overlay.lock().take_line();
                if let Some(line) = line {
                    self.bridges.lines.publish(line);
                }
            }
            PlatformInput::Backspace => self.overlay.lock().pop_char(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> (InputProcessor, BridgeSet, Arc<Mutex<Overlay>>) {
        let bridges = BridgeSet::new();
        let overlay = Arc::new(Mutex::new(Overlay::default()));
        let processor = InputProcessor::new(bridges.clone(), overlay.clone());
        (processor, bridges, overlay)
    }

    #[test]
    fn digits_go_to_key_bridge() {
        let (processor, bridges, _) = processor();
        processor.apply(PlatformInput::Digit('3'));
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Digit('3')));
    }

    #[test]
    fn answers_go_to_prompt_bridge() {
        let (processor, bridges, _) = processor();
        processor.apply(PlatformInput::Yes);
        assert_eq!(bridges.prompts.take_pending(), Some(true));
        processor.apply(PlatformInput::No);
        assert_eq!(bridges.prompts.take_pending(), Some(false));
        assert_eq!(bridges.keys.take_pending(), None);
    }

    #[test]
    fn escape_and_pause_go_to_key_bridge() {
        let (processor, bridges, _) = processor();
        processor.apply(PlatformInput::Pause);
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Pause));
        processor.apply(PlatformInput::Escape);
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Escape));
    }

    #[test]
    fn submit_sends_typed_line_under_prompt() {
        let (processor, bridges, overlay) = processor();
        overlay.lock().begin_line("Start:".into());

        for input in [
            PlatformInput::Digit('1'),
            PlatformInput::Digit('9'),
            PlatformInput::Backspace,
            PlatformInput::Digit('2'),
            PlatformInput::Submit,
        ] {
            processor.apply(input);
        }

        assert_eq!(bridges.lines.take_pending().as_deref(), Some("12"));
    }

    #[test]
    fn submit_without_prompt_sends_nothing() {
        let (processor, bridges, _) = processor();
        processor.apply(PlatformInput::Digit('1'));
        processor.apply(PlatformInput::Submit);
        assert_eq!(bridges.lines.take_pending(), None);
    }
}
