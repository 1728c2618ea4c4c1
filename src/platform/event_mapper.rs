//=========================================================================
// Platform Event Mapper
//
// Converts winit physical keys to the handful of inputs the drill uses.
//
// Responsibilities:
// - Translate digit keys (top row and numpad)
// - Translate prompt answers, line editing, escape and pause
// - Ignore everything else
//
//=========================================================================

use winit::keyboard::{KeyCode, PhysicalKey};

//=== PlatformInput =======================================================

/// Window-level input before it is routed to a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlatformInput {
    /// `'0'..='9'` from either the top row or the numpad.
    Digit(char),
    /// Answers a yes/no question with yes.
    Yes,
    /// Answers a yes/no question with no.
    No,
    Escape,
    Pause,
    /// Submits the line being typed.
    Submit,
    /// Deletes the last typed character.
    Backspace,
}

//=== Key Conversion ======================================================

/// Maps a physical key, `None` for keys the drill ignores.
pub(crate) fn map_key(key: PhysicalKey) -> Option<PlatformInput> {
    match key {
        PhysicalKey::Code(code) => map_code(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

fn map_code(code: KeyCode) -> Option<PlatformInput> {
    use KeyCode::*;
    let input = match code {
        //--- Numeric keys -----------------------------------------------------
        Digit0 | Numpad0 => PlatformInput::Digit('0'),
        Digit1 | Numpad1 => PlatformInput::Digit('1'),
        Digit2 | Numpad2 => PlatformInput::Digit('2'),
        Digit3 | Numpad3 => PlatformInput::Digit('3'),
        Digit4 | Numpad4 => PlatformInput::Digit('4'),
        Digit5 | Numpad5 => PlatformInput::Digit('5'),
        Digit6 | Numpad6 => PlatformInput::Digit('6'),
        Digit7 | Numpad7 => PlatformInput::Digit('7'),
        Digit8 | Numpad8 => PlatformInput::Digit('8'),
        Digit9 | Numpad9 => PlatformInput::Digit('9'),

        //--- Prompt answers ---------------------------------------------------
        KeyY => PlatformInput::Yes,
        KeyN => PlatformInput::No,

        //--- Line editing -----------------------------------------------------
        Enter | NumpadEnter => PlatformInput::Submit,
        Backspace => PlatformInput::Backspace,

        //--- Session control --------------------------------------------------
        Escape => PlatformInput::Escape,
        Pause => PlatformInput::Pause,

        //--- Fallback ---------------------------------------------------------
        _ => return None,
    };
    Some(input)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn top_row_and_numpad_digits_agree() {
        let pairs = [
            (KeyCode::Digit0, KeyCode::Numpad0, '0'),
            (KeyCode::Digit3, KeyCode::Numpad3, '3'),
            (KeyCode::Digit9, KeyCode::Numpad9, '9'),
        ];
        for (row, pad, c) in pairs {
            assert_eq!(map_key(PhysicalKey::Code(row)), Some(PlatformInput::Digit(c)));
            assert_eq!(map_key(PhysicalKey::Code(pad)), Some(PlatformInput::Digit(c)));
        }
    }

    #[test]
    fn control_keys_are_mapped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyY)), Some(PlatformInput::Yes));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyN)), Some(PlatformInput::No));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Enter)), Some(PlatformInput::Submit));
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::NumpadEnter)),
            Some(PlatformInput::Submit)
        );
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::Backspace)),
            Some(PlatformInput::Backspace)
        );
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Some(PlatformInput::Escape));
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Pause)), Some(PlatformInput::Pause));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)), None);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Space)), None);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F1)), None);
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            None
        );
    }
}
