//! Input mapping from raw key events to semantic actions

use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Actions triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Start or stop the clock (R key)
    ToggleRun,
    /// Advance the clock by exactly one step (S key)
    SingleStep,
    /// Double the time step (Up arrow)
    IncreaseRate,
    /// Halve the time step (Down arrow)
    DecreaseRate,
    /// Toggle the ambient term (1 key)
    ToggleAmbient,
    /// Toggle the diffuse term (2 key)
    ToggleDiffuse,
    /// Toggle the specular term (3 key)
    ToggleSpecular,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for releases and unbound keys.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::KeyR => Some(InputAction::ToggleRun),
            KeyCode::KeyS => Some(InputAction::SingleStep),
            KeyCode::ArrowUp => Some(InputAction::IncreaseRate),
            KeyCode::ArrowDown => Some(InputAction::DecreaseRate),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(InputAction::ToggleAmbient),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(InputAction::ToggleDiffuse),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(InputAction::ToggleSpecular),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }

    /// Map a physical key, ignoring keys winit could not identify
    pub fn map_physical(key: PhysicalKey, state: ElementState) -> Option<InputAction> {
        match key {
            PhysicalKey::Code(code) => Self::map_keyboard(code, state),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn test_clock_keys() {
        let cases = [
            (KeyCode::KeyR, InputAction::ToggleRun),
            (KeyCode::KeyS, InputAction::SingleStep),
            (KeyCode::ArrowUp, InputAction::IncreaseRate),
            (KeyCode::ArrowDown, InputAction::DecreaseRate),
        ];
        for (key, expected) in cases {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, Some(expected), "Key {:?}", key);
        }
    }

    #[test]
    fn test_lighting_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Digit1, ElementState::Pressed),
            Some(InputAction::ToggleAmbient)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Digit2, ElementState::Pressed),
            Some(InputAction::ToggleDiffuse)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Numpad3, ElementState::Pressed),
            Some(InputAction::ToggleSpecular)
        );
    }

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_key_release_ignored() {
        for key in [KeyCode::KeyR, KeyCode::KeyS, KeyCode::Escape] {
            assert_eq!(InputMapper::map_keyboard(key, ElementState::Released), None);
        }
    }

    #[test]
    fn test_unbound_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space, KeyCode::Digit4] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_physical_keys() {
        assert_eq!(
            InputMapper::map_physical(PhysicalKey::Code(KeyCode::KeyF), ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_physical(
                PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
                ElementState::Pressed
            ),
            None
        );
    }
}
