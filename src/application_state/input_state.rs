//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! The host translates its window-system events into [`InputEvent`]s; the input
//! manager turns them into a [`ProcessedInputState`] once per frame.

use std::collections::HashMap;

use crate::engine_state::PointerButton;

/// Keyboard keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
}

impl Key {
    /// Every tracked key.
    pub const ALL: [Key; 10] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Space,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
    ];

    /// The hotbar slot selected by a number key.
    pub fn hotbar_slot(self) -> Option<usize> {
        match self {
            Key::Digit1 => Some(0),
            Key::Digit2 => Some(1),
            Key::Digit3 => Some(2),
            Key::Digit4 => Some(3),
            Key::Digit5 => Some(4),
            _ => None,
        }
    }
}

/// A device event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    ButtonPressed(PointerButton),
    ButtonReleased(PointerButton),
    /// Pointer movement while captured, in device units.
    PointerMotion { delta_x: f64, delta_y: f64 },
    /// Wheel movement; positive scrolls forward.
    Wheel(f32),
    /// The pointer was captured (`true`) or released (`false`).
    PointerLock(bool),
    /// The window lost focus; every key and button counts as released.
    FocusLost,
}

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from the previous and current down states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
#[derive(Debug, Clone, Default)]
pub struct ProcessedInputState {
    /// Current state of all tracked keyboard keys
    pub keyboard_states: HashMap<Key, RawInputState>,

    /// Current state of pointer buttons
    pub mouse_button_states: HashMap<PointerButton, RawInputState>,

    /// Accumulated pointer movement since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,

    /// Accumulated wheel movement since the last frame
    pub wheel_delta: f32,

    /// Whether the pointer is captured
    pub pointer_locked: bool,
}

impl ProcessedInputState {
    /// Gets the state of a keyboard key
    pub fn get_key_state(&self, key: Key) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the state of a pointer button
    pub fn get_mouse_button_state(&self, button: PointerButton) -> RawInputState {
        self.mouse_button_states.get(&button).copied().unwrap_or_default()
    }

    /// Gets the pointer movement since the last frame
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Tracks the state of pointer inputs including buttons, wheel, and movement.
#[derive(Debug, Clone, Default)]
pub struct MouseInput {
    /// Previous state of each pointer button (pressed/released)
    pub mouse_button_inputs_old: HashMap<PointerButton, bool>,
    /// Current state of each pointer button (pressed/released)
    pub mouse_button_inputs_new: HashMap<PointerButton, bool>,
    /// Buttons pressed since the last frame, including ones already released
    pub pending_presses: Vec<PointerButton>,

    /// Accumulated wheel delta since the last frame
    pub mouse_scroll_delta: f32,

    /// Accumulated pointer movement since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_from_raw_states() {
        assert_eq!(RawInputState::from_raw_states(false, true), RawInputState::Pressed);
        assert_eq!(RawInputState::from_raw_states(true, true), RawInputState::Held);
        assert_eq!(RawInputState::from_raw_states(true, false), RawInputState::Released);
        assert_eq!(RawInputState::from_raw_states(false, false), RawInputState::NotPressed);
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
    }

    #[test]
    fn only_number_keys_select_slots() {
        assert_eq!(Key::Digit1.hotbar_slot(), Some(0));
        assert_eq!(Key::Digit5.hotbar_slot(), Some(4));
        assert_eq!(Key::Space.hotbar_slot(), None);
    }
}
