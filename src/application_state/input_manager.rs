//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard and pointer button state tracking across frames
//! - Accumulation of pointer motion and wheel movement
//! - Pointer capture state
//! - Translation of the processed state into an engine [`InputSnapshot`]

use std::collections::HashMap;

use log::debug;

use crate::engine_state::{InputSnapshot, PointerButton};

use super::input_state::{InputEvent, Key, MouseInput, ProcessedInputState, RawInputState};

const POINTER_BUTTONS: [PointerButton; 2] = [PointerButton::Left, PointerButton::Right];

/// Manages the state of all input devices and processes input events.
///
/// Events are taken in as they arrive; once per frame
/// [`get_and_reset_processed_input`](InputManager::get_and_reset_processed_input)
/// compares the current key states with the previous frame's and clears the
/// per-frame accumulators.
#[derive(Debug)]
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<Key, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<Key, bool>,

    /// Current state of pointer inputs
    pub mouse_inputs: MouseInput,

    /// Whether the pointer is captured by the view
    pub pointer_locked: bool,
}

impl InputManager {
    /// Creates a new InputManager with every key and button released and the
    /// pointer not captured.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key in Key::ALL {
            keyboard_inputs_old.insert(key, false);
            keyboard_inputs_new.insert(key, false);
        }

        let mut mouse_inputs = MouseInput::default();
        for button in POINTER_BUTTONS {
            mouse_inputs.mouse_button_inputs_old.insert(button, false);
            mouse_inputs.mouse_button_inputs_new.insert(button, false);
        }

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs,
            pointer_locked: false,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a device event and updates internal input state.
    pub fn intake_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed(key) => self.set_key(key, true),
            InputEvent::KeyReleased(key) => self.set_key(key, false),
            InputEvent::ButtonPressed(button) => {
                let was_down = self
                    .mouse_inputs
                    .mouse_button_inputs_new
                    .insert(button, true)
                    .unwrap_or(false);
                if !was_down {
                    self.mouse_inputs.pending_presses.push(button);
                }
            }
            InputEvent::ButtonReleased(button) => {
                self.mouse_inputs.mouse_button_inputs_new.insert(button, false);
            }
            InputEvent::PointerMotion { delta_x, delta_y } => {
                self.intake_mouse_motion((delta_x, delta_y));
            }
            InputEvent::Wheel(delta) => {
                self.mouse_inputs.mouse_scroll_delta += delta;
            }
            InputEvent::PointerLock(locked) => {
                if locked != self.pointer_locked {
                    debug!("Pointer lock {}", if locked { "acquired" } else { "released" });
                }
                self.pointer_locked = locked;
            }
            InputEvent::FocusLost => self.release_all(),
        }
    }

    fn set_key(&mut self, key: Key, down: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = down;
        }
    }

    /// Adds pointer movement to this frame's accumulated delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of pointer movement since the last event
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let mut keyboard_states = HashMap::new();
        let mut mouse_button_states = HashMap::new();

        for (key, &new_state) in self.keyboard_inputs_new.iter() {
            let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
            keyboard_states.insert(*key, RawInputState::from_raw_states(old_state, new_state));
        }

        for (button, &new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            let old_state = self
                .mouse_inputs
                .mouse_button_inputs_old
                .get(button)
                .copied()
                .unwrap_or(false);
            let mut state = RawInputState::from_raw_states(old_state, new_state);
            // A press and release between two frames still counts as a press.
            if !state.is_active() && self.mouse_inputs.pending_presses.contains(button) {
                state = RawInputState::Pressed;
            }
            mouse_button_states.insert(*button, state);
        }

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
            wheel_delta: self.mouse_inputs.mouse_scroll_delta,
            pointer_locked: self.pointer_locked,
        }
    }

    /// Returns the processed input state and resets the per-frame state.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Rolls the key states over to the next frame and clears the accumulators.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();

        self.mouse_inputs.pending_presses.clear();
        self.mouse_inputs.mouse_scroll_delta = 0.0;
        self.mouse_inputs.mouse_delta = None;
    }

    /// Marks every key and button as released, so nothing stays stuck down
    /// while the window has no focus.
    fn release_all(&mut self) {
        for state in self.keyboard_inputs_new.values_mut() {
            *state = false;
        }
        for state in self.mouse_inputs.mouse_button_inputs_new.values_mut() {
            *state = false;
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Translates a processed input state into the engine's per-step snapshot.
///
/// Movement and jump follow held keys; clicks and number keys fire only on the
/// frame they are pressed.
pub fn translate_processed_input(input: &ProcessedInputState) -> InputSnapshot {
    let clicks = POINTER_BUTTONS
        .into_iter()
        .filter(|button| input.get_mouse_button_state(*button).is_just_pressed())
        .collect();

    let hotbar_slot = Key::ALL
        .into_iter()
        .filter(|key| input.get_key_state(*key).is_just_pressed())
        .find_map(Key::hotbar_slot);

    InputSnapshot {
        move_forward: input.get_key_state(Key::W).is_active(),
        move_backward: input.get_key_state(Key::S).is_active(),
        move_left: input.get_key_state(Key::A).is_active(),
        move_right: input.get_key_state(Key::D).is_active(),
        jump: input.get_key_state(Key::Space).is_active(),
        pointer_locked: input.pointer_locked,
        look_delta: input.get_mouse_delta(),
        clicks,
        wheel_delta: input.wheel_delta,
        hotbar_slot,
    }
}
