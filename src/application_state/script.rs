//! Scripted input for running the engine without a window.

use crate::engine_state::PointerButton;

use super::input_state::{InputEvent, Key};

/// Device events scheduled on frame numbers.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    /// `(frame, event)` pairs; events on the same frame keep their order.
    events: Vec<(u64, InputEvent)>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` to be delivered before `frame` runs.
    pub fn at(mut self, frame: u64, event: InputEvent) -> Self {
        self.events.push((frame, event));
        self
    }

    /// Presses `key` on `from` and releases it on `to`.
    pub fn hold(self, key: Key, from: u64, to: u64) -> Self {
        self.at(from, InputEvent::KeyPressed(key))
            .at(to, InputEvent::KeyReleased(key))
    }

    /// Presses and releases `button` before `frame`.
    pub fn click(self, button: PointerButton, frame: u64) -> Self {
        self.at(frame, InputEvent::ButtonPressed(button))
            .at(frame, InputEvent::ButtonReleased(button))
    }

    /// Events scheduled for `frame`, in insertion order.
    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = &InputEvent> {
        self.events
            .iter()
            .filter(move |(at, _)| *at == frame)
            .map(|(_, event)| event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Captures the pointer, lands, walks, jumps, looks down, digs a block,
    /// switches material, and places it back.
    pub fn demo() -> Self {
        InputScript::new()
            .at(0, InputEvent::PointerLock(true))
            .hold(Key::W, 120, 160)
            .hold(Key::D, 140, 150)
            .hold(Key::Space, 150, 152)
            .at(
                180,
                InputEvent::PointerMotion {
                    delta_x: 0.0,
                    delta_y: 2000.0,
                },
            )
            .click(PointerButton::Left, 200)
            .at(205, InputEvent::KeyPressed(Key::Digit3))
            .at(206, InputEvent::KeyReleased(Key::Digit3))
            .at(210, InputEvent::Wheel(1.0))
            .click(PointerButton::Right, 220)
            .click(PointerButton::Right, 230)
    }
}
