use std::collections::HashSet;

use super::types::{InputEvent, MouseButton};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held buttons, pointer position).
/// `InputFrame` accumulates what happened since the last rendered frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Summed pointer motion in physical pixels.
    pub pointer_delta: (f32, f32),

    /// Summed vertical wheel motion in lines.
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel_lines = 0.0;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn is_idle(&self) -> bool {
        self.pointer_delta == (0.0, 0.0) && self.wheel_lines == 0.0
    }
}
