//! Per-device input snapshots for a single frame.

use glam::Vec2;

/// Arrow-key state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardSample {
    /// Left arrow held.
    pub left: bool,
    /// Right arrow held.
    pub right: bool,
    /// Up arrow held.
    pub up: bool,
    /// Down arrow held.
    pub down: bool,
}

impl KeyboardSample {
    /// Signed axis values: x is `right - left`, y is `down - up` (screen Y grows downward).
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        axis
    }
}

/// Left analog stick of the first gamepad.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadSample {
    /// Whether a gamepad is connected; a disconnected pad contributes nothing.
    pub connected: bool,
    /// Stick deflection in `[-1, 1]` per axis, positive Y pointing up.
    pub stick: Vec2,
}

impl GamepadSample {
    /// Connected gamepad with the given stick deflection.
    pub fn connected(stick: Vec2) -> Self {
        Self {
            connected: true,
            stick,
        }
    }
}

/// Absolute mouse state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseSample {
    /// Cursor position in viewport pixels.
    pub position: Vec2,
    /// Primary (left) button held.
    pub primary_pressed: bool,
}

/// Everything the cursor aggregator reads for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Keyboard arrows.
    pub keyboard: KeyboardSample,
    /// Gamepad stick.
    pub gamepad: GamepadSample,
    /// Mouse position and button.
    pub mouse: MouseSample,
    /// Seconds since the previous frame (non-negative).
    pub elapsed_seconds: f32,
}
