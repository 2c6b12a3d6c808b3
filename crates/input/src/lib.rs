#![warn(missing_docs)]
//! Input handling for keyboard, mouse, and gamepad, plus the cursor aggregator
//! that merges them into one screen position.

mod cursor;
mod sample;

pub use cursor::{CursorAggregator, CursorUpdate, ScreenPosition, DEFAULT_CURSOR_SPEED};
pub use sample::{FrameInput, GamepadSample, KeyboardSample, MouseSample};

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Live device state accumulated from window events.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently pressed.
    keys_pressed: HashSet<KeyCode>,
    /// Mouse buttons currently pressed.
    mouse_buttons: HashSet<MouseButton>,
    /// Last reported cursor position in window pixels.
    cursor_position: Vec2,
    /// Gamepad state supplied by the embedding application.
    gamepad: GamepadSample,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event to update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => self.press_key(*keycode),
                ElementState::Released => self.release_key(*keycode),
            },
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_mouse(*button),
                ElementState::Released => self.release_mouse(*button),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor_position(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to an unfocused window.
                self.keys_pressed.clear();
                self.mouse_buttons.clear();
            }
            _ => {}
        }
    }

    /// Mark a key as held.
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys_pressed.insert(key);
    }

    /// Mark a key as released.
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_pressed.remove(&key);
    }

    /// Mark a mouse button as held.
    pub fn press_mouse(&mut self, button: MouseButton) {
        self.mouse_buttons.insert(button);
    }

    /// Mark a mouse button as released.
    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_buttons.remove(&button);
    }

    /// Record the absolute cursor position.
    pub fn set_cursor_position(&mut self, position: Vec2) {
        self.cursor_position = position;
    }

    /// Replace the gamepad state (winit does not report gamepads).
    pub fn set_gamepad(&mut self, gamepad: GamepadSample) {
        self.gamepad = gamepad;
    }

    /// Check if a key is currently pressed.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button is currently pressed.
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Arrow-key flags.
    pub fn keyboard(&self) -> KeyboardSample {
        KeyboardSample {
            left: self.key_pressed(KeyCode::ArrowLeft),
            right: self.key_pressed(KeyCode::ArrowRight),
            up: self.key_pressed(KeyCode::ArrowUp),
            down: self.key_pressed(KeyCode::ArrowDown),
        }
    }

    /// Cursor position and primary button.
    pub fn mouse(&self) -> MouseSample {
        MouseSample {
            position: self.cursor_position,
            primary_pressed: self.mouse_button_pressed(MouseButton::Left),
        }
    }

    /// Freeze the current device state into a frame snapshot.
    pub fn snapshot(&self, elapsed_seconds: f32) -> FrameInput {
        FrameInput {
            keyboard: self.keyboard(),
            gamepad: self.gamepad,
            mouse: self.mouse(),
            elapsed_seconds,
        }
    }
}
