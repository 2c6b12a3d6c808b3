//! Merges keyboard, gamepad, and mouse into one screen-space cursor.

use glam::Vec2;
use tracing::trace;

use crate::FrameInput;

/// 2D point in viewport pixels, origin top-left.
pub type ScreenPosition = Vec2;

/// Cursor speed for keyboard and gamepad movement, in pixels per second.
pub const DEFAULT_CURSOR_SPEED: f32 = 200.0;

/// Outcome of one frame's source precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorUpdate {
    /// Keyboard and gamepad movement to add to the previous position.
    Accumulated(Vec2),
    /// Pressed, in-bounds mouse position that replaces the cursor outright.
    Overridden(ScreenPosition),
}

/// Owns the persisted cursor position and applies one update per frame.
#[derive(Debug, Clone)]
pub struct CursorAggregator {
    position: ScreenPosition,
    /// Movement speed in pixels per second.
    pub speed: f32,
}

impl Default for CursorAggregator {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl CursorAggregator {
    /// Start the cursor at `position` with [`DEFAULT_CURSOR_SPEED`].
    pub fn new(position: ScreenPosition) -> Self {
        Self::with_speed(position, DEFAULT_CURSOR_SPEED)
    }

    /// Start the cursor at `position` with a custom speed.
    pub fn with_speed(position: ScreenPosition, speed: f32) -> Self {
        Self { position, speed }
    }

    /// Current cursor position.
    pub fn position(&self) -> ScreenPosition {
        self.position
    }

    /// Decide how `input` moves the cursor, without changing it.
    ///
    /// `bounds` is the viewport size; the mouse only takes over when its
    /// position lies in `[0, width) × [0, height)` and the primary button is held.
    /// Accumulated movement is never clamped.
    pub fn decide(&self, input: &FrameInput, bounds: Vec2) -> CursorUpdate {
        let mouse = input.mouse;
        if mouse.primary_pressed && within(mouse.position, bounds) {
            return CursorUpdate::Overridden(mouse.position);
        }

        debug_assert!(
            input.elapsed_seconds >= 0.0,
            "elapsed time must be non-negative"
        );
        let step = self.speed * input.elapsed_seconds;
        let mut delta = input.keyboard.axis() * step;
        if input.gamepad.connected {
            delta.x += input.gamepad.stick.x * step;
            delta.y -= input.gamepad.stick.y * step;
        }
        CursorUpdate::Accumulated(delta)
    }

    /// Commit a decided update and return the new position.
    pub fn apply(&mut self, update: CursorUpdate) -> ScreenPosition {
        self.position = match update {
            CursorUpdate::Accumulated(delta) => self.position + delta,
            CursorUpdate::Overridden(position) => position,
        };
        self.position
    }

    /// Decide and apply in one step.
    pub fn update(&mut self, input: &FrameInput, bounds: Vec2) -> ScreenPosition {
        let update = self.decide(input, bounds);
        trace!(?update, "cursor update");
        self.apply(update)
    }
}

fn within(point: Vec2, bounds: Vec2) -> bool {
    point.x >= 0.0 && point.x < bounds.x && point.y >= 0.0 && point.y < bounds.y
}
