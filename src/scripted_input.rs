use glam::Vec2;
use pickray_input::{FrameInput, GamepadSample, KeyboardSample, MouseSample};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

/// Device state held for `duration` seconds.
#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    left: bool,
    #[serde(default)]
    right: bool,
    #[serde(default)]
    up: bool,
    #[serde(default)]
    down: bool,
    #[serde(default)]
    gamepad: bool,
    #[serde(default)]
    stick_x: f32,
    #[serde(default)]
    stick_y: f32,
    #[serde(default)]
    mouse_x: f32,
    #[serde(default)]
    mouse_y: f32,
    #[serde(default)]
    mouse_pressed: bool,
}

pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    finished: bool,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        if let Some(step) = file
            .steps
            .iter()
            .find(|s| !s.duration.is_finite() || s.duration <= 0.0)
        {
            anyhow::bail!("scripted step duration must be positive, got {}", step.duration);
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            finished: false,
        })
    }

    /// Whether playback has run past the end of the last step.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Sample the device state for the frame ending `dt` seconds from now.
    ///
    /// The step active at the start of the frame supplies the devices, so a
    /// step lasting exactly one frame is observed exactly once. The last step
    /// holds once the script runs out.
    pub fn advance(&mut self, dt: f32) -> FrameInput {
        let step = &self.steps[self.index];
        let input = step.to_frame_input(dt);

        self.time_in_step += dt;
        while self.time_in_step >= self.steps[self.index].duration {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
                break;
            }
        }

        input
    }
}

impl ScriptedStep {
    fn to_frame_input(&self, elapsed_seconds: f32) -> FrameInput {
        FrameInput {
            keyboard: KeyboardSample {
                left: self.left,
                right: self.right,
                up: self.up,
                down: self.down,
            },
            gamepad: GamepadSample {
                connected: self.gamepad,
                stick: Vec2::new(self.stick_x, self.stick_y),
            },
            mouse: MouseSample {
                position: Vec2::new(self.mouse_x, self.mouse_y),
                primary_pressed: self.mouse_pressed,
            },
            elapsed_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_play_in_order_then_hold() {
        let mut player = ScriptedInputPlayer::from_json(
            r#"{ "steps": [
                { "duration": 0.5, "left": true },
                { "duration": 0.5, "mouse_x": 10.0, "mouse_y": 20.0, "mouse_pressed": true }
            ] }"#,
        )
        .expect("script parses");

        let first = player.advance(0.5);
        assert!(first.keyboard.left);
        assert!(!first.mouse.primary_pressed);
        assert_eq!(first.elapsed_seconds, 0.5);
        assert!(!player.finished());

        let second = player.advance(0.5);
        assert!(!second.keyboard.left);
        assert!(second.mouse.primary_pressed);
        assert_eq!(second.mouse.position, Vec2::new(10.0, 20.0));
        assert!(player.finished());

        let held = player.advance(0.5);
        assert!(held.mouse.primary_pressed);
    }

    #[test]
    fn gamepad_fields_map_to_sample() {
        let mut player = ScriptedInputPlayer::from_json(
            r#"{ "steps": [ { "duration": 1.0, "gamepad": true, "stick_x": 0.5, "stick_y": -1.0 } ] }"#,
        )
        .expect("script parses");
        let input = player.advance(0.25);
        assert!(input.gamepad.connected);
        assert_eq!(input.gamepad.stick, Vec2::new(0.5, -1.0));
    }

    #[test]
    fn empty_or_zero_length_scripts_are_rejected() {
        assert!(ScriptedInputPlayer::from_json(r#"{ "steps": [] }"#).is_err());
        assert!(ScriptedInputPlayer::from_json(r#"{ "steps": [ { "duration": 0.0 } ] }"#).is_err());
        assert!(ScriptedInputPlayer::from_json("not json").is_err());
    }
}
