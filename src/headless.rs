use crate::config::PickerConfig;
use crate::scripted_input::ScriptedInputPlayer;
use crate::session::PickSession;
use anyhow::{Context, Result};
use pickray_input::{FrameInput, ScreenPosition};
use pickray_testkit::JsonlSink;
use std::path::PathBuf;
use tracing::info;

pub struct HeadlessConfig {
    pub picker: PickerConfig,
    pub scripted_input: Option<PathBuf>,
    pub trace: Option<PathBuf>,
    pub frames: u64,
    /// Fixed timestep in seconds.
    pub dt: f32,
    pub exit_when_script_finished: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub cursor: ScreenPosition,
    pub hit: bool,
    pub frames_hit: u64,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunSummary> {
    let mut script = match &cfg.scripted_input {
        Some(path) => Some(
            ScriptedInputPlayer::from_path(path)
                .with_context(|| format!("failed to load scripted input {}", path.display()))?,
        ),
        None => None,
    };
    let mut trace = cfg.trace.as_ref().map(JsonlSink::create).transpose()?;
    let mut session = PickSession::new(&cfg.picker);

    info!(frames = cfg.frames, dt = cfg.dt, "starting headless run");

    let mut summary = RunSummary {
        frames: 0,
        cursor: session.cursor(),
        hit: false,
        frames_hit: 0,
    };

    for frame in 1..=cfg.frames {
        let input = match script.as_mut() {
            Some(player) => player.advance(cfg.dt),
            None => FrameInput {
                elapsed_seconds: cfg.dt,
                ..Default::default()
            },
        };

        let outcome = session
            .step(&input)
            .with_context(|| format!("pick failed on frame {frame}"))?;
        if let Some(sink) = trace.as_mut() {
            sink.write(&outcome.to_record(frame))?;
        }

        summary.frames = frame;
        summary.cursor = outcome.cursor;
        summary.hit = outcome.hit();
        if summary.hit {
            summary.frames_hit += 1;
        }

        if cfg.exit_when_script_finished && script.as_ref().is_some_and(|p| p.finished()) {
            info!(frame, "scripted input finished");
            break;
        }
    }

    if let Some(sink) = trace.as_mut() {
        sink.flush()?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(label: &str) -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("pickray_{label}_{timestamp}"));
        fs::create_dir_all(&dir).expect("temp dir create");
        dir
    }

    #[test]
    fn idle_run_never_hits() {
        let summary = run(HeadlessConfig {
            picker: PickerConfig::default(),
            scripted_input: None,
            trace: None,
            frames: 10,
            dt: 1.0 / 60.0,
            exit_when_script_finished: false,
        })
        .expect("run succeeds");
        assert_eq!(summary.frames, 10);
        assert!(!summary.hit);
        assert_eq!(summary.frames_hit, 0);
    }

    #[test]
    fn scripted_drag_hits_and_traces() {
        let dir = temp_dir("headless");
        let script = dir.join("script.json");
        fs::write(
            &script,
            r#"{ "steps": [
                { "duration": 0.5, "right": true },
                { "duration": 0.5, "mouse_x": 400.0, "mouse_y": 300.0, "mouse_pressed": true }
            ] }"#,
        )
        .expect("write script");
        let trace = dir.join("trace.jsonl");

        let summary = run(HeadlessConfig {
            picker: PickerConfig::default(),
            scripted_input: Some(script),
            trace: Some(trace.clone()),
            frames: 100,
            dt: 0.5,
            exit_when_script_finished: true,
        })
        .expect("run succeeds");

        assert_eq!(summary.frames, 2);
        assert!(summary.hit);
        assert_eq!(summary.frames_hit, 1);
        assert_eq!(summary.cursor, glam::Vec2::new(400.0, 300.0));

        let contents = fs::read_to_string(&trace).expect("trace readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"cursor\":[200.0,100.0]"));
        assert!(lines[1].contains("\"source\":\"overridden\""));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_script_is_an_error() {
        let result = run(HeadlessConfig {
            picker: PickerConfig::default(),
            scripted_input: Some(PathBuf::from("/nonexistent/pickray/script.json")),
            trace: None,
            frames: 1,
            dt: 0.1,
            exit_when_script_finished: false,
        });
        assert!(result.is_err());
    }
}
