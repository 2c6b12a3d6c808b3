//! pickray - aim a 2D cursor at a 3D scene and report whether it points at an object.
//!
//! Runs the cursor aggregator and ray picker headlessly over scripted input.

mod config;
mod headless;
mod scripted_input;
mod session;

use anyhow::Result;
use config::PickerConfig;
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_FRAMES: u64 = 60;
const DEFAULT_DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting pickray v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let picker = match &cli.config {
        Some(path) => PickerConfig::load_from_path(path),
        None => PickerConfig::load(),
    };
    picker.validate()?;

    if cli.exit_when_script_finished && cli.scripted_input.is_none() {
        tracing::warn!("--exit-when-script-finished has no effect without --script");
    }

    let summary = headless::run(headless::HeadlessConfig {
        picker,
        scripted_input: cli.scripted_input,
        trace: cli.trace,
        frames: cli.frames,
        dt: cli.dt,
        exit_when_script_finished: cli.exit_when_script_finished,
    })?;

    info!(
        frames = summary.frames,
        frames_hit = summary.frames_hit,
        "run complete"
    );
    println!(
        "Cursor : ({:.1}, {:.1})\nHit : {}",
        summary.cursor.x, summary.cursor.y, summary.hit
    );
    Ok(())
}

struct CliOptions {
    config: Option<PathBuf>,
    scripted_input: Option<PathBuf>,
    trace: Option<PathBuf>,
    frames: u64,
    dt: f32,
    exit_when_script_finished: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            scripted_input: None,
            trace: None,
            frames: DEFAULT_FRAMES,
            dt: DEFAULT_DT,
            exit_when_script_finished: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => match args.next() {
                    Some(path) => opts.config = Some(PathBuf::from(path)),
                    None => tracing::error!("--config requires a file path"),
                },
                "--script" => match args.next() {
                    Some(path) => opts.scripted_input = Some(PathBuf::from(path)),
                    None => tracing::error!("--script requires a file path"),
                },
                "--trace" => match args.next() {
                    Some(path) => opts.trace = Some(PathBuf::from(path)),
                    None => tracing::error!("--trace requires a file path"),
                },
                "--frames" => match args.next().map(|v| v.parse::<u64>()) {
                    Some(Ok(value)) => opts.frames = value,
                    _ => tracing::error!("--frames requires a non-negative integer"),
                },
                "--dt" => match args.next().map(|v| v.parse::<f32>()) {
                    Some(Ok(value)) if value.is_finite() && value >= 0.0 => opts.dt = value,
                    _ => tracing::error!("--dt requires a non-negative number of seconds"),
                },
                "--exit-when-script-finished" => opts.exit_when_script_finished = true,
                other => tracing::warn!("Ignoring unknown argument {other}"),
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse(&[]);
        assert!(opts.config.is_none());
        assert_eq!(opts.frames, DEFAULT_FRAMES);
        assert_eq!(opts.dt, DEFAULT_DT);
        assert!(!opts.exit_when_script_finished);
    }

    #[test]
    fn flags_are_parsed() {
        let opts = parse(&[
            "--config",
            "scene.toml",
            "--script",
            "drag.json",
            "--trace",
            "out/trace.jsonl",
            "--frames",
            "120",
            "--dt",
            "0.5",
            "--exit-when-script-finished",
        ]);
        assert_eq!(opts.config, Some(PathBuf::from("scene.toml")));
        assert_eq!(opts.scripted_input, Some(PathBuf::from("drag.json")));
        assert_eq!(opts.trace, Some(PathBuf::from("out/trace.jsonl")));
        assert_eq!(opts.frames, 120);
        assert_eq!(opts.dt, 0.5);
        assert!(opts.exit_when_script_finished);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let opts = parse(&["--frames", "many", "--dt", "-1", "--bogus"]);
        assert_eq!(opts.frames, DEFAULT_FRAMES);
        assert_eq!(opts.dt, DEFAULT_DT);
    }
}
