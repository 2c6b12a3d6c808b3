//! Golden-file JSON snapshots.
//!
//! Values are serialized as pretty JSON with object keys sorted, so goldens
//! diff cleanly. Set `PICKRAY_UPDATE_SNAPSHOTS=1` to rewrite goldens instead
//! of comparing against them.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "PICKRAY_UPDATE_SNAPSHOTS";

/// Assert that `value` matches the JSON snapshot stored at `path`.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = to_snapshot_json(value)?;

    if update_requested() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory {}", parent.display())
            })?;
        }
        fs::write(path, &actual)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot updated");
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if let Some((line, want, got)) = first_difference(&expected, &actual) {
        anyhow::bail!(
            "Snapshot mismatch at {} line {line}: expected `{want}`, got `{got}` (run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }
    Ok(())
}

/// Serialize `value` into the canonical snapshot form (sorted keys, trailing newline).
pub fn to_snapshot_json<T: Serialize>(value: &T) -> Result<String> {
    // `serde_json::Value` objects are BTreeMap-backed, which sorts keys.
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut out = serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    out.push('\n');
    Ok(out)
}

fn update_requested() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn first_difference<'a>(expected: &'a str, actual: &'a str) -> Option<(usize, &'a str, &'a str)> {
    let mut want = expected.lines();
    let mut got = actual.lines();
    let mut line = 1;
    loop {
        match (want.next(), got.next()) {
            (None, None) => return None,
            (w, g) if w != g => return Some((line, w.unwrap_or("<eof>"), g.unwrap_or("<eof>"))),
            _ => line += 1,
        }
    }
}
