pub mod config;
pub mod frames;
pub mod render;

use anyhow::{bail, Result};
use touch_clusters::{ForceGrid, GridConfig, TouchDetector, TouchReport};

pub use config::{load_config, parse_config_file, parse_config_str, validate_config};
pub use frames::{parse_frames_file, parse_frames_str};
pub use render::{render_csv, render_json, CSV_HEADER};

/// Grid config inferred from the first frame when no config file is given.
pub fn infer_config(frames: &[ForceGrid], max_touch_count: usize) -> Result<GridConfig> {
    let Some(first) = frames.first() else {
        bail!("cannot infer grid size without frames");
    };
    GridConfig::new(first.rows(), first.columns(), max_touch_count)
        .map_err(|err| anyhow::anyhow!("frame 0 rejected: {err}"))
}

/// Runs every frame through one detector, the way a polling loop would.
pub fn replay(config: GridConfig, frames: &[ForceGrid]) -> Result<Vec<TouchReport>> {
    let mut detector = TouchDetector::new(config);
    let mut reports = Vec::with_capacity(frames.len());
    for (idx, frame) in frames.iter().enumerate() {
        if !frame.matches(&config) {
            bail!(
                "frame {idx} is {}x{}, config expects {}x{}",
                frame.rows(),
                frame.columns(),
                config.rows(),
                config.columns()
            );
        }
        let report = detector.detect_grid(frame);
        log::debug!(
            "replay: frame={} touches={} overflow={}",
            idx,
            report.touch_count(),
            report.overflow_force()
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Compares rendered output with a recorded expectation, ignoring blank and
/// `#` lines. Returns the first mismatch as `(line, expected, actual)`.
pub fn first_mismatch(expected: &str, actual: &str) -> Option<(usize, String, String)> {
    let significant = |text: &str| -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect()
    };
    let expected = significant(expected);
    let actual = significant(actual);
    let len = expected.len().max(actual.len());
    (0..len).find_map(|idx| {
        let want = expected.get(idx).cloned().unwrap_or_default();
        let got = actual.get(idx).cloned().unwrap_or_default();
        (want != got).then_some((idx + 1, want, got))
    })
}
