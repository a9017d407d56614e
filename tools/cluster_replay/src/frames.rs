use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use touch_clusters::ForceGrid;

/// Parses a frame capture: rows of whitespace-separated 0..=255 readings,
/// frames separated by blank lines, `#` starts a comment line.
pub fn parse_frames_file(path: &Path) -> Result<Vec<ForceGrid>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading frames {}", path.display()))?;
    parse_frames_str(&raw, &path.display().to_string())
}

pub fn parse_frames_str(raw: &str, origin: &str) -> Result<Vec<ForceGrid>> {
    let mut frames = Vec::new();
    let mut rows: Vec<Vec<u8>> = Vec::new();
    let mut frame_start = 0usize;

    for (line_no, line) in raw.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        if trimmed.is_empty() {
            flush_frame(&mut rows, &mut frames, origin, frame_start)?;
            continue;
        }
        if rows.is_empty() {
            frame_start = line_no;
        }

        let row = trimmed
            .split_whitespace()
            .map(|token| {
                token.parse::<u8>().with_context(|| {
                    format!("{origin}:{line_no} invalid force reading '{token}', expected 0..=255")
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        rows.push(row);
    }
    flush_frame(&mut rows, &mut frames, origin, frame_start)?;

    if frames.is_empty() {
        bail!("{origin}: no frames found");
    }
    Ok(frames)
}

fn flush_frame(
    rows: &mut Vec<Vec<u8>>,
    frames: &mut Vec<ForceGrid>,
    origin: &str,
    frame_start: usize,
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let Some(grid) = ForceGrid::from_rows(rows.as_slice()) else {
        bail!("{origin}:{frame_start} frame rows have differing lengths or the frame is too large");
    };
    frames.push(grid);
    rows.clear();
    Ok(())
}
