use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use touch_clusters::{Touch, TouchReport};

pub const CSV_HEADER: &str = "touch,frame,slot,x,y,force,count";

#[derive(Debug, Serialize)]
struct TouchRecord {
    slot: usize,
    x: f64,
    y: f64,
    x_bits: u16,
    y_bits: u16,
    force: u32,
    count: u16,
}

#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: usize,
    touches: Vec<TouchRecord>,
    overflow_force: u32,
}

fn touch_record(slot: usize, touch: &Touch) -> TouchRecord {
    TouchRecord {
        slot,
        x: touch.x.to_num::<f64>(),
        y: touch.y.to_num::<f64>(),
        x_bits: touch.x.to_bits(),
        y_bits: touch.y.to_bits(),
        force: touch.force,
        count: touch.count,
    }
}

/// One `touch` line per present slot and one `overflow` line per frame.
pub fn render_csv(reports: &[TouchReport]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for (frame, report) in reports.iter().enumerate() {
        for (slot, touch) in report.touches().iter().enumerate() {
            if !touch.is_present() {
                continue;
            }
            let _ = writeln!(
                out,
                "touch,{},{},{:.4},{:.4},{},{}",
                frame,
                slot,
                touch.x.to_num::<f64>(),
                touch.y.to_num::<f64>(),
                touch.force,
                touch.count
            );
        }
        let _ = writeln!(out, "overflow,{},{}", frame, report.overflow_force());
    }
    out
}

pub fn render_json(reports: &[TouchReport]) -> Result<String> {
    let frames: Vec<FrameRecord> = reports
        .iter()
        .enumerate()
        .map(|(frame, report)| FrameRecord {
            frame,
            touches: report
                .touches()
                .iter()
                .enumerate()
                .filter(|(_, touch)| touch.is_present())
                .map(|(slot, touch)| touch_record(slot, touch))
                .collect(),
            overflow_force: report.overflow_force(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&frames)?)
}
