use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use cluster_replay::{
    first_mismatch, infer_config, load_config, parse_frames_file, render_csv, render_json, replay,
};

#[derive(Debug, Parser)]
#[command(name = "cluster_replay")]
#[command(about = "Replay captured force-grid frames through the touch clusterer")]
struct Cli {
    /// Frame capture: whitespace-separated rows, blank line between frames.
    frames: PathBuf,
    /// TOML grid config; grid size is inferred from the first frame if absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only used when the grid size is inferred.
    #[arg(long = "max-touches", default_value_t = 2, conflicts_with = "config")]
    max_touches: usize,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    output: Option<PathBuf>,
    /// Recorded CSV to compare against; exits non-zero on mismatch.
    #[arg(long)]
    expect: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let frames = parse_frames_file(&cli.frames)?;
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => infer_config(&frames, cli.max_touches)?,
    };
    log::info!(
        "replay: frames={} rows={} columns={} max_touches={} mode={:?}",
        frames.len(),
        config.rows(),
        config.columns(),
        config.max_touch_count(),
        config.mode()
    );

    let reports = replay(config, &frames)?;
    let csv = render_csv(&reports);
    let rendered = if cli.json {
        render_json(&reports)?
    } else {
        csv.clone()
    };

    match &cli.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("failed writing {}", path.display()))?,
        None => print!("{rendered}"),
    }

    if let Some(expect_path) = &cli.expect {
        let expected = fs::read_to_string(expect_path)
            .with_context(|| format!("failed reading {}", expect_path.display()))?;
        if let Some((line, want, got)) = first_mismatch(&expected, &csv) {
            eprintln!("expected line {line}: {want}");
            eprintln!("actual line {line}:   {got}");
            anyhow::bail!("replay output differs from {}", expect_path.display());
        }
    }

    Ok(())
}
