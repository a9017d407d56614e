use std::{fs, path::PathBuf};

use cluster_replay::{
    first_mismatch, infer_config, load_config, parse_frames_file, render_csv, render_json, replay,
    CSV_HEADER,
};
use touch_clusters::{ClusterMode, GridConfig};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("missing tools dir")
        .parent()
        .expect("missing repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn snapshot(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
}

fn replay_csv(config_name: &str) -> String {
    let config = load_config(&fixture(config_name)).expect("fixture config should load");
    let frames =
        parse_frames_file(&fixture("reference_examples.frames")).expect("frames should parse");
    let reports = replay(config, &frames).expect("replay should succeed");
    render_csv(&reports)
}

#[test]
fn default_config_matches_reference_panel() {
    let config = load_config(&repo_root().join("config/grid.toml"))
        .expect("default config should load");
    assert_eq!(config, GridConfig::DEFAULT);
}

#[test]
fn window_mode_matches_snapshot() {
    let expected = fs::read_to_string(snapshot("window_3x4.csv")).expect("missing snapshot");
    let actual = replay_csv("grid_3x4.toml");
    assert_eq!(
        first_mismatch(&expected, &actual),
        None,
        "window output changed; if intentional, update tests/snapshots/window_3x4.csv"
    );
}

#[test]
fn connected_mode_matches_snapshot() {
    let expected = fs::read_to_string(snapshot("connected_3x4.csv")).expect("missing snapshot");
    let actual = replay_csv("connected_3x4.toml");
    assert_eq!(first_mismatch(&expected, &actual), None);
}

#[test]
fn replay_is_deterministic_for_same_input() {
    assert_eq!(replay_csv("grid_3x4.toml"), replay_csv("grid_3x4.toml"));
}

#[test]
fn inferred_config_matches_explicit_window_config() {
    let frames =
        parse_frames_file(&fixture("reference_examples.frames")).expect("frames should parse");
    let inferred = infer_config(&frames, 2).expect("frame size should be valid");
    let explicit = load_config(&fixture("grid_3x4.toml")).expect("fixture config should load");
    assert_eq!(inferred, explicit);
    assert_eq!(inferred.mode(), ClusterMode::Window);
}

#[test]
fn semantic_validation_rejects_invalid_configs() {
    let cases = [
        ("invalid/combined_too_large.toml", "rows + columns must be < 75"),
        ("invalid/zero_touches.toml", "max_touch_count 0 outside 1..=8"),
        ("invalid/unknown_mode.toml", "invalid config"),
    ];
    for (name, needle) in cases {
        let err = load_config(&fixture(name)).expect_err("fixture should be rejected");
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "{name}: expected `{needle}` in `{message}`"
        );
    }
}

#[test]
fn frames_must_match_config_size() {
    let frames =
        parse_frames_file(&fixture("reference_examples.frames")).expect("frames should parse");
    let err = replay(GridConfig::DEFAULT, &frames).expect_err("3x4 frames on an 11x5 grid");
    assert!(err.to_string().contains("frame 0 is 3x4, config expects 11x5"));
}

#[test]
fn json_output_carries_fixed_point_bits() {
    let config = load_config(&fixture("grid_3x4.toml")).expect("fixture config should load");
    let frames =
        parse_frames_file(&fixture("reference_examples.frames")).expect("frames should parse");
    let reports = replay(config, &frames).expect("replay should succeed");

    let json: serde_json::Value =
        serde_json::from_str(&render_json(&reports).expect("render json")).expect("parse json");
    assert_eq!(json[1]["touches"][0]["x_bits"], 102);
    assert_eq!(json[1]["touches"][0]["y_bits"], 128);
    assert_eq!(json[1]["overflow_force"], 13);
    assert_eq!(json[0]["overflow_force"], 16);
}

#[test]
fn captures_written_to_disk_replay_identically() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("capture.frames");
    fs::write(&path, "0 0 0\n0 9 0\n0 0 0\n\n0 0 0\n0 9 0\n0 0 0\n").expect("write capture");

    let frames = parse_frames_file(&path).expect("capture should parse");
    let config = infer_config(&frames, 1).expect("3x3 is a valid grid");
    let reports = replay(config, &frames).expect("replay should succeed");
    assert_eq!(reports[0], reports[1]);

    let csv = render_csv(&reports);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER));
    assert_eq!(lines.next(), Some("touch,0,0,1.0000,1.0000,9,1"));
    assert_eq!(lines.next(), Some("overflow,0,27"));
}

#[test]
fn mismatch_reports_first_differing_line() {
    let expected = "# recorded\ntouch,0,0,1.0000,1.0000,9,1\noverflow,0,27\n";
    let actual = "touch,0,0,1.0000,1.0000,9,1\noverflow,0,18\n";
    assert_eq!(
        first_mismatch(expected, actual),
        Some((2, "overflow,0,27".to_owned(), "overflow,0,18".to_owned()))
    );
}
