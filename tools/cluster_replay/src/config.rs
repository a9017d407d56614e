use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use touch_clusters::{ClusterMode, GridConfig};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    Window,
    Connected,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSection {
    pub rows: usize,
    pub columns: usize,
    pub max_touch_count: usize,
}

impl Default for GridSection {
    fn default() -> Self {
        let reference = GridConfig::DEFAULT;
        Self {
            rows: reference.rows(),
            columns: reference.columns(),
            max_touch_count: reference.max_touch_count(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterSection {
    pub mode: ModeName,
    pub diagonal: bool,
}

impl Default for ClusterSection {
    fn default() -> Self {
        Self {
            mode: ModeName::Window,
            diagonal: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfigFile {
    pub grid: GridSection,
    pub cluster: ClusterSection,
}

pub fn parse_config_file(path: &Path) -> Result<ReplayConfigFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading config {}", path.display()))?;
    parse_config_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config_str(raw: &str) -> Result<ReplayConfigFile> {
    toml::from_str::<ReplayConfigFile>(raw).context("invalid TOML grid config")
}

/// Applies the same limits the detector enforces at construction.
pub fn validate_config(file: &ReplayConfigFile) -> Result<GridConfig> {
    let grid = file.grid;
    let config = GridConfig::new(grid.rows, grid.columns, grid.max_touch_count)
        .map_err(|err| anyhow!("grid config rejected: {err}"))?;
    let mode = match file.cluster.mode {
        ModeName::Window => ClusterMode::Window,
        ModeName::Connected => ClusterMode::Connected {
            diagonal: file.cluster.diagonal,
        },
    };
    Ok(config.with_mode(mode))
}

pub fn load_config(path: &Path) -> Result<GridConfig> {
    validate_config(&parse_config_file(path)?)
}
