use crate::{
    cluster::{self, ClusterBuffer},
    config::{ConfigError, GridConfig},
    rank::rank,
    report::TouchReport,
    sensor::{ForceGrid, ForceSensor},
};

/// Single-writer touch detector.
///
/// Owns the scratch grid and cluster buffers so detection never allocates.
/// Every call re-samples the whole grid; nothing carries over between calls
/// except the buffers themselves. Use one detector per thread.
pub struct TouchDetector {
    config: GridConfig,
    grid: ForceGrid,
    clusters: ClusterBuffer,
}

impl TouchDetector {
    pub fn new(config: GridConfig) -> Self {
        log::debug!(
            "touch: detector rows={} columns={} max_touches={} mode={:?}",
            config.rows(),
            config.columns(),
            config.max_touch_count(),
            config.mode()
        );
        Self {
            config,
            grid: ForceGrid::new(),
            clusters: ClusterBuffer::new(),
        }
    }

    pub fn with_dimensions(
        rows: usize,
        columns: usize,
        max_touch_count: usize,
    ) -> Result<Self, ConfigError> {
        GridConfig::new(rows, columns, max_touch_count).map(Self::new)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Snapshot sampled by the most recent detection.
    pub fn last_grid(&self) -> &ForceGrid {
        &self.grid
    }

    pub fn detect<S>(&mut self, sensor: &mut S) -> TouchReport
    where
        S: ForceSensor + ?Sized,
    {
        let mut report = TouchReport::new(&self.config);
        self.detect_into(sensor, &mut report);
        report
    }

    /// Replays a captured snapshot. Cells outside `grid` read as zero.
    pub fn detect_grid(&mut self, grid: &ForceGrid) -> TouchReport {
        self.detect(&mut |column: usize, row: usize| grid.get(row, column).unwrap_or(0))
    }

    /// Same as [`detect`](Self::detect), writing into a caller-owned report.
    /// The report is fully overwritten.
    pub fn detect_into<S>(&mut self, sensor: &mut S, report: &mut TouchReport)
    where
        S: ForceSensor + ?Sized,
    {
        self.grid.resample(&self.config, sensor);
        cluster::extract(&self.grid, self.config.mode(), &mut self.clusters);
        rank(&mut self.clusters);
        report.fill(self.config.max_touch_count(), &self.clusters);

        log::trace!(
            "touch: detect clusters={} touches={} overflow={}",
            self.clusters.len(),
            report.touch_count(),
            report.overflow_force()
        );
    }
}

impl Default for TouchDetector {
    fn default() -> Self {
        Self::new(GridConfig::DEFAULT)
    }
}
