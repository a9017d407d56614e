use core::fmt;

use crate::cluster::ClusterMode;

pub const CLUSTER_ROW_COUNT: usize = 2;
pub const CLUSTER_COLUMN_COUNT: usize = 2;
pub const CLUSTER_CELL_COUNT: usize = CLUSTER_ROW_COUNT * CLUSTER_COLUMN_COUNT;

/// Exclusive bound for either grid dimension.
pub const DIMENSION_LIMIT: usize = 50;
/// Exclusive bound for `rows + columns`.
pub const COMBINED_DIMENSION_LIMIT: usize = 75;
pub const MAX_TOUCH_COUNT_LIMIT: usize = 8;

// Largest rows * columns under both limits: 37 x 37.
pub const MAX_GRID_CELLS: usize = 1_369;
pub const MAX_WINDOWS: usize = (37 - CLUSTER_ROW_COUNT + 1) * (37 - CLUSTER_COLUMN_COUNT + 1);
// Every cluster owns at least one cell no other cluster owns in connected
// mode, and windows never outnumber cells.
pub const MAX_CLUSTERS: usize = MAX_GRID_CELLS;
pub const TOUCH_SLOT_CAPACITY: usize = MAX_TOUCH_COUNT_LIMIT + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid { rows: usize, columns: usize },
    DimensionTooLarge { rows: usize, columns: usize },
    GridTooLarge { rows: usize, columns: usize },
    WindowLargerThanGrid { rows: usize, columns: usize },
    TouchCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyGrid { rows, columns } => {
                write!(f, "grid {rows}x{columns} has no cells")
            }
            Self::DimensionTooLarge { rows, columns } => write!(
                f,
                "grid {rows}x{columns}: each dimension must be < {DIMENSION_LIMIT}"
            ),
            Self::GridTooLarge { rows, columns } => write!(
                f,
                "grid {rows}x{columns}: rows + columns must be < {COMBINED_DIMENSION_LIMIT}"
            ),
            Self::WindowLargerThanGrid { rows, columns } => write!(
                f,
                "grid {rows}x{columns} is smaller than the {CLUSTER_ROW_COUNT}x{CLUSTER_COLUMN_COUNT} cluster window"
            ),
            Self::TouchCount(count) => write!(
                f,
                "max_touch_count {count} outside 1..={MAX_TOUCH_COUNT_LIMIT}"
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    rows: usize,
    columns: usize,
    max_touch_count: usize,
    mode: ClusterMode,
}

impl GridConfig {
    pub const DEFAULT: Self = Self {
        rows: 11,
        columns: 5,
        max_touch_count: 2,
        mode: ClusterMode::Window,
    };

    pub fn new(rows: usize, columns: usize, max_touch_count: usize) -> Result<Self, ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::EmptyGrid { rows, columns });
        }
        if rows >= DIMENSION_LIMIT || columns >= DIMENSION_LIMIT {
            return Err(ConfigError::DimensionTooLarge { rows, columns });
        }
        if rows + columns >= COMBINED_DIMENSION_LIMIT {
            return Err(ConfigError::GridTooLarge { rows, columns });
        }
        if rows < CLUSTER_ROW_COUNT || columns < CLUSTER_COLUMN_COUNT {
            return Err(ConfigError::WindowLargerThanGrid { rows, columns });
        }
        if max_touch_count == 0 || max_touch_count > MAX_TOUCH_COUNT_LIMIT {
            return Err(ConfigError::TouchCount(max_touch_count));
        }

        Ok(Self {
            rows,
            columns,
            max_touch_count,
            mode: ClusterMode::Window,
        })
    }

    pub const fn with_mode(mut self, mode: ClusterMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    pub const fn max_touch_count(&self) -> usize {
        self.max_touch_count
    }

    pub const fn mode(&self) -> ClusterMode {
        self.mode
    }

    pub const fn window_count(&self) -> usize {
        (self.rows - CLUSTER_ROW_COUNT + 1) * (self.columns - CLUSTER_COLUMN_COUNT + 1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
