use heapless::Vec;

use crate::config::{GridConfig, DIMENSION_LIMIT, MAX_GRID_CELLS};

/// Source of raw per-cell force readings.
///
/// Any `FnMut(column, row) -> u8` closure is a sensor, so whatever handle
/// the hardware layer needs stays captured in the closure and is never
/// inspected here. Readings must be stable for the duration of one
/// detection.
pub trait ForceSensor {
    fn force(&mut self, column: usize, row: usize) -> u8;
}

impl<F> ForceSensor for F
where
    F: FnMut(usize, usize) -> u8,
{
    fn force(&mut self, column: usize, row: usize) -> u8 {
        self(column, row)
    }
}

/// Dense row-major force snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForceGrid {
    rows: usize,
    columns: usize,
    cells: Vec<u8, MAX_GRID_CELLS>,
}

impl ForceGrid {
    pub const fn new() -> Self {
        Self {
            rows: 0,
            columns: 0,
            cells: Vec::new(),
        }
    }

    /// Reads every cell exactly once, rows outer, columns inner.
    pub fn sample<S>(config: &GridConfig, sensor: &mut S) -> Self
    where
        S: ForceSensor + ?Sized,
    {
        let mut grid = Self::new();
        grid.resample(config, sensor);
        grid
    }

    pub(crate) fn resample<S>(&mut self, config: &GridConfig, sensor: &mut S)
    where
        S: ForceSensor + ?Sized,
    {
        self.rows = config.rows();
        self.columns = config.columns();
        self.cells.clear();
        for row in 0..self.rows {
            for column in 0..self.columns {
                // Capacity is guaranteed by GridConfig validation.
                let _ = self.cells.push(sensor.force(column, row));
            }
        }
    }

    /// Builds a grid from literal rows. Returns `None` for ragged input or
    /// when either dimension reaches `DIMENSION_LIMIT`.
    pub fn from_rows<R>(rows: &[R]) -> Option<Self>
    where
        R: AsRef<[u8]>,
    {
        let columns = rows.first().map(|row| row.as_ref().len())?;
        if rows.len() >= DIMENSION_LIMIT || columns >= DIMENSION_LIMIT {
            return None;
        }
        let mut cells = Vec::new();
        for row in rows {
            let row = row.as_ref();
            if row.len() != columns {
                return None;
            }
            cells.extend_from_slice(row).ok()?;
        }
        Some(Self {
            rows: rows.len(),
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<u8> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn total_force(&self) -> u32 {
        self.cells.iter().map(|&f| f as u32).sum()
    }

    pub fn matches(&self, config: &GridConfig) -> bool {
        self.rows == config.rows() && self.columns == config.columns()
    }
}

/// A captured grid replays its own readings; cells outside it read as zero.
impl ForceSensor for ForceGrid {
    fn force(&mut self, column: usize, row: usize) -> u8 {
        self.get(row, column).unwrap_or(0)
    }
}
