use heapless::Vec;

use crate::{
    config::{
        CLUSTER_CELL_COUNT, CLUSTER_COLUMN_COUNT, CLUSTER_ROW_COUNT, MAX_CLUSTERS, MAX_GRID_CELLS,
    },
    sensor::ForceGrid,
};

pub type ClusterBuffer = Vec<Cluster, MAX_CLUSTERS>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClusterMode {
    /// Overlapping 2x2 windows at every anchor, stride 1.
    #[default]
    Window,
    /// Connected components of non-zero cells. With `diagonal` set, corner
    /// neighbours join the same component.
    Connected { diagonal: bool },
}

/// One 2x2 candidate. Cells are top-left, top-right, bottom-left,
/// bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    pub row: usize,
    pub column: usize,
    pub cells: [u8; CLUSTER_CELL_COUNT],
}

impl Window {
    pub fn at(grid: &ForceGrid, row: usize, column: usize) -> Self {
        let mut cells = [0u8; CLUSTER_CELL_COUNT];
        for dy in 0..CLUSTER_ROW_COUNT {
            for dx in 0..CLUSTER_COLUMN_COUNT {
                cells[dy * CLUSTER_COLUMN_COUNT + dx] =
                    grid.get(row + dy, column + dx).unwrap_or(0);
            }
        }
        Self { row, column, cells }
    }

    pub fn force(&self) -> u32 {
        self.cells.iter().map(|&f| f as u32).sum()
    }

    pub fn count(&self) -> u8 {
        self.cells.iter().filter(|&&f| f != 0).count() as u8
    }
}

/// A ranked candidate touch. Moments are force-weighted cell coordinates,
/// so the centroid is `moment / force`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cluster {
    pub row: u8,
    pub column: u8,
    /// Raster index of the anchor cell, used as the ranking tie-break.
    pub order: u16,
    pub force: u32,
    pub count: u16,
    pub moment_x: u32,
    pub moment_y: u32,
}

impl Cluster {
    // Dimensions stay below DIMENSION_LIMIT, so the narrowing casts are exact.
    fn anchored(row: usize, column: usize, columns: usize) -> Self {
        Self {
            row: row as u8,
            column: column as u8,
            order: (row * columns + column) as u16,
            ..Self::default()
        }
    }

    fn add_cell(&mut self, row: usize, column: usize, force: u8) {
        if force == 0 {
            return;
        }
        let force = force as u32;
        self.force += force;
        self.count += 1;
        self.moment_x += column as u32 * force;
        self.moment_y += row as u32 * force;
    }

    pub fn from_window(window: &Window, columns: usize) -> Self {
        let mut cluster = Self::anchored(window.row, window.column, columns);
        for (idx, &force) in window.cells.iter().enumerate() {
            cluster.add_cell(
                window.row + idx / CLUSTER_COLUMN_COUNT,
                window.column + idx % CLUSTER_COLUMN_COUNT,
                force,
            );
        }
        cluster
    }
}

pub fn extract(grid: &ForceGrid, mode: ClusterMode, out: &mut ClusterBuffer) {
    match mode {
        ClusterMode::Window => extract_windows(grid, out),
        ClusterMode::Connected { diagonal } => extract_components(grid, diagonal, out),
    }
}

/// Emits one cluster per window anchor in raster order, including windows
/// with zero force.
pub fn extract_windows(grid: &ForceGrid, out: &mut ClusterBuffer) {
    out.clear();
    if grid.rows() < CLUSTER_ROW_COUNT || grid.columns() < CLUSTER_COLUMN_COUNT {
        return;
    }
    for row in 0..=grid.rows() - CLUSTER_ROW_COUNT {
        for column in 0..=grid.columns() - CLUSTER_COLUMN_COUNT {
            let window = Window::at(grid, row, column);
            if out.push(Cluster::from_window(&window, grid.columns())).is_err() {
                return;
            }
        }
    }
}

const EDGE_NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
const CORNER_NEIGHBOURS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Flood-fills non-zero cells into components, anchored at the first cell
/// of each component in raster order.
pub fn extract_components(grid: &ForceGrid, diagonal: bool, out: &mut ClusterBuffer) {
    out.clear();
    let rows = grid.rows();
    let columns = grid.columns();
    let mut visited = [false; MAX_GRID_CELLS];
    let mut pending: Vec<u16, MAX_GRID_CELLS> = Vec::new();

    for (start, &force) in grid.cells().iter().enumerate() {
        if force == 0 || visited[start] {
            continue;
        }

        let mut cluster = Cluster::anchored(start / columns, start % columns, columns);
        visited[start] = true;
        pending.clear();
        let _ = pending.push(start as u16);

        while let Some(idx) = pending.pop() {
            let idx = idx as usize;
            let (row, column) = (idx / columns, idx % columns);
            cluster.add_cell(row, column, grid.cells()[idx]);

            let corners: &[(isize, isize)] = if diagonal { &CORNER_NEIGHBOURS } else { &[] };
            for &(dy, dx) in EDGE_NEIGHBOURS.iter().chain(corners) {
                let (Some(ny), Some(nx)) =
                    (row.checked_add_signed(dy), column.checked_add_signed(dx))
                else {
                    continue;
                };
                if ny >= rows || nx >= columns {
                    continue;
                }
                let next = ny * columns + nx;
                if visited[next] || grid.cells()[next] == 0 {
                    continue;
                }
                visited[next] = true;
                // Each cell is queued at most once, so the stack never
                // outgrows the grid.
                let _ = pending.push(next as u16);
            }
        }

        if out.push(cluster).is_err() {
            return;
        }
    }
}
