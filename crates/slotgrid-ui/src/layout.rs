//! Cell placement for windowed grids.
//!
//! Positions are relative to the top-left of the scroll content, with y
//! growing downward as negative values (content hangs below its anchor).

use slotgrid_types::config::WindowConfig;

/// Computed position of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPosition {
    pub x: f32,
    pub y: f32,
}

/// Uniform cell grid: fixed cell size plus spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    pub columns: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
}

impl CellLayout {
    pub fn new(columns: usize, cell_width: f32, cell_height: f32) -> Self {
        Self {
            columns,
            cell_width,
            cell_height,
            spacing_x: 0.0,
            spacing_y: 0.0,
        }
    }

    pub fn with_spacing(mut self, spacing_x: f32, spacing_y: f32) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    pub fn from_config(config: &WindowConfig) -> Self {
        Self::new(config.columns, config.cell_width, config.cell_height)
            .with_spacing(config.spacing_x, config.spacing_y)
    }

    /// Distance between the tops of consecutive rows.
    pub fn row_height(&self) -> f64 {
        f64::from(self.cell_height) + f64::from(self.spacing_y)
    }

    /// Row containing `index`, or 0 when `columns` is 0.
    pub fn row_of(&self, index: usize) -> usize {
        index.checked_div(self.columns).unwrap_or(0)
    }

    /// Top edge of `row`, as a positive scroll distance.
    pub fn row_top(&self, row: usize) -> f64 {
        row as f64 * self.row_height()
    }

    /// Total scrollable height for `count` items.
    pub fn extent(&self, count: usize) -> f64 {
        if self.columns == 0 {
            return 0.0;
        }
        self.row_top(count.div_ceil(self.columns))
    }

    /// Placement of the cell showing data index `index`.
    pub fn position(&self, index: usize) -> CellPosition {
        let (row, col) = match self.columns {
            0 => (0, 0),
            cols => (index / cols, index % cols),
        };
        CellPosition {
            x: col as f32 * (self.cell_width + self.spacing_x),
            y: -(row as f32) * (self.cell_height + self.spacing_y),
        }
    }
}
