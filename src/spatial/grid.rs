//! Cell grid geometry for tiling a target image
//!
//! The grid has `ceil(W / cw)` columns and `ceil(H / ch)` rows. Extraction
//! boxes are clipped to the source image, so the last column and row may be
//! narrower than nominal. Paste boxes never are: every cell owns a full
//! nominal rectangle in the output, which makes the canvas a whole number of
//! paste cells even when the source is not a whole number of cells.

use crate::io::error::{Result, invalid_parameter, require_positive};
use crate::signature::Region;

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Column index (0-based, left to right)
    pub column: u32,
    /// Row index (0-based, top to bottom)
    pub row: u32,
    /// Source pixels summarized for this cell, clipped to the image
    pub extraction: Region,
}

impl Cell {
    /// Output rectangle for this cell given the nominal paste size
    ///
    /// Returns `None` if the rectangle's origin does not fit in `u32`.
    pub const fn paste_box(&self, paste_width: u32, paste_height: u32) -> Option<Region> {
        match (
            self.column.checked_mul(paste_width),
            self.row.checked_mul(paste_height),
        ) {
            (Some(x), Some(y)) => Some(Region::new(x, y, paste_width, paste_height)),
            _ => None,
        }
    }
}

/// Partition of a `width` x `height` image into nominal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    image_width: u32,
    image_height: u32,
    cell_width: u32,
    cell_height: u32,
    columns: u32,
    rows: u32,
}

impl CellGrid {
    /// Lay a grid of `cell_width` x `cell_height` cells over an image
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either cell dimension is zero
    pub fn new(image_width: u32, image_height: u32, cell_width: u32, cell_height: u32) -> Result<Self> {
        let cell_width = require_positive("cell_width", cell_width)?;
        let cell_height = require_positive("cell_height", cell_height)?;

        Ok(Self {
            image_width,
            image_height,
            cell_width,
            cell_height,
            columns: image_width.div_ceil(cell_width),
            rows: image_height.div_ceil(cell_height),
        })
    }

    /// Number of cell columns
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Canvas size when each cell is pasted as `paste_width` x `paste_height`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either canvas side overflows `u32`
    pub fn canvas_size(&self, paste_width: u32, paste_height: u32) -> Result<(u32, u32)> {
        let width = self.columns.checked_mul(paste_width).ok_or_else(|| {
            invalid_parameter(
                "sub_image_width",
                &paste_width,
                &format!("{} columns overflow the canvas width", self.columns),
            )
        })?;
        let height = self.rows.checked_mul(paste_height).ok_or_else(|| {
            invalid_parameter(
                "sub_image_height",
                &paste_height,
                &format!("{} rows overflow the canvas height", self.rows),
            )
        })?;
        Ok((width, height))
    }

    /// Cell at a grid position, `None` outside the grid
    pub fn cell(&self, column: u32, row: u32) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }

        let left = column * self.cell_width;
        let top = row * self.cell_height;
        let right = self.image_width.min(left.saturating_add(self.cell_width));
        let bottom = self.image_height.min(top.saturating_add(self.cell_height));

        Some(Cell {
            column,
            row,
            extraction: Region::new(
                left,
                top,
                right.saturating_sub(left),
                bottom.saturating_sub(top),
            ),
        })
    }

    /// All cells, column-major (column outer, row inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.columns)
            .flat_map(move |column| (0..self.rows).filter_map(move |row| self.cell(column, row)))
    }
}
