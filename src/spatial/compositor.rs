//! Cell-by-cell puzzle compositing
//!
//! For each grid cell the compositor summarizes the (possibly clipped) source
//! region, finds the nearest pool candidate and pastes it into the cell's
//! nominal output rectangle. Paste rectangles tile the canvas exactly, so each
//! canvas pixel is written once.

use crate::io::error::{PuzzleError, Result, invalid_parameter, require_positive};
use crate::matching::nearest;
use crate::pool::CandidatePool;
use crate::signature::extract;
use crate::spatial::grid::CellGrid;
use image::RgbImage;
use image::imageops;
use tracing::trace;

/// Content that can be written into a canvas rectangle
pub trait Paste {
    /// Write `self` into the `width` x `height` rectangle at (`x`, `y`)
    ///
    /// Pixels falling outside the canvas are dropped.
    fn paste(&self, canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32);
}

impl Paste for RgbImage {
    // Thumbnails are already the nominal paste size
    fn paste(&self, canvas: &mut RgbImage, x: u32, y: u32, _width: u32, _height: u32) {
        imageops::replace(canvas, self, i64::from(x), i64::from(y));
    }
}

/// Cell and paste dimensions for one puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Source pixels per cell horizontally
    pub cell_width: u32,
    /// Source pixels per cell vertically
    pub cell_height: u32,
    /// Output pixels per cell horizontally
    pub paste_width: u32,
    /// Output pixels per cell vertically
    pub paste_height: u32,
}

impl TileLayout {
    /// Color puzzles paste one block per cell at the cell's own size
    pub const fn color(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            paste_width: cell_width,
            paste_height: cell_height,
        }
    }

    /// Mosaics paste one thumbnail per cell
    pub const fn mosaic(cell_width: u32, cell_height: u32, sub_width: u32, sub_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            paste_width: sub_width,
            paste_height: sub_height,
        }
    }

    /// Ensure no dimension is zero
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first zero dimension
    pub fn validate(&self) -> Result<()> {
        require_positive("cell_width", self.cell_width)?;
        require_positive("cell_height", self.cell_height)?;
        require_positive("sub_image_width", self.paste_width)?;
        require_positive("sub_image_height", self.paste_height)?;
        Ok(())
    }
}

/// Finished canvas plus bookkeeping
#[derive(Debug)]
pub struct Composite {
    /// Output image
    pub canvas: RgbImage,
    /// Number of cells matched and pasted
    pub cells: u64,
}

/// Rebuild `target` from the nearest candidates in `pool`
///
/// # Errors
///
/// Returns an error if the layout has a zero dimension, the pool is empty,
/// the pool's fixed paste size differs from the layout's, or the canvas would
/// overflow `u32`
pub fn composite<P>(target: &RgbImage, pool: &P, layout: TileLayout) -> Result<Composite>
where
    P: CandidatePool,
    P::Candidate: Paste,
{
    layout.validate()?;
    if pool.is_empty() {
        return Err(PuzzleError::EmptyPool);
    }
    if let Some(size) = pool.paste_size()
        && size != (layout.paste_width, layout.paste_height)
    {
        return Err(PuzzleError::DimensionMismatch {
            left: size,
            right: (layout.paste_width, layout.paste_height),
        });
    }

    let grid = CellGrid::new(
        target.width(),
        target.height(),
        layout.cell_width,
        layout.cell_height,
    )?;
    let (canvas_width, canvas_height) = grid.canvas_size(layout.paste_width, layout.paste_height)?;
    let mut canvas = RgbImage::new(canvas_width, canvas_height);
    let mode = pool.mode();

    let mut cells = 0;
    for cell in grid.cells() {
        if cell.extraction.is_empty() {
            trace!(column = cell.column, row = cell.row, "skipping empty cell");
            continue;
        }

        let signature = extract(target, cell.extraction, mode)?;
        let best = nearest(&signature, pool.entries())?;
        let paste = cell
            .paste_box(layout.paste_width, layout.paste_height)
            .ok_or_else(|| {
                invalid_parameter(
                    "cell",
                    &format!("({}, {})", cell.column, cell.row),
                    &"paste position overflows the canvas",
                )
            })?;
        best.candidate
            .paste(&mut canvas, paste.x, paste.y, paste.width, paste.height);
        cells += 1;
    }

    Ok(Composite { canvas, cells })
}
