//! Grid geometry and canvas compositing
//!
//! This module contains the tiling side of a puzzle:
//! - Partitioning a target image into nominal cells with clipped edges
//! - Matching each cell against a candidate pool and pasting the winner

/// Candidate pasting and whole-image compositing
pub mod compositor;
/// Cell grid geometry
pub mod grid;

pub use compositor::{Composite, Paste, TileLayout, composite};
pub use grid::{Cell, CellGrid};
