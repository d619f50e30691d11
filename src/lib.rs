//! Nearest-match tiling for color-quantization and photo-mosaic puzzles
//!
//! A target image is cut into a grid of fixed-size cells. Each cell is
//! summarized (mean color, mean luminance or average hash), matched against a
//! precomputed candidate pool, and replaced by the winning palette color or
//! tile thumbnail in a freshly allocated canvas.

#![forbid(unsafe_code)]

/// Filesystem, command-line and batch-execution plumbing
pub mod io;
/// Distance metrics and nearest-match search
pub mod matching;
/// Candidate pools: color palettes and tile libraries
pub mod pool;
/// Region signatures under each match mode
pub mod signature;
/// Grid geometry and canvas compositing
pub mod spatial;

pub use io::error::{PuzzleError, Result};
