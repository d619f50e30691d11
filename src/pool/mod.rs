//! Candidate pools built once per run and shared read-only while compositing

/// Tile-image pool for mosaics
pub mod mosaic;
/// Per-category color palettes for color puzzles
pub mod palette;

use crate::signature::{MatchMode, Signature};

pub use mosaic::TilePool;
pub use palette::{Palette, PaletteColor, PaletteSet};

/// Ordered collection of signature-keyed candidates
///
/// Iteration order is part of the contract: nearest-match search resolves
/// ties in favor of the earliest entry.
pub trait CandidatePool {
    /// Content pasted into the canvas when a candidate wins
    type Candidate;

    /// Mode shared by every signature in the pool
    fn mode(&self) -> MatchMode;

    /// All entries in iteration order
    fn entries(&self) -> impl Iterator<Item = (&Signature, &Self::Candidate)>;

    /// Size every candidate pastes at, or `None` if candidates fill any box
    fn paste_size(&self) -> Option<(u32, u32)>;

    /// Number of entries
    fn len(&self) -> usize;

    /// True when the pool has no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
