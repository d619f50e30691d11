//! Thumbnail pool for photo mosaics
//!
//! Every library image is summarized from its full-resolution pixels, then
//! shrunk to the fixed thumbnail size. Entries are keyed by exact signature:
//! inserting a signature that is already present replaces the stored
//! thumbnail but keeps the entry's original position. Tiles that happen to
//! share a signature (solid fills are the usual culprit) therefore collapse
//! to the last one inserted.

use crate::io::driver::run_buckets;
use crate::io::error::{PuzzleError, Result, file_system_error, require_positive};
use crate::io::image::load_rgb;
use crate::pool::CandidatePool;
use crate::signature::{MatchMode, Region, Signature, SignatureKey, extract};
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Signature-keyed thumbnails in first-insertion order
#[derive(Debug, Clone)]
pub struct TilePool {
    mode: MatchMode,
    thumbnail_width: u32,
    thumbnail_height: u32,
    entries: Vec<(Signature, RgbImage)>,
    index: HashMap<SignatureKey, usize>,
}

impl TilePool {
    /// Create an empty pool for thumbnails of the given size
    pub fn new(mode: MatchMode, thumbnail_width: u32, thumbnail_height: u32) -> Self {
        Self {
            mode,
            thumbnail_width,
            thumbnail_height,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Thumbnail dimensions (width, height)
    pub const fn thumbnail_size(&self) -> (u32, u32) {
        (self.thumbnail_width, self.thumbnail_height)
    }

    /// Insert a thumbnail under `signature`
    ///
    /// Returns the thumbnail previously stored under an identical signature.
    ///
    /// # Errors
    ///
    /// Returns `ModeMismatch` if the signature was computed under another
    /// mode, or `DimensionMismatch` if the thumbnail is not the pool's size
    pub fn insert(&mut self, signature: Signature, thumbnail: RgbImage) -> Result<Option<RgbImage>> {
        if signature.mode() != self.mode {
            return Err(PuzzleError::ModeMismatch {
                expected: self.mode,
                found: signature.mode(),
            });
        }
        if thumbnail.dimensions() != self.thumbnail_size() {
            return Err(PuzzleError::DimensionMismatch {
                left: self.thumbnail_size(),
                right: thumbnail.dimensions(),
            });
        }

        let key = signature.key();
        if let Some(&position) = self.index.get(&key)
            && let Some(entry) = self.entries.get_mut(position)
        {
            return Ok(Some(std::mem::replace(&mut entry.1, thumbnail)));
        }

        self.index.insert(key, self.entries.len());
        self.entries.push((signature, thumbnail));
        Ok(None)
    }

    /// Fold another pool into this one, applying its entries in order
    ///
    /// Returns how many of the merged entries replaced existing ones.
    ///
    /// # Errors
    ///
    /// Propagates `insert` failures for mismatched modes or sizes
    pub fn merge(&mut self, other: Self) -> Result<usize> {
        let mut collisions = 0;
        for (signature, thumbnail) in other.entries {
            if self.insert(signature, thumbnail)?.is_some() {
                collisions += 1;
            }
        }
        Ok(collisions)
    }

    /// Summarize a full-size image and shrink it to a thumbnail
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn prepare_tile(
        image: &RgbImage,
        mode: MatchMode,
        thumbnail_width: u32,
        thumbnail_height: u32,
    ) -> Result<(Signature, RgbImage)> {
        let signature = extract(image, Region::whole(image), mode)?;
        let thumbnail = imageops::resize(
            image,
            thumbnail_width,
            thumbnail_height,
            FilterType::Lanczos3,
        );
        Ok((signature, thumbnail))
    }

    /// Build a pool from every file directly inside `dir`
    ///
    /// Files are dealt round-robin across `workers` threads; each thread fills
    /// a private pool and the private pools are merged in worker order once
    /// all threads finish. Undecodable files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, a size or worker
    /// count is zero, or the worker pool cannot be started
    pub fn load_dir(
        dir: &Path,
        mode: MatchMode,
        thumbnail_width: u32,
        thumbnail_height: u32,
        workers: usize,
    ) -> Result<Self> {
        require_positive("sub_image_width", thumbnail_width)?;
        require_positive("sub_image_height", thumbnail_height)?;

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| file_system_error(dir, "list tile library", e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        let file_count = files.len();

        let partials = run_buckets(files, workers, |bucket| {
            let mut local = Self::new(mode, thumbnail_width, thumbnail_height);
            let mut local_collisions = 0;
            for path in bucket {
                let tile = load_rgb(&path).and_then(|image| {
                    Self::prepare_tile(&image, mode, thumbnail_width, thumbnail_height)
                });
                match tile.and_then(|(signature, thumbnail)| local.insert(signature, thumbnail)) {
                    Ok(Some(_)) => {
                        local_collisions += 1;
                        debug!(path = %path.display(), "tile replaces an identical signature");
                    }
                    Ok(None) => {}
                    Err(error) => warn!(%error, "skipping tile"),
                }
            }
            (local, local_collisions)
        })?;

        let mut pool = Self::new(mode, thumbnail_width, thumbnail_height);
        let mut collisions = 0;
        for (partial, local_collisions) in partials {
            collisions += local_collisions + pool.merge(partial)?;
        }

        info!(
            files = file_count,
            tiles = pool.len(),
            collisions,
            "tile library loaded"
        );
        Ok(pool)
    }
}

impl CandidatePool for TilePool {
    type Candidate = RgbImage;

    fn mode(&self) -> MatchMode {
        self.mode
    }

    fn entries(&self) -> impl Iterator<Item = (&Signature, &RgbImage)> {
        self.entries
            .iter()
            .map(|(signature, thumbnail)| (signature, thumbnail))
    }

    fn paste_size(&self) -> Option<(u32, u32)> {
        Some(self.thumbnail_size())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
