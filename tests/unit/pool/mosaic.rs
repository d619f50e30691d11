//! Tests for the signature-keyed thumbnail pool

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use puzzletile::PuzzleError;
    use puzzletile::pool::{CandidatePool, TilePool};
    use puzzletile::signature::{MatchMode, Signature};
    use std::fs;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    // Tests an identical signature replaces the thumbnail in place
    // Verified by appending the replacement at the end
    #[test]
    fn test_collision_replaces_in_place() {
        let mut pool = TilePool::new(MatchMode::Gray, 2, 2);

        let first = pool.insert(Signature::Gray(10.0), solid(2, 2, [1; 3]));
        let second = pool.insert(Signature::Gray(20.0), solid(2, 2, [2; 3]));
        let replaced = pool.insert(Signature::Gray(10.0), solid(2, 2, [3; 3]));

        assert!(matches!(first, Ok(None)));
        assert!(matches!(second, Ok(None)));
        assert_eq!(replaced.ok().flatten(), Some(solid(2, 2, [1; 3])));

        let stored: Vec<_> = pool.entries().map(|(s, t)| (s.clone(), *t.get_pixel(0, 0))).collect();
        assert_eq!(
            stored,
            vec![
                (Signature::Gray(10.0), Rgb([3; 3])),
                (Signature::Gray(20.0), Rgb([2; 3])),
            ]
        );
    }

    // Tests signatures of another mode and wrongly sized thumbnails are refused
    // Verified by resizing mismatched thumbnails on insert
    #[test]
    fn test_insert_validates_mode_and_size() {
        let mut pool = TilePool::new(MatchMode::Rgb, 3, 2);

        assert!(matches!(
            pool.insert(Signature::Gray(1.0), solid(3, 2, [0; 3])),
            Err(PuzzleError::ModeMismatch { .. })
        ));
        assert!(matches!(
            pool.insert(Signature::from_color([0; 3]), solid(2, 3, [0; 3])),
            Err(PuzzleError::DimensionMismatch { .. })
        ));
        assert!(pool.is_empty());
    }

    // Tests merging applies the other pool's entries in order and counts replacements
    // Verified by merging in reverse order
    #[test]
    fn test_merge_preserves_order() {
        let mut left = TilePool::new(MatchMode::Gray, 1, 1);
        let mut right = TilePool::new(MatchMode::Gray, 1, 1);
        for value in [1.0, 2.0] {
            let _ = left.insert(Signature::Gray(value), solid(1, 1, [0; 3]));
        }
        for value in [3.0, 2.0, 4.0] {
            let _ = right.insert(Signature::Gray(value), solid(1, 1, [9; 3]));
        }

        assert_eq!(left.merge(right).ok(), Some(1));

        let order: Vec<_> = left.entries().map(|(s, _)| s.clone()).collect();
        assert_eq!(
            order,
            [1.0, 2.0, 3.0, 4.0].map(Signature::Gray).to_vec()
        );
    }

    // Tests the signature comes from the full image, not the thumbnail
    // Verified by extracting after resizing
    #[test]
    fn test_prepare_tile_summarizes_full_image() {
        let image = RgbImage::from_fn(100, 1, |x, _| if x < 99 { Rgb([0; 3]) } else { Rgb([200; 3]) });

        let (signature, thumbnail) = TilePool::prepare_tile(&image, MatchMode::Rgb, 4, 3)
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(signature, Signature::Rgb([2.0, 2.0, 2.0]));
        assert_eq!(thumbnail.dimensions(), (4, 3));
    }

    // Tests a directory load skips undecodable files and collapses duplicates
    // Verified by aborting on the first undecodable file
    #[test]
    fn test_load_dir_with_duplicates_and_junk() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| unreachable!("{e}"));
        for (name, color) in [("a.png", [200, 0, 0]), ("b.png", [0, 0, 200]), ("c.png", [200, 0, 0])] {
            solid(6, 6, color)
                .save(dir.path().join(name))
                .unwrap_or_else(|e| unreachable!("{e}"));
        }
        fs::write(dir.path().join("junk.png"), b"not an image").unwrap_or_else(|e| unreachable!("{e}"));

        let pool = TilePool::load_dir(dir.path(), MatchMode::Rgb, 3, 2, 2)
            .unwrap_or_else(|e| unreachable!("{e}"));

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.thumbnail_size(), (3, 2));
        let order: Vec<_> = pool.entries().map(|(s, _)| s.clone()).collect();
        assert_eq!(
            order,
            vec![Signature::from_color([200, 0, 0]), Signature::from_color([0, 0, 200])]
        );
    }

    // Tests zero thumbnail sizes and worker counts fail before any work
    // Verified by removing the size validation
    #[test]
    fn test_load_dir_rejects_zero_parameters() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| unreachable!("{e}"));

        assert!(TilePool::load_dir(dir.path(), MatchMode::Hash, 0, 5, 1).is_err());
        assert!(TilePool::load_dir(dir.path(), MatchMode::Hash, 5, 5, 0).is_err());
        assert!(
            TilePool::load_dir(dir.path(), MatchMode::Hash, 5, 5, 3)
                .map(|pool| pool.is_empty())
                .unwrap_or(false)
        );
    }

    // Tests the pool reports its thumbnail size as the paste size
    // Verified by reporting no fixed paste size for tile pools
    #[test]
    fn test_paste_size_is_thumbnail_size() {
        let pool = TilePool::new(MatchMode::Rgb, 3, 2);
        assert_eq!(pool.paste_size(), Some((3, 2)));
    }
}
