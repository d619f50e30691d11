//! Reconstruction error between source images and their puzzles

use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::io::image::load_rgb;
use crate::io::jobs::{category_from_folder, color_jobs, require_dir};
use image::RgbImage;
use image::imageops;
use ndarray::Array3;
use std::path::Path;
use tracing::{info, warn};

/// Mean reconstruction error for one category folder
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    /// Folder name under the source root
    pub folder: String,
    /// Category id (last `_` token of the folder name)
    pub category: String,
    /// Number of image pairs compared
    pub images: usize,
    /// Average per-image RMSE
    pub mean_rmse: f64,
}

/// Channel values as a `(height, width, 3)` array
pub fn to_array(image: &RgbImage) -> Array3<f64> {
    let (width, height) = image.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        image
            .get_pixel_checked(x as u32, y as u32)
            .and_then(|pixel| pixel.0.get(c).copied())
            .map_or(0.0, f64::from)
    })
}

/// Root mean square channel error of `puzzle` against `source`
///
/// Color puzzles may be padded past the source's right and bottom edges, so
/// the comparison covers the source's extent only.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the puzzle is smaller than the source in
/// either direction, and `InvalidParameter` if the source has no pixels
pub fn root_mean_square_error(source: &RgbImage, puzzle: &RgbImage) -> Result<f64> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "source",
            &format!("{width}x{height}"),
            &"cannot score an empty image",
        ));
    }
    if puzzle.width() < width || puzzle.height() < height {
        return Err(PuzzleError::DimensionMismatch {
            left: source.dimensions(),
            right: puzzle.dimensions(),
        });
    }

    let expected = to_array(source);
    let actual = to_array(&imageops::crop_imm(puzzle, 0, 0, width, height).to_image());

    let diff = &expected - &actual;
    let squared: f64 = diff.iter().map(|v| v * v).sum();
    Ok((squared / expected.len() as f64).sqrt())
}

/// Compare two image files
///
/// # Errors
///
/// Returns an error if either file cannot be decoded or the sizes are
/// incompatible
pub fn compare_files(source: &Path, puzzle: &Path) -> Result<f64> {
    root_mean_square_error(&load_rgb(source)?, &load_rgb(puzzle)?)
}

/// Score a finished color-puzzle run folder by folder
///
/// Walks `source_root/<folder>/<file>` and pairs each file with
/// `output_root/<folder>/<stem>-colorPuzzle.jpg`. Pairs that fail to load or
/// compare are logged and left out of the average; folders with no usable
/// pairs are omitted.
///
/// # Errors
///
/// Returns an error if either root is not a directory or cannot be listed
pub fn evaluate_color_run(source_root: &Path, output_root: &Path) -> Result<Vec<CategoryScore>> {
    require_dir(source_root)?;
    require_dir(output_root)?;

    let mut scores = Vec::new();
    for job in color_jobs(source_root, output_root)? {
        let folder = job
            .input
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str());
        let (Some(folder), Some(category)) = (folder, category_from_folder(&job.input)) else {
            continue;
        };

        match compare_files(&job.input, &job.output) {
            Ok(rmse) => record(&mut scores, folder, category, rmse),
            Err(error) => warn!(input = %job.input.display(), %error, "skipping pair"),
        }
    }

    for score in &mut scores {
        score.mean_rmse /= score.images as f64;
        info!(
            folder = %score.folder,
            category = %score.category,
            images = score.images,
            mean_rmse = score.mean_rmse,
            "category scored"
        );
    }
    Ok(scores)
}

// Accumulates a running sum in `mean_rmse`; the caller divides at the end
fn record(scores: &mut Vec<CategoryScore>, folder: &str, category: String, rmse: f64) {
    if let Some(score) = scores.iter_mut().find(|s| s.folder == folder) {
        score.images += 1;
        score.mean_rmse += rmse;
    } else {
        scores.push(CategoryScore {
            folder: folder.to_string(),
            category,
            images: 1,
            mean_rmse: rmse,
        });
    }
}
