//! Image decoding and crash-safe encoding

use crate::io::error::{PuzzleError, Result, file_system_error};
use image::{ImageFormat, RgbImage};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Decode any supported image file into 8-bit RGB
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| PuzzleError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Encode `image` to `path`, choosing the format from the extension
///
/// The image is written to a temporary file beside the destination and
/// renamed into place, so an interrupted run never leaves a partial output.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if:
/// - The extension does not name a supported format
/// - The parent directory or temporary file cannot be created
/// - Encoding fails or the rename cannot be completed
pub fn save_atomic(image: &RgbImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).map_err(|e| PuzzleError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| file_system_error(parent, "create directory", e))?;

    let mut staging = NamedTempFile::new_in(parent)
        .map_err(|e| file_system_error(parent, "create temporary file", e))?;
    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(|e| PuzzleError::ImageExport {
                path: path.to_path_buf(),
                source: e,
            })?;
        writer
            .flush()
            .map_err(|e| file_system_error(path, "flush image", e))?;
    }

    staging
        .persist(path)
        .map_err(|e| file_system_error(path, "rename into place", e.error))?;
    Ok(())
}
