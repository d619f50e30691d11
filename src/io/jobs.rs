//! Discovery of puzzle jobs and their output paths

use crate::io::configuration::{COLOR_OUTPUT_SUFFIX, MOSAIC_OUTPUT_SUFFIX, OUTPUT_EXTENSION};
use crate::io::driver::Job;
use crate::io::error::{Result, file_system_error, invalid_parameter};
use std::path::{Path, PathBuf};

/// Output file name for `input`: its name up to the first `.`, then `suffix`
pub fn output_name(input: &Path, suffix: &str) -> Option<String> {
    let name = input.file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    Some(format!("{stem}{suffix}.{OUTPUT_EXTENSION}"))
}

/// Category id of a color-puzzle target: the last `_` token of its folder name
pub fn category_from_folder(input: &Path) -> Option<String> {
    let folder = input.parent()?.file_name()?.to_str()?;
    folder.rsplit('_').next().map(str::to_string)
}

/// Jobs for a color puzzle run
///
/// A file target maps straight to `output`. A directory target is read as a
/// set of category folders; every file inside `target/<folder>/` produces
/// `output/<folder>/<stem>-colorPuzzle.jpg`.
///
/// # Errors
///
/// Returns an error if the target does not exist or a directory cannot be
/// listed
pub fn color_jobs(target: &Path, output: &Path) -> Result<Vec<Job>> {
    if target.is_file() {
        return Ok(vec![Job::new(target, output)]);
    }
    require_dir(target)?;

    let mut jobs = Vec::new();
    for folder in sorted_entries(target)? {
        if !folder.is_dir() {
            continue;
        }
        let Some(folder_name) = folder.file_name() else {
            continue;
        };
        let output_folder = output.join(folder_name);
        jobs.extend(file_jobs(&folder, &output_folder, COLOR_OUTPUT_SUFFIX)?);
    }
    Ok(jobs)
}

/// Jobs for a mosaic run
///
/// A file target maps straight to `output`. A directory target contributes
/// each file directly inside it as `output/<stem>-puzzle.jpg`.
///
/// # Errors
///
/// Returns an error if the target does not exist or cannot be listed
pub fn mosaic_jobs(target: &Path, output: &Path) -> Result<Vec<Job>> {
    if target.is_file() {
        return Ok(vec![Job::new(target, output)]);
    }
    require_dir(target)?;
    file_jobs(target, output, MOSAIC_OUTPUT_SUFFIX)
}

/// Fail unless `path` is an existing directory
///
/// # Errors
///
/// Returns `InvalidParameter` for anything that is not a directory
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(invalid_parameter(
            "path",
            &path.display(),
            &"expected an existing directory",
        ))
    }
}

fn file_jobs(dir: &Path, output_dir: &Path, suffix: &str) -> Result<Vec<Job>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = output_name(&path, suffix)?;
            Some(Job::new(path, output_dir.join(name)))
        })
        .collect())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| file_system_error(dir, "list directory", e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    Ok(paths)
}
