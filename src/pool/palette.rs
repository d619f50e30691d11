//! Per-category color palettes loaded from flat text files
//!
//! Each palette file holds one color per line as a bracketed triple such as
//! `cluster 4 [ 10.4 20.6 250.1 ] weight 0.12`; text around the brackets is
//! ignored. The category id is the token after the first underscore of the
//! file name, so `centers_3.txt` feeds category `"3"`.

use crate::io::error::{PuzzleError, Result, file_system_error};
use crate::pool::CandidatePool;
use crate::signature::{MatchMode, Signature};
use crate::spatial::compositor::Paste;
use image::{Rgb, RgbImage};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static COLOR_TRIPLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\[\s*([^\s\[\]]+)\s+([^\s\[\]]+)\s+([^\s\[\]]+)\s*\]").ok()
});

/// Solid color candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor(pub [u8; 3]);

impl Paste for PaletteColor {
    fn paste(&self, canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32) {
        let right = x.saturating_add(width).min(canvas.width());
        let bottom = y.saturating_add(height).min(canvas.height());
        for py in y..bottom {
            for px in x..right {
                canvas.put_pixel(px, py, Rgb(self.0));
            }
        }
    }
}

/// Colors available to one category, in file order
#[derive(Debug, Clone)]
pub struct Palette {
    category: String,
    entries: Vec<(Signature, PaletteColor)>,
}

impl Palette {
    /// Build a palette from colors in match order
    pub fn new(category: impl Into<String>, colors: impl IntoIterator<Item = [u8; 3]>) -> Self {
        let entries = colors
            .into_iter()
            .map(|color| (Signature::from_color(color), PaletteColor(color)))
            .collect();
        Self {
            category: category.into(),
            entries,
        }
    }

    /// Load a palette file, deriving its category from the file name
    ///
    /// # Errors
    ///
    /// Returns an error if the file name has no category token, the file
    /// cannot be read, or any non-blank line lacks a well-formed triple
    pub fn from_file(path: &Path) -> Result<Self> {
        let category = category_from_file_name(path).ok_or_else(|| PuzzleError::PaletteParse {
            path: path.to_path_buf(),
            line: 0,
            reason: "file name has no '_<category>' token".to_string(),
        })?;

        let text = std::fs::read_to_string(path)
            .map_err(|e| file_system_error(path, "read palette", e))?;

        Self::parse(category, path, &text)
    }

    /// Parse palette text; `path` is only used for error reporting
    ///
    /// # Errors
    ///
    /// Returns `PaletteParse` naming the first malformed non-blank line
    pub fn parse(category: impl Into<String>, path: &Path, text: &str) -> Result<Self> {
        let mut colors = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let color = parse_color_line(line).map_err(|reason| PuzzleError::PaletteParse {
                path: path.to_path_buf(),
                line: index + 1,
                reason,
            })?;
            colors.push(color);
        }
        Ok(Self::new(category, colors))
    }

    /// Category id this palette serves
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Colors in match order
    pub fn colors(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.entries.iter().map(|(_, color)| color.0)
    }
}

impl CandidatePool for Palette {
    type Candidate = PaletteColor;

    fn mode(&self) -> MatchMode {
        MatchMode::Rgb
    }

    fn entries(&self) -> impl Iterator<Item = (&Signature, &PaletteColor)> {
        self.entries.iter().map(|(signature, color)| (signature, color))
    }

    fn paste_size(&self) -> Option<(u32, u32)> {
        None
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Palettes indexed by category id
#[derive(Debug, Clone, Default)]
pub struct PaletteSet {
    palettes: BTreeMap<String, Palette>,
}

impl PaletteSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every palette file directly inside `dir`
    ///
    /// Files are read in name order. A file that fails to parse is logged and
    /// skipped; a later file with the same category replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory itself cannot be listed
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| file_system_error(dir, "list palettes", e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let mut set = Self::new();
        for path in files {
            match Palette::from_file(&path) {
                Ok(palette) => {
                    debug!(
                        path = %path.display(),
                        category = palette.category(),
                        colors = palette.len(),
                        "loaded palette"
                    );
                    if palette.is_empty() {
                        warn!(path = %path.display(), "palette has no colors");
                    }
                    if let Some(previous) = set.insert(palette) {
                        warn!(
                            path = %path.display(),
                            category = previous.category(),
                            "palette replaces an earlier file for the same category"
                        );
                    }
                }
                Err(error) => warn!(%error, "skipping palette file"),
            }
        }
        Ok(set)
    }

    /// Add a palette, returning any palette it replaced
    pub fn insert(&mut self, palette: Palette) -> Option<Palette> {
        self.palettes.insert(palette.category.clone(), palette)
    }

    /// Palette for `category`
    ///
    /// # Errors
    ///
    /// Returns `MissingCategory` if no palette was loaded for it
    pub fn get(&self, category: &str) -> Result<&Palette> {
        self.palettes
            .get(category)
            .ok_or_else(|| PuzzleError::MissingCategory {
                category: category.to_string(),
            })
    }

    /// Loaded category ids in sorted order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.palettes.keys().map(String::as_str)
    }

    /// Number of loaded palettes
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True when no palette was loaded
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Extract the first bracketed `r g b` triple from a line
///
/// Components are parsed as floats, rounded half-to-even and clamped to
/// `0..=255`.
///
/// # Errors
///
/// Returns a description of the problem when no triple is present or a
/// component is not a finite number
pub fn parse_color_line(line: &str) -> std::result::Result<[u8; 3], String> {
    let pattern = COLOR_TRIPLE
        .as_ref()
        .ok_or_else(|| "color pattern failed to compile".to_string())?;
    let captures = pattern
        .captures(line)
        .ok_or_else(|| format!("no '[ r g b ]' triple in {line:?}"))?;

    let mut color = [0u8; 3];
    for (slot, group) in color.iter_mut().zip(1..=3) {
        let token = captures.get(group).map_or("", |m| m.as_str());
        let value: f64 = token
            .parse()
            .map_err(|e| format!("'{token}' is not a number: {e}"))?;
        if !value.is_finite() {
            return Err(format!("'{token}' is not finite"));
        }
        *slot = value.round_ties_even().clamp(0.0, 255.0) as u8;
    }
    Ok(color)
}

/// Category id encoded in a palette file name
///
/// Takes the name up to its first `.`, then the token between the first and
/// second underscores.
pub fn category_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    let category = stem.split('_').nth(1)?;
    (!category.is_empty()).then(|| category.to_string())
}
