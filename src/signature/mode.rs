//! Match mode selection

use crate::io::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// Strategy used to summarize a region and compare summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Per-channel mean color compared with the redmean distance
    Rgb,
    /// Mean luminance compared by absolute difference
    Gray,
    /// 64-bit average hash compared by Hamming distance
    Hash,
}

impl MatchMode {
    /// Canonical lower-case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Gray => "gray",
            Self::Hash => "hash",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "gray" | "grey" | "grayscale" => Ok(Self::Gray),
            "hash" | "phash" => Ok(Self::Hash),
            _ => Err(PuzzleError::UnknownMode(s.to_string())),
        }
    }
}
