//! Mode-specific dissimilarity between signatures
//!
//! Smaller is more similar and identical signatures score zero. Every metric
//! here is symmetric in its arguments.

use crate::io::error::{PuzzleError, Result};
use crate::signature::{PerceptualHash, Signature};

/// Perceptually weighted ("redmean") RGB distance
///
/// Red and blue differences are weighted by the mean red level of the two
/// colors; green carries a fixed weight of 4. This ranks colors differently
/// from plain Euclidean distance and the constants must stay as written.
pub fn redmean(a: [f64; 3], b: [f64; 3]) -> f64 {
    let [r1, g1, b1] = a;
    let [r2, g2, b2] = b;

    let r_mean = (r1 + r2) / 2.0;
    let dr = r1 - r2;
    let dg = g1 - g2;
    let db = b1 - b2;

    ((2.0 + r_mean / 256.0) * dr * dr
        + 4.0 * dg * dg
        + (2.0 + (255.0 - r_mean) / 256.0) * db * db)
        .sqrt()
}

/// Absolute difference of two luminance means
pub fn gray(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Hamming distance between two hashes, in `0..=64`
pub fn hamming(a: &PerceptualHash, b: &PerceptualHash) -> u32 {
    a.hamming(b)
}

impl Signature {
    /// Distance to another signature of the same mode
    ///
    /// # Errors
    ///
    /// Returns `ModeMismatch` when the signatures come from different modes
    pub fn distance(&self, other: &Self) -> Result<f64> {
        match (self, other) {
            (Self::Rgb(a), Self::Rgb(b)) => Ok(redmean(*a, *b)),
            (Self::Gray(a), Self::Gray(b)) => Ok(gray(*a, *b)),
            (Self::Hash(a), Self::Hash(b)) => Ok(f64::from(hamming(a, b))),
            _ => Err(PuzzleError::ModeMismatch {
                expected: self.mode(),
                found: other.mode(),
            }),
        }
    }
}
