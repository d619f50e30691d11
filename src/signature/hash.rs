//! Average-hash fingerprints for structural matching
//!
//! A region is shrunk to an 8x8 luminance grid; each bit records whether the
//! corresponding cell is at least as bright as the grid mean. Bits are stored
//! row-major, most significant first, so the textual form reads left to right
//! and top to bottom.

use crate::io::configuration::HASH_BITS;
use crate::io::error::{PuzzleError, invalid_parameter};
use bitvec::prelude::*;
use std::fmt;
use std::str::FromStr;

// Backing storage for a 64-bit hash
type HashBits = BitArray<[u64; 1], Msb0>;

/// 64-bit mean-threshold perceptual hash
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PerceptualHash {
    bits: HashBits,
}

impl PerceptualHash {
    /// Threshold 64 luminance samples against their mean
    ///
    /// Samples equal to the mean map to `1`. Returns `None` unless exactly
    /// `HASH_BITS` samples are supplied.
    pub fn from_intensities(samples: &[u8]) -> Option<Self> {
        if samples.len() != HASH_BITS {
            return None;
        }

        let total: u32 = samples.iter().map(|&v| u32::from(v)).sum();
        let mean = f64::from(total) / HASH_BITS as f64;

        let mut bits = HashBits::new([0]);
        for (k, &value) in samples.iter().enumerate() {
            bits.set(k, f64::from(value) >= mean);
        }

        Some(Self { bits })
    }

    /// Number of bit positions where the two hashes differ, in `0..=64`
    pub fn hamming(&self, other: &Self) -> u32 {
        self.bits
            .iter()
            .by_vals()
            .zip(other.bits.iter().by_vals())
            .filter(|(a, b)| a != b)
            .count() as u32
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for PerceptualHash {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HASH_BITS {
            return Err(invalid_parameter(
                "hash",
                &s,
                &format!("expected {HASH_BITS} characters"),
            ));
        }

        let mut bits = HashBits::new([0]);
        for (k, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.set(k, false),
                '1' => bits.set(k, true),
                _ => return Err(invalid_parameter("hash", &s, &"only '0' and '1' allowed")),
            }
        }

        Ok(Self { bits })
    }
}
