//! Region signatures for the three match modes

/// Signature extraction from image regions
pub mod extract;
/// 64-bit average hash
pub mod hash;
/// Match mode selection and parsing
pub mod mode;

pub use extract::{Region, Signature, SignatureKey, extract};
pub use hash::PerceptualHash;
pub use mode::MatchMode;
