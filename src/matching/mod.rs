//! Distance metrics and nearest-match search over candidate pools

/// Mode-specific distance metrics
pub mod distance;
/// Linear nearest-candidate scan
pub mod search;

pub use search::{Match, nearest};
